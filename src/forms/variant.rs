use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use validator::Validate;

use super::{is_blank, money, FieldErrors, ImageRules, SKU_REGEX};
use crate::entities::{Attribute, Category, Variant};

/// The part of a category attribute the variant forms need.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatrixAttribute {
    pub id: i64,
    pub name: String,
    pub has_images: bool,
}

impl From<&Attribute> for MatrixAttribute {
    fn from(attribute: &Attribute) -> Self {
        Self {
            id: attribute.id,
            name: attribute.name.clone(),
            has_images: attribute.has_images,
        }
    }
}

/// One purchasable row: the reusable option sub-form.
#[derive(Clone, Debug, Default, PartialEq, Validate)]
pub struct OptionForm {
    pub id: Option<i64>,
    #[validate(range(min = 1, message = "attribute value is required"))]
    pub attribute_value_id: i64,
    pub value_label: String,
    #[validate(regex(
        path = *SKU_REGEX,
        message = "SKU must be 2 to 40 letters, digits, '-' or '_'"
    ))]
    pub sku: String,
    #[validate(custom(function = "money"))]
    pub mrp: Decimal,
    #[validate(custom(function = "money"))]
    pub selling_price: Decimal,
    #[validate(custom(function = "money"))]
    pub base_price: Decimal,
    #[validate(range(min = 0, message = "stock cannot be negative"))]
    pub stock: i64,
    #[validate(length(max = 200, message = "title is too long"))]
    pub title: Option<String>,
    pub image: Option<String>,
    pub images: Vec<String>,
    pub status: bool,
}

/// Rows sharing one value of the primary attribute in a two-attribute product.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VariantGroup {
    pub attribute_value_id: i64,
    pub value_label: String,
    pub image: Option<String>,
    pub images: Vec<String>,
    pub options: Vec<OptionForm>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum VariantMatrix {
    #[default]
    None,
    Single {
        attribute: MatrixAttribute,
        rows: Vec<OptionForm>,
    },
    Double {
        primary: MatrixAttribute,
        secondary: MatrixAttribute,
        groups: Vec<VariantGroup>,
    },
}

/// A variant as the create/update product endpoints expect it.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct VariantPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub sku: String,
    pub mrp: Decimal,
    pub selling_price: Decimal,
    pub base_price: Decimal,
    pub stock: i64,
    pub title: Option<String>,
    pub image: Option<String>,
    pub images: Vec<String>,
    pub status: bool,
    pub attribute_value_ids: Vec<i64>,
}

impl OptionForm {
    pub fn new(attribute_value_id: i64, value_label: impl Into<String>) -> Self {
        Self {
            attribute_value_id,
            value_label: value_label.into(),
            status: true,
            ..Default::default()
        }
    }

    fn from_variant(variant: &Variant, value_id: i64, label: &str) -> Self {
        Self {
            id: variant.id,
            attribute_value_id: value_id,
            value_label: label.to_string(),
            sku: variant.sku.clone(),
            mrp: variant.mrp,
            selling_price: variant.selling_price,
            base_price: variant.base_price,
            stock: variant.stock,
            title: variant.title.clone(),
            image: variant.image.clone(),
            images: variant.images.clone(),
            status: variant.status,
        }
    }

    fn check(&self, path: &str, image_required: bool, errors: &mut FieldErrors) {
        if let Err(validation) = self.validate() {
            errors.extend_validation(path, &validation);
        }
        if self.selling_price > self.mrp {
            errors.add(
                format!("{path}.selling_price"),
                "selling price cannot exceed MRP",
            );
        }
        if self.base_price > self.selling_price {
            errors.add(
                format!("{path}.base_price"),
                "base price cannot exceed selling price",
            );
        }
        if image_required && is_blank(&self.image) {
            errors.add(format!("{path}.image"), "image is required");
        }
    }
}

impl VariantGroup {
    pub fn new(attribute_value_id: i64, value_label: impl Into<String>) -> Self {
        Self {
            attribute_value_id,
            value_label: value_label.into(),
            ..Default::default()
        }
    }
}

impl VariantMatrix {
    /// Empty matrix shaped by the category's variant-defining attributes.
    pub fn for_category(category: &Category) -> Self {
        match category.variant_attributes().as_slice() {
            [] => VariantMatrix::None,
            [attribute] => VariantMatrix::Single {
                attribute: MatrixAttribute::from(*attribute),
                rows: Vec::new(),
            },
            [primary, secondary, ..] => VariantMatrix::Double {
                primary: MatrixAttribute::from(*primary),
                secondary: MatrixAttribute::from(*secondary),
                groups: Vec::new(),
            },
        }
    }

    /// Rebuilds the editable matrix from stored variants. Variants whose
    /// attribute values do not fit the category are dropped.
    pub fn from_variants(category: &Category, variants: &[Variant]) -> Self {
        let attributes = category.variant_attributes();
        let label = |attribute: &Attribute, id: i64| {
            attribute.value_label(id).unwrap_or_default().to_string()
        };

        match Self::for_category(category) {
            VariantMatrix::None => VariantMatrix::None,
            VariantMatrix::Single { attribute, .. } => {
                let rows = variants
                    .iter()
                    .filter_map(|variant| {
                        let value_id = *variant.attribute_value_ids.first()?;
                        Some(OptionForm::from_variant(
                            variant,
                            value_id,
                            &label(attributes[0], value_id),
                        ))
                    })
                    .collect();
                VariantMatrix::Single { attribute, rows }
            }
            VariantMatrix::Double {
                primary, secondary, ..
            } => {
                let mut groups: Vec<VariantGroup> = Vec::new();
                let mut members: Vec<Vec<(&Variant, i64)>> = Vec::new();
                let mut index_of: HashMap<i64, usize> = HashMap::new();
                for variant in variants {
                    let [group_id, option_id] = match variant.attribute_value_ids.as_slice() {
                        [group_id, option_id, ..] => [*group_id, *option_id],
                        _ => continue,
                    };
                    let index = *index_of.entry(group_id).or_insert_with(|| {
                        groups.push(VariantGroup::new(group_id, label(attributes[0], group_id)));
                        members.push(Vec::new());
                        groups.len() - 1
                    });
                    members[index].push((variant, option_id));
                }

                for (group, members) in groups.iter_mut().zip(&members) {
                    if primary.has_images {
                        group.image = members.first().and_then(|(variant, _)| variant.image.clone());
                        // Stored lists are group images followed by option images,
                        // so the group owns the prefix every member shares.
                        group.images = match members.split_first() {
                            Some(((first, _), rest)) if secondary.has_images => {
                                let shared = rest.iter().fold(first.images.len(), |shared, (variant, _)| {
                                    first.images[..shared]
                                        .iter()
                                        .zip(&variant.images)
                                        .take_while(|(a, b)| a == b)
                                        .count()
                                });
                                first.images[..shared].to_vec()
                            }
                            Some(((first, _), _)) => first.images.clone(),
                            None => Vec::new(),
                        };
                    }
                    let shared = group.images.len();
                    for (variant, option_id) in members {
                        let mut option = OptionForm::from_variant(
                            variant,
                            *option_id,
                            &label(attributes[1], *option_id),
                        );
                        if !secondary.has_images {
                            option.image = None;
                            option.images.clear();
                        } else if primary.has_images {
                            option.images = option.images.split_off(shared.min(option.images.len()));
                        }
                        group.options.push(option);
                    }
                }
                VariantMatrix::Double {
                    primary,
                    secondary,
                    groups,
                }
            }
        }
    }

    pub fn image_rules(&self) -> ImageRules {
        match self {
            VariantMatrix::None => ImageRules::default(),
            VariantMatrix::Single { attribute, .. } => ImageRules::new(attribute.has_images, false),
            VariantMatrix::Double {
                primary, secondary, ..
            } => ImageRules::new(primary.has_images, secondary.has_images),
        }
    }

    /// Number of variants the matrix will produce.
    pub fn len(&self) -> usize {
        match self {
            VariantMatrix::None => 0,
            VariantMatrix::Single { rows, .. } => rows.len(),
            VariantMatrix::Double { groups, .. } => {
                groups.iter().map(|group| group.options.len()).sum()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row-level rules, image requirements and SKU uniqueness.
    pub fn check(&self, errors: &mut FieldErrors) {
        let rules = self.image_rules();
        let mut skus: HashMap<String, String> = HashMap::new();
        let mut track_sku = |row: &OptionForm, path: &str, errors: &mut FieldErrors| {
            let key = row.sku.trim().to_lowercase();
            if key.is_empty() {
                return;
            }
            if skus.contains_key(&key) {
                errors.add(format!("{path}.sku"), "SKU duplicates another variant");
            } else {
                skus.insert(key, path.to_string());
            }
        };

        match self {
            VariantMatrix::None => {}
            VariantMatrix::Single { rows, .. } => {
                if rows.is_empty() {
                    errors.add("variants", "add at least one variant");
                }
                let mut values = Vec::new();
                for (index, row) in rows.iter().enumerate() {
                    let path = format!("variants[{index}]");
                    row.check(&path, rules.primary_image_required(), errors);
                    if values.contains(&row.attribute_value_id) {
                        errors.add(
                            format!("{path}.attribute_value_id"),
                            "value already has a variant",
                        );
                    }
                    values.push(row.attribute_value_id);
                    track_sku(row, &path, errors);
                }
            }
            VariantMatrix::Double { groups, .. } => {
                if groups.is_empty() {
                    errors.add("variants", "add at least one variant");
                }
                let mut group_values = Vec::new();
                for (group_index, group) in groups.iter().enumerate() {
                    let group_path = format!("variants[{group_index}]");
                    if group.attribute_value_id < 1 {
                        errors.add(
                            format!("{group_path}.attribute_value_id"),
                            "attribute value is required",
                        );
                    } else if group_values.contains(&group.attribute_value_id) {
                        errors.add(
                            format!("{group_path}.attribute_value_id"),
                            "value already has a variant",
                        );
                    }
                    group_values.push(group.attribute_value_id);
                    if rules.primary_image_required() && is_blank(&group.image) {
                        errors.add(format!("{group_path}.image"), "image is required");
                    }
                    if group.options.is_empty() {
                        errors.add(
                            format!("{group_path}.options"),
                            "add at least one option",
                        );
                    }

                    let mut option_values = Vec::new();
                    for (option_index, option) in group.options.iter().enumerate() {
                        let path = format!("{group_path}.options[{option_index}]");
                        option.check(&path, rules.secondary_image_required(), errors);
                        if option_values.contains(&option.attribute_value_id) {
                            errors.add(
                                format!("{path}.attribute_value_id"),
                                "value already has a variant",
                            );
                        }
                        option_values.push(option.attribute_value_id);
                        track_sku(option, &path, errors);
                    }
                }
            }
        }
    }
}
