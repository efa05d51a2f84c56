//! Turns the nested variant forms into the flat list the backend stores.

use super::variant::{OptionForm, VariantGroup, VariantMatrix, VariantPayload};
use super::{non_blank, ImageRules};

fn clean_list(images: &[String]) -> Vec<String> {
    images
        .iter()
        .map(|image| image.trim())
        .filter(|image| !image.is_empty())
        .map(str::to_string)
        .collect()
}

/// Main image of a two-attribute variant.
pub fn image_url(rules: ImageRules, group: &VariantGroup, option: &OptionForm) -> Option<String> {
    match (rules.primary_has_images, rules.secondary_has_images) {
        (false, false) => None,
        (true, false) => non_blank(&group.image),
        (false, true) => non_blank(&option.image),
        (true, true) => non_blank(&group.image).or_else(|| non_blank(&option.image)),
    }
}

/// Image list of a two-attribute variant.
pub fn image_list(rules: ImageRules, group: &VariantGroup, option: &OptionForm) -> Vec<String> {
    match (rules.primary_has_images, rules.secondary_has_images) {
        (false, false) => Vec::new(),
        (true, false) => clean_list(&group.images),
        (false, true) => clean_list(&option.images),
        (true, true) => {
            let mut images = clean_list(&group.images);
            for image in clean_list(&option.images) {
                if !images.contains(&image) {
                    images.push(image);
                }
            }
            images
        }
    }
}

/// `"{group} - {option}"` unless the option carries its own title.
pub fn combined_title(group: &VariantGroup, option: &OptionForm) -> Option<String> {
    if let Some(title) = non_blank(&option.title) {
        return Some(title);
    }
    let parts: Vec<&str> = [group.value_label.trim(), option.value_label.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" - "))
    }
}

fn base_payload(option: &OptionForm) -> VariantPayload {
    VariantPayload {
        id: option.id,
        sku: option.sku.trim().to_string(),
        mrp: option.mrp,
        selling_price: option.selling_price,
        base_price: option.base_price,
        stock: option.stock,
        title: None,
        image: None,
        images: Vec::new(),
        status: option.status,
        attribute_value_ids: Vec::new(),
    }
}

impl VariantMatrix {
    /// Backend-ready variants. Two-attribute matrices yield one payload per
    /// (group, option) pair in group-major order.
    pub fn flatten(&self) -> Vec<VariantPayload> {
        let rules = self.image_rules();
        match self {
            VariantMatrix::None => Vec::new(),
            VariantMatrix::Single { attribute, rows } => rows
                .iter()
                .map(|row| {
                    let mut payload = base_payload(row);
                    payload.title = non_blank(&row.title).or_else(|| {
                        Some(row.value_label.trim().to_string()).filter(|label| !label.is_empty())
                    });
                    if attribute.has_images {
                        payload.image = non_blank(&row.image);
                        payload.images = clean_list(&row.images);
                    }
                    payload.attribute_value_ids = vec![row.attribute_value_id];
                    payload
                })
                .collect(),
            VariantMatrix::Double { groups, .. } => groups
                .iter()
                .flat_map(|group| {
                    group.options.iter().map(move |option| {
                        let mut payload = base_payload(option);
                        payload.title = combined_title(group, option);
                        payload.image = image_url(rules, group, option);
                        payload.images = image_list(rules, group, option);
                        payload.attribute_value_ids =
                            vec![group.attribute_value_id, option.attribute_value_id];
                        payload
                    })
                })
                .collect(),
        }
    }
}
