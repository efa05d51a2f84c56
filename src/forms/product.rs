use serde::Serialize;
use validator::Validate;

use super::variant::{VariantMatrix, VariantPayload};
use super::{is_blank, non_blank, rich_text_present, FieldErrors, FormSchema, ITEM_CODE_REGEX};
use crate::entities::{Category, Product, ProductDetail};

#[derive(Clone, Debug, Default, PartialEq, Validate)]
pub struct ProductForm {
    #[validate(length(min = 2, max = 200, message = "name must be 2 to 200 characters"))]
    pub name: String,
    #[validate(regex(
        path = *ITEM_CODE_REGEX,
        message = "item code must be 1 to 50 letters, digits, '-' or '_'"
    ))]
    pub item_code: String,
    #[validate(custom(function = "rich_text_present"))]
    pub description: String,
    #[validate(range(min = 1, message = "category is required"))]
    pub category_id: i64,
    #[validate(range(min = 1, message = "brand is required"))]
    pub brand_id: i64,
    pub image: Option<String>,
    pub images: Vec<String>,
    pub features: Vec<String>,
    #[validate(nested)]
    pub details: Vec<DetailForm>,
    pub status: bool,
    pub matrix: VariantMatrix,
}

#[derive(Clone, Debug, Default, PartialEq, Validate)]
pub struct DetailForm {
    #[validate(length(min = 1, max = 100, message = "key must be 1 to 100 characters"))]
    pub key: String,
    #[validate(length(min = 1, max = 100, message = "value must be 1 to 100 characters"))]
    pub value: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProductPayload {
    pub name: String,
    pub item_code: String,
    pub description: String,
    pub category_id: i64,
    pub brand_id: i64,
    pub image: Option<String>,
    pub images: Vec<String>,
    pub features: Vec<String>,
    pub details: Vec<ProductDetail>,
    pub status: bool,
    pub variants: Vec<VariantPayload>,
}

impl ProductForm {
    /// Empty form for a product in `category`.
    pub fn for_category(category: &Category) -> Self {
        Self {
            category_id: category.id,
            status: true,
            matrix: VariantMatrix::for_category(category),
            ..Default::default()
        }
    }

    /// Pre-populated form for editing `product`.
    pub fn from_product(product: &Product, category: &Category) -> Self {
        Self {
            name: product.name.clone(),
            item_code: product.item_code.clone(),
            description: product.description.clone(),
            category_id: product.category_id,
            brand_id: product.brand_id,
            image: product.image.clone(),
            images: product.images.clone(),
            features: product.features.clone(),
            details: product
                .details
                .iter()
                .map(|detail| DetailForm {
                    key: detail.key.clone(),
                    value: detail.value.clone(),
                })
                .collect(),
            status: product.status,
            matrix: VariantMatrix::from_variants(category, &product.variants),
        }
    }

    /// Switching category resets the matrix to the new attribute shape.
    pub fn set_category(&mut self, category: &Category) {
        if self.category_id != category.id {
            self.category_id = category.id;
            self.matrix = VariantMatrix::for_category(category);
        }
    }
}

impl FormSchema for ProductForm {
    type Payload = ProductPayload;

    fn check(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::from_validation(self.validate());

        for (index, feature) in self.features.iter().enumerate() {
            let length = feature.trim().chars().count();
            if length == 0 || length > 200 {
                errors.add(
                    format!("features[{index}]"),
                    "feature must be 1 to 200 characters",
                );
            }
        }

        if self.matrix.image_rules().product_image_required() && is_blank(&self.image) {
            errors.add("image", "image is required");
        }
        self.matrix.check(&mut errors);

        errors.into_result()
    }

    fn payload(&self) -> ProductPayload {
        ProductPayload {
            name: self.name.trim().to_string(),
            item_code: self.item_code.trim().to_string(),
            description: self.description.clone(),
            category_id: self.category_id,
            brand_id: self.brand_id,
            image: non_blank(&self.image),
            images: self
                .images
                .iter()
                .map(|image| image.trim().to_string())
                .filter(|image| !image.is_empty())
                .collect(),
            features: self
                .features
                .iter()
                .map(|feature| feature.trim().to_string())
                .collect(),
            details: self
                .details
                .iter()
                .map(|detail| ProductDetail {
                    key: detail.key.trim().to_string(),
                    value: detail.value.trim().to_string(),
                })
                .collect(),
            status: self.status,
            variants: self.matrix.flatten(),
        }
    }
}
