use serde::Serialize;
use validator::Validate;

use super::{image_present, non_blank, FieldErrors, FormSchema};
use crate::entities::Category;

#[derive(Clone, Debug, Default, PartialEq, Validate)]
pub struct CategoryForm {
    #[validate(length(min = 2, max = 100, message = "name must be 2 to 100 characters"))]
    pub name: String,
    #[validate(length(max = 5000, message = "description is too long"))]
    pub description: String,
    #[validate(
        required(message = "image is required"),
        custom(function = "image_present")
    )]
    pub image: Option<String>,
    pub secondary_image: Option<String>,
    #[validate(url(message = "link must be a valid URL"))]
    pub link: Option<String>,
    pub status: bool,
    pub attribute_ids: Vec<i64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CategoryPayload {
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub secondary_image: Option<String>,
    pub link: Option<String>,
    pub status: bool,
    pub attribute_ids: Vec<i64>,
}

impl CategoryForm {
    pub fn new() -> Self {
        Self {
            status: true,
            ..Default::default()
        }
    }

    /// Attribute order matters: the first attribute defines the primary level.
    pub fn toggle_attribute(&mut self, attribute_id: i64) {
        match self.attribute_ids.iter().position(|id| *id == attribute_id) {
            Some(index) => {
                self.attribute_ids.remove(index);
            }
            None => self.attribute_ids.push(attribute_id),
        }
    }
}

impl From<&Category> for CategoryForm {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            description: category.description.clone(),
            image: category.image.clone(),
            secondary_image: category.secondary_image.clone(),
            link: category.link.clone(),
            status: category.status,
            attribute_ids: category
                .attributes
                .iter()
                .map(|attribute| attribute.id)
                .collect(),
        }
    }
}

impl FormSchema for CategoryForm {
    type Payload = CategoryPayload;

    fn check(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        // A blank link field means "no link".
        let form = CategoryForm {
            link: non_blank(&self.link),
            ..self.clone()
        };
        if let Err(validation) = form.validate() {
            errors.extend_validation("", &validation);
        }
        let mut seen = Vec::with_capacity(self.attribute_ids.len());
        for id in &self.attribute_ids {
            if seen.contains(id) {
                errors.add("attribute_ids", "attribute selected twice");
            }
            seen.push(*id);
        }
        errors.into_result()
    }

    fn payload(&self) -> CategoryPayload {
        CategoryPayload {
            name: self.name.trim().to_string(),
            description: self.description.clone(),
            image: non_blank(&self.image),
            secondary_image: non_blank(&self.secondary_image),
            link: non_blank(&self.link),
            status: self.status,
            attribute_ids: self.attribute_ids.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> CategoryForm {
        CategoryForm {
            name: "Shirts".into(),
            image: Some("categories/shirts.png".into()),
            ..CategoryForm::new()
        }
    }

    #[test]
    fn image_and_link_rules() {
        assert!(valid().check().is_ok());

        let errors = CategoryForm {
            image: None,
            link: Some("not a url".into()),
            ..valid()
        }
        .check()
        .unwrap_err();
        assert_eq!(errors.first("image"), Some("image is required"));
        assert_eq!(errors.first("link"), Some("link must be a valid URL"));

        let blank_link = CategoryForm {
            link: Some("  ".into()),
            ..valid()
        };
        assert!(blank_link.check().is_ok());
        assert_eq!(blank_link.payload().link, None);
    }

    #[test]
    fn toggling_keeps_order() {
        let mut form = valid();
        form.toggle_attribute(3);
        form.toggle_attribute(1);
        form.toggle_attribute(3);
        form.toggle_attribute(2);
        assert_eq!(form.attribute_ids, vec![1, 2]);
    }
}
