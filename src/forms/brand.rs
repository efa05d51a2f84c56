use serde::Serialize;
use validator::Validate;

use super::{
    image_present, non_blank, rich_text_present, FieldErrors, FormSchema,
};
use crate::entities::brand::{Brand, MAX_SECTIONS};

#[derive(Clone, Debug, Default, PartialEq, Validate)]
pub struct BrandForm {
    #[validate(length(min = 2, max = 100, message = "name must be 2 to 100 characters"))]
    pub name: String,
    #[validate(custom(function = "rich_text_present"))]
    pub description: String,
    #[validate(
        required(message = "image is required"),
        custom(function = "image_present")
    )]
    pub image: Option<String>,
    #[validate(length(max = 3, message = "at most three sections are allowed"), nested)]
    pub sections: Vec<SectionForm>,
    pub status: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Validate)]
pub struct SectionForm {
    #[validate(
        required(message = "image is required"),
        custom(function = "image_present")
    )]
    pub image: Option<String>,
    #[validate(custom(function = "rich_text_present"))]
    pub description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BrandPayload {
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub section_image_1: Option<String>,
    pub section_description_1: Option<String>,
    pub section_image_2: Option<String>,
    pub section_description_2: Option<String>,
    pub section_image_3: Option<String>,
    pub section_description_3: Option<String>,
    pub status: bool,
}

impl BrandForm {
    pub fn new() -> Self {
        Self {
            status: true,
            ..Default::default()
        }
    }

    pub fn add_section(&mut self) -> bool {
        if self.sections.len() >= MAX_SECTIONS {
            return false;
        }
        self.sections.push(SectionForm::default());
        true
    }

    pub fn remove_section(&mut self, index: usize) {
        if index < self.sections.len() {
            self.sections.remove(index);
        }
    }
}

impl From<&Brand> for BrandForm {
    fn from(brand: &Brand) -> Self {
        Self {
            name: brand.name.clone(),
            description: brand.description.clone(),
            image: brand.image.clone(),
            sections: brand
                .sections()
                .into_iter()
                .map(|section| SectionForm {
                    image: section.image,
                    description: section.description.unwrap_or_default(),
                })
                .collect(),
            status: brand.status,
        }
    }
}

impl FormSchema for BrandForm {
    type Payload = BrandPayload;

    fn check(&self) -> Result<(), FieldErrors> {
        FieldErrors::from_validation(self.validate()).into_result()
    }

    fn payload(&self) -> BrandPayload {
        let section = |index: usize| self.sections.get(index);
        let image = |index: usize| section(index).and_then(|s| non_blank(&s.image));
        let description = |index: usize| {
            section(index)
                .map(|s| s.description.trim().to_string())
                .filter(|d| !d.is_empty())
        };

        BrandPayload {
            name: self.name.trim().to_string(),
            description: self.description.clone(),
            image: non_blank(&self.image),
            section_image_1: image(0),
            section_description_1: description(0),
            section_image_2: image(1),
            section_description_2: description(1),
            section_image_3: image(2),
            section_description_3: description(2),
            status: self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> BrandForm {
        BrandForm {
            name: "Northwind".into(),
            description: "<p>Outdoor gear</p>".into(),
            image: Some("brands/northwind.png".into()),
            sections: vec![],
            status: true,
        }
    }

    #[test]
    fn missing_image_is_reported() {
        let form = BrandForm {
            image: None,
            ..valid()
        };
        let errors = form.check().unwrap_err();
        assert_eq!(errors.first("image"), Some("image is required"));
        assert_eq!(errors.len(), 1);

        let blank = BrandForm {
            image: Some("   ".into()),
            ..valid()
        };
        assert_eq!(blank.check().unwrap_err().first("image"), Some("image is required"));
    }

    #[test]
    fn empty_markup_is_not_a_description() {
        let form = BrandForm {
            description: "<p><br></p>".into(),
            ..valid()
        };
        assert_eq!(
            form.check().unwrap_err().first("description"),
            Some("description is required")
        );
    }

    #[test]
    fn sections_are_validated_and_capped() {
        let mut form = valid();
        assert!(form.add_section());
        assert!(form.add_section());
        assert!(form.add_section());
        assert!(!form.add_section());
        form.sections[1].image = Some("brands/s2.png".into());
        form.sections[1].description = "<p>Tents</p>".into();

        let errors = form.check().unwrap_err();
        assert!(errors.contains("sections[0].image"));
        assert!(errors.contains("sections[2].description"));
        assert!(!errors.contains("sections[1].image"));
    }

    #[test]
    fn payload_flattens_sections() {
        let mut form = valid();
        form.sections.push(SectionForm {
            image: Some("brands/s1.png".into()),
            description: "<p>Tents</p>".into(),
        });
        let payload = form.payload();
        assert_eq!(payload.section_image_1.as_deref(), Some("brands/s1.png"));
        assert_eq!(payload.section_description_1.as_deref(), Some("<p>Tents</p>"));
        assert_eq!(payload.section_image_2, None);
    }

    #[test]
    fn form_round_trips_from_record() {
        let brand = Brand {
            id: 9,
            name: "Northwind".into(),
            description: "<p>Outdoor gear</p>".into(),
            image: Some("brands/northwind.png".into()),
            section_image_2: Some("brands/s2.png".into()),
            section_description_2: Some("<p>Boots</p>".into()),
            status: true,
            ..Default::default()
        };
        let form = BrandForm::from(&brand);
        assert_eq!(form.sections.len(), 1);
        assert_eq!(form.payload().section_image_1.as_deref(), Some("brands/s2.png"));
        assert!(form.check().is_ok());
    }
}
