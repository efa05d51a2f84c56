use serde::{Deserialize, Serialize};

use super::{deserialize_flag, deserialize_opt_string};

pub const MAX_SECTIONS: usize = 3;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_opt_string")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_string")]
    pub section_image_1: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_string")]
    pub section_description_1: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_string")]
    pub section_image_2: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_string")]
    pub section_description_2: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_string")]
    pub section_image_3: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_string")]
    pub section_description_3: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub status: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BrandSection {
    pub image: Option<String>,
    pub description: Option<String>,
}

impl Brand {
    /// Secondary sections that carry at least an image or a description.
    pub fn sections(&self) -> Vec<BrandSection> {
        [
            (&self.section_image_1, &self.section_description_1),
            (&self.section_image_2, &self.section_description_2),
            (&self.section_image_3, &self.section_description_3),
        ]
        .into_iter()
        .filter(|(image, description)| image.is_some() || description.is_some())
        .map(|(image, description)| BrandSection {
            image: image.clone(),
            description: description.clone(),
        })
        .collect()
    }
}
