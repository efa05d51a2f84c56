use serde::{Deserialize, Serialize};

use super::{deserialize_flag, deserialize_list, deserialize_opt_string};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_opt_string")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_string")]
    pub secondary_image: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_string")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub status: bool,
    #[serde(default, deserialize_with = "deserialize_list")]
    pub attributes: Vec<Attribute>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub has_images: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_primary: bool,
    #[serde(default, deserialize_with = "deserialize_list")]
    pub values: Vec<AttributeValue>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub id: i64,
    pub value: String,
}

impl Category {
    /// Attributes that define variants, primary first. At most two are used.
    pub fn variant_attributes(&self) -> Vec<&Attribute> {
        let mut attributes: Vec<&Attribute> = self.attributes.iter().collect();
        attributes.sort_by_key(|attribute| !attribute.is_primary);
        attributes.truncate(2);
        attributes
    }
}

impl Attribute {
    pub fn value_label(&self, value_id: i64) -> Option<&str> {
        self.values
            .iter()
            .find(|value| value.id == value_id)
            .map(|value| value.value.as_str())
    }
}
