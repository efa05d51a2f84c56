use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{deserialize_flag, deserialize_list, deserialize_opt_string};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub item_code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category_id: i64,
    #[serde(default, deserialize_with = "deserialize_opt_string")]
    pub category_name: Option<String>,
    #[serde(default)]
    pub brand_id: i64,
    #[serde(default, deserialize_with = "deserialize_opt_string")]
    pub brand_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_string")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "deserialize_list")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_list")]
    pub features: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_list")]
    pub details: Vec<ProductDetail>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub status: bool,
    #[serde(default, deserialize_with = "deserialize_list")]
    pub variants: Vec<Variant>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetail {
    pub key: String,
    pub value: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    #[serde(default)]
    pub id: Option<i64>,
    pub sku: String,
    #[serde(default)]
    pub mrp: Decimal,
    #[serde(default)]
    pub selling_price: Decimal,
    #[serde(default)]
    pub base_price: Decimal,
    #[serde(default)]
    pub stock: i64,
    #[serde(default, deserialize_with = "deserialize_opt_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_string")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "deserialize_list")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub status: bool,
    #[serde(default, deserialize_with = "deserialize_list")]
    pub attribute_value_ids: Vec<i64>,
}

impl Product {
    /// Lowest selling price among active variants.
    pub fn starting_price(&self) -> Option<Decimal> {
        self.variants
            .iter()
            .filter(|variant| variant.status)
            .map(|variant| variant.selling_price)
            .min()
    }

    /// Primary image followed by the additional ones, without duplicates.
    pub fn gallery(&self) -> Vec<&str> {
        let mut gallery: Vec<&str> = Vec::with_capacity(self.images.len() + 1);
        for image in self.image.iter().chain(self.images.iter()) {
            if !image.is_empty() && !gallery.contains(&image.as_str()) {
                gallery.push(image);
            }
        }
        gallery
    }
}

impl Variant {
    pub fn in_stock(&self) -> bool {
        self.status && self.stock > 0
    }

    /// Percentage off the MRP, rounded down.
    pub fn discount_percent(&self) -> Option<u32> {
        if self.mrp <= Decimal::ZERO || self.selling_price >= self.mrp {
            return None;
        }
        let off = (self.mrp - self.selling_price) * Decimal::from(100) / self.mrp;
        off.floor().to_u32()
    }
}
