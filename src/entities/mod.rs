pub mod brand;
pub mod category;
pub mod image;
pub mod product;
pub mod user;

use serde::{de, Deserialize, Deserializer, Serialize};

pub use brand::{Brand, BrandSection};
pub use category::{Attribute, AttributeValue, Category};
pub use image::{FileExtension, ImageFile};
pub use product::{Product, ProductDetail, Variant};
pub use user::{OrderSummary, Review, User, UserDetail, UserStats};

/// One page of a listing. The backend answers either with a bare array or
/// with a paginated object; both land here.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn single(items: Vec<T>) -> Self {
        let total = items.len() as u64;
        Self {
            per_page: items.len().max(1) as u32,
            items,
            page: 1,
            total,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PageRepr<T> {
    Bare(Vec<T>),
    Paged {
        #[serde(alias = "data", alias = "rows")]
        items: Vec<T>,
        #[serde(default = "first_page", alias = "current_page")]
        page: u32,
        #[serde(default, alias = "limit")]
        per_page: Option<u32>,
        #[serde(default, alias = "count")]
        total: Option<u64>,
    },
}

fn first_page() -> u32 {
    1
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Page<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match PageRepr::deserialize(deserializer)? {
            PageRepr::Bare(items) => Ok(Page::single(items)),
            PageRepr::Paged {
                items,
                page,
                per_page,
                total,
            } => {
                let per_page = per_page.unwrap_or(items.len().max(1) as u32);
                let total = total.unwrap_or(items.len() as u64);
                Ok(Page {
                    items,
                    page: page.max(1),
                    per_page,
                    total,
                })
            }
        }
    }
}

/// Status columns arrive as bools, 0/1 or words depending on the table.
pub fn deserialize_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    match Option::<Flag>::deserialize(deserializer)? {
        None => Ok(false),
        Some(Flag::Bool(value)) => Ok(value),
        Some(Flag::Int(value)) => Ok(value != 0),
        Some(Flag::Text(text)) => match text.trim().to_lowercase().as_str() {
            "1" | "true" | "active" | "yes" | "enabled" => Ok(true),
            "0" | "false" | "inactive" | "no" | "disabled" | "" => Ok(false),
            other => Err(de::Error::custom(format!("unexpected status flag `{other}`"))),
        },
    }
}

/// Nullable string columns; blank strings read as absent.
pub fn deserialize_opt_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.trim().is_empty()))
}

/// Nullable list columns.
pub fn deserialize_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "deserialize_flag")]
        status: bool,
    }

    #[test]
    fn flags_accept_mixed_representations() {
        for (value, expected) in [
            (json!(true), true),
            (json!(0), false),
            (json!(1), true),
            (json!("active"), true),
            (json!("Inactive"), false),
            (json!(null), false),
        ] {
            let row: Row = serde_json::from_value(json!({ "status": value })).unwrap();
            assert_eq!(row.status, expected);
        }
        assert!(serde_json::from_value::<Row>(json!({ "status": "maybe" })).is_err());
    }

    #[test]
    fn page_reads_bare_array() {
        let page: Page<u32> = serde_json::from_value(json!([1, 2, 3])).unwrap();
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.page, 1);
        assert_eq!(page.total, 3);
    }

    #[test]
    fn page_reads_paginated_object() {
        let page: Page<u32> = serde_json::from_value(json!({
            "data": [4, 5],
            "current_page": 2,
            "per_page": 2,
            "total": 9
        }))
        .unwrap();
        assert_eq!(page.items, vec![4, 5]);
        assert_eq!(page.page, 2);
        assert_eq!(page.per_page, 2);
        assert_eq!(page.total, 9);
    }
}
