use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{deserialize_flag, deserialize_list, deserialize_opt_string};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, deserialize_with = "deserialize_opt_string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_string")]
    pub profile_picture: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_blocked: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, flatten)]
    pub stats: UserStats,
}

/// Computed by the backend; shown as-is.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    #[serde(default)]
    pub order_count: u64,
    #[serde(default)]
    pub total_spend: Decimal,
    #[serde(default)]
    pub review_count: u64,
    #[serde(default)]
    pub like_count: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserDetail {
    #[serde(flatten)]
    pub user: User,
    #[serde(default, deserialize_with = "deserialize_list")]
    pub orders: Vec<OrderSummary>,
    #[serde(default, deserialize_with = "deserialize_list")]
    pub reviews: Vec<Review>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: i64,
    #[serde(default)]
    pub order_number: String,
    #[serde(default)]
    pub total: Decimal,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn status_label(&self) -> &'static str {
        if self.is_blocked {
            "Blocked"
        } else {
            "Active"
        }
    }
}
