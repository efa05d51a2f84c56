use crate::api::{ApiClient, ListQuery};
use crate::entities::{Brand, Category, Page};
use crate::error::ClientError;

const CATEGORY_LIST_KEYS: &[&str] = &["categories", "data"];
const CATEGORY_KEYS: &[&str] = &["category", "data"];
const BRAND_LIST_KEYS: &[&str] = &["brands", "data"];

pub async fn list_categories(
    client: &ApiClient,
    query: &ListQuery,
) -> Result<Page<Category>, ClientError> {
    client
        .get_query("/api/categories", query, CATEGORY_LIST_KEYS)
        .await?
        .into_required("categories")
}

pub async fn get_category(client: &ApiClient, id: i64) -> Result<Category, ClientError> {
    client
        .get(&format!("/api/categories/{id}"), CATEGORY_KEYS)
        .await?
        .into_required("category")
}

pub async fn list_brands(client: &ApiClient, query: &ListQuery) -> Result<Page<Brand>, ClientError> {
    client
        .get_query("/api/brands", query, BRAND_LIST_KEYS)
        .await?
        .into_required("brands")
}
