use crate::api::{ApiClient, ListQuery};
use crate::entities::{Page, Product};
use crate::error::ClientError;

const PRODUCT_LIST_KEYS: &[&str] = &["products", "data"];
const PRODUCT_KEYS: &[&str] = &["product", "data"];

/// Active products for the storefront, optionally filtered by category or brand.
pub async fn list_products(
    client: &ApiClient,
    query: &ListQuery,
) -> Result<Page<Product>, ClientError> {
    client
        .get_query("/api/products", query, PRODUCT_LIST_KEYS)
        .await?
        .into_required("products")
}

pub async fn get_product(client: &ApiClient, id: i64) -> Result<Product, ClientError> {
    client
        .get(&format!("/api/get-product/{id}"), PRODUCT_KEYS)
        .await?
        .into_required("product")
}
