use reqwest::Method;
use serde_json::Value;

use crate::api::{ApiClient, ApiResponse, ListQuery};
use crate::entities::{Page, Product};
use crate::error::ClientError;
use crate::forms::ProductPayload;

const PRODUCT_LIST_KEYS: &[&str] = &["products", "data"];
const PRODUCT_KEYS: &[&str] = &["product", "data"];

/// Every product, inactive ones included.
pub async fn list_admin_products(
    client: &ApiClient,
    query: &ListQuery,
) -> Result<Page<Product>, ClientError> {
    client
        .get_query("/api/admin-products", query, PRODUCT_LIST_KEYS)
        .await?
        .into_required("products")
}

pub async fn get_admin_product(client: &ApiClient, id: i64) -> Result<Product, ClientError> {
    client
        .get(&format!("/api/admin-product-details/{id}"), PRODUCT_KEYS)
        .await?
        .into_required("product")
}

pub async fn create_product(
    client: &ApiClient,
    payload: &ProductPayload,
) -> Result<ApiResponse<Product>, ClientError> {
    client
        .send_json(Method::POST, "/api/create-product", payload, PRODUCT_KEYS)
        .await
}

pub async fn update_product(
    client: &ApiClient,
    id: i64,
    payload: &ProductPayload,
) -> Result<ApiResponse<Product>, ClientError> {
    client
        .send_json(
            Method::PUT,
            &format!("/api/update-product/{id}"),
            payload,
            PRODUCT_KEYS,
        )
        .await
}

pub async fn delete_product(client: &ApiClient, id: i64) -> Result<ApiResponse<Value>, ClientError> {
    client.delete(&format!("/api/delete-product/{id}")).await
}

pub async fn delete_variant(client: &ApiClient, id: i64) -> Result<ApiResponse<Value>, ClientError> {
    client.delete(&format!("/api/delete-variant/{id}")).await
}
