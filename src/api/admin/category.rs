use reqwest::Method;
use serde_json::Value;

use crate::api::{ApiClient, ApiResponse};
use crate::entities::Category;
use crate::error::ClientError;
use crate::forms::CategoryPayload;

const CATEGORY_KEYS: &[&str] = &["category", "data"];

pub async fn create_category(
    client: &ApiClient,
    payload: &CategoryPayload,
) -> Result<ApiResponse<Category>, ClientError> {
    client
        .send_json(Method::POST, "/api/create-categories", payload, CATEGORY_KEYS)
        .await
}

pub async fn update_category(
    client: &ApiClient,
    id: i64,
    payload: &CategoryPayload,
) -> Result<ApiResponse<Category>, ClientError> {
    client
        .send_json(
            Method::PUT,
            &format!("/api/update-category/{id}"),
            payload,
            CATEGORY_KEYS,
        )
        .await
}

pub async fn delete_category(
    client: &ApiClient,
    id: i64,
) -> Result<ApiResponse<Value>, ClientError> {
    client.delete(&format!("/api/delete-category/{id}")).await
}
