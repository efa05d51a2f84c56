use reqwest::Method;
use serde_json::Value;

use crate::api::{ApiClient, ApiResponse};
use crate::entities::Brand;
use crate::error::ClientError;
use crate::forms::BrandPayload;

const BRAND_KEYS: &[&str] = &["brand", "data"];

pub async fn get_brand(client: &ApiClient, id: i64) -> Result<Brand, ClientError> {
    client
        .get(&format!("/api/brands/{id}"), BRAND_KEYS)
        .await?
        .into_required("brand")
}

pub async fn create_brand(
    client: &ApiClient,
    payload: &BrandPayload,
) -> Result<ApiResponse<Brand>, ClientError> {
    client
        .send_json(Method::POST, "/api/create-brand", payload, BRAND_KEYS)
        .await
}

pub async fn update_brand(
    client: &ApiClient,
    id: i64,
    payload: &BrandPayload,
) -> Result<ApiResponse<Brand>, ClientError> {
    client
        .send_json(
            Method::PUT,
            &format!("/api/update-brand/{id}"),
            payload,
            BRAND_KEYS,
        )
        .await
}

pub async fn delete_brand(client: &ApiClient, id: i64) -> Result<ApiResponse<Value>, ClientError> {
    client.delete(&format!("/api/delete-brand/{id}")).await
}
