use reqwest::Method;

use crate::api::{ApiClient, ApiResponse, ListQuery};
use crate::entities::{Page, User, UserDetail};
use crate::error::ClientError;

const USER_LIST_KEYS: &[&str] = &["users", "data"];
const USER_KEYS: &[&str] = &["user", "data"];

pub async fn list_users(client: &ApiClient, query: &ListQuery) -> Result<Page<User>, ClientError> {
    client
        .get_query("/api/admin/users", query, USER_LIST_KEYS)
        .await?
        .into_required("users")
}

pub async fn get_user(client: &ApiClient, id: i64) -> Result<UserDetail, ClientError> {
    client
        .get(&format!("/api/admin/users/{id}"), USER_KEYS)
        .await?
        .into_required("user")
}

/// Blocks an active user or unblocks a blocked one. The backend may or may
/// not echo the updated user.
pub async fn toggle_user_status(
    client: &ApiClient,
    id: i64,
) -> Result<ApiResponse<User>, ClientError> {
    client
        .send(
            client.request(Method::POST, &format!("/api/admin/users/{id}/toggle-status")),
            USER_KEYS,
        )
        .await
}
