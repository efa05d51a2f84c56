use reqwest::multipart::{Form, Part};
use reqwest::{Body, Method};
use serde::Serialize;
use serde_json::Value;

use crate::api::{ApiClient, ApiResponse};
use crate::error::ClientError;

const FILE_LIST_KEYS: &[&str] = &["files", "data"];
const UPLOAD_KEYS: &[&str] = &["path", "url", "file", "data"];

#[derive(Serialize)]
struct DeleteImage<'a> {
    directory: &'a str,
    filename: &'a str,
}

pub async fn list_files(client: &ApiClient, directory: &str) -> Result<Vec<String>, ClientError> {
    let files: Option<Vec<String>> = client
        .get(&format!("/api/images/get-files/{directory}"), FILE_LIST_KEYS)
        .await?
        .into_result()?;
    Ok(files.unwrap_or_default())
}

/// Sends one file as `multipart/form-data` with a `directory` and a `file`
/// part; answers with the stored path.
pub async fn upload(
    client: &ApiClient,
    directory: &str,
    file_name: &str,
    content_type: &str,
    body: Body,
    length: Option<u64>,
) -> Result<String, ClientError> {
    let part = match length {
        Some(length) => Part::stream_with_length(body, length),
        None => Part::stream(body),
    }
    .file_name(file_name.to_string())
    .mime_str(content_type)?;

    let form = Form::new()
        .text("directory", directory.to_string())
        .part("file", part);

    let response: ApiResponse<Value> = client
        .send(
            client.request(Method::POST, "/api/images/upload").multipart(form),
            UPLOAD_KEYS,
        )
        .await?;
    let stored = response.into_required("path")?;
    stored_path(&stored).ok_or_else(|| ClientError::MissingResult("path".into()))
}

/// The upload endpoint returns either the path itself or an object carrying it.
fn stored_path(value: &Value) -> Option<String> {
    match value {
        Value::String(path) if !path.is_empty() => Some(path.clone()),
        Value::Object(map) => ["path", "url", "filename", "file"]
            .iter()
            .find_map(|key| map.get(*key).and_then(stored_path)),
        _ => None,
    }
}

pub async fn delete_file(
    client: &ApiClient,
    directory: &str,
    filename: &str,
) -> Result<ApiResponse<Value>, ClientError> {
    client
        .send_json(
            Method::DELETE,
            "/api/images",
            &DeleteImage {
                directory,
                filename,
            },
            &[],
        )
        .await
}
