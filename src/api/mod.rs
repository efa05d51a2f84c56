pub mod admin;
pub mod public;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::ClientError;

/// Backend envelope `{res, message, <entity>}` normalized to one shape.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub success: bool,
    pub message: String,
    pub result: Option<T>,
    pub errors: Vec<String>,
}

impl<T: DeserializeOwned> ApiResponse<T> {
    /// `keys` are the envelope fields that may hold the payload, tried in order.
    pub fn from_body(status: StatusCode, body: Value, keys: &[&str]) -> Result<Self, ClientError> {
        let mut envelope = match body {
            Value::Object(envelope) => envelope,
            // Some listing endpoints answer with a bare array.
            Value::Array(_) if status.is_success() && !keys.is_empty() => {
                let result = serde_json::from_value(body)
                    .map_err(|err| ClientError::Decode(err.to_string()))?;
                return Ok(Self {
                    status: status.as_u16(),
                    success: true,
                    message: String::new(),
                    result: Some(result),
                    errors: Vec::new(),
                });
            }
            _ => return Ok(Self::status_only(status)),
        };

        let success = match envelope.get("res").and_then(Value::as_str) {
            Some(res) => res.eq_ignore_ascii_case("success") && status.is_success(),
            None => status.is_success(),
        };
        let message = envelope
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let mut errors = Vec::new();
        for field in ["errors", "error"] {
            if let Some(value) = envelope.get(field) {
                collect_errors(None, value, &mut errors);
            }
        }

        let result = if success {
            match keys
                .iter()
                .find_map(|key| envelope.remove(*key).filter(|value| !value.is_null()))
            {
                Some(value) => Some(
                    serde_json::from_value(value)
                        .map_err(|err| ClientError::Decode(err.to_string()))?,
                ),
                None => None,
            }
        } else {
            None
        };

        let message = if message.is_empty() && !success && errors.is_empty() {
            status_message(status)
        } else {
            message
        };

        Ok(Self {
            status: status.as_u16(),
            success,
            message,
            result,
            errors,
        })
    }
}

impl<T> ApiResponse<T> {
    fn status_only(status: StatusCode) -> Self {
        Self {
            status: status.as_u16(),
            success: status.is_success(),
            message: if status.is_success() {
                String::new()
            } else {
                status_message(status)
            },
            result: None,
            errors: Vec::new(),
        }
    }

    /// Fails with `ClientError::Rejected` when the backend reported an error.
    pub fn into_result(self) -> Result<Option<T>, ClientError> {
        if self.success {
            Ok(self.result)
        } else {
            Err(ClientError::Rejected {
                status: self.status,
                message: self.message,
                errors: self.errors,
            })
        }
    }

    /// Like `into_result` but the payload must be present.
    pub fn into_required(self, what: &str) -> Result<T, ClientError> {
        self.into_result()?
            .ok_or_else(|| ClientError::MissingResult(what.to_string()))
    }
}

fn status_message(status: StatusCode) -> String {
    format!("Request failed with status {}", status.as_u16())
}

fn collect_errors(field: Option<&str>, value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Null => {}
        Value::String(text) if text.is_empty() => {}
        Value::String(text) => out.push(match field {
            Some(field) => format!("{field}: {text}"),
            None => text.clone(),
        }),
        Value::Array(items) => {
            for item in items {
                collect_errors(field, item, out);
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                collect_errors(Some(key), item, out);
            }
        }
        other => out.push(other.to_string()),
    }
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    upload_base: String,
    token: Option<String>,
}

/// Listing parameters shared by the paginated endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    pub page: u32,
    pub per_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_id: Option<i64>,
}

impl ListQuery {
    pub fn page(page: u32, per_page: u32) -> Self {
        Self {
            page,
            per_page,
            ..Default::default()
        }
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, upload_base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            upload_base: upload_base.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_url.clone(),
            upload_base: config.upload_base.clone(),
            token: config.api_token.clone(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Absolute URL for a stored upload path; absolute inputs pass through.
    pub fn public_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.upload_base, path.trim_start_matches('/'))
        }
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        keys: &[&str],
    ) -> Result<ApiResponse<T>, ClientError> {
        let response = builder.send().await?;
        let status = response.status();
        let url = response.url().clone();
        let bytes = response.bytes().await?;

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            match serde_json::from_slice::<Value>(&bytes) {
                Ok(body) => body,
                Err(err) if status.is_success() => {
                    return Err(ClientError::Decode(err.to_string()));
                }
                Err(_) => Value::Null,
            }
        };

        let parsed = ApiResponse::from_body(status, body, keys)?;
        if parsed.success {
            debug!(url = %url, status = %status, "Backend request succeeded");
        } else {
            warn!(
                url = %url,
                status = %status,
                message = %parsed.message,
                errors = ?parsed.errors,
                "Backend rejected request"
            );
        }
        Ok(parsed)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        keys: &[&str],
    ) -> Result<ApiResponse<T>, ClientError> {
        self.send(self.request(Method::GET, path), keys).await
    }

    pub(crate) async fn get_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
        keys: &[&str],
    ) -> Result<ApiResponse<T>, ClientError> {
        self.send(self.request(Method::GET, path).query(query), keys)
            .await
    }

    pub(crate) async fn send_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        keys: &[&str],
    ) -> Result<ApiResponse<T>, ClientError> {
        self.send(self.request(method, path).json(body), keys).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<ApiResponse<Value>, ClientError> {
        self.send(self.request(Method::DELETE, path), &[]).await
    }
}
