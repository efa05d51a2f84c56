use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::error::ClientError;

pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    let elapsed = start.elapsed();
    match response.extensions().get::<Result<(), StorefrontError>>() {
        Some(Ok(_)) => info!(
            method = %method,
            uri = %uri,
            status = %status,
            elapsed = ?elapsed,
            "Processed request"
        ),
        Some(Err(value)) => error!(
            method = %method,
            uri = %uri,
            status = %status,
            elapsed = ?elapsed,
            value = %value,
            "Failed to process request"
        ),
        None => debug!(
            method = %method,
            uri = %uri,
            status = %status,
            elapsed = ?elapsed,
            "Processed request without outcome"
        ),
    }

    response
}

#[derive(Clone, Debug, Error)]
pub enum StorefrontError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Backend error: {0}")]
    Backend(String),
    #[error("Invalid request: {0}")]
    BadRequest(String),
}

impl StorefrontError {
    pub fn status(&self) -> StatusCode {
        match self {
            StorefrontError::NotFound(_) => StatusCode::NOT_FOUND,
            StorefrontError::Backend(_) => StatusCode::BAD_GATEWAY,
            StorefrontError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<ClientError> for StorefrontError {
    fn from(err: ClientError) -> Self {
        if err.is_not_found() {
            StorefrontError::NotFound(err.display_message())
        } else {
            StorefrontError::Backend(err.display_message())
        }
    }
}

pub fn to_response<T: IntoResponse>(
    response: T,                      // The response that we are sending + StatusCode
    ext: Result<(), StorefrontError>, // Outcome handed to the logging middleware
) -> Response {
    let mut response = response.into_response();

    response.extensions_mut().insert(ext);

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_gateway_statuses() {
        let missing: StorefrontError = ClientError::Rejected {
            status: 404,
            message: "No product with id 9".into(),
            errors: Vec::new(),
        }
        .into();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let down: StorefrontError = ClientError::Decode("eof".into()).into();
        assert_eq!(down.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn outcome_travels_as_extension() {
        let response = to_response(StatusCode::OK, Ok(()));
        assert!(matches!(
            response.extensions().get::<Result<(), StorefrontError>>(),
            Some(Ok(()))
        ));
    }
}
