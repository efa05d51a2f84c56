use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Failed to decode response: {0}")]
    Decode(String),
    #[error("Backend rejected request ({status}): {message}")]
    Rejected {
        status: u16,
        message: String,
        errors: Vec<String>,
    },
    #[error("Response is missing `{0}`")]
    MissingResult(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Text shown to the user: the backend message plus any aggregated errors.
    pub fn display_message(&self) -> String {
        match self {
            ClientError::Rejected {
                message, errors, ..
            } if !errors.is_empty() => {
                if message.is_empty() {
                    errors.join(", ")
                } else {
                    format!("{message}: {}", errors.join(", "))
                }
            }
            ClientError::Rejected { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            ClientError::Network(err) => err.status() == Some(reqwest::StatusCode::NOT_FOUND),
            ClientError::Rejected { status, .. } => *status == 404,
            _ => false,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("Failed to parse {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("Failed to decode image: {0}")]
    Decode(String),
    #[error("Failed to encode image: {0}")]
    Encode(String),
    #[error("Crop region is empty")]
    EmptyRegion,
    #[error("File is {size} bytes, limit is {limit}")]
    TooLarge { size: usize, limit: usize },
    #[error("Invalid directory name `{0}`")]
    InvalidDirectory(String),
    #[error("Invalid file name `{0}`")]
    InvalidFileName(String),
    #[error(transparent)]
    Client(#[from] ClientError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_message_joins_backend_errors() {
        let err = ClientError::Rejected {
            status: 422,
            message: "Validation failed".into(),
            errors: vec!["SKU A1 already exists".into(), "SKU B2 already exists".into()],
        };
        assert_eq!(
            err.display_message(),
            "Validation failed: SKU A1 already exists, SKU B2 already exists"
        );
    }

    #[test]
    fn rejected_without_errors_uses_message() {
        let err = ClientError::Rejected {
            status: 404,
            message: "Brand not found".into(),
            errors: vec![],
        };
        assert_eq!(err.display_message(), "Brand not found");
        assert!(err.is_not_found());

        let conflict = ClientError::Rejected {
            status: 409,
            message: "Brand not found in catalog".into(),
            errors: vec![],
        };
        assert!(!conflict.is_not_found());
    }
}
