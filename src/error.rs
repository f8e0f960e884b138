//! Error types shared by the storage, service and HTTP layers.
//!
//! Responses are plain text, terminated with a newline, so clients that only
//! look at the body (curl, shell scripts) get a readable reason.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::utils::url_validator::UrlValidationError;

/// Failures raised by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage lock poisoned")]
    LockPoisoned,

    #[error("storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("corrupt storage log at line {line}: {reason}")]
    CorruptLog { line: usize, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String },
    #[error("{message}")]
    NotFound { message: String },
    #[error("{message}")]
    PayloadTooLarge { message: String },
    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }
    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::PayloadTooLarge {
            message: message.into(),
        }
    }
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match self {
            AppError::Validation { message } | AppError::PayloadTooLarge { message } => {
                tracing::debug!("Rejected request: {}", message);
                (status, format!("{message}\n")).into_response()
            }
            // Misses are part of normal operation and carry no body.
            AppError::NotFound { message } => {
                tracing::debug!("{}", message);
                status.into_response()
            }
            AppError::Internal { message } => {
                tracing::error!("Internal error: {}", message);
                (status, format!("{message}\n")).into_response()
            }
        }
    }
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        AppError::internal(e.to_string())
    }
}

impl From<UrlValidationError> for AppError {
    fn from(e: UrlValidationError) -> Self {
        AppError::bad_request(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_validation_renders_plain_text() {
        let response = AppError::bad_request("Empty body").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "Empty body\n");
    }

    #[tokio::test]
    async fn test_payload_too_large_keeps_its_status() {
        let response = AppError::payload_too_large("length limit exceeded").into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body_text(response).await, "length limit exceeded\n");
    }

    #[tokio::test]
    async fn test_not_found_has_empty_body() {
        let response = AppError::not_found("Short URL not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "");
    }

    #[tokio::test]
    async fn test_storage_error_maps_to_internal() {
        let err: AppError = StorageError::LockPoisoned.into();
        assert!(matches!(err, AppError::Internal { .. }));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "storage lock poisoned\n");
    }

    #[test]
    fn test_validation_error_maps_to_bad_request() {
        let err: AppError = UrlValidationError::EmptyInput.into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "URL cannot be empty");
    }
}
