use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use pdftext_core::{BackendError, StorageError};

#[derive(Error, Debug)]
pub enum UploadError {
    /// No `file` part with a filename in the request
    #[error("No file uploaded")]
    NoFile,

    /// `file` part present but its filename is empty
    #[error("No selected file")]
    NoSelectedFile,

    /// Malformed multipart body
    #[error("Failed to read upload: {0}")]
    Multipart(String),

    #[error("File exceeds maximum upload size of {} MB", .max_bytes / (1024 * 1024))]
    TooLarge { max_bytes: u64 },

    #[error("Extraction timed out after {secs} seconds")]
    Timeout { secs: u64 },

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Generic internal service error
    #[error("Failed to {operation}")]
    Internal { operation: String },
}

impl UploadError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            UploadError::NoFile | UploadError::NoSelectedFile | UploadError::Multipart(_) => {
                StatusCode::BAD_REQUEST
            }
            UploadError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            UploadError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            UploadError::Backend(BackendError::Io(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            UploadError::Backend(_) => StatusCode::UNPROCESSABLE_ENTITY,
            UploadError::Storage(_) | UploadError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns a user-safe error message, without leaking paths or internals
    pub fn user_message(&self) -> String {
        match self {
            UploadError::Backend(BackendError::Open(detail)) => {
                format!("Invalid PDF document: {detail}")
            }
            UploadError::Backend(BackendError::Encrypted) => {
                "PDF is encrypted or password protected".to_string()
            }
            UploadError::Backend(BackendError::Extraction(detail)) => {
                format!("Failed to extract text: {detail}")
            }
            UploadError::Backend(BackendError::Io(_))
            | UploadError::Storage(_)
            | UploadError::Internal { .. } => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            UploadError::Backend(BackendError::Io(_))
            | UploadError::Storage(_)
            | UploadError::Internal { .. } => {
                tracing::error!("Internal service error: {:#}", self);
            }
            UploadError::Backend(_) | UploadError::Timeout { .. } => {
                tracing::warn!("Extraction failed: {}", self);
            }
            _ => {
                tracing::info!("Rejected upload: {}", self);
            }
        }

        let body = Json(serde_json::json!({ "error": self.user_message() }));
        (status, body).into_response()
    }
}
