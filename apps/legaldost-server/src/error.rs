//! Error types for the LegalDost server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use legal_ai::AiError;
use serde::Serialize;
use text_extract::ExtractionError;
use thiserror::Error;

use crate::pipeline::PipelineError;
use crate::store::StoreError;

/// Server error types
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Missing user identity")]
    Unauthorized,

    #[error("Upload exceeds {0} bytes")]
    TooLarge(usize),

    #[error("Text extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Ai(#[from] AiError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: &'static str,
    retryable: bool,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::TooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Ai(AiError::RateLimited) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Ai(_) => StatusCode::BAD_GATEWAY,
            ApiError::Store(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::InvalidRequest(_) => "INVALID_REQUEST",
            ApiError::Unauthorized => "UNAUTHORIZED",
            ApiError::TooLarge(_) => "FILE_TOO_LARGE",
            ApiError::Extraction(_) => "EXTRACTION_FAILED",
            ApiError::Ai(e) => e.code(),
            ApiError::Store(_) => "STORAGE_ERROR",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Byte count as MB, KB or bytes, whichever is the largest whole unit
fn human_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;
    if bytes >= MB {
        format!("{} MB", bytes / MB)
    } else if bytes >= KB {
        format!("{} KB", bytes / KB)
    } else {
        format!("{} bytes", bytes)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::NotFound(what) => format!("{} not found", what),
            ApiError::InvalidRequest(msg) => msg.clone(),
            ApiError::Unauthorized => "Authentication required".to_string(),
            ApiError::TooLarge(limit) => {
                format!("File too large. Maximum size is {}", human_size(*limit))
            }
            ApiError::Extraction(e) => {
                tracing::warn!("Extraction error: {}", e);
                "Failed to extract text from the uploaded document".to_string()
            }
            ApiError::Ai(e) => {
                tracing::error!("AI service error: {}", e);
                e.to_string()
            }
            ApiError::Store(e) => {
                tracing::error!("Storage error: {}", e);
                "Storage error".to_string()
            }
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                "Internal error".to_string()
            }
        };

        let body = ErrorResponse {
            success: false,
            error: message,
            code: self.code(),
            retryable: matches!(&self, ApiError::Ai(e) if e.is_retryable()),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Ai(e) => ApiError::Ai(e),
            PipelineError::Store(e) => ApiError::Store(e),
            PipelineError::EmptyQuestion => ApiError::InvalidRequest("Question is required".into()),
        }
    }
}
