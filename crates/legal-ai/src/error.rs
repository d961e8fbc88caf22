//! Error types for the generative-model client

use thiserror::Error;

/// Failure of the model call itself.
///
/// The client never retries; [`AiError::is_retryable`] tells the caller
/// whether trying again later can help.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AiError {
    #[error("AI service is temporarily busy. Please try again in a few moments.")]
    RateLimited,

    #[error("AI service authentication failed. Please check your API key configuration.")]
    AuthFailed,

    #[error("AI service access denied. Please check your API key permissions.")]
    AccessDenied,

    #[error("AI service error: {0}")]
    Unknown(String),
}

impl AiError {
    /// Classify an HTTP error status returned by the model provider.
    pub fn from_status(status: u16, message: &str) -> Self {
        match status {
            429 => AiError::RateLimited,
            401 => AiError::AuthFailed,
            403 => AiError::AccessDenied,
            // Gemini answers 400 for a malformed or revoked key
            400 if message.contains("API_KEY_INVALID") || message.contains("API key not valid") => {
                AiError::AuthFailed
            }
            _ => AiError::Unknown(format!("HTTP {}: {}", status, message)),
        }
    }

    /// Rate limits and unclassified failures may succeed later;
    /// credential problems will not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AiError::RateLimited | AiError::Unknown(_))
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            AiError::RateLimited => "AI_RATE_LIMITED",
            AiError::AuthFailed => "AI_AUTH_FAILED",
            AiError::AccessDenied => "AI_ACCESS_DENIED",
            AiError::Unknown(_) => "AI_SERVICE_ERROR",
        }
    }
}

/// The model answered, but not with the JSON object we asked for.
///
/// Never surfaced to users: the client falls back to a heuristic analysis.
#[derive(Error, Debug)]
pub enum ShapeError {
    #[error("response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("response is JSON but not an object")]
    NotAnObject,
}
