//! Client error types

use reqwest::StatusCode;
use thiserror::Error;

/// Client error type
///
/// Non-2xx responses are classified by status; the carried string is the
/// `message` field of the server's error envelope.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// 401; the stored token has already been discarded by the default hook
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// 400: validation or business rule
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Classify a non-success response
    pub fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized(message),
            StatusCode::FORBIDDEN => Self::Forbidden(message),
            StatusCode::NOT_FOUND => Self::NotFound(message),
            StatusCode::BAD_REQUEST => Self::Validation(message),
            _ => Self::Internal(message),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status() {
        assert!(ClientError::from_status(StatusCode::UNAUTHORIZED, "x".into()).is_unauthorized());
        assert!(matches!(
            ClientError::from_status(StatusCode::BAD_REQUEST, "Already checked in today".into()),
            ClientError::Validation(m) if m == "Already checked in today"
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::SERVICE_UNAVAILABLE, String::new()),
            ClientError::Internal(_)
        ));
    }
}
