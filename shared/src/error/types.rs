//! Error types and their HTTP renderings

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the primary error type of the workspace, providing:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details (field errors, development diagnostics)
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details, rendered as top-level envelope keys
    pub details: Option<HashMap<String, Value>>,
}

/// One field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// "Validation failed" carrying the per-field `errors` list
    pub fn invalid_fields(errors: Vec<FieldError>) -> Self {
        let errors = serde_json::to_value(errors).unwrap_or(Value::Null);
        Self::new(ErrorCode::ValidationFailed).with_detail("errors", errors)
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::NotFound, format!("{} not found", resource.into()))
    }

    /// Create a permission denied error
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::PermissionDenied, msg)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create an invalid credentials error
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }

    pub fn storage_unavailable() -> Self {
        Self::new(ErrorCode::StorageUnavailable)
    }

    /// Collect `message` and every detail into one JSON object
    fn body_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("message".into(), Value::String(self.message.clone()));
        if let Some(details) = &self.details {
            for (key, value) in details {
                fields.insert(key.clone(), value.clone());
            }
        }
        fields
    }

    fn log_if_system(&self) {
        if matches!(self.code.category(), ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

/// [`AppError`] rendered as `{status: "error", message, ...}`
///
/// Used by the auth and performance endpoints and by the access guard.
#[derive(Debug, Clone, Error)]
#[error(transparent)]
pub struct AuthError(pub AppError);

/// [`AppError`] rendered as `{success: false, message, ...}`
///
/// Used by the attendance, employee and leave endpoints.
#[derive(Debug, Clone, Error)]
#[error(transparent)]
pub struct ResourceError(pub AppError);

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<AppError> for ResourceError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<ErrorCode> for AuthError {
    fn from(code: ErrorCode) -> Self {
        Self(AppError::new(code))
    }
}

impl From<ErrorCode> for ResourceError {
    fn from(code: ErrorCode) -> Self {
        Self(AppError::new(code))
    }
}

impl AuthError {
    /// The JSON body this error renders to
    pub fn body(&self) -> Value {
        let mut fields = self.0.body_fields();
        fields.insert("status".into(), Value::String("error".into()));
        Value::Object(fields)
    }
}

impl ResourceError {
    /// The JSON body this error renders to
    pub fn body(&self) -> Value {
        let mut fields = self.0.body_fields();
        fields.insert("success".into(), Value::Bool(false));
        Value::Object(fields)
    }
}

// ===== Axum Integration =====

impl axum::response::IntoResponse for AuthError {
    fn into_response(self) -> axum::response::Response {
        self.0.log_if_system();
        (self.0.http_status(), axum::Json(self.body())).into_response()
    }
}

impl axum::response::IntoResponse for ResourceError {
    fn into_response(self) -> axum::response::Response {
        self.0.log_if_system();
        (self.0.http_status(), axum::Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::MissingToken);
        assert_eq!(err.code, ErrorCode::MissingToken);
        assert_eq!(err.message, "Access token required");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_message() {
        let err = AppError::with_message(ErrorCode::ValidationFailed, "Invalid email format");
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message, "Invalid email format");
        assert_eq!(err.to_string(), "Invalid email format");
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::internal("boom").with_detail("error", "pool timed out");
        let details = err.details.unwrap();
        assert_eq!(details.get("error"), Some(&json!("pool timed out")));
    }

    #[test]
    fn test_auth_envelope_body() {
        let err = AuthError::from(ErrorCode::TokenExpired);
        assert_eq!(
            err.body(),
            json!({"status": "error", "message": "Token expired"})
        );
        assert_eq!(err.0.http_status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_resource_envelope_body() {
        let err = ResourceError::from(ErrorCode::AlreadyCheckedIn);
        assert_eq!(
            err.body(),
            json!({"success": false, "message": "Already checked in today"})
        );
    }

    #[test]
    fn test_invalid_fields_lists_errors() {
        let err = AuthError::from(AppError::invalid_fields(vec![
            FieldError::new("email", "Please provide a valid email"),
            FieldError::new("password", "Password must be at least 6 characters long"),
        ]));
        let body = err.body();
        assert_eq!(body["message"], "Validation failed");
        assert_eq!(body["errors"][0]["field"], "email");
        assert_eq!(body["errors"][1]["field"], "password");
        assert_eq!(err.0.http_status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_details_cannot_hide_envelope_marker() {
        let err = ResourceError::from(AppError::internal("x").with_detail("success", true));
        assert_eq!(err.body()["success"], json!(false));
    }
}
