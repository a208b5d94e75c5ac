//! Unified error system for the HRMS workspace
//!
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`AuthError`] / [`ResourceError`]: the two JSON envelopes an
//!   [`AppError`] can be rendered in
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Attendance errors
//! - 4xxx: Leave errors
//! - 5xxx: Performance review errors
//! - 8xxx: Employee errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, AuthError, ErrorCode, FieldError};
//!
//! let err = AppError::new(ErrorCode::MissingToken);
//! assert_eq!(err.message, "Access token required");
//!
//! let err = AuthError::from(AppError::invalid_fields(vec![
//!     FieldError::new("email", "Please provide a valid email"),
//! ]));
//! assert_eq!(err.body()["status"], "error");
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult, AuthError, FieldError, ResourceError};
