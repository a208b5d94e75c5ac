//! Success envelopes
//!
//! The API speaks two envelope dialects, chosen per endpoint family:
//!
//! ```json
//! { "status": "success", "message": "Login successful", "user": { ... }, "token": "..." }
//! { "success": true, "data": [ ... ] }
//! ```
//!
//! Their error counterparts are [`crate::error::AuthError`] and
//! [`crate::error::ResourceError`].

use serde::{Deserialize, Serialize};

/// `{status: "success", message, ...body}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusEnvelope<T> {
    pub status: String,
    pub message: String,
    #[serde(flatten)]
    pub body: T,
}

impl<T> StatusEnvelope<T> {
    pub fn success(message: impl Into<String>, body: T) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
            body,
        }
    }
}

/// `{success: true, data?, message?}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct SuccessEnvelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> SuccessEnvelope<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }
}

impl SuccessEnvelope<()> {
    /// Message-only success, e.g. after a delete
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }
}
