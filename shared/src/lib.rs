//! Shared types for the HRMS workspace
//!
//! Error codes, response envelopes and domain models used by both
//! `hrms-server` and `hrms-client`.

pub mod error;
pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
