//! hrms-client: typed HTTP client for the HRMS API
//!
//! Every response passes through one [`ResponseHook`] before it is decoded.
//! The default hook, [`DiscardTokenOn401`], forgets the stored token when the
//! server answers 401.

pub mod client;
pub mod config;
pub mod error;
pub mod hook;
pub mod token;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use hook::{DiscardTokenOn401, ResponseHook};
pub use token::TokenStore;

// Re-export shared types for convenience
pub use shared::models::{
    AttendanceHistoryEntry, AttendanceStatusResponse, CheckAction, Leave, LeaveCreate, LeaveView,
    RegisterRequest, UserProfile,
};
