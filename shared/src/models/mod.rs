//! Data models
//!
//! Shared between hrms-server and hrms-client (via API).
//! All IDs are `i64` (PostgreSQL BIGSERIAL).

pub mod attendance;
pub mod department;
pub mod leave;
pub mod performance;
pub mod role;
pub mod user;

// Re-exports
pub use attendance::*;
pub use department::*;
pub use leave::*;
pub use performance::*;
pub use role::*;
pub use user::*;
