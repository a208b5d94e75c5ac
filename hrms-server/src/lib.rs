//! hrms-server: HR management API
//!
//! - Credential storage and bcrypt verification (`db`, `auth::password`)
//! - HS256 identity tokens (`auth::jwt`)
//! - Access guard and role policy (`auth::guard`, `auth::policy`)
//! - Daily attendance state machine (`attendance`)
//! - Employee, leave and performance review endpoints (`api`)

pub mod api;
pub mod attendance;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod state;

pub use config::Config;
pub use state::AppState;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Security audit log on the `security` target
///
/// ```ignore
/// security_log!("WARN", "auth_failed", reason = "expired", uri = uri.to_string());
/// ```
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
