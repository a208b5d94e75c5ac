//! Role policy
//!
//! Pure predicates over the caller's role plus `require_*` helpers on
//! [`CurrentUser`]. A failed check is always 403, never 401.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::Role;

use crate::auth::CurrentUser;
use crate::security_log;

pub fn is_admin(role: Role) -> bool {
    role == Role::Admin
}

pub fn is_admin_or_manager(role: Role) -> bool {
    matches!(role, Role::Admin | Role::Manager)
}

pub fn is_self_or_admin(role: Role, owner_id: i64, user_id: i64) -> bool {
    is_admin(role) || owner_id == user_id
}

pub fn is_self_or_admin_or_manager(role: Role, owner_id: i64, user_id: i64) -> bool {
    is_admin_or_manager(role) || owner_id == user_id
}

impl CurrentUser {
    pub fn require_admin(&self) -> AppResult<()> {
        self.check(is_admin(self.role), ErrorCode::AdminRequired, "admin")
    }

    pub fn require_admin_or_manager(&self) -> AppResult<()> {
        self.check(
            is_admin_or_manager(self.role),
            ErrorCode::AdminOrManagerRequired,
            "admin_or_manager",
        )
    }

    /// Caller owns the resource or is an admin
    pub fn require_self_or_admin(&self, owner_id: i64) -> AppResult<()> {
        self.check(
            is_self_or_admin(self.role, owner_id, self.id),
            ErrorCode::PermissionDenied,
            "self_or_admin",
        )
    }

    pub fn require_self_or_admin_or_manager(&self, owner_id: i64) -> AppResult<()> {
        self.check(
            is_self_or_admin_or_manager(self.role, owner_id, self.id),
            ErrorCode::PermissionDenied,
            "self_or_admin_or_manager",
        )
    }

    fn check(&self, allowed: bool, code: ErrorCode, rule: &'static str) -> AppResult<()> {
        if allowed {
            return Ok(());
        }
        security_log!(
            "WARN",
            "permission_denied",
            user_id = self.id,
            role = self.role.as_str(),
            rule = rule
        );
        Err(AppError::new(code))
    }
}
