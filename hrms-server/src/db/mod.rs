//! Storage layer
//!
//! One trait per table family, implemented by [`postgres::PgStore`] and by
//! [`memory::MemoryStore`] (tests and database-less development runs).
//! Handlers reach storage through `Arc<dyn Store>`.

pub mod memory;
pub mod postgres;
pub mod seed;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::models::{
    AttendanceRecord, CheckAction, Department, Employee, EmployeeReview, EmployeeUpdate, Leave,
    LeaveStats, LeaveStatus, LeaveView, NewLeave, NewReview, ReviewCandidate, ReviewOverview,
    Role, UserProfile,
};
use thiserror::Error;

use crate::attendance::{DayWindow, TransitionOutcome};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unique constraint violation
    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// Pool exhausted, connection refused or dropped
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Foreign key, value length or numeric range violation
    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// A user row together with its password hash
///
/// Only the login path reads this; everything else works with [`Employee`].
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user: Employee,
    pub password_hash: String,
}

/// Insert payload for a new account; `email` is stored lowercased
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub department_id: Option<i64>,
    pub position: Option<String>,
    pub salary: Option<Decimal>,
    pub phone: Option<String>,
}

/// Self-service profile changes; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub department_id: Option<i64>,
    pub position: Option<String>,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Case-insensitive lookup, including the password hash
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Credentials>>;
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Employee>>;
    /// Guard lookup: only active users resolve
    async fn find_active_by_id(&self, id: i64) -> RepoResult<Option<UserProfile>>;
    /// Fails with [`RepoError::Duplicate`] when the email is taken
    async fn create_user(&self, user: NewUser) -> RepoResult<Employee>;
    async fn update_profile(&self, id: i64, changes: ProfileChanges) -> RepoResult<Option<Employee>>;
    async fn update_employee(&self, id: i64, changes: EmployeeUpdate) -> RepoResult<Option<Employee>>;
    async fn set_active(&self, id: i64, active: bool) -> RepoResult<Option<Employee>>;
    async fn set_role(&self, id: i64, role: Role) -> RepoResult<Option<Employee>>;
    /// Admin accounts are never deleted; returns whether a row went away
    async fn delete_non_admin(&self, id: i64) -> RepoResult<bool>;
    /// Newest first
    async fn list_non_admin(&self) -> RepoResult<Vec<Employee>>;
    /// Active `employee`-role accounts, ordered by name
    async fn list_active_employees(&self) -> RepoResult<Vec<ReviewCandidate>>;
}

#[async_trait]
pub trait DepartmentStore: Send + Sync {
    async fn find_department(&self, id: i64) -> RepoResult<Option<Department>>;
    async fn find_department_by_name(&self, name: &str) -> RepoResult<Option<Department>>;
    /// Ordered by name
    async fn list_departments(&self) -> RepoResult<Vec<Department>>;
    /// Insert missing departments, leaving existing names untouched
    async fn ensure_departments(&self, departments: &[(&str, &str)]) -> RepoResult<()>;
}

#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// Latest record inside the window
    async fn latest_in(&self, user_id: i64, window: DayWindow)
    -> RepoResult<Option<AttendanceRecord>>;
    /// Read today's state and append the resulting record as one atomic step
    ///
    /// "Today" is the local day of the timestamp being recorded, taken once
    /// the per-user lock is held.
    async fn transition(
        &self,
        user_id: i64,
        action: CheckAction,
        notes: Option<String>,
    ) -> RepoResult<TransitionOutcome>;
    /// Records at or after `since`, newest first
    async fn history(&self, user_id: i64, since: DateTime<Utc>) -> RepoResult<Vec<AttendanceRecord>>;
}

#[async_trait]
pub trait LeaveStore: Send + Sync {
    async fn create_leave(&self, leave: NewLeave) -> RepoResult<Leave>;
    async fn find_leave(&self, id: i64) -> RepoResult<Option<LeaveView>>;
    /// `owner = None` lists every request; newest first
    async fn list_leaves(&self, owner: Option<i64>) -> RepoResult<Vec<LeaveView>>;
    async fn set_leave_status(
        &self,
        id: i64,
        status: LeaveStatus,
        approver_id: i64,
    ) -> RepoResult<Option<Leave>>;
    /// Deletes only while still pending; returns whether a row went away
    async fn delete_pending_leave(&self, id: i64) -> RepoResult<bool>;
    async fn leave_stats(&self, owner: Option<i64>) -> RepoResult<LeaveStats>;
}

#[async_trait]
pub trait ReviewStore: Send + Sync {
    async fn add_review(&self, review: NewReview) -> RepoResult<i64>;
    /// Newest first
    async fn reviews_for(&self, employee_id: i64) -> RepoResult<Vec<EmployeeReview>>;
    async fn all_reviews(&self) -> RepoResult<Vec<ReviewOverview>>;
}

/// Everything the API needs from storage
#[async_trait]
pub trait Store: UserStore + DepartmentStore + AttendanceStore + LeaveStore + ReviewStore {
    /// Round-trip to the backend
    async fn ping(&self) -> RepoResult<()>;
    /// Backend name shown by the health endpoint
    fn backend(&self) -> &'static str;
}

/// Lowercased, trimmed form used for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
