//! Service-layer error type
//!
//! `ServiceError` bridges storage errors (`RepoError`) and the API-layer
//! error (`AppError`) so handlers can use `?` on store calls directly.

use std::sync::atomic::{AtomicBool, Ordering};

use shared::error::{AppError, AuthError, ErrorCode, ResourceError};

use crate::BoxError;
use crate::db::RepoError;

static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(false);

/// Include the underlying failure as `error` in 500 bodies (development only)
pub fn expose_internal_errors(enabled: bool) {
    EXPOSE_INTERNAL_ERRORS.store(enabled, Ordering::Relaxed);
}

/// Service-layer error
///
/// - `Db`: storage/infrastructure failure (logged, reported as InternalError)
/// - `App`: business-rule error passed through to the client unchanged
#[derive(Debug)]
pub enum ServiceError {
    Db(BoxError),
    App(AppError),
}

impl From<RepoError> for ServiceError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound(what) => ServiceError::App(AppError::not_found(what)),
            RepoError::Duplicate(_) => ServiceError::App(AppError::new(ErrorCode::DuplicateEmail)),
            RepoError::Unavailable(reason) => {
                tracing::error!(error = %reason, "Storage unavailable");
                ServiceError::App(with_internal_detail(
                    AppError::storage_unavailable(),
                    &reason,
                ))
            }
            RepoError::Constraint(reason) => {
                tracing::debug!(error = %reason, "Write rejected by constraint");
                ServiceError::App(with_internal_detail(
                    AppError::validation("Value rejected by storage constraints"),
                    &reason,
                ))
            }
            RepoError::Database(_) => ServiceError::Db(e.into()),
        }
    }
}

impl From<BoxError> for ServiceError {
    fn from(e: BoxError) -> Self {
        ServiceError::Db(e)
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Db(db_err) => {
                tracing::error!(error = %db_err, "Service database error");
                with_internal_detail(AppError::new(ErrorCode::InternalError), &db_err.to_string())
            }
        }
    }
}

fn with_internal_detail(err: AppError, detail: &str) -> AppError {
    if EXPOSE_INTERNAL_ERRORS.load(Ordering::Relaxed) {
        err.with_detail("error", detail)
    } else {
        err
    }
}

impl From<ServiceError> for AuthError {
    fn from(e: ServiceError) -> Self {
        AuthError(e.into())
    }
}

impl From<ServiceError> for ResourceError {
    fn from(e: ServiceError) -> Self {
        ResourceError(e.into())
    }
}

impl From<RepoError> for AuthError {
    fn from(e: RepoError) -> Self {
        ServiceError::from(e).into()
    }
}

impl From<RepoError> for ResourceError {
    fn from(e: RepoError) -> Self {
        ServiceError::from(e).into()
    }
}
