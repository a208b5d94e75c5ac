//! Access guard
//!
//! Resolves `Authorization: Bearer <token>` to a live, active user on every
//! request. A valid signature alone is not enough: deactivating or deleting a
//! user rejects their outstanding tokens at the next request.

use std::ops::Deref;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use shared::error::{AppError, AuthError, ErrorCode};
use shared::models::UserProfile;

use crate::auth::{TokenError, TokenService};
use crate::security_log;
use crate::state::AppState;

/// The authenticated caller, as stored right now (never the password hash)
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserProfile);

impl Deref for CurrentUser {
    type Target = UserProfile;

    fn deref(&self) -> &UserProfile {
        &self.0
    }
}

/// Guard middleware; failures render with the status envelope
///
/// | Failure | Response |
/// |---------|----------|
/// | header missing or not `Bearer` | 401 `Access token required` |
/// | bad signature / malformed | 401 `Invalid token` |
/// | expired | 401 `Token expired` |
/// | no active user with that id | 401 `User not found or inactive` |
/// | storage failure | 500 `Authentication error` |
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(str::to_owned);
    let uri = req.uri().path().to_string();

    let user = authenticate(&state, header.as_deref(), uri).await?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

async fn authenticate(
    state: &AppState,
    header: Option<&str>,
    uri: String,
) -> Result<CurrentUser, AppError> {
    let Some(token) = header.and_then(TokenService::extract_from_header) else {
        security_log!("WARN", "auth_missing", uri = uri);
        return Err(AppError::new(ErrorCode::MissingToken));
    };

    let claims = state.tokens.verify(token).map_err(|e| {
        security_log!("WARN", "auth_failed", error = e.to_string(), uri = uri.clone());
        match e {
            TokenError::Expired => AppError::new(ErrorCode::TokenExpired),
            _ => AppError::new(ErrorCode::TokenInvalid),
        }
    })?;

    match state.store.find_active_by_id(claims.user_id).await {
        Ok(Some(user)) => Ok(CurrentUser(user)),
        Ok(None) => {
            security_log!(
                "WARN",
                "auth_stale_identity",
                user_id = claims.user_id,
                uri = uri
            );
            Err(AppError::new(ErrorCode::UserNotFoundOrInactive))
        }
        Err(e) => {
            tracing::error!(error = %e, "Auth middleware storage error");
            Err(AppError::with_message(
                ErrorCode::InternalError,
                "Authentication error",
            ))
        }
    }
}

/// Handlers behind [`require_auth`] take the resolved user as an argument
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| AuthError::from(ErrorCode::MissingToken))
    }
}
