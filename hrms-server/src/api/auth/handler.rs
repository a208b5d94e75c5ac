//! Auth API Handlers

use axum::Json;
use axum::extract::State;
use http::StatusCode;
use shared::error::{AppError, AuthError, ErrorCode, FieldError};
use shared::models::{
    AuthPayload, LoginRequest, ProfileUpdate, RegisterRequest, Role, UserProfile,
};
use shared::response::StatusEnvelope;

use crate::api::extract::AuthJson;
use crate::api::validate::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_POSITION_LEN, is_present, is_valid_email, optional_too_long,
    too_long, trimmed,
};
use crate::auth::password::{self, DEFAULT_COST};
use crate::auth::{CurrentUser, TokenError};
use crate::db::{NewUser, ProfileChanges, normalize_email};
use crate::error::ServiceError;
use crate::security_log;
use crate::state::AppState;

type AuthResponse = Json<StatusEnvelope<AuthPayload>>;

fn issue_failed(e: TokenError) -> AuthError {
    tracing::error!(error = %e, "Token issue failed");
    AppError::internal("Failed to issue token").into()
}

fn signed_in(state: &AppState, user: UserProfile) -> Result<AuthPayload, AuthError> {
    let token = state.tokens.issue(user.id, &user.email).map_err(issue_failed)?;
    Ok(AuthPayload {
        user,
        token: Some(token),
    })
}

fn identity(user: UserProfile) -> AuthPayload {
    AuthPayload { user, token: None }
}

/// POST /api/auth/register
///
/// Always creates an `employee`; a client-supplied role is ignored.
pub async fn register(
    State(state): State<AppState>,
    AuthJson(req): AuthJson<RegisterRequest>,
) -> Result<(StatusCode, AuthResponse), AuthError> {
    let mut errors = Vec::new();
    if !is_valid_email(&req.email) {
        errors.push(FieldError::new("email", "Valid email is required"));
    }
    if req.password.len() < 6 {
        errors.push(FieldError::new(
            "password",
            "Password must be at least 6 characters",
        ));
    }
    if !is_present(&req.first_name) {
        errors.push(FieldError::new("first_name", "First name is required"));
    }
    if !is_present(&req.last_name) {
        errors.push(FieldError::new("last_name", "Last name is required"));
    }
    errors.extend(
        [
            too_long("email", req.email.trim(), MAX_EMAIL_LEN),
            too_long("first_name", req.first_name.trim(), MAX_NAME_LEN),
            too_long("last_name", req.last_name.trim(), MAX_NAME_LEN),
            optional_too_long("position", req.position.as_deref().map(str::trim), MAX_POSITION_LEN),
        ]
        .into_iter()
        .flatten(),
    );
    if !errors.is_empty() {
        return Err(AppError::invalid_fields(errors).into());
    }

    let email = normalize_email(&req.email);
    if let Some(role) = req.role.as_deref().filter(|r| *r != Role::Employee.as_str()) {
        security_log!(
            "WARN",
            "register_role_ignored",
            email = email.clone(),
            requested = role.to_string()
        );
    }

    if state.store.find_by_email(&email).await?.is_some() {
        return Err(ErrorCode::DuplicateEmail.into());
    }

    let department_id = match trimmed(req.department) {
        Some(name) => state
            .store
            .find_department_by_name(&name)
            .await?
            .map(|d| d.id),
        None => None,
    };

    let password_hash = password::hash_password(&req.password, DEFAULT_COST)
        .await
        .map_err(ServiceError::from)?;

    let user = state
        .store
        .create_user(NewUser {
            email,
            password_hash,
            first_name: req.first_name.trim().to_string(),
            last_name: req.last_name.trim().to_string(),
            role: Role::Employee,
            department_id,
            position: trimmed(req.position),
            salary: None,
            phone: None,
        })
        .await?;

    tracing::info!(user_id = user.id, "User registered");
    let payload = signed_in(&state, user.profile())?;
    Ok((
        StatusCode::CREATED,
        Json(StatusEnvelope::success("User registered successfully", payload)),
    ))
}

/// POST /api/auth/login
///
/// Unknown, inactive and wrong-password logins are indistinguishable.
pub async fn login(
    State(state): State<AppState>,
    AuthJson(req): AuthJson<LoginRequest>,
) -> Result<AuthResponse, AuthError> {
    let mut errors = Vec::new();
    if !is_valid_email(&req.email) {
        errors.push(FieldError::new("email", "Valid email is required"));
    }
    if req.password.is_empty() {
        errors.push(FieldError::new("password", "Password is required"));
    }
    if !errors.is_empty() {
        return Err(AppError::invalid_fields(errors).into());
    }

    let email = normalize_email(&req.email);
    let credentials = state
        .store
        .find_by_email(&email)
        .await?
        .filter(|c| c.user.is_active);

    let Some(credentials) = credentials else {
        security_log!("WARN", "login_failed", email = email, reason = "unknown_or_inactive");
        return Err(AppError::invalid_credentials().into());
    };

    if !password::verify_password(&req.password, &credentials.password_hash).await {
        security_log!("WARN", "login_failed", email = email, reason = "wrong_password");
        return Err(AppError::invalid_credentials().into());
    }

    security_log!("INFO", "login_success", user_id = credentials.user.id);
    let payload = signed_in(&state, credentials.user.profile())?;
    Ok(Json(StatusEnvelope::success("Login successful", payload)))
}

/// GET /api/auth/validate
pub async fn validate(user: CurrentUser) -> AuthResponse {
    Json(StatusEnvelope::success("Token is valid", identity(user.0)))
}

/// GET /api/auth/profile
pub async fn profile(user: CurrentUser) -> AuthResponse {
    Json(StatusEnvelope::success(
        "Profile retrieved successfully",
        identity(user.0),
    ))
}

/// PUT /api/auth/profile
///
/// `department` is a department name; an unknown name leaves it unchanged.
pub async fn update_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    AuthJson(req): AuthJson<ProfileUpdate>,
) -> Result<AuthResponse, AuthError> {
    let department_id = match trimmed(req.department) {
        Some(name) => state
            .store
            .find_department_by_name(&name)
            .await?
            .map(|d| d.id),
        None => None,
    };

    let changes = ProfileChanges {
        first_name: trimmed(req.first_name),
        last_name: trimmed(req.last_name),
        department_id,
        position: trimmed(req.position),
    };
    let errors: Vec<FieldError> = [
        optional_too_long("first_name", changes.first_name.as_deref(), MAX_NAME_LEN),
        optional_too_long("last_name", changes.last_name.as_deref(), MAX_NAME_LEN),
        optional_too_long("position", changes.position.as_deref(), MAX_POSITION_LEN),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !errors.is_empty() {
        return Err(AppError::invalid_fields(errors).into());
    }

    let updated = state
        .store
        .update_profile(user.id, changes)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;

    Ok(Json(StatusEnvelope::success(
        "Profile updated successfully",
        identity(updated.profile()),
    )))
}
