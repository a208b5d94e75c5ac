//! Performance Review API Handlers

use axum::Json;
use axum::extract::{Path, State};
use shared::error::{AuthError, ErrorCode};
use shared::models::{EmployeeReview, NewReview, ReviewCandidate, ReviewCreate, ReviewOverview, Role};
use shared::response::SuccessEnvelope;

use crate::api::extract::AuthJson;
use crate::api::validate::trimmed;
use crate::auth::CurrentUser;
use crate::state::AppState;

type ReviewResult<T> = Result<Json<SuccessEnvelope<T>>, AuthError>;

/// GET /api/performance
pub async fn list_all(State(state): State<AppState>, user: CurrentUser) -> ReviewResult<Vec<ReviewOverview>> {
    user.require_admin_or_manager()?;
    let reviews = state.store.all_reviews().await?;
    Ok(Json(SuccessEnvelope::data(reviews)))
}

/// GET /api/performance/employees/list
pub async fn reviewable(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ReviewResult<Vec<ReviewCandidate>> {
    user.require_admin_or_manager()?;
    let employees = state.store.list_active_employees().await?;
    Ok(Json(SuccessEnvelope::data(employees)))
}

/// POST /api/performance/{employee_id}
///
/// Only active `employee`-role accounts can be reviewed.
pub async fn add_review(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(employee_id): Path<i64>,
    AuthJson(req): AuthJson<ReviewCreate>,
) -> Result<Json<SuccessEnvelope<()>>, AuthError> {
    user.require_admin_or_manager()?;
    let rating = req.valid_rating().ok_or(ErrorCode::InvalidRating)?;

    state
        .store
        .find_by_id(employee_id)
        .await?
        .filter(|e| e.role == Role::Employee && e.is_active)
        .ok_or(ErrorCode::ReviewTargetNotFound)?;

    let review_id = state
        .store
        .add_review(NewReview {
            employee_id,
            reviewer_id: user.id,
            rating,
            comments: trimmed(req.comments),
        })
        .await?;
    tracing::info!(review_id, employee_id, reviewer_id = user.id, "Performance review added");

    Ok(Json(SuccessEnvelope::message(
        "Performance review added successfully",
    )))
}

/// GET /api/performance/{employee_id}
pub async fn list_for(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(employee_id): Path<i64>,
) -> ReviewResult<Vec<EmployeeReview>> {
    user.require_self_or_admin_or_manager(employee_id)?;
    let reviews = state.store.reviews_for(employee_id).await?;
    Ok(Json(SuccessEnvelope::data(reviews)))
}
