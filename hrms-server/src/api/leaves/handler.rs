//! Leave API Handlers
//!
//! Admins see and decide every request; everyone else sees their own.

use axum::Json;
use axum::extract::{Path, State};
use http::StatusCode;
use shared::error::{AppError, ErrorCode, ResourceError};
use shared::models::{
    Leave, LeaveCreate, LeaveStats, LeaveStatus, LeaveStatusUpdate, LeaveView, NewLeave,
};
use shared::response::SuccessEnvelope;
use shared::util::local_today;

use crate::api::extract::ResourceJson;
use crate::api::validate::{MAX_LEAVE_TYPE_LEN, parse_date, too_long, trimmed};
use crate::auth::CurrentUser;
use crate::state::AppState;

type LeaveResult<T> = Result<Json<SuccessEnvelope<T>>, ResourceError>;

/// `None` for admins (all requests), the caller's id otherwise
fn visible_owner(user: &CurrentUser) -> Option<i64> {
    if user.is_admin() { None } else { Some(user.id) }
}

/// GET /api/leaves
pub async fn list(State(state): State<AppState>, user: CurrentUser) -> LeaveResult<Vec<LeaveView>> {
    let leaves = state.store.list_leaves(visible_owner(&user)).await?;
    Ok(Json(SuccessEnvelope::data(leaves)))
}

/// GET /api/leaves/stats/overview
pub async fn stats(State(state): State<AppState>, user: CurrentUser) -> LeaveResult<LeaveStats> {
    let stats = state.store.leave_stats(visible_owner(&user)).await?;
    Ok(Json(SuccessEnvelope::data(stats)))
}

/// Required fields present, dates parseable, start not before today, end not before start
fn validate_request(user_id: i64, req: LeaveCreate) -> Result<NewLeave, AppError> {
    let (Some(leave_type), Some(start), Some(end)) = (
        trimmed(req.leave_type),
        trimmed(req.start_date),
        trimmed(req.end_date),
    ) else {
        return Err(AppError::new(ErrorCode::RequiredField));
    };
    if let Some(err) = too_long("leave_type", &leave_type, MAX_LEAVE_TYPE_LEN) {
        return Err(AppError::invalid_fields(vec![err]));
    }

    let (Some(start_date), Some(end_date)) = (parse_date(&start), parse_date(&end)) else {
        return Err(AppError::validation("Dates must be formatted as YYYY-MM-DD"));
    };
    if start_date < local_today() {
        return Err(AppError::new(ErrorCode::LeaveStartInPast));
    }
    if end_date < start_date {
        return Err(AppError::new(ErrorCode::LeaveEndBeforeStart));
    }

    Ok(NewLeave {
        user_id,
        leave_type,
        start_date,
        end_date,
        reason: trimmed(req.reason),
    })
}

/// POST /api/leaves
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    ResourceJson(req): ResourceJson<LeaveCreate>,
) -> Result<(StatusCode, Json<SuccessEnvelope<Leave>>), ResourceError> {
    let leave = validate_request(user.id, req)?;
    let leave = state.store.create_leave(leave).await?;
    tracing::info!(leave_id = leave.id, user_id = user.id, "Leave requested");
    Ok((StatusCode::CREATED, Json(SuccessEnvelope::data(leave))))
}

/// GET /api/leaves/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> LeaveResult<LeaveView> {
    let leave = state
        .store
        .find_leave(id)
        .await?
        .ok_or(ErrorCode::LeaveNotFound)?;
    user.require_self_or_admin(leave.leave.user_id)?;
    Ok(Json(SuccessEnvelope::data(leave)))
}

/// DELETE /api/leaves/{id}
///
/// Only pending requests can be withdrawn.
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<SuccessEnvelope<()>>, ResourceError> {
    let leave = state
        .store
        .find_leave(id)
        .await?
        .ok_or(ErrorCode::LeaveNotFound)?;
    user.require_self_or_admin(leave.leave.user_id)?;

    if leave.leave.status != LeaveStatus::Pending {
        return Err(ErrorCode::LeaveAlreadyDecided.into());
    }
    // decided between the read and the delete
    if !state.store.delete_pending_leave(id).await? {
        return Err(ErrorCode::LeaveAlreadyDecided.into());
    }

    Ok(Json(SuccessEnvelope::message(
        "Leave request deleted successfully",
    )))
}

/// PUT /api/leaves/{id}/status
pub async fn set_status(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    ResourceJson(req): ResourceJson<LeaveStatusUpdate>,
) -> LeaveResult<Leave> {
    user.require_admin()?;
    let status = req
        .status
        .as_deref()
        .and_then(LeaveStatus::from_db)
        .ok_or(ErrorCode::InvalidLeaveStatus)?;

    let leave = state
        .store
        .set_leave_status(id, status, user.id)
        .await?
        .ok_or(ErrorCode::LeaveNotFound)?;
    tracing::info!(
        leave_id = id,
        status = status.as_str(),
        decided_by = user.id,
        "Leave status updated"
    );
    Ok(Json(SuccessEnvelope::data(leave)))
}
