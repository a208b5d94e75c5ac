//! Attendance API Handlers

use axum::Json;
use axum::extract::{Query, State};
use chrono::{Days, Local};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode, ResourceError};
use shared::models::{
    AttendanceHistoryEntry, AttendanceStatusResponse, CheckAction, CheckRequest, DayStatus,
};
use shared::response::SuccessEnvelope;
use shared::util::local_today;

use crate::api::extract::ResourceJson;
use crate::api::validate::trimmed;
use crate::attendance::{DayWindow, TransitionOutcome};
use crate::auth::CurrentUser;
use crate::state::AppState;

const DEFAULT_HISTORY_DAYS: u64 = 7;
const MAX_HISTORY_DAYS: u64 = 366;

/// GET /api/attendance/status
pub async fn status(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<AttendanceStatusResponse>, ResourceError> {
    let latest = state.store.latest_in(user.id, DayWindow::today()).await?;
    let status = DayStatus::from(latest.map(|r| r.status));
    Ok(Json(AttendanceStatusResponse {
        success: true,
        status: status.label().to_string(),
        message: None,
    }))
}

/// POST /api/attendance/check
pub async fn check(
    State(state): State<AppState>,
    user: CurrentUser,
    ResourceJson(req): ResourceJson<CheckRequest>,
) -> Result<Json<AttendanceStatusResponse>, ResourceError> {
    let action = req
        .action
        .as_deref()
        .and_then(CheckAction::parse)
        .ok_or(ErrorCode::InvalidAttendanceAction)?;

    let outcome = state
        .store
        .transition(user.id, action, trimmed(req.notes))
        .await?;

    match outcome {
        TransitionOutcome::Applied(record) => {
            tracing::info!(user_id = user.id, status = record.status.as_str(), "Attendance recorded");
            Ok(Json(AttendanceStatusResponse {
                success: true,
                status: record.status.as_str().to_string(),
                message: Some(format!("Successfully {}", action.past_tense())),
            }))
        }
        TransitionOutcome::Rejected(rejected) => Err(AppError::from(rejected).into()),
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub days: Option<u64>,
}

/// GET /api/attendance/history?days=N
///
/// Records since local midnight N days ago, newest first.
pub async fn history(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<SuccessEnvelope<Vec<AttendanceHistoryEntry>>>, ResourceError> {
    let days = query
        .days
        .unwrap_or(DEFAULT_HISTORY_DAYS)
        .min(MAX_HISTORY_DAYS);
    let today = local_today();
    let first_day = today.checked_sub_days(Days::new(days)).unwrap_or(today);
    let since = DayWindow::for_day(first_day).start;

    let entries = state
        .store
        .history(user.id, since)
        .await?
        .into_iter()
        .map(|r| AttendanceHistoryEntry {
            date: r.check_time.with_timezone(&Local).date_naive(),
            status: r.status,
            check_time: r.check_time,
        })
        .collect();

    Ok(Json(SuccessEnvelope::data(entries)))
}
