//! Attendance API Module

mod handler;

use axum::Router;
use axum::routing::{get, post};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/attendance/status", get(handler::status))
        .route("/api/attendance/check", post(handler::check))
        .route("/api/attendance/history", get(handler::history))
}
