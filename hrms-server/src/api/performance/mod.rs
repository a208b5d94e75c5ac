//! Performance Review API Module
//!
//! Data uses the success envelope; errors use the status envelope.

mod handler;

use axum::Router;
use axum::routing::get;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/performance", get(handler::list_all))
        .route("/api/performance/employees/list", get(handler::reviewable))
        .route(
            "/api/performance/{employee_id}",
            get(handler::list_for).post(handler::add_review),
        )
}
