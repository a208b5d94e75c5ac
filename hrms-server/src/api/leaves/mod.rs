//! Leave API Module

mod handler;

use axum::Router;
use axum::routing::{get, put};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/leaves", get(handler::list).post(handler::create))
        .route("/api/leaves/stats/overview", get(handler::stats))
        .route(
            "/api/leaves/{id}",
            get(handler::get_by_id).delete(handler::delete),
        )
        .route("/api/leaves/{id}/status", put(handler::set_status))
}
