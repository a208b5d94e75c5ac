//! Auth API Module
//!
//! Status-envelope family: `{status: "success" | "error", message, ...}`.

mod handler;

use axum::Router;
use axum::routing::{get, post};

use crate::state::AppState;

pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(handler::register))
        .route("/api/auth/login", post(handler::login))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/validate", get(handler::validate))
        .route(
            "/api/auth/profile",
            get(handler::profile).put(handler::update_profile),
        )
}
