//! Employee API Module

mod handler;

use axum::Router;
use axum::routing::{get, post, put};

use crate::state::AppState;

/// Department list offered on the registration form
pub fn public_router() -> Router<AppState> {
    Router::new().route("/api/employees/departments", get(handler::departments))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/employees", get(handler::list).post(handler::create))
        .route("/api/employees/admin", post(handler::create_admin))
        .route("/api/employees/departments/list", get(handler::departments))
        .route(
            "/api/employees/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/api/employees/{id}/status", put(handler::set_active))
        .route("/api/employees/{id}/role", put(handler::set_role))
}
