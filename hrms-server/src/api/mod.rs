//! HTTP API
//!
//! Every route lives under `/api`. Public routes and guarded routes are built
//! as separate routers; the guarded one carries [`require_auth`] as a route
//! layer so unknown paths fall through to the 404 handler instead of 401.

pub mod attendance;
pub mod auth;
pub mod employees;
mod extract;
pub mod health;
pub mod leaves;
pub mod performance;
mod validate;

use axum::response::{IntoResponse, Response};
use axum::{Json, Router, middleware};
use http::{HeaderName, HeaderValue, Method, StatusCode, header};
use serde_json::json;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::state::AppState;

/// Routes reachable without a token
fn public_router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(auth::public_router())
        .merge(employees::public_router())
}

/// Routes behind the access guard
fn protected_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(attendance::router())
        .merge(employees::router())
        .merge(leaves::router())
        .merge(performance::router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
}

/// All routes, without middleware or state
pub fn build_router(state: &AppState) -> Router<AppState> {
    public_router()
        .merge(protected_router(state))
        .fallback(route_not_found)
}

/// Fully configured application; used by the binary and by the tests
pub fn build_app(state: AppState) -> Router {
    let cors = cors_layer(state.config.client_url.as_deref());
    let request_id = HeaderName::from_static("x-request-id");
    build_router(&state)
        .layer(cors)
        // Gzip only when the caller sends Accept-Encoding
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .with_state(state)
}

fn cors_layer(client_url: Option<&str>) -> CorsLayer {
    let Some(origin) = client_url.and_then(|url| HeaderValue::from_str(url).ok()) else {
        return CorsLayer::permissive();
    };
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}

async fn route_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Route not found" })),
    )
        .into_response()
}
