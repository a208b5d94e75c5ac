//! Service routes

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{Value, json};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/test", get(smoke_test))
}

/// Liveness plus a storage round-trip; always 200
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let database = match state.store.ping().await {
        Ok(()) => "connected",
        Err(e) => {
            tracing::warn!(error = %e, "Health check storage ping failed");
            "disconnected"
        }
    };
    Json(json!({
        "status": "healthy",
        "database": database,
        "backend": state.store.backend(),
        "uptime": state.started_at.elapsed().as_secs_f64(),
        "timestamp": Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn smoke_test() -> Json<Value> {
    Json(json!({
        "message": "HRMS Backend is running!",
        "timestamp": Utc::now().to_rfc3339(),
        "status": "success",
    }))
}
