use crate::AppState;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// GET /health - Health check with current lifecycle phase
pub async fn health(State(state): State<AppState>) -> Response {
    let snapshot = state.orchestrator.snapshot().await;

    let health = json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "phase": snapshot.phase.as_str(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(health)).into_response()
}

/// GET /live - liveness probe (is the process alive?)
pub async fn liveness() -> Response {
    (StatusCode::OK, "OK").into_response()
}

/// GET /ready - readiness probe (ready to accept traffic?)
pub async fn readiness() -> Response {
    // State is restored before the router is built, so a responding
    // process is a ready process.
    (StatusCode::OK, "Ready").into_response()
}
