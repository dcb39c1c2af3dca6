//! Server lifecycle REST API handlers
//!
//! One resource (the managed server), three operations: read the current
//! state, apply a start intent, apply a stop intent. Intents are idempotent
//! per the orchestrator's contract; conflicting intents come back as 409.

use crate::{ApiResult, AppState, ServerStateResponse};

use axum::{Json, extract::State};

/// GET /api/v1/server/status
///
/// Reconciles against the workflow engine if a run is in flight, then
/// returns the refreshed state ("poll on read").
pub async fn get_server_status(
    State(state): State<AppState>,
) -> ApiResult<Json<ServerStateResponse>> {
    let server = state.orchestrator.status().await?;

    Ok(Json(ServerStateResponse {
        server: server.into(),
    }))
}

/// POST /api/v1/server/start
///
/// No-op with the current state while already starting or online.
pub async fn start_server(State(state): State<AppState>) -> ApiResult<Json<ServerStateResponse>> {
    let server = state.orchestrator.start().await?;

    Ok(Json(ServerStateResponse {
        server: server.into(),
    }))
}

/// POST /api/v1/server/stop
///
/// No-op with the current state while already stopping or offline.
pub async fn stop_server(State(state): State<AppState>) -> ApiResult<Json<ServerStateResponse>> {
    let server = state.orchestrator.stop().await?;

    Ok(Json(ServerStateResponse {
        server: server.into(),
    }))
}
