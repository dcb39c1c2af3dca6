use crate::api::server::server::{get_server_status, start_server, stop_server};
use crate::{AppState, health};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Lifecycle endpoints
        .route("/api/v1/server/status", get(get_server_status))
        .route("/api/v1/server/start", post(start_server))
        .route("/api/v1/server/stop", post(stop_server))
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/live", get(health::liveness))
        .route("/ready", get(health::readiness))
        // Add shared state
        .with_state(state)
        // CORS middleware (the web frontend is served from another origin)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
