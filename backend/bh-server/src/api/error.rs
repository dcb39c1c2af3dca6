//! REST API error types
//!
//! These errors are designed to produce consistent JSON responses
//! with appropriate HTTP status codes.

use bh_engine::EngineError;
use bh_orchestrator::OrchestratorError;

use std::panic::Location;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

/// Inner error body with code and message
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "CONFLICT", "ENGINE_UNAVAILABLE")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Intent incompatible with the current phase (409)
    #[error("Conflict: {message} {location}")]
    Conflict {
        message: String,
        location: ErrorLocation,
    },

    /// Workflow engine unreachable or timing out (503)
    #[error("Engine unavailable: {message} {location}")]
    Unavailable {
        message: String,
        location: ErrorLocation,
    },

    /// Internal server error (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Log the error with location for debugging
        log::error!("{}", self);

        let (status, body) = match self {
            ApiError::Conflict { message, .. } => (
                StatusCode::CONFLICT,
                ApiErrorBody {
                    code: "CONFLICT".into(),
                    message,
                },
            ),
            ApiError::Unavailable { message, .. } => (
                StatusCode::SERVICE_UNAVAILABLE,
                ApiErrorBody {
                    code: "ENGINE_UNAVAILABLE".into(),
                    message,
                },
            ),
            ApiError::Internal { message, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorBody {
                    code: "INTERNAL_ERROR".into(),
                    message,
                },
            ),
        };

        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Convert orchestrator errors to API errors
impl From<OrchestratorError> for ApiError {
    #[track_caller]
    fn from(e: OrchestratorError) -> Self {
        match e {
            OrchestratorError::Conflict { phase, intent, .. } => ApiError::Conflict {
                message: format!(
                    "cannot {} while {}: wait for the in-flight transition to resolve",
                    intent, phase
                ),
                location: ErrorLocation::from(Location::caller()),
            },
            OrchestratorError::Engine { source, .. } => match source {
                EngineError::Conflict { message, .. } => ApiError::Conflict {
                    message,
                    location: ErrorLocation::from(Location::caller()),
                },
                EngineError::Unavailable { message, .. } => ApiError::Unavailable {
                    message,
                    location: ErrorLocation::from(Location::caller()),
                },
                EngineError::Protocol { message, .. } => ApiError::Internal {
                    message,
                    location: ErrorLocation::from(Location::caller()),
                },
            },
            OrchestratorError::Store { source, .. } => {
                // Don't expose storage details to clients
                log::error!("Store error: {}", source);
                ApiError::Internal {
                    message: "State persistence failed".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
