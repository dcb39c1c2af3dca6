use bh_core::{RunKind, ServerPhase};
use bh_engine::EngineError;
use bh_store::StoreError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrchestratorError {
    /// The intent is incompatible with the in-flight transition. The caller
    /// must wait for it to resolve; in-flight runs are never cancelled.
    #[error("Cannot {intent} while {phase}: wait for the in-flight transition {location}")]
    Conflict {
        phase: ServerPhase,
        intent: RunKind,
        location: ErrorLocation,
    },

    #[error("Engine error: {source} {location}")]
    Engine {
        source: EngineError,
        location: ErrorLocation,
    },

    #[error("Store error: {source} {location}")]
    Store {
        source: StoreError,
        location: ErrorLocation,
    },
}

impl OrchestratorError {
    #[track_caller]
    pub fn conflict(phase: ServerPhase, intent: RunKind) -> Self {
        OrchestratorError::Conflict {
            phase,
            intent,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<EngineError> for OrchestratorError {
    #[track_caller]
    fn from(source: EngineError) -> Self {
        Self::Engine {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<StoreError> for OrchestratorError {
    #[track_caller]
    fn from(source: StoreError) -> Self {
        Self::Store {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type OrchestratorResult<T> = std::result::Result<T, OrchestratorError>;
