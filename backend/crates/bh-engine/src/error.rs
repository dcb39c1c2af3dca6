use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

/// Errors from the remote workflow engine boundary.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The engine refused because a run is already active (409).
    #[error("Engine conflict: {message} {location}")]
    Conflict {
        message: String,
        location: ErrorLocation,
    },

    /// Connectivity failure, timeout, or 5xx - transient, safe to retry.
    #[error("Engine unavailable: {message} {location}")]
    Unavailable {
        message: String,
        location: ErrorLocation,
    },

    /// The engine answered with something this client cannot interpret.
    #[error("Engine protocol error: {message} {location}")]
    Protocol {
        message: String,
        location: ErrorLocation,
    },
}

impl EngineError {
    #[track_caller]
    pub fn conflict<S: Into<String>>(message: S) -> Self {
        EngineError::Conflict {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unavailable<S: Into<String>>(message: S) -> Self {
        EngineError::Unavailable {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn protocol<S: Into<String>>(message: S) -> Self {
        EngineError::Protocol {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for EngineError {
    #[track_caller]
    fn from(e: reqwest::Error) -> Self {
        // Anything the transport could not deliver is transient by contract;
        // a body we failed to decode is the engine speaking a different
        // protocol.
        if e.is_decode() {
            EngineError::Protocol {
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        } else {
            EngineError::Unavailable {
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        }
    }
}

pub type EngineResult<T> = StdResult<T, EngineError>;
