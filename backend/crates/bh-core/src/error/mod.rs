use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid server phase: {value} {location}")]
    InvalidServerPhase {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid run kind: {value} {location}")]
    InvalidRunKind {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid run status: {value} {location}")]
    InvalidRunStatus {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid failure kind: {value} {location}")]
    InvalidFailureKind {
        value: String,
        location: ErrorLocation,
    },
}

pub type CoreResult<T> = StdResult<T, CoreError>;
