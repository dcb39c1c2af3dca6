use crate::{CoreError, CoreResult};

use std::fmt;
use std::panic::Location;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Classification of the most recent failed transition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The workflow run itself reached `failed`.
    RunFailed,
    /// The engine answered `unknown` too many polls in a row.
    PollTimeout,
    /// The transitional phase outlived the configured maximum duration.
    TransitionTimeout,
    /// The run succeeded but the resource descriptor disagreed.
    ResourceMissing,
}

impl FailureKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::RunFailed => "run_failed",
            Self::PollTimeout => "poll_timeout",
            Self::TransitionTimeout => "transition_timeout",
            Self::ResourceMissing => "resource_missing",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FailureKind {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "run_failed" => Ok(Self::RunFailed),
            "poll_timeout" => Ok(Self::PollTimeout),
            "transition_timeout" => Ok(Self::TransitionTimeout),
            "resource_missing" => Ok(Self::ResourceMissing),
            _ => Err(CoreError::InvalidFailureKind {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

/// Structured record of the most recent failed transition.
///
/// Persists until the next successful transition overwrites it, so callers
/// can see what went wrong even after recovery has begun.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastError {
    pub kind: FailureKind,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl LastError {
    pub fn new(kind: FailureKind, message: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            kind,
            message: message.into(),
            at,
        }
    }
}
