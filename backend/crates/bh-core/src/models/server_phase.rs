use crate::{CoreError, CoreResult};

use std::fmt;
use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Canonical lifecycle phase of the managed game server.
///
/// Exactly one phase is current at any time. `Starting` and `Stopping` are
/// the transitional phases: they are the only phases with a workflow run
/// in flight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ServerPhase {
    Offline,
    Starting,
    Online,
    Stopping,
    Error,
}

impl ServerPhase {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Offline => "offline",
            Self::Starting => "starting",
            Self::Online => "online",
            Self::Stopping => "stopping",
            Self::Error => "error",
        }
    }

    /// True while a workflow run is expected to be in flight.
    pub fn is_transitional(&self) -> bool {
        matches!(self, Self::Starting | Self::Stopping)
    }
}

impl fmt::Display for ServerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServerPhase {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "offline" => Ok(Self::Offline),
            "starting" => Ok(Self::Starting),
            "online" => Ok(Self::Online),
            "stopping" => Ok(Self::Stopping),
            "error" => Ok(Self::Error),
            _ => Err(CoreError::InvalidServerPhase {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}
