use serde::{Deserialize, Serialize};

/// What the engine's resource descriptor says about the game server itself,
/// independent of any workflow run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum ResourceDescriptor {
    /// The compute resource exists; `address` is where players connect.
    Present { address: String },
    /// No compute resource exists.
    Absent,
    /// The engine could not describe the resource.
    Unknown,
}

impl ResourceDescriptor {
    pub fn address(&self) -> Option<&str> {
        match self {
            Self::Present { address } => Some(address),
            Self::Absent | Self::Unknown => None,
        }
    }
}
