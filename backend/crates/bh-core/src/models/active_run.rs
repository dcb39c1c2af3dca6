use crate::RunKind;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The workflow run currently in flight, referenced from `ServerState`.
///
/// Present if and only if the phase is transitional. The run id is an opaque
/// identifier minted by the remote engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveRun {
    pub id: String,
    pub kind: RunKind,
    pub started_at: DateTime<Utc>,
}
