use crate::{RunKind, RunStatus};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single execution of the remote provisioning workflow.
///
/// Created when the orchestrator issues an intent; the status is only ever
/// advanced from what the engine reports. Kept as run history for auditing
/// which run produced the current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowRun {
    pub id: String,
    pub kind: RunKind,
    pub status: RunStatus,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl WorkflowRun {
    /// A freshly issued run, before the first poll.
    pub fn started(id: impl Into<String>, kind: RunKind, started_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            kind,
            status: RunStatus::Running,
            started_at,
            finished_at: None,
        }
    }
}
