use crate::{ActiveRun, LastError, RunKind, ServerPhase};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical lifecycle state of the single managed server.
///
/// `active_run` is set if and only if the phase is transitional; the
/// reconciler and orchestrator both maintain that correspondence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerState {
    pub phase: ServerPhase,
    pub active_run: Option<ActiveRun>,
    /// Player-facing address while the server is online.
    pub address: Option<String>,
    pub last_transition_at: DateTime<Utc>,
    pub last_error: Option<LastError>,
    /// Consecutive polls the engine answered `unknown` for the active run.
    pub unknown_polls: u32,
}

impl ServerState {
    /// Initial state for a freshly provisioned control plane.
    pub fn offline(now: DateTime<Utc>) -> Self {
        Self {
            phase: ServerPhase::Offline,
            active_run: None,
            address: None,
            last_transition_at: now,
            last_error: None,
            unknown_polls: 0,
        }
    }

    /// Enter a transitional phase for a freshly issued run.
    pub fn with_run_issued(&self, run_id: impl Into<String>, kind: RunKind, now: DateTime<Utc>) -> Self {
        let phase = match kind {
            RunKind::Start => ServerPhase::Starting,
            RunKind::Stop => ServerPhase::Stopping,
        };
        Self {
            phase,
            active_run: Some(ActiveRun {
                id: run_id.into(),
                kind,
                started_at: now,
            }),
            address: None,
            last_transition_at: now,
            // Retained until the new run resolves successfully.
            last_error: self.last_error.clone(),
            unknown_polls: 0,
        }
    }

    /// True when the active-run/phase correspondence holds.
    pub fn run_matches_phase(&self) -> bool {
        self.active_run.is_some() == self.phase.is_transitional()
    }
}
