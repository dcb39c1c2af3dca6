//! Pure reconciliation of canonical server state against engine observations.
//!
//! `reconcile` is the only place lifecycle phase is derived from raw engine
//! output. It performs no I/O and never reads the clock; the caller supplies
//! the observation and `now`, so identical inputs always produce identical
//! output state.

use crate::{
    FailureKind, LastError, ResourceDescriptor, RunKind, RunStatus, ServerPhase, ServerState,
};

use chrono::{DateTime, Utc};

/// Thresholds that bound how long a transitional phase may stay unresolved.
#[derive(Debug, Clone, Copy)]
pub struct ReconcilePolicy {
    /// Consecutive `unknown` polls tolerated before degrading to `error`.
    pub max_unknown_polls: u32,
    /// Maximum wall-clock seconds a run may stay transitional.
    pub max_transition_secs: u64,
}

/// One poll's worth of raw engine output for the active run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub run_status: RunStatus,
    pub resource: ResourceDescriptor,
}

/// Derive the next canonical state from the previous state and the latest
/// engine observation.
///
/// With no run in flight there is nothing to reconcile and the state is
/// returned unchanged.
pub fn reconcile(
    state: &ServerState,
    obs: &Observation,
    policy: &ReconcilePolicy,
    now: DateTime<Utc>,
) -> ServerState {
    let Some(run) = &state.active_run else {
        return state.clone();
    };

    let elapsed_secs = (now - state.last_transition_at).num_seconds().max(0) as u64;

    match obs.run_status {
        RunStatus::Running => {
            if elapsed_secs > policy.max_transition_secs {
                return failed_state(
                    state,
                    FailureKind::TransitionTimeout,
                    format!(
                        "{} run {} still unresolved after {}s",
                        run.kind, run.id, elapsed_secs
                    ),
                    now,
                );
            }
            let mut next = state.clone();
            next.unknown_polls = 0;
            next
        }
        RunStatus::Unknown => {
            if elapsed_secs > policy.max_transition_secs {
                return failed_state(
                    state,
                    FailureKind::TransitionTimeout,
                    format!(
                        "{} run {} still unresolved after {}s",
                        run.kind, run.id, elapsed_secs
                    ),
                    now,
                );
            }
            let streak = state.unknown_polls + 1;
            if streak >= policy.max_unknown_polls {
                return failed_state(
                    state,
                    FailureKind::PollTimeout,
                    format!(
                        "engine answered unknown for {} run {} on {} consecutive polls",
                        run.kind, run.id, streak
                    ),
                    now,
                );
            }
            let mut next = state.clone();
            next.unknown_polls = streak;
            next
        }
        RunStatus::Failed => failed_state(
            state,
            FailureKind::RunFailed,
            format!("{} run {} failed", run.kind, run.id),
            now,
        ),
        RunStatus::Succeeded => match run.kind {
            RunKind::Start => {
                // A start can only be trusted if the resource actually
                // exists; prefer `error` over a false `online`.
                if obs.resource == ResourceDescriptor::Absent {
                    return failed_state(
                        state,
                        FailureKind::ResourceMissing,
                        format!(
                            "start run {} succeeded but the engine reports no resource",
                            run.id
                        ),
                        now,
                    );
                }
                ServerState {
                    phase: ServerPhase::Online,
                    active_run: None,
                    address: obs.resource.address().map(String::from),
                    last_transition_at: now,
                    last_error: None,
                    unknown_polls: 0,
                }
            }
            RunKind::Stop => ServerState {
                phase: ServerPhase::Offline,
                active_run: None,
                address: None,
                last_transition_at: now,
                last_error: None,
                unknown_polls: 0,
            },
        },
    }
}

fn failed_state(
    state: &ServerState,
    kind: FailureKind,
    message: String,
    now: DateTime<Utc>,
) -> ServerState {
    ServerState {
        phase: ServerPhase::Error,
        active_run: None,
        address: None,
        last_transition_at: now,
        last_error: Some(LastError::new(kind, message, now)),
        unknown_polls: 0,
    }
}
