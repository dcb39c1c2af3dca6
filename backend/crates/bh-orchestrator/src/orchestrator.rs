//! The lifecycle state machine for the single managed server.
//!
//! All phase mutation happens under the write half of one `RwLock`, held
//! across the engine call that issues a run: exactly one intent can create a
//! run at a time, and concurrent callers of the same intent observe the
//! in-flight run instead of spawning a duplicate. Plain status reads take
//! the read half; a read that must reconcile upgrades to the write half so
//! it serializes with intents.

use crate::{OrchestratorError, OrchestratorResult};

use bh_core::{
    Observation, ReconcilePolicy, ResourceDescriptor, RunKind, RunStatus, ServerPhase,
    ServerState, WorkflowRun, reconcile,
};
use bh_engine::WorkflowEngine;
use bh_store::{RunRepository, StateRepository};

use std::sync::Arc;

use chrono::Utc;
use log::{debug, info, warn};
use sqlx::SqlitePool;
use tokio::sync::RwLock;

pub struct Orchestrator {
    engine: Arc<dyn WorkflowEngine>,
    states: StateRepository,
    runs: RunRepository,
    policy: ReconcilePolicy,
    state: RwLock<ServerState>,
}

impl Orchestrator {
    /// Restore the persisted snapshot (or start offline) and take ownership
    /// of the lifecycle state. An in-flight run from a previous process is
    /// picked up as-is and reconciled on the next read.
    pub async fn restore(
        engine: Arc<dyn WorkflowEngine>,
        pool: SqlitePool,
        policy: ReconcilePolicy,
    ) -> OrchestratorResult<Self> {
        let states = StateRepository::new(pool.clone());
        let runs = RunRepository::new(pool);

        let state = match states.load().await? {
            Some(state) => {
                info!(
                    "Restored lifecycle state: phase={} active_run={:?}",
                    state.phase,
                    state.active_run.as_ref().map(|r| r.id.as_str())
                );
                state
            }
            None => {
                let state = ServerState::offline(Utc::now());
                states.save(&state).await?;
                info!("Initialized lifecycle state: phase={}", state.phase);
                state
            }
        };

        Ok(Self {
            engine,
            states,
            runs,
            policy,
            state: RwLock::new(state),
        })
    }

    /// Current state without touching the engine.
    pub async fn snapshot(&self) -> ServerState {
        self.state.read().await.clone()
    }

    /// Apply a start intent (idempotent while starting/online).
    pub async fn start(&self) -> OrchestratorResult<ServerState> {
        self.apply_intent(RunKind::Start).await
    }

    /// Apply a stop intent (idempotent while stopping/offline).
    pub async fn stop(&self) -> OrchestratorResult<ServerState> {
        self.apply_intent(RunKind::Stop).await
    }

    /// Poll-on-read status: reconcile against the engine if a run is in
    /// flight, then return the refreshed state.
    pub async fn status(&self) -> OrchestratorResult<ServerState> {
        {
            let state = self.state.read().await;
            if !state.phase.is_transitional() {
                return Ok(state.clone());
            }
        }

        let mut state = self.state.write().await;
        // A concurrent reconciliation may have resolved the run while this
        // caller waited on the lock.
        if !state.phase.is_transitional() {
            return Ok(state.clone());
        }

        self.reconcile_in_place(&mut state).await?;

        Ok(state.clone())
    }

    /// Background reconciliation; errors are logged, never fatal.
    pub async fn tick(&self) {
        match self.status().await {
            Ok(state) => debug!("Reconciliation tick: phase={}", state.phase),
            Err(e) => warn!("Reconciliation tick failed: {}", e),
        }
    }

    async fn apply_intent(&self, kind: RunKind) -> OrchestratorResult<ServerState> {
        let mut state = self.state.write().await;

        match (state.phase, kind) {
            // Idempotent no-ops: the caller observes the in-flight run or
            // the already-reached target phase.
            (ServerPhase::Starting | ServerPhase::Online, RunKind::Start)
            | (ServerPhase::Stopping | ServerPhase::Offline, RunKind::Stop) => {
                debug!("{} intent is a no-op in phase {}", kind, state.phase);
                Ok(state.clone())
            }

            // Opposite intent during a transition: never cancel, reject.
            (ServerPhase::Starting, RunKind::Stop) | (ServerPhase::Stopping, RunKind::Start) => {
                Err(OrchestratorError::conflict(state.phase, kind))
            }

            // Offline/Error -> start, Online/Error -> stop: issue a run.
            _ => {
                let run_id = self.engine.start_run(kind).await?;
                let now = Utc::now();

                let next = state.with_run_issued(run_id.as_str(), kind, now);
                *state = next.clone();

                self.runs
                    .upsert(&WorkflowRun::started(run_id.clone(), kind, now))
                    .await?;
                self.states.save(&next).await?;

                info!("Issued {} run {}: phase={}", kind, run_id, next.phase);
                Ok(next)
            }
        }
    }

    /// Poll the engine for the active run and fold the observation into the
    /// canonical state. Engine unavailability propagates without mutating
    /// anything; the phase only moves on an authoritative answer or a
    /// policy threshold.
    async fn reconcile_in_place(&self, state: &mut ServerState) -> OrchestratorResult<()> {
        let Some(run) = state.active_run.clone() else {
            return Ok(());
        };

        let run_status = self.engine.run_status(&run.id).await?;

        // The descriptor only matters for deciding whether a finished start
        // can be trusted; skip the extra engine call otherwise.
        let resource = if run_status == RunStatus::Succeeded && run.kind == RunKind::Start {
            self.engine.describe_resource().await?
        } else {
            ResourceDescriptor::Unknown
        };

        let now = Utc::now();
        let next = reconcile(
            state,
            &Observation {
                run_status,
                resource,
            },
            &self.policy,
            now,
        );

        if next == *state {
            return Ok(());
        }

        if next.active_run.is_none() {
            // The run left the in-flight set: either terminal, or abandoned
            // by a policy threshold. Record what the engine last said.
            let finished_at = run_status.is_terminal().then_some(now);
            self.runs
                .upsert(&WorkflowRun {
                    id: run.id.clone(),
                    kind: run.kind,
                    status: run_status,
                    started_at: run.started_at,
                    finished_at,
                })
                .await?;

            info!(
                "{} run {} resolved: phase {} -> {}",
                run.kind, run.id, state.phase, next.phase
            );
        }

        *state = next.clone();
        self.states.save(&next).await?;

        Ok(())
    }
}
