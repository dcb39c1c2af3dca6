use crate::EngineResult;

use bh_core::{ResourceDescriptor, RunKind, RunStatus};

use async_trait::async_trait;

/// Boundary to the remote asynchronous workflow engine.
///
/// Implementations are stateless between calls and have no side effects
/// beyond the remote call itself. The engine does NOT guarantee
/// at-most-one-active-run; the orchestrator defends against duplicates with
/// its own single-writer critical section.
#[async_trait]
pub trait WorkflowEngine: Send + Sync {
    /// Request a new provisioning or deprovisioning run.
    ///
    /// Returns the engine-minted opaque run id. Fails with
    /// `EngineError::Conflict` when the engine reports a run already active,
    /// `EngineError::Unavailable` on connectivity/timeout.
    async fn start_run(&self, kind: RunKind) -> EngineResult<String>;

    /// Poll the status of a run.
    ///
    /// `RunStatus::Unknown` means the engine could not answer
    /// authoritatively; callers treat it as a retryable transient condition.
    async fn run_status(&self, run_id: &str) -> EngineResult<RunStatus>;

    /// Describe the managed compute resource itself.
    async fn describe_resource(&self) -> EngineResult<ResourceDescriptor>;
}
