use bh_orchestrator::Orchestrator;

use std::sync::Arc;

/// Shared application state for HTTP handlers.
///
/// The orchestrator owns the lifecycle state; handlers only hold this
/// handle, never the state itself.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
}
