#![allow(dead_code)]

//! Test infrastructure for bh-server API tests

use bh_core::{ReconcilePolicy, ResourceDescriptor, RunKind, RunStatus};
use bh_engine::{EngineResult, WorkflowEngine};
use bh_orchestrator::Orchestrator;
use bh_server::AppState;
use bh_store::connect_in_memory;

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

/// Engine double driven by scripted responses; unscripted calls default to
/// minting sequential run ids and answering `running`.
pub struct ScriptedEngine {
    start_results: Mutex<VecDeque<EngineResult<String>>>,
    poll_results: Mutex<VecDeque<EngineResult<RunStatus>>>,
    resource: Mutex<ResourceDescriptor>,
    start_calls: AtomicUsize,
}

impl ScriptedEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            start_results: Mutex::new(VecDeque::new()),
            poll_results: Mutex::new(VecDeque::new()),
            resource: Mutex::new(ResourceDescriptor::Unknown),
            start_calls: AtomicUsize::new(0),
        })
    }

    pub fn push_start(&self, result: EngineResult<String>) {
        self.start_results.lock().unwrap().push_back(result);
    }

    pub fn push_poll(&self, result: EngineResult<RunStatus>) {
        self.poll_results.lock().unwrap().push_back(result);
    }

    pub fn set_resource(&self, resource: ResourceDescriptor) {
        *self.resource.lock().unwrap() = resource;
    }
}

#[async_trait]
impl WorkflowEngine for ScriptedEngine {
    async fn start_run(&self, _kind: RunKind) -> EngineResult<String> {
        let n = self.start_calls.fetch_add(1, Ordering::SeqCst) + 1;
        match self.start_results.lock().unwrap().pop_front() {
            Some(result) => result,
            None => Ok(format!("run-{}", n)),
        }
    }

    async fn run_status(&self, _run_id: &str) -> EngineResult<RunStatus> {
        match self.poll_results.lock().unwrap().pop_front() {
            Some(result) => result,
            None => Ok(RunStatus::Running),
        }
    }

    async fn describe_resource(&self) -> EngineResult<ResourceDescriptor> {
        Ok(self.resource.lock().unwrap().clone())
    }
}

/// Create AppState backed by an in-memory store and the given engine double
pub async fn create_test_app_state(engine: Arc<ScriptedEngine>) -> AppState {
    let pool = connect_in_memory().await.expect("in-memory database");
    let policy = ReconcilePolicy {
        max_unknown_polls: 3,
        max_transition_secs: 3600,
    };
    let orchestrator = Orchestrator::restore(engine, pool, policy)
        .await
        .expect("orchestrator restores");

    AppState {
        orchestrator: Arc::new(orchestrator),
    }
}
