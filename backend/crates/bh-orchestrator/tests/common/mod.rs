#![allow(dead_code)]

//! Test infrastructure for orchestrator tests

use bh_core::{ReconcilePolicy, ResourceDescriptor, RunKind, RunStatus};
use bh_engine::{EngineResult, WorkflowEngine};
use bh_orchestrator::Orchestrator;
use bh_store::connect_in_memory;

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::SqlitePool;

/// Engine double driven by scripted responses.
///
/// Unscripted calls fall back to benign defaults: `start_run` mints
/// sequential ids, `run_status` answers `running`.
pub struct ScriptedEngine {
    start_results: Mutex<VecDeque<EngineResult<String>>>,
    poll_results: Mutex<VecDeque<EngineResult<RunStatus>>>,
    resource: Mutex<ResourceDescriptor>,
    pub start_calls: AtomicUsize,
    pub poll_calls: AtomicUsize,
}

impl ScriptedEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            start_results: Mutex::new(VecDeque::new()),
            poll_results: Mutex::new(VecDeque::new()),
            resource: Mutex::new(ResourceDescriptor::Unknown),
            start_calls: AtomicUsize::new(0),
            poll_calls: AtomicUsize::new(0),
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

    pub fn start_call_count(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
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
        self.poll_calls.fetch_add(1, Ordering::SeqCst);
        match self.poll_results.lock().unwrap().pop_front() {
            Some(result) => result,
            None => Ok(RunStatus::Running),
        }
    }

    async fn describe_resource(&self) -> EngineResult<ResourceDescriptor> {
        Ok(self.resource.lock().unwrap().clone())
    }
}

pub fn test_policy() -> ReconcilePolicy {
    ReconcilePolicy {
        max_unknown_polls: 3,
        max_transition_secs: 3600,
    }
}

pub async fn create_test_pool() -> SqlitePool {
    connect_in_memory().await.expect("in-memory database")
}

pub async fn create_orchestrator(engine: Arc<ScriptedEngine>, pool: SqlitePool) -> Orchestrator {
    Orchestrator::restore(engine, pool, test_policy())
        .await
        .expect("orchestrator restores")
}
