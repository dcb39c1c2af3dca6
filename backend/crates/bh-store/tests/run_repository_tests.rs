//! Tests for the workflow run history

use bh_core::{RunKind, RunStatus, WorkflowRun};
use bh_store::{RunRepository, connect_in_memory};

use chrono::{DateTime, Duration, Utc};

fn now() -> DateTime<Utc> {
    DateTime::from_timestamp(Utc::now().timestamp(), 0).unwrap()
}

#[tokio::test]
async fn started_run_round_trips() {
    let pool = connect_in_memory().await.unwrap();
    let repo = RunRepository::new(pool);

    let run = WorkflowRun::started("run-1", RunKind::Start, now());
    repo.upsert(&run).await.unwrap();

    let loaded = repo.find_by_id("run-1").await.unwrap().expect("run saved");
    assert_eq!(loaded, run);
    assert_eq!(loaded.status, RunStatus::Running);
    assert_eq!(loaded.finished_at, None);
}

#[tokio::test]
async fn upsert_advances_status_in_place() {
    let pool = connect_in_memory().await.unwrap();
    let repo = RunRepository::new(pool);

    let mut run = WorkflowRun::started("run-2", RunKind::Stop, now());
    repo.upsert(&run).await.unwrap();

    run.status = RunStatus::Succeeded;
    run.finished_at = Some(now());
    repo.upsert(&run).await.unwrap();

    let loaded = repo.find_by_id("run-2").await.unwrap().expect("run saved");
    assert_eq!(loaded.status, RunStatus::Succeeded);
    assert!(loaded.finished_at.is_some());
}

#[tokio::test]
async fn find_latest_orders_by_start_time() {
    let pool = connect_in_memory().await.unwrap();
    let repo = RunRepository::new(pool);

    let older = WorkflowRun::started("run-old", RunKind::Start, now() - Duration::minutes(10));
    let newer = WorkflowRun::started("run-new", RunKind::Stop, now());
    repo.upsert(&older).await.unwrap();
    repo.upsert(&newer).await.unwrap();

    let latest = repo.find_latest().await.unwrap().expect("runs saved");
    assert_eq!(latest.id, "run-new");
}

#[tokio::test]
async fn find_recent_respects_limit() {
    let pool = connect_in_memory().await.unwrap();
    let repo = RunRepository::new(pool);

    for i in 0..5 {
        let run = WorkflowRun::started(
            format!("run-{}", i),
            RunKind::Start,
            now() - Duration::minutes(i),
        );
        repo.upsert(&run).await.unwrap();
    }

    let recent = repo.find_recent(3).await.unwrap();
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0].id, "run-0");
}

#[tokio::test]
async fn missing_run_is_none() {
    let pool = connect_in_memory().await.unwrap();
    let repo = RunRepository::new(pool);

    assert_eq!(repo.find_by_id("run-404").await.unwrap(), None);
}
