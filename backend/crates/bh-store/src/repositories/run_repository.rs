//! Workflow run history.
//!
//! Every issued run gets a row; the row is updated when the engine reports a
//! terminal status. The history is the audit trail behind `last_error`.

use crate::{StoreError, StoreResult};

use bh_core::{RunKind, RunStatus, WorkflowRun};

use std::str::FromStr;

use chrono::DateTime;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

pub struct RunRepository {
    pool: SqlitePool,
}

impl RunRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn upsert(&self, run: &WorkflowRun) -> StoreResult<()> {
        let kind = run.kind.as_str();
        let status = run.status.as_str();
        let started_at = run.started_at.timestamp();
        let finished_at = run.finished_at.map(|dt| dt.timestamp());

        sqlx::query(
            r#"
                INSERT OR REPLACE INTO bh_runs (id, kind, status, started_at, finished_at)
                VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&run.id)
        .bind(kind)
        .bind(status)
        .bind(started_at)
        .bind(finished_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> StoreResult<Option<WorkflowRun>> {
        let row = sqlx::query(
            r#"
                SELECT id, kind, status, started_at, finished_at
                FROM bh_runs
                WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(map_run).transpose()
    }

    pub async fn find_latest(&self) -> StoreResult<Option<WorkflowRun>> {
        let row = sqlx::query(
            r#"
                SELECT id, kind, status, started_at, finished_at
                FROM bh_runs
                ORDER BY started_at DESC
                LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        row.map(map_run).transpose()
    }

    pub async fn find_recent(&self, limit: i64) -> StoreResult<Vec<WorkflowRun>> {
        let rows = sqlx::query(
            r#"
                SELECT id, kind, status, started_at, finished_at
                FROM bh_runs
                ORDER BY started_at DESC
                LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(map_run).collect()
    }
}

fn map_run(row: SqliteRow) -> StoreResult<WorkflowRun> {
    let kind: String = row.try_get("kind")?;
    let status: String = row.try_get("status")?;
    let started_at: i64 = row.try_get("started_at")?;
    let finished_at: Option<i64> = row.try_get("finished_at")?;

    Ok(WorkflowRun {
        id: row.try_get("id")?,
        kind: RunKind::from_str(&kind)
            .map_err(|e| StoreError::corrupt(format!("runs.kind: {}", e)))?,
        status: RunStatus::from_str(&status)
            .map_err(|e| StoreError::corrupt(format!("runs.status: {}", e)))?,
        started_at: DateTime::from_timestamp(started_at, 0)
            .ok_or_else(|| StoreError::corrupt("Invalid timestamp in runs.started_at"))?,
        finished_at: finished_at
            .map(|ts| {
                DateTime::from_timestamp(ts, 0)
                    .ok_or_else(|| StoreError::corrupt("Invalid timestamp in runs.finished_at"))
            })
            .transpose()?,
    })
}
