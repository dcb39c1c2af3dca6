//! Singleton snapshot of the canonical server lifecycle state.
//!
//! One row (id = 1) holds the latest `ServerState`; the orchestrator saves
//! it on every transition and restores it on boot so an in-flight run
//! survives a process restart.

use crate::{StoreError, StoreResult};

use bh_core::{ActiveRun, FailureKind, LastError, RunKind, ServerPhase, ServerState};

use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

pub struct StateRepository {
    pool: SqlitePool,
}

impl StateRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn save(&self, state: &ServerState) -> StoreResult<()> {
        let phase = state.phase.as_str();
        let active_run_id = state.active_run.as_ref().map(|r| r.id.clone());
        let active_run_kind = state.active_run.as_ref().map(|r| r.kind.as_str());
        let active_run_started_at = state.active_run.as_ref().map(|r| r.started_at.timestamp());
        let last_transition_at = state.last_transition_at.timestamp();
        let last_error_kind = state.last_error.as_ref().map(|e| e.kind.as_str());
        let last_error_message = state.last_error.as_ref().map(|e| e.message.clone());
        let last_error_at = state.last_error.as_ref().map(|e| e.at.timestamp());

        sqlx::query(
            r#"
                INSERT OR REPLACE INTO bh_server_state (
                    id, phase, active_run_id, active_run_kind, active_run_started_at,
                    address, last_transition_at,
                    last_error_kind, last_error_message, last_error_at,
                    unknown_polls
                ) VALUES (1, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(phase)
        .bind(active_run_id)
        .bind(active_run_kind)
        .bind(active_run_started_at)
        .bind(state.address.as_deref())
        .bind(last_transition_at)
        .bind(last_error_kind)
        .bind(last_error_message)
        .bind(last_error_at)
        .bind(state.unknown_polls as i64)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn load(&self) -> StoreResult<Option<ServerState>> {
        let row = sqlx::query(
            r#"
                SELECT phase, active_run_id, active_run_kind, active_run_started_at,
                    address, last_transition_at,
                    last_error_kind, last_error_message, last_error_at,
                    unknown_polls
                FROM bh_server_state
                WHERE id = 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let phase: String = row.try_get("phase")?;
        let phase = ServerPhase::from_str(&phase)
            .map_err(|e| StoreError::corrupt(format!("server_state.phase: {}", e)))?;

        let active_run_id: Option<String> = row.try_get("active_run_id")?;
        let active_run = match active_run_id {
            Some(id) => {
                let kind: Option<String> = row.try_get("active_run_kind")?;
                let kind = kind
                    .ok_or_else(|| StoreError::corrupt("active_run_kind is NULL for active run"))?;
                let kind = RunKind::from_str(&kind)
                    .map_err(|e| StoreError::corrupt(format!("server_state.active_run_kind: {}", e)))?;
                let started_at: Option<i64> = row.try_get("active_run_started_at")?;
                let started_at = started_at.ok_or_else(|| {
                    StoreError::corrupt("active_run_started_at is NULL for active run")
                })?;
                Some(ActiveRun {
                    id,
                    kind,
                    started_at: timestamp(started_at, "active_run_started_at")?,
                })
            }
            None => None,
        };

        let last_error_kind: Option<String> = row.try_get("last_error_kind")?;
        let last_error = match last_error_kind {
            Some(kind) => {
                let kind = FailureKind::from_str(&kind)
                    .map_err(|e| StoreError::corrupt(format!("server_state.last_error_kind: {}", e)))?;
                let message: Option<String> = row.try_get("last_error_message")?;
                let at: Option<i64> = row.try_get("last_error_at")?;
                let at = at.ok_or_else(|| StoreError::corrupt("last_error_at is NULL"))?;
                Some(LastError::new(
                    kind,
                    message.unwrap_or_default(),
                    timestamp(at, "last_error_at")?,
                ))
            }
            None => None,
        };

        let last_transition_at: i64 = row.try_get("last_transition_at")?;
        let unknown_polls: i64 = row.try_get("unknown_polls")?;

        Ok(Some(ServerState {
            phase,
            active_run,
            address: row.try_get("address")?,
            last_transition_at: timestamp(last_transition_at, "last_transition_at")?,
            last_error,
            unknown_polls: unknown_polls as u32,
        }))
    }
}

fn timestamp(secs: i64, column: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| StoreError::corrupt(format!("Invalid timestamp in {}", column)))
}
