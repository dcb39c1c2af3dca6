use bh_core::{ActiveRun, LastError, ServerPhase, ServerState};

use serde::Serialize;

/// Response wrapper for server lifecycle state
#[derive(Debug, Serialize)]
pub struct ServerStateResponse {
    pub server: ServerStateDto,
}

#[derive(Debug, Serialize)]
pub struct ServerStateDto {
    pub phase: ServerPhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_run: Option<ActiveRunDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub last_transition_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<LastErrorDto>,
}

#[derive(Debug, Serialize)]
pub struct ActiveRunDto {
    pub id: String,
    pub kind: String,
    pub started_at: String,
}

#[derive(Debug, Serialize)]
pub struct LastErrorDto {
    pub kind: String,
    pub message: String,
    pub at: String,
}

impl From<ActiveRun> for ActiveRunDto {
    fn from(run: ActiveRun) -> Self {
        Self {
            id: run.id,
            kind: run.kind.as_str().to_string(),
            started_at: run.started_at.to_rfc3339(),
        }
    }
}

impl From<LastError> for LastErrorDto {
    fn from(error: LastError) -> Self {
        Self {
            kind: error.kind.as_str().to_string(),
            message: error.message,
            at: error.at.to_rfc3339(),
        }
    }
}

impl From<ServerState> for ServerStateDto {
    fn from(state: ServerState) -> Self {
        Self {
            phase: state.phase,
            active_run: state.active_run.map(ActiveRunDto::from),
            address: state.address,
            last_transition_at: state.last_transition_at.to_rfc3339(),
            last_error: state.last_error.map(LastErrorDto::from),
        }
    }
}
