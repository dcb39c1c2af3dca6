//! HTTP adapter for the remote workflow engine.
//!
//! Wire contract:
//! - `POST /v1/runs` with `{"kind", "request_id"}` starts a run and returns
//!   `{"run_id"}`; 409 means a run is already active.
//! - `GET /v1/runs/{id}` returns `{"status"}`; 404 and unrecognized status
//!   strings degrade to `RunStatus::Unknown` rather than failing.
//! - `GET /v1/resource` returns `{"state", "address"?}`.

use crate::{EngineError, EngineResult, WorkflowEngine};

use bh_config::EngineConfig;
use bh_core::{ResourceDescriptor, RunKind, RunStatus};

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client as ReqwestClient, Response, StatusCode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub struct HttpWorkflowEngine {
    base_url: String,
    client: ReqwestClient,
}

#[derive(Serialize)]
struct StartRunRequest<'a> {
    kind: &'a str,
    /// Client-minted token so a retried request cannot create two runs.
    request_id: String,
}

#[derive(Deserialize)]
struct StartRunResponse {
    run_id: String,
}

#[derive(Deserialize)]
struct RunStatusResponse {
    status: String,
}

#[derive(Deserialize)]
struct ResourceResponse {
    state: String,
    address: Option<String>,
}

impl HttpWorkflowEngine {
    pub fn new(config: &EngineConfig) -> EngineResult<Self> {
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(EngineError::from)?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Pull a human-readable message out of the engine's error envelope.
    async fn error_message(response: Response) -> String {
        let status = response.status();
        match response.json::<serde_json::Value>().await {
            Ok(body) => body
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(String::from)
                .unwrap_or_else(|| format!("engine answered {}", status)),
            Err(_) => format!("engine answered {}", status),
        }
    }
}

#[async_trait]
impl WorkflowEngine for HttpWorkflowEngine {
    async fn start_run(&self, kind: RunKind) -> EngineResult<String> {
        let body = StartRunRequest {
            kind: kind.as_str(),
            request_id: Uuid::new_v4().to_string(),
        };

        let response = self
            .client
            .post(self.url("/v1/runs"))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::CONFLICT {
            return Err(EngineError::conflict(Self::error_message(response).await));
        }
        if status.is_server_error() {
            return Err(EngineError::unavailable(
                Self::error_message(response).await,
            ));
        }
        if !status.is_success() {
            return Err(EngineError::protocol(format!(
                "unexpected status {} starting {} run",
                status, kind
            )));
        }

        let parsed: StartRunResponse = response.json().await?;
        debug!("Engine accepted {} run {}", kind, parsed.run_id);

        Ok(parsed.run_id)
    }

    async fn run_status(&self, run_id: &str) -> EngineResult<RunStatus> {
        let response = self
            .client
            .get(self.url(&format!("/v1/runs/{}", run_id)))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            // The run may not be visible yet; not authoritative either way.
            return Ok(RunStatus::Unknown);
        }
        if status.is_server_error() {
            return Err(EngineError::unavailable(
                Self::error_message(response).await,
            ));
        }
        if !status.is_success() {
            return Err(EngineError::protocol(format!(
                "unexpected status {} polling run {}",
                status, run_id
            )));
        }

        let parsed: RunStatusResponse = response.json().await?;

        Ok(RunStatus::from_str(&parsed.status).unwrap_or(RunStatus::Unknown))
    }

    async fn describe_resource(&self) -> EngineResult<ResourceDescriptor> {
        let response = self.client.get(self.url("/v1/resource")).send().await?;

        let status = response.status();
        if status.is_server_error() {
            return Err(EngineError::unavailable(
                Self::error_message(response).await,
            ));
        }
        if !status.is_success() {
            return Err(EngineError::protocol(format!(
                "unexpected status {} describing resource",
                status
            )));
        }

        let parsed: ResourceResponse = response.json().await?;

        Ok(match parsed.state.as_str() {
            "present" => match parsed.address {
                Some(address) => ResourceDescriptor::Present { address },
                None => ResourceDescriptor::Unknown,
            },
            "absent" => ResourceDescriptor::Absent,
            _ => ResourceDescriptor::Unknown,
        })
    }
}
