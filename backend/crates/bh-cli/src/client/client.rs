use crate::{CliClientResult, ClientError};

use std::panic::Location;

use error_location::ErrorLocation;
use reqwest::{Client as ReqwestClient, Method};
use serde_json::Value;

/// HTTP client for the bh-server REST API
pub struct Client {
    pub base_url: String,
    client: ReqwestClient,
}

impl Client {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Control-plane URL (e.g., "http://127.0.0.1:8000")
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: ReqwestClient::new(),
        }
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, &url)
    }

    /// Execute request and handle errors
    async fn execute(&self, req: reqwest::RequestBuilder) -> CliClientResult<Value> {
        let response = req.send().await.map_err(ClientError::from_reqwest)?;
        let status = response.status();
        let body: Value = response.json().await.map_err(ClientError::from_reqwest)?;

        // Check for error response
        #[allow(clippy::collapsible_if)]
        if !status.is_success() {
            if let Some(error) = body.get("error") {
                let code = error
                    .get("code")
                    .and_then(|v| v.as_str())
                    .unwrap_or("UNKNOWN")
                    .to_string();
                let message = error
                    .get("message")
                    .and_then(|v| v.as_str())
                    .unwrap_or("Unknown error")
                    .to_string();
                return Err(ClientError::Api {
                    code,
                    message,
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        }

        Ok(body)
    }

    /// Fetch the current lifecycle state
    pub async fn status(&self) -> CliClientResult<Value> {
        let req = self.request(Method::GET, "/api/v1/server/status");
        self.execute(req).await
    }

    /// Apply a start intent
    pub async fn start(&self) -> CliClientResult<Value> {
        let req = self.request(Method::POST, "/api/v1/server/start");
        self.execute(req).await
    }

    /// Apply a stop intent
    pub async fn stop(&self) -> CliClientResult<Value> {
        let req = self.request(Method::POST, "/api/v1/server/stop");
        self.execute(req).await
    }
}
