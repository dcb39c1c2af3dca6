use crate::{ConfigError, ConfigErrorResult, DEFAULT_ENGINE_TIMEOUT_SECS};

use serde::Deserialize;

// Engine request timeout constraints
pub const MIN_ENGINE_TIMEOUT_SECS: u64 = 1;
pub const MAX_ENGINE_TIMEOUT_SECS: u64 = 120;

/// Connection settings for the remote workflow engine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Base URL of the workflow engine API (e.g. "http://127.0.0.1:9000").
    pub base_url: String,
    /// Per-request timeout; no engine call may block past this.
    pub request_timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("http://127.0.0.1:9000"),
            request_timeout_secs: DEFAULT_ENGINE_TIMEOUT_SECS,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.base_url.is_empty() {
            return Err(ConfigError::engine("engine.base_url must not be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::engine(format!(
                "engine.base_url must be an http(s) URL, got {}",
                self.base_url
            )));
        }

        if self.request_timeout_secs < MIN_ENGINE_TIMEOUT_SECS
            || self.request_timeout_secs > MAX_ENGINE_TIMEOUT_SECS
        {
            return Err(ConfigError::engine(format!(
                "engine.request_timeout_secs must be {}-{}, got {}",
                MIN_ENGINE_TIMEOUT_SECS, MAX_ENGINE_TIMEOUT_SECS, self.request_timeout_secs
            )));
        }

        Ok(())
    }
}
