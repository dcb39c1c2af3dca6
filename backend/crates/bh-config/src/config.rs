use crate::{
    ConfigError, ConfigErrorResult, DatabaseConfig, EngineConfig, LifecycleConfig, LogLevel,
    LoggingConfig, ServerConfig,
};

use std::path::PathBuf;
use std::str::FromStr;

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub engine: EngineConfig,
    pub lifecycle: LifecycleConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config with full production error handling.
    ///
    /// Loading order:
    /// 1. Check for BH_CONFIG_DIR env var, else use ./.blockhost/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply BH_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        // Auto-create config directory
        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join("config.toml");

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &PathBuf) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.clone(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: BH_CONFIG_DIR env var > ./.blockhost/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var("BH_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(".blockhost"))
    }

    /// Absolute path of the sqlite database file.
    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.database.file))
    }

    /// "host:port" pair the HTTP listener binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Apply BH_* environment variable overrides on top of file values.
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("BH_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("BH_SERVER_PORT")
            && let Ok(port) = port.parse()
        {
            self.server.port = port;
        }
        if let Ok(file) = std::env::var("BH_DATABASE_FILE") {
            self.database.file = file;
        }
        if let Ok(url) = std::env::var("BH_ENGINE_URL") {
            self.engine.base_url = url;
        }
        if let Ok(secs) = std::env::var("BH_ENGINE_TIMEOUT_SECS")
            && let Ok(secs) = secs.parse()
        {
            self.engine.request_timeout_secs = secs;
        }
        if let Ok(level) = std::env::var("BH_LOG_LEVEL")
            && let Ok(level) = LogLevel::from_str(&level)
        {
            self.logging.level = level;
        }
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.database.validate()?;
        self.engine.validate()?;
        self.lifecycle.validate()?;

        Ok(())
    }

    /// Log the effective configuration at startup.
    pub fn log_summary(&self) {
        info!("Config: server {}", self.bind_addr());
        info!("Config: engine {}", self.engine.base_url);
        info!(
            "Config: lifecycle max_unknown_polls={} max_transition_secs={} tick_secs={}",
            self.lifecycle.max_unknown_polls,
            self.lifecycle.max_transition_secs,
            self.lifecycle.tick_secs
        );
        info!("Config: database {}", self.database.file);
    }
}
