mod config;
mod database_config;
mod engine_config;
mod error;
mod lifecycle_config;
mod log_level;
mod logging_config;
mod server_config;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use database_config::DatabaseConfig;
pub use engine_config::EngineConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use lifecycle_config::LifecycleConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use server_config::ServerConfig;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_DATABASE_FILENAME: &str = "blockhost.db";
const DEFAULT_ENGINE_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";

pub const MIN_PORT: u16 = 1024;
