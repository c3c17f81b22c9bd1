mod api_config;
mod board_config;
mod chat_config;
mod config;
mod credentials_config;
mod error;
mod log_level;
mod logging_config;

pub use api_config::ApiConfig;
pub use board_config::BoardConfig;
pub use chat_config::{ChatConfig, MAX_POLL_INTERVAL_SECS, MIN_POLL_INTERVAL_SECS};
pub use config::Config;
pub use credentials_config::CredentialsConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;

#[cfg(test)]
mod tests;

const CONFIG_DIR_ENV: &str = "KB_CONFIG_DIR";
const CONFIG_DIR_NAME: &str = ".kb";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/v1";
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_CREDENTIALS_FILE: &str = "credentials.json";
