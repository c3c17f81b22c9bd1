use crate::{
    ApiConfig, BoardConfig, CONFIG_DIR_ENV, CONFIG_DIR_NAME, CONFIG_FILENAME, ChatConfig,
    ConfigError, ConfigErrorResult, CredentialsConfig, LoggingConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
    pub board: BoardConfig,
    pub chat: ChatConfig,
    pub credentials: CredentialsConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for KB_CONFIG_DIR env var, else use ./.kb/
    /// 2. Load config.toml if it exists, else use defaults
    /// 3. Apply KB_* environment variable overrides
    ///
    /// The directory is not created here; the credential store creates it on
    /// first write. Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_path = Self::config_dir()?.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: KB_CONFIG_DIR env var > ./.kb/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(CONFIG_DIR_NAME))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.api.validate()?;
        self.board.validate()?;
        self.chat.validate()?;
        self.credentials.validate()?;

        Ok(())
    }

    /// Get absolute path to the credentials file.
    pub fn credentials_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.credentials.file))
    }

    /// Log configuration summary (never logs credentials).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  api: {} (timeout {}s)",
            self.api.base_url, self.api.timeout_secs
        );
        info!(
            "  logging: {} (colored: {}, file: {})",
            *self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("stdout")
        );
        info!("  board: done_keywords={:?}", self.board.done_keywords);
        info!(
            "  chat: poll={}s, auto_refresh={}",
            self.chat.poll_interval_secs, self.chat.auto_refresh
        );
        info!("  credentials: {}", self.credentials.file);
    }

    fn apply_env_overrides(&mut self) {
        // Api
        Self::apply_env_string("KB_API_BASE_URL", &mut self.api.base_url);
        Self::apply_env_parse("KB_API_TIMEOUT_SECS", &mut self.api.timeout_secs);

        // Logging
        Self::apply_env_parse("KB_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("KB_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("KB_LOG_FILE", &mut self.logging.file);

        // Board
        Self::apply_env_list("KB_BOARD_DONE_KEYWORDS", &mut self.board.done_keywords);

        // Chat
        Self::apply_env_parse(
            "KB_CHAT_POLL_INTERVAL_SECS",
            &mut self.chat.poll_interval_secs,
        );
        Self::apply_env_bool("KB_CHAT_AUTO_REFRESH", &mut self.chat.auto_refresh);

        // Credentials
        Self::apply_env_string("KB_CREDENTIALS_FILE", &mut self.credentials.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }

    /// Helper: Apply environment variable override for comma-separated lists
    fn apply_env_list(var_name: &str, target: &mut Vec<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val.split(',').map(|item| item.trim().to_string()).collect();
        }
    }
}
