use crate::{ConfigError, ConfigErrorResult};

use std::time::Duration;

use serde::Deserialize;

// Poll interval constraints (seconds)
pub const MIN_POLL_INTERVAL_SECS: u64 = 1;
pub const MAX_POLL_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 3;

pub const DEFAULT_AUTO_REFRESH: bool = true;

/// Chat polling settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Seconds between message re-fetches
    pub poll_interval_secs: u64,
    /// Whether polling starts enabled
    pub auto_refresh: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            auto_refresh: DEFAULT_AUTO_REFRESH,
        }
    }
}

impl ChatConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        Self::interval_from_secs(self.poll_interval_secs)?;
        Ok(())
    }

    /// Poll period for `secs`, refused outside the allowed bounds
    #[track_caller]
    pub fn interval_from_secs(secs: u64) -> ConfigErrorResult<Duration> {
        if !(MIN_POLL_INTERVAL_SECS..=MAX_POLL_INTERVAL_SECS).contains(&secs) {
            return Err(ConfigError::chat(format!(
                "chat.poll_interval_secs must be {}-{}, got {}",
                MIN_POLL_INTERVAL_SECS, MAX_POLL_INTERVAL_SECS, secs
            )));
        }

        Ok(Duration::from_secs(secs))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}
