use crate::{ConfigError, ConfigErrorResult};

use kb_core::DEFAULT_DONE_KEYWORDS;
use serde::Deserialize;

/// Board behaviour settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Column names containing any of these (case-insensitive) count as "done"
    pub done_keywords: Vec<String>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            done_keywords: DEFAULT_DONE_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl BoardConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.done_keywords.is_empty() {
            return Err(ConfigError::board("board.done_keywords must not be empty"));
        }

        if self.done_keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(ConfigError::board(
                "board.done_keywords must not contain blank entries",
            ));
        }

        Ok(())
    }
}
