use crate::{ConfigError, ConfigErrorResult, DEFAULT_CREDENTIALS_FILE};

use std::path::Path;

use serde::Deserialize;

/// Where the auth token and cached user are kept, relative to the config dir
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    pub file: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            file: String::from(DEFAULT_CREDENTIALS_FILE),
        }
    }
}

impl CredentialsConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.file.trim().is_empty() {
            return Err(ConfigError::credentials("credentials.file must not be empty"));
        }

        if Path::new(&self.file).is_absolute() || self.file.contains("..") {
            return Err(ConfigError::credentials(
                "credentials.file must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }
}
