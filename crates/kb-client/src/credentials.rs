//! Persistence for the auth token and the cached user.

use crate::{ClientError, ClientResult};

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use kb_core::User;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCredentials {
    pub token: String,
    #[serde(default)]
    pub user: Option<User>,
}

impl StoredCredentials {
    pub fn new(token: impl Into<String>, user: Option<User>) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }
}

/// Opaque key/value home of the session credentials
pub trait CredentialStore: Send + Sync {
    fn get(&self) -> Option<StoredCredentials>;
    fn set(&self, credentials: StoredCredentials) -> ClientResult<()>;
    fn remove(&self) -> ClientResult<()>;
}

// =========================================================================
// In-memory store
// =========================================================================

#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slot: Mutex<Option<StoredCredentials>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(credentials: StoredCredentials) -> Self {
        Self {
            slot: Mutex::new(Some(credentials)),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<StoredCredentials>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self) -> Option<StoredCredentials> {
        self.slot().clone()
    }

    fn set(&self, credentials: StoredCredentials) -> ClientResult<()> {
        *self.slot() = Some(credentials);
        Ok(())
    }

    fn remove(&self) -> ClientResult<()> {
        *self.slot() = None;
        Ok(())
    }
}

// =========================================================================
// JSON file store
// =========================================================================

/// Keeps credentials in a JSON file; the parent directory is created on write.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self) -> Option<StoredCredentials> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("Cannot read credentials {}: {}", self.path.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&contents) {
            Ok(credentials) => Some(credentials),
            Err(e) => {
                warn!(
                    "Ignoring unreadable credentials {}: {}",
                    self.path.display(),
                    e
                );
                None
            }
        }
    }

    fn set(&self, credentials: StoredCredentials) -> ClientResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                ClientError::credentials(format!(
                    "Cannot create {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let json = serde_json::to_string_pretty(&credentials)?;
        std::fs::write(&self.path, json).map_err(|e| {
            ClientError::credentials(format!("Cannot write {}: {}", self.path.display(), e))
        })?;

        debug!("Credentials saved to {}", self.path.display());
        Ok(())
    }

    fn remove(&self) -> ClientResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Credentials removed from {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::credentials(format!(
                "Cannot remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}
