//! Authenticated session shared from the application root.

use crate::{Client, ClientResult, StoredCredentials};

use std::sync::{Arc, RwLock};

use kb_core::User;
use log::{debug, info, warn};

pub struct Session {
    client: Arc<Client>,
    user: RwLock<Option<User>>,
}

impl Session {
    pub fn new(client: Arc<Client>) -> Self {
        Self {
            client,
            user: RwLock::new(None),
        }
    }

    pub fn client(&self) -> &Arc<Client> {
        &self.client
    }

    pub fn current_user(&self) -> Option<User> {
        self.user.read().ok().and_then(|user| user.clone())
    }

    /// True while a token is stored and a user is known
    pub fn is_authenticated(&self) -> bool {
        self.client.credentials().get().is_some() && self.current_user().is_some()
    }

    /// Log in and persist the token together with the user
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<User> {
        let response = self.client.login(username, password).await?;
        self.client
            .credentials()
            .set(StoredCredentials::new(&response.access_token, None))?;

        let user = match response.user {
            Some(user) => user,
            None => self.client.me().await?,
        };

        self.store_user(user.clone())?;
        info!("Logged in as {}", user.username);
        Ok(user)
    }

    /// Forget the token and the user; never fails on an empty store
    pub fn logout(&self) -> ClientResult<()> {
        self.client.credentials().remove()?;
        self.set_user(None);
        info!("Logged out");
        Ok(())
    }

    /// Re-validate a stored token.
    ///
    /// Returns `Ok(None)` when nothing is stored. A rejected token is cleared.
    pub async fn restore(&self) -> ClientResult<Option<User>> {
        let Some(stored) = self.client.credentials().get() else {
            debug!("No stored credentials to restore");
            return Ok(None);
        };

        if let Some(user) = stored.user {
            self.set_user(Some(user));
        }

        match self.client.me().await {
            Ok(user) => {
                self.store_user(user.clone())?;
                debug!("Session restored for {}", user.username);
                Ok(Some(user))
            }
            Err(e) => {
                warn!("Stored session rejected: {}", e.user_message());
                self.logout()?;
                Err(e)
            }
        }
    }

    /// Replace the cached user, e.g. after a profile edit
    pub fn update_user(&self, user: User) -> ClientResult<()> {
        self.store_user(user)
    }

    fn store_user(&self, user: User) -> ClientResult<()> {
        if let Some(mut stored) = self.client.credentials().get() {
            stored.user = Some(user.clone());
            self.client.credentials().set(stored)?;
        }
        self.set_user(Some(user));
        Ok(())
    }

    fn set_user(&self, user: Option<User>) {
        if let Ok(mut slot) = self.user.write() {
            *slot = user;
        }
    }
}
