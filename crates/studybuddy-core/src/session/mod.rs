//! Client-held session: which user, if any, the page believes is signed in.
//!
//! The user is persisted as JSON under [`CURRENT_USER_KEY`]. Guest versus
//! authenticated presentation is derived from the presence of a user, so the
//! two modes can never be shown at the same time.

use std::sync::Arc;

use tokio::sync::watch;

use crate::error::Result;
use crate::models::User;
use crate::storage::KeyValueStore;

/// Storage key holding the serialized [`User`].
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Which of the two mutually exclusive header presentations is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    Guest,
    Authenticated,
}

impl SessionMode {
    pub const fn for_user(user: Option<&User>) -> Self {
        if user.is_some() {
            Self::Authenticated
        } else {
            Self::Guest
        }
    }
}

/// Injectable session store with change notifications.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
    current: Arc<watch::Sender<Option<User>>>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        let (current, _) = watch::channel(None);
        Self {
            storage,
            current: Arc::new(current),
        }
    }

    /// Loads the persisted user, if any, and publishes it.
    ///
    /// A stored value that is not a valid user is discarded and the session
    /// starts in guest mode. Storage read failures are returned.
    pub fn restore(&self) -> Result<Option<User>> {
        let Some(raw) = self.storage.get_item(CURRENT_USER_KEY)? else {
            self.current.send_replace(None);
            return Ok(None);
        };

        match serde_json::from_str::<User>(&raw) {
            Ok(user) => {
                tracing::info!(email = %user.email, "Restored saved session");
                self.current.send_replace(Some(user.clone()));
                Ok(Some(user))
            }
            Err(error) => {
                tracing::warn!("Discarding malformed saved session: {}", error);
                if let Err(error) = self.storage.remove_item(CURRENT_USER_KEY) {
                    tracing::error!("Failed to remove malformed saved session: {}", error);
                }
                self.current.send_replace(None);
                Ok(None)
            }
        }
    }

    pub fn get(&self) -> Option<User> {
        self.current.borrow().clone()
    }

    pub fn mode(&self) -> SessionMode {
        SessionMode::for_user(self.current.borrow().as_ref())
    }

    /// Persists `user` and then makes it the current user.
    ///
    /// Nothing changes when persisting fails.
    pub fn set(&self, user: User) -> Result<()> {
        let serialized = serde_json::to_string(&user)?;
        self.storage.set_item(CURRENT_USER_KEY, &serialized)?;
        tracing::info!(email = %user.email, "Session started");
        self.current.send_replace(Some(user));
        Ok(())
    }

    /// Forgets the current user in memory and in storage.
    ///
    /// The in-memory session is cleared even when the storage removal fails;
    /// that failure is returned afterwards.
    pub fn clear(&self) -> Result<()> {
        if self.current.send_replace(None).is_some() {
            tracing::info!("Session cleared");
        }
        self.storage.remove_item(CURRENT_USER_KEY)
    }

    /// Receiver notified on every session change.
    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.current.subscribe()
    }
}
