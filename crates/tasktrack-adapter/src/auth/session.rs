/*
[INPUT]:  Bearer tokens from sign-in and a credential store
[OUTPUT]: Token retrieval for request signing and logout
[POS]:    Auth layer - session token lifecycle
[UPDATE]: When token storage strategy changes
*/

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::credential_store::{ACCESS_TOKEN_KEY, CredentialStore, MemoryCredentialStore};
use crate::http::Result;

/// An authenticated session.
///
/// There is no expiry: a token is assumed valid until the server rejects it.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub established_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            established_at: Utc::now(),
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("established_at", &self.established_at)
            .finish()
    }
}

/// Thread-safe session handle.
///
/// Clones share the same token, so one store can be handed to both the auth
/// manager and the task client.
#[derive(Debug, Clone)]
pub struct SessionStore {
    session: Arc<RwLock<Option<Session>>>,
    credentials: Arc<dyn CredentialStore>,
}

impl SessionStore {
    /// Session backed by the given credential store, initially empty
    pub fn new(credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            session: Arc::new(RwLock::new(None)),
            credentials,
        }
    }

    /// Session that is never persisted
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryCredentialStore::new()))
    }

    /// Session pre-loaded from whatever token the store already holds.
    ///
    /// An unreadable store yields an unauthenticated session.
    pub fn restore(credentials: Arc<dyn CredentialStore>) -> Self {
        let store = Self::new(credentials);
        match store.credentials.get(ACCESS_TOKEN_KEY) {
            Ok(Some(token)) if !token.trim().is_empty() => {
                debug!("restored persisted session token");
                *store.write() = Some(Session::new(token));
            }
            Ok(_) => debug!("no persisted session token"),
            Err(err) => warn!(error = %err, "failed to read persisted session token"),
        }
        store
    }

    /// Store a new token, persisting it before it becomes visible
    pub fn set_token(&self, token: impl Into<String>) -> Result<Session> {
        let session = Session::new(token);
        self.credentials.set(ACCESS_TOKEN_KEY, &session.token)?;
        *self.write() = Some(session.clone());
        Ok(session)
    }

    /// Get the current token if available
    pub fn current_token(&self) -> Option<String> {
        self.read().as_ref().map(|session| session.token.clone())
    }

    /// Get session data if available
    pub fn session(&self) -> Option<Session> {
        self.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    /// Discard the token in memory and in the credential store.
    ///
    /// The in-memory token is dropped even if the store cannot be updated.
    pub fn clear(&self) -> Result<()> {
        *self.write() = None;
        self.credentials.remove(ACCESS_TOKEN_KEY)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Option<Session>> {
        self.session.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Option<Session>> {
        self.session.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::in_memory()
    }
}
