/*
[INPUT]:  Loaded AppConfig
[OUTPUT]: Shared session, HTTP client, auth manager and screens
[POS]:    Wiring layer - builds the object graph once per process
[UPDATE]: When adding shared services or screens
*/

use std::sync::Arc;

use anyhow::{Context, Result};
use tasktrack_adapter::{
    AuthManager, CredentialStore, FileCredentialStore, MemoryCredentialStore, SessionStore,
    TasktrackClient,
};
use tracing::debug;

use crate::board::TaskBoard;
use crate::config::AppConfig;
use crate::login::LoginScreen;

/// Which screen is reachable for the current session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Tasks,
}

/// Everything a front-end needs, built from configuration.
///
/// The session is created here and injected into the client; nothing looks
/// the token up globally.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub session: SessionStore,
    pub client: TasktrackClient,
    pub auth: AuthManager,
}

impl AppContext {
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let credentials: Arc<dyn CredentialStore> = if config.storage.persist {
            let path = config.credentials_path();
            debug!(path = %path.display(), "using file credential store");
            Arc::new(FileCredentialStore::new(path))
        } else {
            debug!("session persistence disabled");
            Arc::new(MemoryCredentialStore::new())
        };

        let session = SessionStore::restore(credentials);
        let client = TasktrackClient::with_config(config.client_config(), session.clone())
            .context("build HTTP client")?;
        let auth = AuthManager::new(client.clone());

        Ok(Self {
            config,
            session,
            client,
            auth,
        })
    }

    /// Unauthenticated sessions land on login, authenticated ones on tasks
    pub fn initial_screen(&self) -> Screen {
        if self.session.is_authenticated() {
            Screen::Tasks
        } else {
            Screen::Login
        }
    }

    pub fn board(&self) -> TaskBoard {
        TaskBoard::new(self.client.clone())
    }

    pub fn login_screen(&self) -> LoginScreen {
        LoginScreen::new(self.auth.clone())
    }
}
