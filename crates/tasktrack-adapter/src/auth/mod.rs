/*
[INPUT]:  Authentication configuration and credentials
[OUTPUT]: Session tokens, persisted credentials, and auth errors
[POS]:    Auth layer - handles task API authentication
[UPDATE]: When auth flow or credential storage changes
*/

pub mod credential_store;
pub mod manager;
pub mod session;

pub use credential_store::{
    ACCESS_TOKEN_KEY, CredentialStore, FileCredentialStore, MemoryCredentialStore,
    default_credentials_path,
};
pub use manager::AuthManager;
pub use session::{Session, SessionStore};
