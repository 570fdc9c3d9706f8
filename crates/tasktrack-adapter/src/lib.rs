/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public tasktrack adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{
    AuthManager,
    CredentialStore,
    FileCredentialStore,
    MemoryCredentialStore,
    Session,
    SessionStore,
};

// Re-export commonly used types from http
pub use http::{
    ClientConfig,
    Result,
    TasktrackClient,
    TasktrackError,
};

// Re-export all types
pub use types::*;
