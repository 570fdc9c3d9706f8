/*
[INPUT]:  Public API exports for the tasktrack-client crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod board;
pub mod config;
pub mod context;
pub mod in_flight;
pub mod login;
pub mod messages;

// Re-export main types for convenience
pub use board::{ConfirmedRemoval, RemovalRequest, TaskBoard};
pub use config::AppConfig;
pub use context::{AppContext, Screen};
pub use login::{LoginForm, LoginScreen};
pub use messages::{Action, UserMessage, user_message};
