/*
[INPUT]:  Error sources (validation, HTTP, API, serialization, storage)
[OUTPUT]: Structured error types with status codes and server messages
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Message used when the server could not be reached at all
pub const CONNECTION_ERROR_MESSAGE: &str = "connection error";

/// Main error type for the tasktrack adapter
#[derive(Error, Debug)]
pub enum TasktrackError {
    /// Client-side precondition failed; nothing was sent
    #[error("Invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Credentials were rejected or the server returned no token
    #[error("Authentication failed: {message}")]
    Authentication {
        status: Option<u16>,
        message: String,
    },

    /// Non-2xx response or connection failure
    #[error("{}", transport_display(.status, .message))]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// 2xx response whose body did not match the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Credential store could not be read or written
    #[error("Credential storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Another call from the same screen is still in flight
    #[error("Another request is already in progress")]
    Busy,
}

fn transport_display(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("Request failed (status {code}): {message}"),
        None => format!("Request failed: {message}"),
    }
}

impl TasktrackError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        TasktrackError::Validation {
            field,
            message: message.into(),
        }
    }

    /// Build a transport error from a non-2xx status and optional server message
    pub fn api_error(status: StatusCode, message: Option<String>) -> Self {
        TasktrackError::Transport {
            status: Some(status.as_u16()),
            message: message.unwrap_or_else(|| default_status_message(status)),
        }
    }

    /// Transport error for a request that never produced a response
    pub fn connection(err: &reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("{CONNECTION_ERROR_MESSAGE} (timed out)")
        } else {
            CONNECTION_ERROR_MESSAGE.to_string()
        };
        TasktrackError::Transport {
            status: None,
            message,
        }
    }

    /// Check if error indicates authentication failure
    pub fn is_auth_error(&self) -> bool {
        matches!(self, TasktrackError::Authentication { .. })
    }

    pub fn is_validation_error(&self) -> bool {
        matches!(self, TasktrackError::Validation { .. })
    }

    /// A request was refused because the session is missing or no longer
    /// accepted; the caller should send the user back to login.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            TasktrackError::Transport {
                status: Some(401 | 403),
                ..
            }
        )
    }

    /// HTTP status attached to the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            TasktrackError::Authentication { status, .. }
            | TasktrackError::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

fn default_status_message(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| "unknown error".to_string())
}

/// Result type alias for tasktrack operations
pub type Result<T> = std::result::Result<T, TasktrackError>;
