/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust response structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

/// Body of a successful `POST /auth/signin`.
///
/// The token is optional on the wire so that a 2xx without it surfaces as an
/// authentication error instead of a decode error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigninResponse {
    #[serde(rename = "accessToken", default)]
    pub access_token: Option<String>,
}

/// Error body shape used by the server on non-2xx responses
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<ErrorMessage>,
}

/// Servers built on class-validator return `message` as either a string or a
/// list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    Single(String),
    Many(Vec<String>),
}

impl ApiErrorBody {
    /// Flatten the message into one line, if any
    pub fn message_text(&self) -> Option<String> {
        match self.message.as_ref()? {
            ErrorMessage::Single(text) if !text.trim().is_empty() => Some(text.clone()),
            ErrorMessage::Many(lines) if !lines.is_empty() => Some(lines.join("; ")),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signin_response_missing_token() {
        let parsed: SigninResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.access_token.is_none());
    }

    #[test]
    fn test_error_body_message_variants() {
        let single: ApiErrorBody =
            serde_json::from_str(r#"{"message":"Unauthorized","statusCode":401}"#).unwrap();
        assert_eq!(single.message_text().as_deref(), Some("Unauthorized"));

        let many: ApiErrorBody =
            serde_json::from_str(r#"{"message":["title should not be empty","bad status"]}"#)
                .unwrap();
        assert_eq!(
            many.message_text().as_deref(),
            Some("title should not be empty; bad status")
        );

        let none: ApiErrorBody = serde_json::from_str(r#"{"error":"x"}"#).unwrap();
        assert!(none.message_text().is_none());
    }
}
