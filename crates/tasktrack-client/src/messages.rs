/*
[INPUT]:  Errors surfaced by screen actions
[OUTPUT]: User-facing titles and messages
[POS]:    Screen boundary - error to message conversion
[UPDATE]: When error kinds or wording change
*/

use std::fmt;

use tasktrack_adapter::TasktrackError;

/// What the user was doing when the error happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SignIn,
    SignOut,
    LoadTasks,
    CreateTask,
    UpdateTask,
    DeleteTask,
}

impl Action {
    fn failure(self) -> &'static str {
        match self {
            Action::SignIn => "Could not sign in.",
            Action::SignOut => "Could not sign out cleanly.",
            Action::LoadTasks => "Could not load tasks.",
            Action::CreateTask => "Could not create the task. Please try again.",
            Action::UpdateTask => "Could not update the task.",
            Action::DeleteTask => "Could not delete the task.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMessage {
    pub title: String,
    pub body: String,
    /// Server-supplied detail, when there is one
    pub detail: Option<String>,
}

impl UserMessage {
    fn new(title: &str, body: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            body: body.into(),
            detail: None,
        }
    }

    fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl fmt::Display for UserMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.body)?;
        if let Some(detail) = &self.detail {
            write!(f, " ({detail})")?;
        }
        Ok(())
    }
}

/// Convert any error into the message shown to the user
pub fn user_message(err: &TasktrackError, action: Action) -> UserMessage {
    match err {
        TasktrackError::Validation { message, .. } => {
            UserMessage::new("Missing information", capitalize(message))
        }
        TasktrackError::Authentication { status: Some(_), .. } => {
            UserMessage::new("Sign-in failed", "Incorrect username and/or password.")
        }
        TasktrackError::Authentication { status: None, .. } => UserMessage::new(
            "Authentication error",
            "Could not obtain an access token.",
        ),
        TasktrackError::Busy => {
            UserMessage::new("Please wait", "Another request is still in progress.")
        }
        TasktrackError::Transport { status: None, .. } => UserMessage::new(
            "Connection error",
            "Could not reach the server. Check your connection and try again.",
        ),
        err if err.is_unauthorized() && action != Action::SignIn => {
            UserMessage::new("Session expired", "Please sign in again.")
        }
        TasktrackError::Transport { message, .. } => {
            UserMessage::new("Error", action.failure()).with_detail(message.clone())
        }
        TasktrackError::Storage(detail) => {
            UserMessage::new("Storage error", "Could not update the saved session.")
                .with_detail(detail.clone())
        }
        other => UserMessage::new("Error", action.failure()).with_detail(other.to_string()),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
