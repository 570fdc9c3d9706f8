/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a task as stored by the server.
///
/// `Pending` is accepted from the server but no client operation produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// Status sent when a task is marked complete or reopened.
    pub fn for_completion(completed: bool) -> Self {
        if completed {
            TaskStatus::Completed
        } else {
            TaskStatus::InProgress
        }
    }

    pub fn is_completed(self) -> bool {
        matches!(self, TaskStatus::Completed)
    }

    /// Wire representation, e.g. `IN_PROGRESS`
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "PENDING",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"IN_PROGRESS\""
        );
        let parsed: TaskStatus = serde_json::from_str("\"PENDING\"").unwrap();
        assert_eq!(parsed, TaskStatus::Pending);
    }

    #[test]
    fn test_for_completion_never_pending() {
        assert_eq!(TaskStatus::for_completion(true), TaskStatus::Completed);
        assert_eq!(TaskStatus::for_completion(false), TaskStatus::InProgress);
    }
}
