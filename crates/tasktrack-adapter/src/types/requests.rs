/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust request structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

use super::enums::TaskStatus;
use super::models::Task;

/// Body of `POST /auth/signin`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigninRequest {
    pub username: String,
    pub password: String,
}

/// Full task record sent by `POST /tasks` and `PUT /tasks/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPayload {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
}

impl TaskPayload {
    /// New tasks always start in progress.
    pub fn new_task(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            status: TaskStatus::InProgress,
        }
    }

    /// Full-record update of `task` with only the status replaced.
    pub fn with_status(task: &Task, status: TaskStatus) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            status,
        }
    }
}
