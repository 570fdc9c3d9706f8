/*
[INPUT]:  Task client, user actions (create, toggle, remove)
[OUTPUT]: Displayed task list kept equal to the last successful fetch
[POS]:    Screen layer - task list state with reload-after-write
[UPDATE]: When task actions or refresh policy change
*/

use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};
use tasktrack_adapter::{Result, Task, TasktrackClient, TasktrackError};
use tracing::{debug, warn};

use crate::in_flight::InFlight;

/// State behind the task list screen.
///
/// Writes never patch the displayed list. Every successful mutation is
/// followed by exactly one full reload, and a failed reload leaves the
/// previous list in place.
#[derive(Debug)]
pub struct TaskBoard {
    client: TasktrackClient,
    tasks: RwLock<Vec<Task>>,
    last_refreshed: RwLock<Option<DateTime<Utc>>>,
    in_flight: InFlight,
}

impl TaskBoard {
    pub fn new(client: TasktrackClient) -> Self {
        Self {
            client,
            tasks: RwLock::new(Vec::new()),
            last_refreshed: RwLock::new(None),
            in_flight: InFlight::new(),
        }
    }

    pub fn client(&self) -> &TasktrackClient {
        &self.client
    }

    /// Snapshot of the displayed list
    pub fn tasks(&self) -> Vec<Task> {
        self.tasks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn task(&self, task_id: i64) -> Option<Task> {
        self.tasks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|task| task.id == task_id)
            .cloned()
    }

    pub fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        *self
            .last_refreshed
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether a call from this screen is still pending
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_busy()
    }

    /// Re-read the whole collection from the server
    pub async fn refresh(&self) -> Result<Vec<Task>> {
        let _guard = self.in_flight.try_begin()?;
        self.reload().await
    }

    /// Create a task, then reload
    pub async fn create(&self, title: &str, description: &str) -> Result<Vec<Task>> {
        let _guard = self.in_flight.try_begin()?;
        self.client.create_task(title, description).await?;
        self.reload().await
    }

    /// Mark a displayed task completed or back in progress, then reload
    pub async fn set_completion(&self, task_id: i64, completed: bool) -> Result<Vec<Task>> {
        let task = self.displayed(task_id)?;
        let _guard = self.in_flight.try_begin()?;
        self.client.set_completion(&task, completed).await?;
        self.reload().await
    }

    /// Flip a displayed task between completed and in progress
    pub async fn toggle(&self, task_id: i64) -> Result<Vec<Task>> {
        let task = self.displayed(task_id)?;
        self.set_completion(task_id, !task.is_completed()).await
    }

    /// Start the delete flow for a displayed task.
    ///
    /// The returned request must be confirmed before [`TaskBoard::remove`]
    /// accepts it; dropping it cancels the delete.
    pub fn request_removal(&self, task_id: i64) -> Result<RemovalRequest> {
        let task = self.displayed(task_id)?;
        Ok(RemovalRequest { task })
    }

    /// Delete a confirmed task, then reload
    pub async fn remove(&self, removal: ConfirmedRemoval) -> Result<Vec<Task>> {
        let _guard = self.in_flight.try_begin()?;
        self.client.delete_task(removal.task_id).await?;
        self.reload().await
    }

    async fn reload(&self) -> Result<Vec<Task>> {
        match self.client.list_tasks().await {
            Ok(tasks) => {
                debug!(count = tasks.len(), "board reloaded");
                *self.tasks.write().unwrap_or_else(PoisonError::into_inner) = tasks.clone();
                *self
                    .last_refreshed
                    .write()
                    .unwrap_or_else(PoisonError::into_inner) = Some(Utc::now());
                Ok(tasks)
            }
            Err(err) => {
                warn!(error = %err, "reload failed; keeping previous list");
                Err(err)
            }
        }
    }

    fn displayed(&self, task_id: i64) -> Result<Task> {
        self.task(task_id).ok_or_else(|| {
            TasktrackError::validation("task", format!("task {task_id} is not in the list"))
        })
    }
}

/// A delete that still needs the user's confirmation
#[derive(Debug, Clone)]
pub struct RemovalRequest {
    task: Task,
}

impl RemovalRequest {
    /// Task that would be deleted, for the confirmation prompt
    pub fn task(&self) -> &Task {
        &self.task
    }

    pub fn confirm(self) -> ConfirmedRemoval {
        ConfirmedRemoval {
            task_id: self.task.id,
        }
    }
}

/// A delete the user has explicitly confirmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedRemoval {
    task_id: i64,
}

impl ConfirmedRemoval {
    pub fn task_id(&self) -> i64 {
        self.task_id
    }
}
