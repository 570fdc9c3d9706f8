/*
[INPUT]:  Task fields and ids plus the session bearer token
[OUTPUT]: Task collection reads and create/update/delete calls
[POS]:    HTTP layer - task endpoints (require bearer auth)
[UPDATE]: When adding task endpoints or changing request bodies
*/

use reqwest::Method;
use tracing::{debug, info};

use crate::http::{Result, TasktrackClient, TasktrackError};
use crate::types::{Task, TaskPayload, TaskStatus};

impl TasktrackClient {
    /// Fetch the full task collection in server order
    ///
    /// GET /tasks
    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        let builder = self.request(Method::GET, "/tasks")?;
        let tasks: Vec<Task> = self.send_json(builder).await?;
        debug!(count = tasks.len(), "tasks fetched");
        Ok(tasks)
    }

    /// Create a task with status `IN_PROGRESS`
    ///
    /// POST /tasks
    ///
    /// Both fields are trimmed and must be non-empty; otherwise nothing is
    /// sent. The created record in the response is not returned.
    pub async fn create_task(&self, title: &str, description: &str) -> Result<()> {
        let payload = validate_new_task(title, description)?;
        let builder = self.request(Method::POST, "/tasks")?.json(&payload);
        self.send_empty(builder).await?;
        info!(title = %payload.title, "task created");
        Ok(())
    }

    /// Replace a task record
    ///
    /// PUT /tasks/{id}
    pub async fn update_task(&self, id: i64, payload: &TaskPayload) -> Result<()> {
        let endpoint = format!("/tasks/{id}");
        let builder = self.request(Method::PUT, &endpoint)?.json(payload);
        self.send_empty(builder).await?;
        info!(task_id = id, status = %payload.status, "task updated");
        Ok(())
    }

    /// Mark a task completed or back in progress with a full-record update
    pub async fn set_completion(&self, task: &Task, completed: bool) -> Result<()> {
        let payload = TaskPayload::with_status(task, TaskStatus::for_completion(completed));
        self.update_task(task.id, &payload).await
    }

    /// Delete a task
    ///
    /// DELETE /tasks/{id}
    pub async fn delete_task(&self, id: i64) -> Result<()> {
        let endpoint = format!("/tasks/{id}");
        let builder = self.request(Method::DELETE, &endpoint)?;
        self.send_empty(builder).await?;
        info!(task_id = id, "task deleted");
        Ok(())
    }
}

/// Check the create preconditions and build the request body
pub fn validate_new_task(title: &str, description: &str) -> Result<TaskPayload> {
    let title = title.trim();
    let description = description.trim();
    if title.is_empty() {
        return Err(TasktrackError::validation("title", "title is required"));
    }
    if description.is_empty() {
        return Err(TasktrackError::validation(
            "description",
            "description is required",
        ));
    }
    Ok(TaskPayload::new_task(title, description))
}
