//! Wire types for the task CRUD and due-count endpoints.

use serde::{Deserialize, Serialize};
use taskflow_core::Task;

/// Query string for `GET /getTask?id=N`.
#[derive(Debug, Clone, Deserialize)]
pub struct GetTaskParams {
    pub id: Option<i64>,
}

/// Body for `/addTasks`.
///
/// `title`, `creation_time`, `due_time` and `username` must be present and
/// non-empty; `description` and `tags` must be present but may be empty
/// strings. Timestamps arrive as strings and are parsed by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct AddTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<String>,
    pub creation_time: Option<String>,
    pub due_time: Option<String>,
    pub username: Option<String>,
}

/// Body for `/updateTask`. Same presence rules as [`AddTaskRequest`], with
/// the task id in place of owner and creation time.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTaskRequest {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<String>,
    pub due_time: Option<String>,
}

/// Body for `/deleteTask`.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteTaskRequest {
    pub id: Option<i64>,
}

/// Response for `/getTasks`: the owner's tasks, soonest due first.
#[derive(Debug, Clone, Serialize)]
pub struct TaskListResponse {
    pub tasks: Vec<Task>,
}

/// Response for `/getTask`.
#[derive(Debug, Clone, Serialize)]
pub struct TaskResponse {
    pub task: Task,
}

/// Response for `/checkDueTasks`: how many of the owner's tasks are past
/// due at the server's configured offset. Zero is a normal result.
#[derive(Debug, Clone, Serialize)]
pub struct DueCountResponse {
    pub count: u64,
}
