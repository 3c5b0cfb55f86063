//! The operations behind every API endpoint.
//!
//! [`TaskService`] owns the SQLite store and the configured due-time offset.
//! Handlers deserialize the request, lock the service, and call exactly one
//! method here; all field-presence checks and timestamp parsing happen in
//! this module so the handlers stay one-liners.

use chrono::FixedOffset;
use taskflow_core::{
    parse_utc_offset, GraphView, TagGraph, TaskId, TaskStatus, Timestamp, DEFAULT_UTC_OFFSET,
};
use taskflow_storage::{NewTask, SqliteStore, StorageError, TaskStore, TaskUpdate};

use crate::error::ApiError;
use crate::schema::auth::CredentialsRequest;
use crate::schema::common::{MessageResponse, OwnerRequest};
use crate::schema::tasks::{
    AddTaskRequest, DeleteTaskRequest, DueCountResponse, GetTaskParams, TaskListResponse,
    TaskResponse, UpdateTaskRequest,
};

/// Maximum number of tasks one list call returns, soonest due first.
const TASK_LIST_LIMIT: u32 = 10;

/// Application service for users and tasks.
pub struct TaskService {
    store: SqliteStore,
    due_offset: FixedOffset,
}

impl TaskService {
    /// Opens (or creates) the database at `db_path`.
    pub fn new(db_path: &str, due_offset: FixedOffset) -> Result<Self, ApiError> {
        let store = SqliteStore::new(db_path).map_err(|e| {
            ApiError::Internal(format!("failed to open task store at {}: {}", db_path, e))
        })?;
        Ok(TaskService { store, due_offset })
    }

    /// Builds a service over a private in-memory database with the default
    /// due-time offset. Used by integration tests.
    pub fn in_memory() -> Result<Self, ApiError> {
        let store = SqliteStore::in_memory()
            .map_err(|e| ApiError::Internal(format!("failed to open in-memory store: {}", e)))?;
        let due_offset = parse_utc_offset(DEFAULT_UTC_OFFSET)?;
        Ok(TaskService { store, due_offset })
    }

    /// Registers a new user.
    pub fn signup(&mut self, req: &CredentialsRequest) -> Result<MessageResponse, ApiError> {
        let (username, password_hash) = require_credentials(req)?;
        self.store.create_user(username, password_hash)?;
        Ok(MessageResponse::new("signup successful."))
    }

    /// Checks a username/hash pair against the stored credentials.
    ///
    /// A wrong password and an unknown username produce the same "user not
    /// found." response, so callers cannot probe which usernames exist.
    pub fn login(&self, req: &CredentialsRequest) -> Result<MessageResponse, ApiError> {
        let (username, password_hash) = require_credentials(req)?;
        self.store.verify_user(username, password_hash)?;
        Ok(MessageResponse::new("username found, login successful!"))
    }

    /// Lists the owner's tasks, soonest due first, capped at
    /// [`TASK_LIST_LIMIT`].
    pub fn tasks_for(&self, req: &OwnerRequest) -> Result<TaskListResponse, ApiError> {
        let username = require_username(req)?;
        let tasks = self.store.tasks_for_owner(username, TASK_LIST_LIMIT)?;
        Ok(TaskListResponse { tasks })
    }

    /// Fetches one task by id.
    pub fn task(&self, params: &GetTaskParams) -> Result<TaskResponse, ApiError> {
        let id = params
            .id
            .ok_or_else(|| ApiError::BadRequest("id is mandatory, check the url!".to_string()))?;
        let task = self.store.task_by_id(TaskId(id))?;
        Ok(TaskResponse { task })
    }

    /// Creates a task. New tasks always start incomplete.
    pub fn add_task(&mut self, req: &AddTaskRequest) -> Result<MessageResponse, ApiError> {
        // Title, timestamps, and owner must be non-empty; description and
        // tags must be present but may be empty strings.
        let fields = (
            req.title.as_deref().filter(|s| !s.is_empty()),
            req.description.as_deref(),
            req.tags.as_deref(),
            req.creation_time.as_deref().filter(|s| !s.is_empty()),
            req.due_time.as_deref().filter(|s| !s.is_empty()),
            req.username.as_deref().filter(|s| !s.is_empty()),
        );
        let (title, description, tags, creation_raw, due_raw, username) = match fields {
            (Some(t), Some(d), Some(g), Some(c), Some(u), Some(o)) => (t, d, g, c, u, o),
            _ => return Err(missing_task_fields()),
        };
        let creation_time: Timestamp = creation_raw.parse()?;
        let due_time: Timestamp = due_raw.parse()?;
        let id = self.store.insert_task(&NewTask {
            title: title.to_string(),
            description: description.to_string(),
            tags: tags.to_string(),
            creation_time,
            due_time,
            owner: username.to_string(),
            status: TaskStatus::Incomplete,
        })?;
        Ok(MessageResponse::new(format!(
            "new task has been added with id {}",
            id
        )))
    }

    /// Updates a task's title, description, tags, and due time.
    pub fn update_task(&mut self, req: &UpdateTaskRequest) -> Result<MessageResponse, ApiError> {
        let fields = (
            req.id,
            req.title.as_deref().filter(|s| !s.is_empty()),
            req.description.as_deref(),
            req.tags.as_deref(),
            req.due_time.as_deref().filter(|s| !s.is_empty()),
        );
        let (id, title, description, tags, due_raw) = match fields {
            (Some(i), Some(t), Some(d), Some(g), Some(u)) => (i, t, d, g, u),
            _ => return Err(missing_task_fields()),
        };
        let due_time: Timestamp = due_raw.parse()?;
        self.store
            .update_task(&TaskUpdate {
                id: TaskId(id),
                title: title.to_string(),
                description: description.to_string(),
                tags: tags.to_string(),
                due_time,
            })
            .map_err(|e| match e {
                // This endpoint historically reports the miss with a
                // trailing period, unlike getTask and deleteTask.
                StorageError::TaskNotFound(_) => {
                    ApiError::NotFound("task not found.".to_string())
                }
                other => other.into(),
            })?;
        Ok(MessageResponse::new(format!("task id {} updated.", id)))
    }

    /// Deletes a task by id.
    pub fn delete_task(&mut self, req: &DeleteTaskRequest) -> Result<MessageResponse, ApiError> {
        let id = req.id.ok_or_else(|| {
            ApiError::BadRequest("task ID is required, check the body!".to_string())
        })?;
        self.store.delete_task(TaskId(id))?;
        Ok(MessageResponse::new("task has been deleted"))
    }

    /// Counts the owner's tasks whose due time is strictly before "now" at
    /// the configured offset. Zero is a normal response, not an error.
    pub fn due_count(&self, req: &OwnerRequest) -> Result<DueCountResponse, ApiError> {
        let username = require_username(req)?;
        let cutoff = Timestamp::now_with_offset(self.due_offset);
        let count = self.store.count_due_before(username, cutoff)?;
        Ok(DueCountResponse { count })
    }

    /// Builds the tag graph over the same task list `/getTasks` returns.
    pub fn graph_for(&self, req: &OwnerRequest) -> Result<GraphView, ApiError> {
        let username = require_username(req)?;
        let tasks = self.store.tasks_for_owner(username, TASK_LIST_LIMIT)?;
        Ok(TagGraph::build(&tasks).to_view())
    }
}

fn require_username(req: &OwnerRequest) -> Result<&str, ApiError> {
    req.username
        .as_deref()
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::BadRequest("username is mandatory, check the body!".to_string()))
}

fn require_credentials(req: &CredentialsRequest) -> Result<(&str, &str), ApiError> {
    match (req.username.as_deref(), req.password_hash.as_deref()) {
        (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => Ok((u, p)),
        _ => Err(ApiError::BadRequest(
            "username and password hash are required.".to_string(),
        )),
    }
}

fn missing_task_fields() -> ApiError {
    ApiError::BadRequest("all fields are required, check again!".to_string())
}
