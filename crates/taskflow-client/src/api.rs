//! HTTP client for the task API.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use taskflow_core::{GraphView, Task, TaskId};

use crate::error::ClientError;
use crate::notify::DueTaskSource;

/// How long any single request may take before it is abandoned.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Fields for creating a task. Timestamps travel as preformatted
/// `YYYY-MM-DD HH:MM:SS` strings; the server parses and validates them.
#[derive(Debug, Clone, Serialize)]
pub struct NewTaskForm {
    pub title: String,
    pub description: String,
    pub tags: String,
    pub creation_time: String,
    pub due_time: String,
    pub username: String,
}

/// Fields for updating a task.
#[derive(Debug, Clone, Serialize)]
pub struct TaskUpdateForm {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub tags: String,
    pub due_time: String,
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct TasksBody {
    tasks: Vec<Task>,
}

#[derive(Debug, Deserialize)]
struct TaskBody {
    task: Task,
}

#[derive(Debug, Deserialize)]
struct CountBody {
    count: u64,
}

/// Async client for one server. Cheap to clone; clones share the
/// connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client for `base_url` (e.g. `http://localhost:3001`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let base_url: String = base_url.into();
        Ok(ApiClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POSTs `body` to `path` and decodes the success response.
    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: serde::de::DeserializeOwned,
    {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        Ok(Self::checked(response).await?.json::<R>().await?)
    }

    /// Turns non-2xx responses into [`ClientError::Api`], decoding the
    /// server's `{"error": ...}` body when it has one.
    async fn checked(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status.to_string(),
        };
        Err(ClientError::Api { status, message })
    }

    /// Registers a user. The password must already be hashed.
    pub async fn signup(&self, username: &str, password_hash: &str) -> Result<String, ClientError> {
        let body = serde_json::json!({ "username": username, "password_hash": password_hash });
        let resp: MessageBody = self.post("/signup", &body).await?;
        Ok(resp.message)
    }

    /// Verifies credentials. `Ok` means the pair matched.
    pub async fn login(&self, username: &str, password_hash: &str) -> Result<String, ClientError> {
        let body = serde_json::json!({ "username": username, "password_hash": password_hash });
        let resp: MessageBody = self.post("/login", &body).await?;
        Ok(resp.message)
    }

    /// Lists the user's tasks, soonest due first.
    pub async fn tasks(&self, username: &str) -> Result<Vec<Task>, ClientError> {
        let body = serde_json::json!({ "username": username });
        let resp: TasksBody = self.post("/getTasks", &body).await?;
        Ok(resp.tasks)
    }

    /// Fetches one task by id.
    pub async fn task(&self, id: TaskId) -> Result<Task, ClientError> {
        let response = self
            .http
            .get(self.url("/getTask"))
            .query(&[("id", id.0)])
            .send()
            .await?;
        let resp: TaskBody = Self::checked(response).await?.json().await?;
        Ok(resp.task)
    }

    /// Creates a task; returns the server's confirmation message.
    pub async fn add_task(&self, form: &NewTaskForm) -> Result<String, ClientError> {
        let resp: MessageBody = self.post("/addTasks", form).await?;
        Ok(resp.message)
    }

    /// Updates a task; returns the server's confirmation message.
    pub async fn update_task(&self, form: &TaskUpdateForm) -> Result<String, ClientError> {
        let resp: MessageBody = self.post("/updateTask", form).await?;
        Ok(resp.message)
    }

    /// Deletes a task; returns the server's confirmation message.
    pub async fn delete_task(&self, id: TaskId) -> Result<String, ClientError> {
        let body = serde_json::json!({ "id": id.0 });
        let resp: MessageBody = self.post("/deleteTask", &body).await?;
        Ok(resp.message)
    }

    /// Number of the user's tasks already past due.
    pub async fn due_count(&self, username: &str) -> Result<u64, ClientError> {
        let body = serde_json::json!({ "username": username });
        let resp: CountBody = self.post("/checkDueTasks", &body).await?;
        Ok(resp.count)
    }

    /// The user's tag graph, ready for rendering.
    pub async fn graph(&self, username: &str) -> Result<GraphView, ClientError> {
        let body = serde_json::json!({ "username": username });
        self.post("/graph", &body).await
    }
}

impl DueTaskSource for ApiClient {
    async fn due_count(&self, username: &str) -> Result<u64, ClientError> {
        ApiClient::due_count(self, username).await
    }
}
