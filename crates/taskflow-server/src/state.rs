//! Shared application state.

use std::sync::Arc;

use chrono::FixedOffset;
use tokio::sync::Mutex;

use crate::error::ApiError;
use crate::service::TaskService;

/// Shared application state passed to all handlers.
///
/// The service is wrapped in `Arc<Mutex<...>>` because rusqlite's
/// `Connection` is `!Sync`, so the service cannot be shared across worker
/// threads without serializing access. Requests take the lock for the
/// duration of one service call.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<Mutex<TaskService>>,
}

impl AppState {
    /// Opens (or creates) the database at `db_path` and builds the state.
    pub fn new(db_path: &str, due_offset: FixedOffset) -> Result<Self, ApiError> {
        let service = TaskService::new(db_path, due_offset)?;
        Ok(AppState {
            service: Arc::new(Mutex::new(service)),
        })
    }

    /// Builds a state backed by a private in-memory database.
    ///
    /// Used by integration tests. The due-time offset is the production
    /// default of UTC+7.
    pub fn in_memory() -> Result<Self, ApiError> {
        let service = TaskService::in_memory()?;
        Ok(AppState {
            service: Arc::new(Mutex::new(service)),
        })
    }
}
