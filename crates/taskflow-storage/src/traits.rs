//! The [`TaskStore`] trait defining the storage contract.
//!
//! All backends (SqliteStore, InMemoryStore) implement this trait with
//! identical semantics, so they are fully swappable: the SQLite backend
//! serves the server process, the in-memory backend serves tests.
//!
//! The trait is synchronous (not async): callers in async contexts hold
//! the owning service behind a lock for the duration of a call.

use taskflow_core::{Task, TaskId, Timestamp};

use crate::error::StorageError;
use crate::types::{NewTask, TaskUpdate};

/// The storage contract for user and task records.
pub trait TaskStore {
    // -------------------------------------------------------------------
    // Users
    // -------------------------------------------------------------------

    /// Registers a new user.
    ///
    /// Fails with [`StorageError::UsernameTaken`] when the username is
    /// already registered.
    fn create_user(&mut self, username: &str, password_hash: &str) -> Result<(), StorageError>;

    /// Checks a username/credential pair.
    ///
    /// Fails with [`StorageError::UserNotFound`] when no user matches both
    /// values; absent user and wrong credential are indistinguishable by
    /// design.
    fn verify_user(&self, username: &str, password_hash: &str) -> Result<(), StorageError>;

    // -------------------------------------------------------------------
    // Tasks
    // -------------------------------------------------------------------

    /// Inserts a task, returning the store-assigned id.
    fn insert_task(&mut self, task: &NewTask) -> Result<TaskId, StorageError>;

    /// Loads a single task by id.
    fn task_by_id(&self, id: TaskId) -> Result<Task, StorageError>;

    /// Tasks owned by `owner`, due time ascending (ties by id), at most
    /// `limit` rows.
    fn tasks_for_owner(&self, owner: &str, limit: u32) -> Result<Vec<Task>, StorageError>;

    /// Applies an update to an existing task.
    ///
    /// Fails with [`StorageError::TaskNotFound`] when no row changed.
    fn update_task(&mut self, update: &TaskUpdate) -> Result<(), StorageError>;

    /// Deletes a task by id.
    ///
    /// Fails with [`StorageError::TaskNotFound`] when no row changed.
    fn delete_task(&mut self, id: TaskId) -> Result<(), StorageError>;

    /// Number of `owner`'s tasks with `due_time` strictly before `cutoff`.
    fn count_due_before(&self, owner: &str, cutoff: Timestamp) -> Result<u64, StorageError>;
}
