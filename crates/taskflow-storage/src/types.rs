//! Storage-level input records.
//!
//! [`NewTask`] and [`TaskUpdate`] are the write shapes of the store: what
//! an insert and an update carry. The full [`taskflow_core::Task`] is the
//! read shape.

use taskflow_core::{TaskId, TaskStatus, Timestamp};

/// Fields written when a task is created. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub tags: String,
    pub creation_time: Timestamp,
    pub due_time: Timestamp,
    pub owner: String,
    pub status: TaskStatus,
}

/// Fields an update may change. Owner, creation time, and status are
/// immutable through this path.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskUpdate {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub tags: String,
    pub due_time: Timestamp,
}
