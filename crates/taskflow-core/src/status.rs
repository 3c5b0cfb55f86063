//! Task completion status.
//!
//! Stored and transmitted as a bare integer (0 = incomplete, 1 = done) to
//! match the persisted column format; the enum keeps the two states
//! distinct in code.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Completion state of a task. New tasks are always created incomplete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum TaskStatus {
    #[default]
    Incomplete,
    Done,
}

/// A status integer outside the known set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid task status {0}, expected 0 (incomplete) or 1 (done)")]
pub struct InvalidStatus(pub i64);

impl TaskStatus {
    /// Integer wire/storage representation.
    pub fn as_i64(self) -> i64 {
        match self {
            TaskStatus::Incomplete => 0,
            TaskStatus::Done => 1,
        }
    }
}

impl From<TaskStatus> for i64 {
    fn from(status: TaskStatus) -> Self {
        status.as_i64()
    }
}

impl TryFrom<i64> for TaskStatus {
    type Error = InvalidStatus;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TaskStatus::Incomplete),
            1 => Ok(TaskStatus::Done),
            other => Err(InvalidStatus(other)),
        }
    }
}
