//! Stable ID newtype for task records.
//!
//! Task identity is a distinct newtype wrapper over `i64` (the store's
//! rowid type), providing type safety so a task id cannot be accidentally
//! mixed up with other integer values flowing through the API.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable task identifier, assigned by the store at insert time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskId(pub i64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_id_display() {
        assert_eq!(format!("{}", TaskId(7)), "7");
    }

    #[test]
    fn serde_roundtrip() {
        let id = TaskId(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "42");
        let back: TaskId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
