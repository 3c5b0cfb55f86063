//! Task record as stored and transmitted.

use serde::{Deserialize, Serialize};

use crate::id::TaskId;
use crate::status::TaskStatus;
use crate::time::Timestamp;

/// A task record. Field names and encodings match the wire format:
/// `tags` stays a raw comma-joined string, timestamps serialize as
/// `YYYY-MM-DD HH:MM:SS`, `status` as a bare integer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub tags: String,
    pub creation_time: Timestamp,
    pub due_time: Timestamp,
    pub owner: String,
    pub status: TaskStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Task {
        Task {
            id: TaskId(1),
            title: "Write report".to_string(),
            description: "quarterly numbers".to_string(),
            tags: "work,urgent".to_string(),
            creation_time: "2024-01-01 09:00:00".parse().unwrap(),
            due_time: "2024-01-02 17:00:00".parse().unwrap(),
            owner: "alice".to_string(),
            status: TaskStatus::Incomplete,
        }
    }

    #[test]
    fn wire_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["tags"], "work,urgent");
        assert_eq!(json["creation_time"], "2024-01-01 09:00:00");
        assert_eq!(json["status"], 0);
    }

    #[test]
    fn json_roundtrip() {
        let task = sample();
        let json = serde_json::to_string(&task).unwrap();
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task);
    }
}
