//! In-memory implementation of [`TaskStore`].
//!
//! [`InMemoryStore`] is a first-class backend for tests and anywhere
//! persistence isn't needed, with semantics identical to the SQLite
//! backend. Ordering ties on due time break by id, matching the SQLite
//! backend's secondary sort.

use std::collections::{BTreeMap, HashMap};

use taskflow_core::{Task, TaskId, Timestamp};

use crate::error::StorageError;
use crate::traits::TaskStore;
use crate::types::{NewTask, TaskUpdate};

/// HashMap/BTreeMap-backed implementation of [`TaskStore`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    /// username -> password_hash
    users: HashMap<String, String>,
    /// Tasks by id, iteration in id order.
    tasks: BTreeMap<i64, Task>,
    /// Last assigned task id.
    last_task_id: i64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TaskStore for InMemoryStore {
    fn create_user(&mut self, username: &str, password_hash: &str) -> Result<(), StorageError> {
        if self.users.contains_key(username) {
            return Err(StorageError::UsernameTaken(username.to_string()));
        }
        self.users
            .insert(username.to_string(), password_hash.to_string());
        Ok(())
    }

    fn verify_user(&self, username: &str, password_hash: &str) -> Result<(), StorageError> {
        match self.users.get(username) {
            Some(stored) if stored == password_hash => Ok(()),
            _ => Err(StorageError::UserNotFound(username.to_string())),
        }
    }

    fn insert_task(&mut self, task: &NewTask) -> Result<TaskId, StorageError> {
        self.last_task_id += 1;
        let id = TaskId(self.last_task_id);
        self.tasks.insert(
            id.0,
            Task {
                id,
                title: task.title.clone(),
                description: task.description.clone(),
                tags: task.tags.clone(),
                creation_time: task.creation_time,
                due_time: task.due_time,
                owner: task.owner.clone(),
                status: task.status,
            },
        );
        Ok(id)
    }

    fn task_by_id(&self, id: TaskId) -> Result<Task, StorageError> {
        self.tasks
            .get(&id.0)
            .cloned()
            .ok_or(StorageError::TaskNotFound(id.0))
    }

    fn tasks_for_owner(&self, owner: &str, limit: u32) -> Result<Vec<Task>, StorageError> {
        let mut tasks: Vec<Task> = self
            .tasks
            .values()
            .filter(|t| t.owner == owner)
            .cloned()
            .collect();
        tasks.sort_by_key(|t| (t.due_time, t.id));
        tasks.truncate(limit as usize);
        Ok(tasks)
    }

    fn update_task(&mut self, update: &TaskUpdate) -> Result<(), StorageError> {
        let task = self
            .tasks
            .get_mut(&update.id.0)
            .ok_or(StorageError::TaskNotFound(update.id.0))?;
        task.title = update.title.clone();
        task.description = update.description.clone();
        task.tags = update.tags.clone();
        task.due_time = update.due_time;
        Ok(())
    }

    fn delete_task(&mut self, id: TaskId) -> Result<(), StorageError> {
        self.tasks
            .remove(&id.0)
            .map(|_| ())
            .ok_or(StorageError::TaskNotFound(id.0))
    }

    fn count_due_before(&self, owner: &str, cutoff: Timestamp) -> Result<u64, StorageError> {
        let count = self
            .tasks
            .values()
            .filter(|t| t.owner == owner && t.due_time < cutoff)
            .count();
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskflow_core::TaskStatus;

    fn new_task(title: &str, owner: &str, due: &str) -> NewTask {
        NewTask {
            title: title.to_string(),
            description: String::new(),
            tags: String::new(),
            creation_time: "2024-01-01 08:00:00".parse().unwrap(),
            due_time: due.parse().unwrap(),
            owner: owner.to_string(),
            status: TaskStatus::Incomplete,
        }
    }

    #[test]
    fn test_user_lifecycle() {
        let mut store = InMemoryStore::new();
        store.create_user("alice", "hash1").unwrap();

        assert!(matches!(
            store.create_user("alice", "other"),
            Err(StorageError::UsernameTaken(_))
        ));
        assert!(store.verify_user("alice", "hash1").is_ok());
        assert!(matches!(
            store.verify_user("alice", "wrong"),
            Err(StorageError::UserNotFound(_))
        ));
    }

    #[test]
    fn test_task_ids_are_sequential() {
        let mut store = InMemoryStore::new();
        let a = store
            .insert_task(&new_task("a", "alice", "2024-01-02 00:00:00"))
            .unwrap();
        let b = store
            .insert_task(&new_task("b", "alice", "2024-01-03 00:00:00"))
            .unwrap();
        assert_eq!(a, TaskId(1));
        assert_eq!(b, TaskId(2));
    }

    #[test]
    fn test_owner_listing_matches_sqlite_semantics() {
        let mut store = InMemoryStore::new();
        store
            .insert_task(&new_task("later", "alice", "2024-03-01 00:00:00"))
            .unwrap();
        store
            .insert_task(&new_task("earlier", "alice", "2024-01-01 00:00:00"))
            .unwrap();
        store
            .insert_task(&new_task("other", "bob", "2024-01-01 00:00:00"))
            .unwrap();

        let tasks = store.tasks_for_owner("alice", 10).unwrap();
        let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["earlier", "later"]);

        assert_eq!(store.tasks_for_owner("alice", 1).unwrap().len(), 1);
    }

    #[test]
    fn test_update_and_delete() {
        let mut store = InMemoryStore::new();
        let id = store
            .insert_task(&new_task("draft", "alice", "2024-01-02 00:00:00"))
            .unwrap();

        store
            .update_task(&TaskUpdate {
                id,
                title: "final".to_string(),
                description: "d".to_string(),
                tags: "work".to_string(),
                due_time: "2024-01-05 00:00:00".parse().unwrap(),
            })
            .unwrap();
        let loaded = store.task_by_id(id).unwrap();
        assert_eq!(loaded.title, "final");
        assert_eq!(loaded.owner, "alice");

        store.delete_task(id).unwrap();
        assert!(matches!(
            store.delete_task(id),
            Err(StorageError::TaskNotFound(_))
        ));
    }

    #[test]
    fn test_count_due_before() {
        let mut store = InMemoryStore::new();
        store
            .insert_task(&new_task("overdue", "alice", "2024-01-01 00:00:00"))
            .unwrap();
        store
            .insert_task(&new_task("exact", "alice", "2024-06-01 12:00:00"))
            .unwrap();

        let cutoff: Timestamp = "2024-06-01 12:00:00".parse().unwrap();
        assert_eq!(store.count_due_before("alice", cutoff).unwrap(), 1);
    }
}
