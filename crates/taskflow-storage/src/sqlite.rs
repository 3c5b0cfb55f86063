//! SQLite implementation of [`TaskStore`].
//!
//! [`SqliteStore`] persists users and tasks in a SQLite database with WAL
//! mode and automatic schema migrations. Timestamps are stored as TEXT in
//! the fixed wire format; because that format is zero-padded, the SQL
//! `due_time < ?` comparison is chronological.

use rusqlite::{params, Connection, OptionalExtension};

use taskflow_core::{Task, TaskId, TaskStatus, Timestamp};

use crate::error::StorageError;
use crate::traits::TaskStore;
use crate::types::{NewTask, TaskUpdate};

/// SQLite-backed implementation of [`TaskStore`].
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) a SQLite database at `path`.
    pub fn new(path: &str) -> Result<Self, StorageError> {
        let conn = crate::schema::open_database(path)?;
        Ok(SqliteStore { conn })
    }

    /// Opens an in-memory SQLite database (for testing).
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = crate::schema::open_in_memory()?;
        Ok(SqliteStore { conn })
    }

    /// Decodes one `tasks` row. Column order must match [`TASK_COLUMNS`].
    fn row_to_task(row: &rusqlite::Row<'_>) -> rusqlite::Result<Task> {
        let creation_time: String = row.get(4)?;
        let creation_time: Timestamp = creation_time.parse().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
        })?;
        let due_time: String = row.get(5)?;
        let due_time: Timestamp = due_time.parse().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
        })?;
        let status: i64 = row.get(7)?;
        let status = TaskStatus::try_from(status).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                7,
                rusqlite::types::Type::Integer,
                Box::new(e),
            )
        })?;

        Ok(Task {
            id: TaskId(row.get(0)?),
            title: row.get(1)?,
            description: row.get(2)?,
            tags: row.get(3)?,
            creation_time,
            due_time,
            owner: row.get(6)?,
            status,
        })
    }
}

/// Selected columns, in [`SqliteStore::row_to_task`] decode order.
const TASK_COLUMNS: &str = "id, title, description, tags, creation_time, due_time, owner, status";

impl TaskStore for SqliteStore {
    fn create_user(&mut self, username: &str, password_hash: &str) -> Result<(), StorageError> {
        let result = self.conn.execute(
            "INSERT INTO user (username, password_hash) VALUES (?1, ?2)",
            params![username, password_hash],
        );
        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(StorageError::UsernameTaken(username.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn verify_user(&self, username: &str, password_hash: &str) -> Result<(), StorageError> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT COUNT(*) FROM user WHERE username = ?1 AND password_hash = ?2",
        )?;
        let count: i64 = stmt.query_row(params![username, password_hash], |row| row.get(0))?;
        if count > 0 {
            Ok(())
        } else {
            Err(StorageError::UserNotFound(username.to_string()))
        }
    }

    fn insert_task(&mut self, task: &NewTask) -> Result<TaskId, StorageError> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO tasks (title, description, tags, creation_time, due_time, owner, status) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;
        stmt.execute(params![
            task.title,
            task.description,
            task.tags,
            task.creation_time.to_string(),
            task.due_time.to_string(),
            task.owner,
            task.status.as_i64(),
        ])?;
        Ok(TaskId(self.conn.last_insert_rowid()))
    }

    fn task_by_id(&self, id: TaskId) -> Result<Task, StorageError> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"))?;
        stmt.query_row(params![id.0], Self::row_to_task)
            .optional()?
            .ok_or(StorageError::TaskNotFound(id.0))
    }

    fn tasks_for_owner(&self, owner: &str, limit: u32) -> Result<Vec<Task>, StorageError> {
        let mut stmt = self.conn.prepare_cached(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE owner = ?1 \
             ORDER BY due_time ASC, id ASC LIMIT ?2"
        ))?;
        let rows = stmt.query_map(params![owner, i64::from(limit)], Self::row_to_task)?;
        let mut tasks = Vec::new();
        for row in rows {
            tasks.push(row?);
        }
        Ok(tasks)
    }

    fn update_task(&mut self, update: &TaskUpdate) -> Result<(), StorageError> {
        let mut stmt = self.conn.prepare_cached(
            "UPDATE tasks SET title = ?1, description = ?2, tags = ?3, due_time = ?4 \
             WHERE id = ?5",
        )?;
        let changed = stmt.execute(params![
            update.title,
            update.description,
            update.tags,
            update.due_time.to_string(),
            update.id.0,
        ])?;
        if changed == 0 {
            return Err(StorageError::TaskNotFound(update.id.0));
        }
        Ok(())
    }

    fn delete_task(&mut self, id: TaskId) -> Result<(), StorageError> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![id.0])?;
        if changed == 0 {
            return Err(StorageError::TaskNotFound(id.0));
        }
        Ok(())
    }

    fn count_due_before(&self, owner: &str, cutoff: Timestamp) -> Result<u64, StorageError> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT COUNT(*) FROM tasks WHERE owner = ?1 AND due_time < ?2")?;
        let count: i64 =
            stmt.query_row(params![owner, cutoff.to_string()], |row| row.get(0))?;
        Ok(count as u64)
    }
}
