//! Storage error types for taskflow-storage.
//!
//! [`StorageError`] covers all anticipated failure modes in the storage
//! layer: database and migration failures, entity-not-found variants, and
//! the unique-username constraint. Row decode failures surface through the
//! [`StorageError::Sqlite`] variant as conversion errors.

use thiserror::Error;

/// Errors produced by storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying SQLite failure.
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Schema migration failure at open time.
    #[error("migration error: {0}")]
    Migration(String),

    /// A task with the given id was not found.
    #[error("task not found: {0}")]
    TaskNotFound(i64),

    /// No user matched the given credentials.
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// The username is already registered.
    #[error("username already taken: {0}")]
    UsernameTaken(String),
}
