//! Storage abstraction for taskflow user and task records.
//!
//! Provides the [`TaskStore`] trait defining the storage contract that all
//! backends implement, plus [`SqliteStore`] and [`InMemoryStore`] as
//! first-class backends.
//!
//! # Modules
//!
//! - [`error`]: StorageError enum with all failure modes
//! - [`types`]: NewTask, TaskUpdate write shapes
//! - [`traits`]: TaskStore trait definition
//! - [`memory`]: InMemoryStore implementation
//! - [`schema`]: SQL schema constants and migration setup
//! - [`sqlite`]: SqliteStore implementation

pub mod error;
pub mod memory;
pub mod schema;
pub mod sqlite;
pub mod traits;
pub mod types;

// Re-export key types for ergonomic use.
pub use error::StorageError;
pub use memory::InMemoryStore;
pub use sqlite::SqliteStore;
pub use traits::TaskStore;
pub use types::{NewTask, TaskUpdate};
