//! HTTP handlers.
//!
//! Each handler deserializes its request type, takes the service lock, and
//! delegates to one [`crate::service::TaskService`] method.

pub mod auth;
pub mod graph;
pub mod tasks;
