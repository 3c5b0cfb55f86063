//! HTTP API for the task manager.
//!
//! Module layout:
//! - `error`: [`error::ApiError`] and its response mapping
//! - `handlers`: one async fn per route
//! - `router`: route table and middleware
//! - `schema`: request/response wire types
//! - `service`: the operations behind the endpoints
//! - `state`: shared [`state::AppState`]

pub mod error;
pub mod handlers;
pub mod router;
pub mod schema;
pub mod service;
pub mod state;
