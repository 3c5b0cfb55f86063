//! Shared wire types used by several endpoints.

use serde::{Deserialize, Serialize};

/// Generic success body: `{"message": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}

/// Body for endpoints that operate on one user's tasks: `{"username": "..."}`.
#[derive(Debug, Clone, Deserialize)]
pub struct OwnerRequest {
    pub username: Option<String>,
}
