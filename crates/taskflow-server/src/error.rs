//! API error type and HTTP response mapping.
//!
//! Every failure leaving a handler is an [`ApiError`]. On the wire it becomes
//! a JSON body of the form `{"error": "<message>"}` with the matching status
//! code, which is the shape clients decode.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use taskflow_core::ValidationError;
use taskflow_storage::StorageError;
use thiserror::Error;

/// All errors that can be returned from API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body or query string is missing or malformed.
    #[error("{0}")]
    BadRequest(String),

    /// The referenced user or task does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Storage or other unexpected failure.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "internal error while handling request");
        }
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::TaskNotFound(_) => ApiError::NotFound("task not found".to_string()),
            StorageError::UserNotFound(_) => ApiError::NotFound("user not found.".to_string()),
            StorageError::UsernameTaken(_) => {
                ApiError::BadRequest("username has already been taken!".to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
