//! Signup and login handlers.

use axum::extract::State;
use axum::Json;

use crate::error::ApiError;
use crate::schema::auth::CredentialsRequest;
use crate::schema::common::MessageResponse;
use crate::state::AppState;

/// POST /signup
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut service = state.service.lock().await;
    let resp = service.signup(&req)?;
    Ok(Json(resp))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let service = state.service.lock().await;
    let resp = service.login(&req)?;
    Ok(Json(resp))
}
