//! Tag-graph handler.

use axum::extract::State;
use axum::Json;
use taskflow_core::GraphView;

use crate::error::ApiError;
use crate::schema::common::OwnerRequest;
use crate::state::AppState;

/// POST /graph
///
/// Returns `{nodes, links}` over the owner's current task list, ready to
/// feed a force-directed renderer.
pub async fn task_graph(
    State(state): State<AppState>,
    Json(req): Json<OwnerRequest>,
) -> Result<Json<GraphView>, ApiError> {
    let service = state.service.lock().await;
    let resp = service.graph_for(&req)?;
    Ok(Json(resp))
}
