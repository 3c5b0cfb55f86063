//! Task CRUD and due-count handlers.

use axum::extract::{Query, State};
use axum::Json;

use crate::error::ApiError;
use crate::schema::common::{MessageResponse, OwnerRequest};
use crate::schema::tasks::{
    AddTaskRequest, DeleteTaskRequest, DueCountResponse, GetTaskParams, TaskListResponse,
    TaskResponse, UpdateTaskRequest,
};
use crate::state::AppState;

/// POST /getTasks
pub async fn get_tasks(
    State(state): State<AppState>,
    Json(req): Json<OwnerRequest>,
) -> Result<Json<TaskListResponse>, ApiError> {
    let service = state.service.lock().await;
    let resp = service.tasks_for(&req)?;
    Ok(Json(resp))
}

/// GET /getTask?id=N
pub async fn get_task(
    State(state): State<AppState>,
    Query(params): Query<GetTaskParams>,
) -> Result<Json<TaskResponse>, ApiError> {
    let service = state.service.lock().await;
    let resp = service.task(&params)?;
    Ok(Json(resp))
}

/// POST /addTasks
pub async fn add_task(
    State(state): State<AppState>,
    Json(req): Json<AddTaskRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut service = state.service.lock().await;
    let resp = service.add_task(&req)?;
    Ok(Json(resp))
}

/// POST /updateTask
pub async fn update_task(
    State(state): State<AppState>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut service = state.service.lock().await;
    let resp = service.update_task(&req)?;
    Ok(Json(resp))
}

/// POST /deleteTask
pub async fn delete_task(
    State(state): State<AppState>,
    Json(req): Json<DeleteTaskRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut service = state.service.lock().await;
    let resp = service.delete_task(&req)?;
    Ok(Json(resp))
}

/// POST /checkDueTasks
pub async fn check_due_tasks(
    State(state): State<AppState>,
    Json(req): Json<OwnerRequest>,
) -> Result<Json<DueCountResponse>, ApiError> {
    let service = state.service.lock().await;
    let resp = service.due_count(&req)?;
    Ok(Json(resp))
}
