//! HTTP router assembly.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Builds the axum router with all routes and middleware.
///
/// Route names keep the camelCase verbs existing callers use, so list and
/// fetch go over POST bodies rather than REST-style paths.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/signup", post(handlers::auth::signup))
        .route("/login", post(handlers::auth::login))
        .route("/getTasks", post(handlers::tasks::get_tasks))
        .route("/getTask", get(handlers::tasks::get_task))
        .route("/addTasks", post(handlers::tasks::add_task))
        .route("/updateTask", post(handlers::tasks::update_task))
        .route("/deleteTask", post(handlers::tasks::delete_task))
        .route("/checkDueTasks", post(handlers::tasks::check_due_tasks))
        .route("/graph", post(handlers::graph::task_graph))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
