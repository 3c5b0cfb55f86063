//! Task manager server binary.
//!
//! Configuration comes from the environment:
//! - `TASKFLOW_DB_PATH`: SQLite database file (default `taskflow.db`)
//! - `TASKFLOW_PORT`: listen port (default `3001`)
//! - `TASKFLOW_UTC_OFFSET`: offset for due-time checks, `+HH:MM` or a
//!   whole-hour value like `+7` (default `+07:00`)

use taskflow_core::DEFAULT_UTC_OFFSET;
use taskflow_server::router::build_router;
use taskflow_server::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let db_path = std::env::var("TASKFLOW_DB_PATH").unwrap_or_else(|_| "taskflow.db".to_string());
    let port = std::env::var("TASKFLOW_PORT").unwrap_or_else(|_| "3001".to_string());
    let offset_raw =
        std::env::var("TASKFLOW_UTC_OFFSET").unwrap_or_else(|_| DEFAULT_UTC_OFFSET.to_string());
    let due_offset = taskflow_core::parse_utc_offset(&offset_raw)
        .expect("Invalid TASKFLOW_UTC_OFFSET");

    let state =
        AppState::new(&db_path, due_offset).expect("Failed to initialize application state");
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    tracing::info!(
        "taskflow server listening on {} (db: {}, due offset: {})",
        addr,
        db_path,
        offset_raw
    );

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind address");
    axum::serve(listener, app).await.expect("Server failed");
}
