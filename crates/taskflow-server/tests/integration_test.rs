//! End-to-end integration tests for the task manager HTTP API.
//!
//! Tests exercise the full stack: HTTP request -> axum router -> handler ->
//! TaskService -> SQLite -> HTTP response.
//!
//! Each test creates a fresh AppState backed by a private in-memory SQLite
//! database. Tests use `tower::ServiceExt::oneshot` to send requests directly
//! to the router without starting a network server.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::json;
use tower::ServiceExt;

use taskflow_server::router::build_router;
use taskflow_server::state::AppState;

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// Creates a fresh router backed by a private in-memory database.
fn test_app() -> Router {
    let state = AppState::in_memory().expect("failed to create in-memory AppState");
    build_router(state)
}

/// Sends a POST request with a JSON body and returns (status, json).
async fn post_json(
    app: &Router,
    path: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap_or(json!(null));
    (status, json)
}

/// Sends a GET request and returns (status, json).
async fn get_json(app: &Router, path: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap_or(json!(null));
    (status, json)
}

/// Signs up a user with a fixed hash.
async fn signup(app: &Router, username: &str) {
    let (status, body) = post_json(
        app,
        "/signup",
        json!({ "username": username, "password_hash": "aabbcc" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "signup failed: {:?}", body);
}

/// Adds a task and returns the id the server assigned.
async fn add_task(app: &Router, username: &str, title: &str, tags: &str, due: &str) -> i64 {
    let (status, body) = post_json(
        app,
        "/addTasks",
        json!({
            "title": title,
            "description": "",
            "tags": tags,
            "creation_time": "2024-01-01 09:00:00",
            "due_time": due,
            "username": username,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "add task failed: {:?}", body);
    // Message shape: "new task has been added with id N".
    body["message"]
        .as_str()
        .unwrap()
        .rsplit(' ')
        .next()
        .unwrap()
        .parse::<i64>()
        .unwrap()
}

// ===========================================================================
// Signup and login
// ===========================================================================

#[tokio::test]
async fn signup_then_login_succeeds() {
    let app = test_app();

    let (status, body) = post_json(
        &app,
        "/signup",
        json!({ "username": "alice", "password_hash": "deadbeef" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "signup failed: {:?}", body);
    assert_eq!(body["message"], "signup successful.");

    let (status, body) = post_json(
        &app,
        "/login",
        json!({ "username": "alice", "password_hash": "deadbeef" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {:?}", body);
    assert_eq!(body["message"], "username found, login successful!");
}

#[tokio::test]
async fn signup_with_missing_fields_is_rejected() {
    let app = test_app();

    for body in [json!({}), json!({ "username": "alice" })] {
        let (status, resp) = post_json(&app, "/signup", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(resp["error"], "username and password hash are required.");
    }
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let app = test_app();
    signup(&app, "alice").await;

    let (status, body) = post_json(
        &app,
        "/signup",
        json!({ "username": "alice", "password_hash": "other" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "username has already been taken!");
}

#[tokio::test]
async fn wrong_password_and_unknown_user_are_indistinguishable() {
    let app = test_app();
    signup(&app, "alice").await;

    let (wrong_status, wrong_body) = post_json(
        &app,
        "/login",
        json!({ "username": "alice", "password_hash": "not-the-hash" }),
    )
    .await;
    let (unknown_status, unknown_body) = post_json(
        &app,
        "/login",
        json!({ "username": "nobody", "password_hash": "aabbcc" }),
    )
    .await;

    assert_eq!(wrong_status, StatusCode::NOT_FOUND);
    assert_eq!(unknown_status, StatusCode::NOT_FOUND);
    assert_eq!(wrong_body["error"], "user not found.");
    assert_eq!(wrong_body, unknown_body);
}

// ===========================================================================
// Task CRUD
// ===========================================================================

#[tokio::test]
async fn add_then_fetch_task() {
    let app = test_app();
    signup(&app, "alice").await;
    let id = add_task(&app, "alice", "buy milk", "errand,food", "2024-02-01 10:00:00").await;

    let (status, body) = get_json(&app, &format!("/getTask?id={}", id)).await;
    assert_eq!(status, StatusCode::OK, "get task failed: {:?}", body);
    let task = &body["task"];
    assert_eq!(task["id"].as_i64().unwrap(), id);
    assert_eq!(task["title"], "buy milk");
    assert_eq!(task["tags"], "errand,food");
    assert_eq!(task["creation_time"], "2024-01-01 09:00:00");
    assert_eq!(task["due_time"], "2024-02-01 10:00:00");
    assert_eq!(task["owner"], "alice");
    assert_eq!(task["status"].as_i64().unwrap(), 0);
}

#[tokio::test]
async fn add_task_with_missing_fields_is_rejected() {
    let app = test_app();

    // description absent entirely
    let (status, body) = post_json(
        &app,
        "/addTasks",
        json!({
            "title": "x",
            "tags": "",
            "creation_time": "2024-01-01 09:00:00",
            "due_time": "2024-02-01 10:00:00",
            "username": "alice",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "all fields are required, check again!");

    // empty title counts as missing
    let (status, body) = post_json(
        &app,
        "/addTasks",
        json!({
            "title": "",
            "description": "",
            "tags": "",
            "creation_time": "2024-01-01 09:00:00",
            "due_time": "2024-02-01 10:00:00",
            "username": "alice",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "all fields are required, check again!");
}

#[tokio::test]
async fn add_task_with_empty_description_and_tags_is_accepted() {
    let app = test_app();
    let id = add_task(&app, "alice", "untagged", "", "2024-02-01 10:00:00").await;

    let (status, body) = get_json(&app, &format!("/getTask?id={}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["task"]["description"], "");
    assert_eq!(body["task"]["tags"], "");
}

#[tokio::test]
async fn add_task_with_malformed_timestamp_is_rejected() {
    let app = test_app();

    let (status, body) = post_json(
        &app,
        "/addTasks",
        json!({
            "title": "x",
            "description": "",
            "tags": "",
            "creation_time": "2024-01-01 09:00:00",
            "due_time": "tomorrow",
            "username": "alice",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "body: {:?}", body);
    assert!(
        body["error"].as_str().unwrap().contains("invalid timestamp"),
        "unexpected error: {:?}",
        body
    );
}

#[tokio::test]
async fn get_task_without_id_is_rejected() {
    let app = test_app();

    let (status, body) = get_json(&app, "/getTask").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "id is mandatory, check the url!");
}

#[tokio::test]
async fn get_missing_task_is_not_found() {
    let app = test_app();

    let (status, body) = get_json(&app, "/getTask?id=999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "task not found");
}

#[tokio::test]
async fn get_tasks_orders_by_due_time_ascending() {
    let app = test_app();
    signup(&app, "alice").await;
    add_task(&app, "alice", "third", "", "2024-03-01 00:00:00").await;
    add_task(&app, "alice", "first", "", "2024-01-05 00:00:00").await;
    add_task(&app, "alice", "second", "", "2024-02-01 00:00:00").await;

    let (status, body) = post_json(&app, "/getTasks", json!({ "username": "alice" })).await;
    assert_eq!(status, StatusCode::OK, "get tasks failed: {:?}", body);
    let titles: Vec<&str> = body["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn get_tasks_returns_at_most_ten() {
    let app = test_app();
    for i in 0..12 {
        let due = format!("2024-01-{:02} 00:00:00", i + 1);
        add_task(&app, "alice", &format!("task {}", i), "", &due).await;
    }

    let (status, body) = post_json(&app, "/getTasks", json!({ "username": "alice" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tasks"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn owner_scoped_endpoints_require_username() {
    let app = test_app();

    for path in ["/getTasks", "/checkDueTasks", "/graph"] {
        let (status, body) = post_json(&app, path, json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "path: {}", path);
        assert_eq!(
            body["error"], "username is mandatory, check the body!",
            "path: {}",
            path
        );
    }
}

#[tokio::test]
async fn get_tasks_for_unknown_user_is_empty() {
    let app = test_app();

    let (status, body) = post_json(&app, "/getTasks", json!({ "username": "ghost" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tasks"], json!([]));
}

#[tokio::test]
async fn update_task_changes_fields() {
    let app = test_app();
    let id = add_task(&app, "alice", "draft", "old", "2024-02-01 10:00:00").await;

    let (status, body) = post_json(
        &app,
        "/updateTask",
        json!({
            "id": id,
            "title": "final",
            "description": "rewritten",
            "tags": "new,tags",
            "due_time": "2024-03-01 10:00:00",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "update failed: {:?}", body);
    assert_eq!(body["message"], format!("task id {} updated.", id));

    let (_, body) = get_json(&app, &format!("/getTask?id={}", id)).await;
    let task = &body["task"];
    assert_eq!(task["title"], "final");
    assert_eq!(task["description"], "rewritten");
    assert_eq!(task["tags"], "new,tags");
    assert_eq!(task["due_time"], "2024-03-01 10:00:00");
    // Owner and creation time are immutable through this endpoint.
    assert_eq!(task["owner"], "alice");
    assert_eq!(task["creation_time"], "2024-01-01 09:00:00");
}

#[tokio::test]
async fn update_missing_task_is_not_found() {
    let app = test_app();

    let (status, body) = post_json(
        &app,
        "/updateTask",
        json!({
            "id": 999,
            "title": "x",
            "description": "",
            "tags": "",
            "due_time": "2024-03-01 10:00:00",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    // Unlike getTask and deleteTask, this message carries a trailing period.
    assert_eq!(body["error"], "task not found.");
}

#[tokio::test]
async fn update_task_with_missing_fields_is_rejected() {
    let app = test_app();
    let id = add_task(&app, "alice", "draft", "", "2024-02-01 10:00:00").await;

    let (status, body) = post_json(&app, "/updateTask", json!({ "id": id, "title": "x" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "all fields are required, check again!");
}

#[tokio::test]
async fn delete_task_removes_it() {
    let app = test_app();
    let id = add_task(&app, "alice", "temp", "", "2024-02-01 10:00:00").await;

    let (status, body) = post_json(&app, "/deleteTask", json!({ "id": id })).await;
    assert_eq!(status, StatusCode::OK, "delete failed: {:?}", body);
    assert_eq!(body["message"], "task has been deleted");

    let (status, _) = get_json(&app, &format!("/getTask?id={}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_missing_task_is_not_found() {
    let app = test_app();

    let (status, body) = post_json(&app, "/deleteTask", json!({ "id": 424242 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "task not found");
}

#[tokio::test]
async fn delete_without_id_is_rejected() {
    let app = test_app();

    let (status, body) = post_json(&app, "/deleteTask", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "task ID is required, check the body!");
}

// ===========================================================================
// Due-task counts
// ===========================================================================

#[tokio::test]
async fn due_count_zero_is_a_normal_response() {
    let app = test_app();
    signup(&app, "alice").await;

    let (status, body) = post_json(&app, "/checkDueTasks", json!({ "username": "alice" })).await;
    assert_eq!(status, StatusCode::OK, "body: {:?}", body);
    assert_eq!(body["count"].as_u64().unwrap(), 0);
}

#[tokio::test]
async fn due_count_includes_only_past_due_tasks() {
    let app = test_app();
    add_task(&app, "alice", "long overdue", "", "2000-01-01 00:00:00").await;
    add_task(&app, "alice", "also overdue", "", "2001-06-15 12:00:00").await;
    add_task(&app, "alice", "far future", "", "2099-01-01 00:00:00").await;
    add_task(&app, "bob", "someone else's", "", "2000-01-01 00:00:00").await;

    let (status, body) = post_json(&app, "/checkDueTasks", json!({ "username": "alice" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"].as_u64().unwrap(), 2);
}

// ===========================================================================
// Tag graph
// ===========================================================================

#[tokio::test]
async fn graph_links_tasks_that_share_tags() {
    let app = test_app();
    let t1 = add_task(&app, "alice", "one", "a,b", "2024-01-01 00:00:00").await;
    let t2 = add_task(&app, "alice", "two", "b,c", "2024-01-02 00:00:00").await;
    let t3 = add_task(&app, "alice", "three", "a,c", "2024-01-03 00:00:00").await;

    let (status, body) = post_json(&app, "/graph", json!({ "username": "alice" })).await;
    assert_eq!(status, StatusCode::OK, "graph failed: {:?}", body);

    let nodes = body["nodes"].as_array().unwrap();
    assert_eq!(nodes.len(), 3);
    assert_eq!(nodes[0]["id"].as_i64().unwrap(), t1);
    assert_eq!(nodes[0]["label"], "one");
    assert_eq!(nodes[0]["group"].as_i64().unwrap(), 1);

    // Each pair shares exactly one tag.
    let links = body["links"].as_array().unwrap();
    assert_eq!(links.len(), 3);
    let pairs: Vec<(i64, i64)> = links
        .iter()
        .map(|l| (l["source"].as_i64().unwrap(), l["target"].as_i64().unwrap()))
        .collect();
    assert!(pairs.contains(&(t1, t2)));
    assert!(pairs.contains(&(t2, t3)));
    assert!(pairs.contains(&(t1, t3)));
}

#[tokio::test]
async fn graph_keeps_one_link_per_shared_tag() {
    let app = test_app();
    let t1 = add_task(&app, "alice", "one", "x,y", "2024-01-01 00:00:00").await;
    let t2 = add_task(&app, "alice", "two", "x,y", "2024-01-02 00:00:00").await;

    let (status, body) = post_json(&app, "/graph", json!({ "username": "alice" })).await;
    assert_eq!(status, StatusCode::OK);

    // Two shared tags, two parallel links.
    let links = body["links"].as_array().unwrap();
    assert_eq!(links.len(), 2);
    for link in links {
        assert_eq!(link["source"].as_i64().unwrap(), t1);
        assert_eq!(link["target"].as_i64().unwrap(), t2);
    }
}

#[tokio::test]
async fn graph_for_unknown_user_is_empty() {
    let app = test_app();

    let (status, body) = post_json(&app, "/graph", json!({ "username": "ghost" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nodes"], json!([]));
    assert_eq!(body["links"], json!([]));
}

#[tokio::test]
async fn graph_output_is_deterministic() {
    let app = test_app();
    add_task(&app, "alice", "one", "a,b", "2024-01-01 00:00:00").await;
    add_task(&app, "alice", "two", "b,c", "2024-01-02 00:00:00").await;
    add_task(&app, "alice", "three", "a,c", "2024-01-03 00:00:00").await;

    let (_, first) = post_json(&app, "/graph", json!({ "username": "alice" })).await;
    let (_, second) = post_json(&app, "/graph", json!({ "username": "alice" })).await;
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

// ===========================================================================
// Full user flow
// ===========================================================================

#[tokio::test]
async fn full_user_flow() {
    let app = test_app();
    signup(&app, "alice").await;

    let (status, _) = post_json(
        &app,
        "/login",
        json!({ "username": "alice", "password_hash": "aabbcc" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let overdue = add_task(&app, "alice", "pay rent", "money", "2001-01-01 00:00:00").await;
    let later = add_task(&app, "alice", "file taxes", "money,paperwork", "2099-04-15 00:00:00").await;

    let (status, body) = post_json(&app, "/getTasks", json!({ "username": "alice" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tasks"].as_array().unwrap().len(), 2);

    let (status, body) = post_json(&app, "/checkDueTasks", json!({ "username": "alice" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"].as_u64().unwrap(), 1);

    let (status, body) = post_json(&app, "/graph", json!({ "username": "alice" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nodes"].as_array().unwrap().len(), 2);
    assert_eq!(body["links"].as_array().unwrap().len(), 1);
    assert_eq!(body["links"][0]["source"].as_i64().unwrap(), overdue);
    assert_eq!(body["links"][0]["target"].as_i64().unwrap(), later);

    let (status, _) = post_json(&app, "/deleteTask", json!({ "id": overdue })).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post_json(&app, "/checkDueTasks", json!({ "username": "alice" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"].as_u64().unwrap(), 0);

    let (_, body) = post_json(&app, "/getTasks", json!({ "username": "alice" })).await;
    let titles: Vec<&str> = body["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["file taxes"]);
}
