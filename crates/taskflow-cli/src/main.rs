//! Task manager command-line interface.
//!
//! Talks to a running server (see `--server`, default
//! `http://localhost:3001`). Input checks run locally before anything is
//! sent: username/password rules, tag format, and timestamp format.
//!
//! Exit codes: 0 on success, 1 when the request never completed, 2 when
//! input was rejected locally, 3 when the server rejected the request.

use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use taskflow_client::{
    ApiClient, ClientError, DueTaskNotifier, NewTaskForm, NotificationSink, NotifyPolicy,
    SessionHandle, TaskUpdateForm,
};
use taskflow_core::{
    extract_tags, parse_utc_offset, password_hash_hex, validate_password, validate_username,
    Task, TaskId, TaskStatus, Timestamp, ValidationError, DEFAULT_UTC_OFFSET,
};

#[derive(Parser)]
#[command(
    name = "taskflow",
    about = "Personal task manager: accounts, tasks, tag graphs, due-task alerts",
    version
)]
struct Cli {
    /// Server base URL.
    #[arg(long, global = true, default_value = "http://localhost:3001")]
    server: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an account.
    Signup { username: String, password: String },
    /// Check credentials against the server.
    Login { username: String, password: String },
    /// List a user's tasks, soonest due first.
    List { username: String },
    /// Show one task as JSON.
    Show { id: i64 },
    /// Add a task.
    Add {
        username: String,
        title: String,
        /// Due time, `YYYY-MM-DD HH:MM` or `YYYY-MM-DD HH:MM:SS`.
        #[arg(long)]
        due: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Comma-separated tags (letters, digits, underscore; at most 3).
        #[arg(long, default_value = "")]
        tags: String,
    },
    /// Replace a task's title, description, tags, and due time.
    Update {
        id: i64,
        title: String,
        /// Due time, `YYYY-MM-DD HH:MM` or `YYYY-MM-DD HH:MM:SS`.
        #[arg(long)]
        due: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Comma-separated tags (letters, digits, underscore; at most 3).
        #[arg(long, default_value = "")]
        tags: String,
    },
    /// Delete a task.
    Delete { id: i64 },
    /// Print a user's tag graph as JSON.
    Graph { username: String },
    /// Log in and announce due tasks on a fixed schedule until interrupted.
    Watch {
        username: String,
        password: String,
        /// Re-announce every poll, or once until the count returns to zero.
        #[arg(long, value_enum, default_value_t = PolicyArg::EveryTick)]
        policy: PolicyArg,
        /// Seconds between checks.
        #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
        interval: u64,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    EveryTick,
    OnceUntilClear,
}

impl From<PolicyArg> for NotifyPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::EveryTick => NotifyPolicy::EveryTick,
            PolicyArg::OnceUntilClear => NotifyPolicy::OnceUntilClear,
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let client = match ApiClient::new(&cli.server) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(1);
        }
    };

    let exit_code = match cli.command {
        Command::Signup { username, password } => run_signup(&client, &username, &password).await,
        Command::Login { username, password } => run_login(&client, &username, &password).await,
        Command::List { username } => run_list(&client, &username).await,
        Command::Show { id } => run_show(&client, id).await,
        Command::Add {
            username,
            title,
            due,
            description,
            tags,
        } => run_add(&client, &username, &title, &due, &description, &tags).await,
        Command::Update {
            id,
            title,
            due,
            description,
            tags,
        } => run_update(&client, id, &title, &due, &description, &tags).await,
        Command::Delete { id } => run_delete(&client, id).await,
        Command::Graph { username } => run_graph(&client, &username).await,
        Command::Watch {
            username,
            password,
            policy,
            interval,
        } => run_watch(client, &username, &password, policy.into(), interval).await,
    };
    std::process::exit(exit_code);
}

/// Validates credentials locally and returns the password hash, or the
/// exit code to bail with.
fn credentials_hash(username: &str, password: &str) -> Result<String, i32> {
    if let Err(err) = validate_username(username) {
        eprintln!("{}", err);
        return Err(2);
    }
    if let Err(err) = validate_password(password) {
        eprintln!("{}", err);
        return Err(2);
    }
    Ok(password_hash_hex(password))
}

/// Title and due time may not be blank, even though clap accepts `""`.
fn require_title_and_due(title: &str, due: &str) -> Result<(), i32> {
    if title.trim().is_empty() || due.trim().is_empty() {
        eprintln!("{}", ValidationError::MissingTitleOrDue);
        return Err(2);
    }
    Ok(())
}

/// Checks tag format and count locally before any request goes out.
fn checked_tags(tags: &str) -> Result<String, i32> {
    match extract_tags(tags) {
        Ok(_) => Ok(tags.to_string()),
        Err(err) => {
            eprintln!("{}", err);
            Err(2)
        }
    }
}

/// Accepts `YYYY-MM-DD HH:MM` or `YYYY-MM-DD HH:MM:SS`, returns the full
/// wire format.
fn normalize_timestamp(raw: &str) -> Result<String, i32> {
    if let Ok(ts) = raw.parse::<Timestamp>() {
        return Ok(ts.to_string());
    }
    match format!("{}:00", raw).parse::<Timestamp>() {
        Ok(ts) => Ok(ts.to_string()),
        Err(err) => {
            eprintln!("{}", err);
            Err(2)
        }
    }
}

/// Current wall-clock time in the configured offset, as a wire string.
fn creation_time_now() -> Result<String, i32> {
    let raw =
        std::env::var("TASKFLOW_UTC_OFFSET").unwrap_or_else(|_| DEFAULT_UTC_OFFSET.to_string());
    match parse_utc_offset(&raw) {
        Ok(offset) => Ok(Timestamp::now_with_offset(offset).to_string()),
        Err(err) => {
            eprintln!("{}", err);
            Err(2)
        }
    }
}

fn report_client_error(err: ClientError) -> i32 {
    match err {
        ClientError::Api { message, .. } => {
            eprintln!("server error: {}", message);
            3
        }
        other => {
            eprintln!("error: {}", other);
            1
        }
    }
}

async fn run_signup(client: &ApiClient, username: &str, password: &str) -> i32 {
    let hash = match credentials_hash(username, password) {
        Ok(hash) => hash,
        Err(code) => return code,
    };
    match client.signup(username, &hash).await {
        Ok(message) => {
            println!("{}", message);
            0
        }
        Err(err) => report_client_error(err),
    }
}

async fn run_login(client: &ApiClient, username: &str, password: &str) -> i32 {
    let hash = match credentials_hash(username, password) {
        Ok(hash) => hash,
        Err(code) => return code,
    };
    match client.login(username, &hash).await {
        Ok(message) => {
            println!("{}", message);
            0
        }
        Err(err) => report_client_error(err),
    }
}

fn status_label(task: &Task) -> &'static str {
    match task.status {
        TaskStatus::Incomplete => "incomplete",
        TaskStatus::Done => "done",
    }
}

async fn run_list(client: &ApiClient, username: &str) -> i32 {
    match client.tasks(username).await {
        Ok(tasks) => {
            if tasks.is_empty() {
                println!("No tasks for {}.", username);
                return 0;
            }
            println!(
                "{:<6} {:<20} {:<30} {:<20} {}",
                "ID", "DUE", "TITLE", "TAGS", "STATUS"
            );
            for task in &tasks {
                println!(
                    "{:<6} {:<20} {:<30} {:<20} {}",
                    task.id.to_string(),
                    task.due_time.to_string(),
                    task.title,
                    task.tags,
                    status_label(task)
                );
            }
            0
        }
        Err(err) => report_client_error(err),
    }
}

async fn run_show(client: &ApiClient, id: i64) -> i32 {
    match client.task(TaskId(id)).await {
        Ok(task) => match serde_json::to_string_pretty(&task) {
            Ok(json) => {
                println!("{}", json);
                0
            }
            Err(err) => {
                eprintln!("error: {}", err);
                1
            }
        },
        Err(err) => report_client_error(err),
    }
}

async fn run_add(
    client: &ApiClient,
    username: &str,
    title: &str,
    due: &str,
    description: &str,
    tags: &str,
) -> i32 {
    if let Err(code) = require_title_and_due(title, due) {
        return code;
    }
    let tags = match checked_tags(tags) {
        Ok(tags) => tags,
        Err(code) => return code,
    };
    let due_time = match normalize_timestamp(due) {
        Ok(due) => due,
        Err(code) => return code,
    };
    let creation_time = match creation_time_now() {
        Ok(now) => now,
        Err(code) => return code,
    };
    let form = NewTaskForm {
        title: title.to_string(),
        description: description.to_string(),
        tags,
        creation_time,
        due_time,
        username: username.to_string(),
    };
    match client.add_task(&form).await {
        Ok(message) => {
            println!("{}", message);
            0
        }
        Err(err) => report_client_error(err),
    }
}

async fn run_update(
    client: &ApiClient,
    id: i64,
    title: &str,
    due: &str,
    description: &str,
    tags: &str,
) -> i32 {
    if let Err(code) = require_title_and_due(title, due) {
        return code;
    }
    let tags = match checked_tags(tags) {
        Ok(tags) => tags,
        Err(code) => return code,
    };
    let due_time = match normalize_timestamp(due) {
        Ok(due) => due,
        Err(code) => return code,
    };
    let form = TaskUpdateForm {
        id,
        title: title.to_string(),
        description: description.to_string(),
        tags,
        due_time,
    };
    match client.update_task(&form).await {
        Ok(message) => {
            println!("{}", message);
            0
        }
        Err(err) => report_client_error(err),
    }
}

async fn run_delete(client: &ApiClient, id: i64) -> i32 {
    match client.delete_task(TaskId(id)).await {
        Ok(message) => {
            println!("{}", message);
            0
        }
        Err(err) => report_client_error(err),
    }
}

async fn run_graph(client: &ApiClient, username: &str) -> i32 {
    match client.graph(username).await {
        Ok(graph) => match serde_json::to_string_pretty(&graph) {
            Ok(json) => {
                println!("{}", json);
                0
            }
            Err(err) => {
                eprintln!("error: {}", err);
                1
            }
        },
        Err(err) => report_client_error(err),
    }
}

/// Prints notifications to the terminal.
struct StdoutSink;

impl NotificationSink for StdoutSink {
    fn notify(&self, title: &str, body: &str) {
        println!("{} {}", title, body);
    }
}

async fn run_watch(
    client: ApiClient,
    username: &str,
    password: &str,
    policy: NotifyPolicy,
    interval_secs: u64,
) -> i32 {
    let hash = match credentials_hash(username, password) {
        Ok(hash) => hash,
        Err(code) => return code,
    };
    match client.login(username, &hash).await {
        Ok(message) => println!("{}", message),
        Err(err) => return report_client_error(err),
    }

    let session = SessionHandle::new();
    session.log_in(username).await;
    let notifier = DueTaskNotifier::new(client, StdoutSink, session)
        .with_policy(policy)
        .with_interval(Duration::from_secs(interval_secs));

    println!(
        "Checking for due tasks every {} seconds. Press Ctrl-C to stop.",
        interval_secs
    );
    notifier.run().await;
    0
}
