pub mod auth;
pub mod error;
pub mod graph;
pub mod id;
pub mod status;
pub mod tags;
pub mod task;
pub mod time;

// Re-export commonly used types
pub use auth::{password_hash_hex, validate_password, validate_username, MIN_PASSWORD_LEN};
pub use error::ValidationError;
pub use graph::{GraphLink, GraphNode, GraphView, TagGraph};
pub use id::TaskId;
pub use status::TaskStatus;
pub use tags::{extract_tags, is_valid_tag_format, TagList, MAX_TAGS};
pub use task::Task;
pub use time::{parse_utc_offset, Timestamp, DEFAULT_UTC_OFFSET, TIMESTAMP_FORMAT};
