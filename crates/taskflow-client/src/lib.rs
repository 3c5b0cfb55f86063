//! Client-side pieces of the task manager: the typed API client, the
//! explicit login session, and the background due-task notifier.
//!
//! The server keeps no login state, so the session lives here. The
//! notifier reads the same [`SessionHandle`] its owner writes and polls
//! the server while someone is logged in, once a minute by default.

pub mod api;
pub mod error;
pub mod notify;
pub mod session;

pub use api::{ApiClient, NewTaskForm, TaskUpdateForm, REQUEST_TIMEOUT};
pub use error::ClientError;
pub use notify::{
    DueTaskNotifier, DueTaskSource, LogSink, NotificationSink, NotifyPolicy, NOTIFICATION_TITLE,
    POLL_INTERVAL,
};
pub use session::{Session, SessionHandle};
