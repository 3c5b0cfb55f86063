//! Core error types for taskflow-core.
//!
//! Uses `thiserror` for structured, matchable error variants covering the
//! pre-submission validation rules. Display messages carry the exact
//! wording shown to the user, so callers can surface them directly.

use thiserror::Error;

/// Validation errors raised before a request is ever sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Username or password missing at signup/login.
    #[error("Please fill in both username and password.")]
    MissingCredentials,

    /// Usernames may not contain spaces.
    #[error("All usernames cannot include spaces, please remove all spaces and try again.")]
    UsernameWhitespace,

    /// Password shorter than the minimum length.
    #[error("Passwords should be at least 3 characters long, please try again.")]
    PasswordTooShort,

    /// Task title or due time missing at creation/update.
    #[error("Title and Due Time is mandatory! Please fill them in before adding task!")]
    MissingTitleOrDue,

    /// Tags string does not match the comma-separated token format.
    #[error("The tags inputted are incorrectly formatted. Tags are composed of numbers, letters, and underscore with commas separating tags. Please try again!")]
    InvalidTagFormat,

    /// More tag tokens than a task may carry.
    #[error("A task can only have a maximum of 3 tags, please try again!")]
    TooManyTags { count: usize },

    /// Timestamp string not in the `YYYY-MM-DD HH:MM:SS` wire format.
    #[error("invalid timestamp '{0}': expected format YYYY-MM-DD HH:MM:SS")]
    InvalidTimestamp(String),

    /// Unparseable UTC offset in configuration.
    #[error("invalid UTC offset '{0}': expected +HH:MM, -HH:MM, or whole hours")]
    InvalidUtcOffset(String),
}
