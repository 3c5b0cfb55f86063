//! Explicit login state.
//!
//! The server is stateless, so "being logged in" is purely a client-side
//! fact: a [`Session`] exists after a successful login and is dropped on
//! logout. The [`SessionHandle`] is the single shared source of truth for
//! it; the due-task notifier reads the same handle its owner writes.

use std::sync::Arc;

use tokio::sync::RwLock;

/// A logged-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
}

/// Shared, cloneable handle to the current session (if any).
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionHandle {
    /// Creates a handle with nobody logged in.
    pub fn new() -> Self {
        SessionHandle::default()
    }

    /// Replaces the current session with a fresh login.
    pub async fn log_in(&self, username: impl Into<String>) {
        let mut guard = self.inner.write().await;
        *guard = Some(Session {
            username: username.into(),
        });
    }

    /// Drops the current session.
    pub async fn log_out(&self) {
        let mut guard = self.inner.write().await;
        *guard = None;
    }

    /// Snapshot of the current session.
    pub async fn current(&self) -> Option<Session> {
        self.inner.read().await.clone()
    }

    pub async fn is_logged_in(&self) -> bool {
        self.inner.read().await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn login_logout_roundtrip() {
        let handle = SessionHandle::new();
        assert!(!handle.is_logged_in().await);
        assert_eq!(handle.current().await, None);

        handle.log_in("alice").await;
        assert!(handle.is_logged_in().await);
        assert_eq!(handle.current().await.unwrap().username, "alice");

        handle.log_out().await;
        assert!(!handle.is_logged_in().await);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let handle = SessionHandle::new();
        let other = handle.clone();
        handle.log_in("bob").await;
        assert_eq!(other.current().await.unwrap().username, "bob");
    }
}
