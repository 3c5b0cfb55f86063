//! Background due-task notifier.
//!
//! Polls the server on a fixed schedule (once a minute by default) for the
//! logged-in user's past-due count and raises a notification when it is
//! positive. Nobody logged in means no request at all. A failed poll is
//! logged and swallowed so the next tick still runs on schedule.

use std::future::Future;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::error::ClientError;
use crate::session::SessionHandle;

/// How often the notifier polls.
pub const POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Title line for due-task notifications.
pub const NOTIFICATION_TITLE: &str = "Task(s) Due!";

/// Where the notifier gets its due count.
///
/// Implemented by [`crate::ApiClient`]; tests substitute scripted sources.
pub trait DueTaskSource {
    fn due_count(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<u64, ClientError>> + Send;
}

/// Delivery target for notifications.
pub trait NotificationSink {
    fn notify(&self, title: &str, body: &str);
}

/// Sink that writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&self, title: &str, body: &str) {
        tracing::info!(title, body, "notification");
    }
}

/// When to re-announce a count that stays positive across polls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotifyPolicy {
    /// Announce on every poll that sees a positive count.
    #[default]
    EveryTick,
    /// Announce once, then stay quiet until the count returns to zero.
    OnceUntilClear,
}

/// Periodic poller that turns positive due counts into notifications.
pub struct DueTaskNotifier<S, N> {
    source: S,
    sink: N,
    session: SessionHandle,
    policy: NotifyPolicy,
    interval: Duration,
    announced: bool,
}

impl<S: DueTaskSource, N: NotificationSink> DueTaskNotifier<S, N> {
    pub fn new(source: S, sink: N, session: SessionHandle) -> Self {
        DueTaskNotifier {
            source,
            sink,
            session,
            policy: NotifyPolicy::default(),
            interval: POLL_INTERVAL,
            announced: false,
        }
    }

    pub fn with_policy(mut self, policy: NotifyPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Runs one poll.
    ///
    /// A zero count clears the announced flag so `OnceUntilClear` can fire
    /// again after the backlog empties.
    pub async fn run_tick(&mut self) {
        let Some(session) = self.session.current().await else {
            return;
        };
        match self.source.due_count(&session.username).await {
            Ok(0) => self.announced = false,
            Ok(count) => {
                if self.policy == NotifyPolicy::OnceUntilClear && self.announced {
                    return;
                }
                let body = format!("You have {} tasks due as of now!", count);
                self.sink.notify(NOTIFICATION_TITLE, &body);
                self.announced = true;
            }
            Err(err) => {
                tracing::warn!(error = %err, "due-task check failed");
            }
        }
    }

    /// Polls forever at the configured interval (default [`POLL_INTERVAL`]).
    ///
    /// Ticks are serialized: a poll that outlives the interval delays the
    /// next tick instead of letting a second poll start underneath it.
    pub async fn run(mut self) {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            self.run_tick().await;
        }
    }
}
