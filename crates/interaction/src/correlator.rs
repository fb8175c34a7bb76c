//! Correlated waits: run an action while watching the notification stream.
//!
//! The protocol has three phases:
//! 1. subscribe to the notification source,
//! 2. start the action,
//! 3. drain notifications through an [`EventPredicate`] until it is
//!    satisfied or the timeout elapses.
//!
//! Subscribing first means a notification fired the instant the action
//! starts is already buffered for the drain. The action always runs to
//! completion; the timeout bounds only the drain, measured from the moment
//! the action starts.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

use uidrive_common::error::UidriveResult;
use uidrive_event_model::notification::{Notification, NotificationKinds};

use crate::predicate::{EventPredicate, WaitMode};

/// Default buffer of a [`NotificationHub`].
pub const DEFAULT_HUB_CAPACITY: usize = 256;

/// Receiving end of a notification stream.
pub struct Subscription {
    receiver: broadcast::Receiver<Notification>,
}

impl Subscription {
    pub fn new(receiver: broadcast::Receiver<Notification>) -> Self {
        Self { receiver }
    }

    pub async fn recv(&mut self) -> Result<Notification, RecvError> {
        self.receiver.recv().await
    }
}

/// Producer side of the notification stream, as seen by the core.
pub trait NotificationSource: Send + Sync {
    /// Register a new listener. Only notifications published after this
    /// call are delivered to it.
    fn subscribe(&self) -> Subscription;
}

impl<S: NotificationSource + ?Sized> NotificationSource for Arc<S> {
    fn subscribe(&self) -> Subscription {
        (**self).subscribe()
    }
}

/// Broadcast hub that notification producers publish into.
#[derive(Debug, Clone)]
pub struct NotificationHub {
    sender: broadcast::Sender<Notification>,
}

impl NotificationHub {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Deliver `notification` to every current subscriber.
    ///
    /// Returns how many subscribers received it.
    pub fn publish(&self, notification: Notification) -> usize {
        self.sender.send(notification).unwrap_or(0)
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new(DEFAULT_HUB_CAPACITY)
    }
}

impl NotificationSource for NotificationHub {
    fn subscribe(&self) -> Subscription {
        Subscription::new(self.sender.subscribe())
    }
}

/// Why a correlated wait produced no notification.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CorrelationError {
    #[error("timed out after {0:?} waiting for notifications")]
    TimedOut(Duration),

    #[error("notification stream closed")]
    BusClosed,
}

/// Run `action` and wait for notifications satisfying `predicate`.
///
/// Resolves once both the action has finished and the drain has matched,
/// timed out, or failed.
pub async fn execute_and_wait_for<S, F>(
    source: &S,
    action: F,
    mut predicate: EventPredicate,
    timeout: Duration,
) -> Result<Notification, CorrelationError>
where
    S: NotificationSource + ?Sized,
    F: Future,
{
    let mut subscription = source.subscribe();
    let deadline = tokio::time::Instant::now() + timeout;

    let drain = async {
        loop {
            match subscription.recv().await {
                Ok(notification) => {
                    if predicate.observe(notification.kind) {
                        return Ok(notification);
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Notification listener lagged");
                }
                Err(RecvError::Closed) => return Err(CorrelationError::BusClosed),
            }
        }
    };

    let (_, outcome) = tokio::join!(action, tokio::time::timeout_at(deadline, drain));
    match outcome {
        Ok(result) => result,
        Err(_) => Err(CorrelationError::TimedOut(timeout)),
    }
}

/// Runs actions and correlates them with a notification source.
#[derive(Clone)]
pub struct Correlator {
    source: Arc<dyn NotificationSource>,
}

impl Correlator {
    pub fn new(source: Arc<dyn NotificationSource>) -> Self {
        Self { source }
    }

    /// Run `action` and wait up to `timeout` for notifications of `kinds`.
    ///
    /// `Ok(None)` means nothing matched in time, or the stream failed; both
    /// are normal outcomes. An empty `kinds` set is a caller error.
    pub async fn run_and_wait<F>(
        &self,
        action: F,
        timeout: Duration,
        mode: WaitMode,
        kinds: NotificationKinds,
    ) -> UidriveResult<Option<Notification>>
    where
        F: Future,
    {
        let predicate = EventPredicate::new(mode, kinds)?;

        match execute_and_wait_for(self.source.as_ref(), action, predicate, timeout).await {
            Ok(notification) => Ok(Some(notification)),
            Err(CorrelationError::TimedOut(_)) => {
                tracing::warn!(%kinds, ?mode, ?timeout, "Timed out waiting for notifications");
                Ok(None)
            }
            Err(e) => {
                tracing::error!(error = %e, %kinds, "Notification wait failed");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use uidrive_event_model::notification::NotificationKind::*;

    fn hub_correlator() -> (NotificationHub, Correlator) {
        let hub = NotificationHub::default();
        let correlator = Correlator::new(Arc::new(hub.clone()));
        (hub, correlator)
    }

    #[tokio::test]
    async fn test_notification_published_by_action_is_seen() {
        let (hub, correlator) = hub_correlator();
        let action = async {
            hub.publish(Notification::new(ViewClicked));
        };

        let result = correlator
            .run_and_wait(
                action,
                Duration::from_millis(200),
                WaitMode::Any,
                ViewClicked.into(),
            )
            .await
            .unwrap();
        assert_eq!(result.map(|n| n.kind), Some(ViewClicked));
    }

    #[tokio::test]
    async fn test_all_mode_returns_completing_notification() {
        let (hub, correlator) = hub_correlator();
        let action = async {
            hub.publish(Notification::new(WindowContentChanged));
            hub.publish(Notification::new(Announcement));
            hub.publish(Notification::new(WindowContentChanged));
            hub.publish(Notification::new(WindowStateChanged).with_event_time(42));
        };

        let result = correlator
            .run_and_wait(
                action,
                Duration::from_millis(200),
                WaitMode::All,
                WindowStateChanged | WindowContentChanged,
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(result.kind, WindowStateChanged);
        assert_eq!(result.event_time, 42);
    }

    #[tokio::test]
    async fn test_timeout_yields_none_and_action_completes() {
        let (hub, correlator) = hub_correlator();
        let finished = AtomicBool::new(false);
        let action = async {
            hub.publish(Notification::new(ViewFocused));
            tokio::time::sleep(Duration::from_millis(60)).await;
            finished.store(true, Ordering::SeqCst);
        };

        let result = correlator
            .run_and_wait(
                action,
                Duration::from_millis(20),
                WaitMode::Any,
                ViewScrolled.into(),
            )
            .await
            .unwrap();
        assert!(result.is_none());
        assert!(finished.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_empty_kinds_fail_fast() {
        let (_hub, correlator) = hub_correlator();
        let ran = AtomicBool::new(false);
        let err = correlator
            .run_and_wait(
                async { ran.store(true, Ordering::SeqCst) },
                Duration::from_millis(10),
                WaitMode::Any,
                NotificationKinds::empty(),
            )
            .await
            .unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(!ran.load(Ordering::SeqCst));
    }

    struct ClosedSource;

    impl NotificationSource for ClosedSource {
        fn subscribe(&self) -> Subscription {
            let (sender, receiver) = broadcast::channel(1);
            drop(sender);
            Subscription::new(receiver)
        }
    }

    #[tokio::test]
    async fn test_closed_stream_is_reported_then_downgraded() {
        let outcome = execute_and_wait_for(
            &ClosedSource,
            async {},
            EventPredicate::any(ViewClicked).unwrap(),
            Duration::from_millis(50),
        )
        .await;
        assert_eq!(outcome, Err(CorrelationError::BusClosed));

        let correlator = Correlator::new(Arc::new(ClosedSource));
        let result = correlator
            .run_and_wait(
                async {},
                Duration::from_millis(50),
                WaitMode::Any,
                ViewClicked.into(),
            )
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_notifications_before_subscription_are_not_seen() {
        let (hub, correlator) = hub_correlator();
        assert_eq!(hub.publish(Notification::new(ViewClicked)), 0);

        let result = correlator
            .run_and_wait(
                async {},
                Duration::from_millis(20),
                WaitMode::Any,
                ViewClicked.into(),
            )
            .await
            .unwrap();
        assert!(result.is_none());
        assert_eq!(hub.subscriber_count(), 0);
    }
}
