use std::sync::Arc;
use std::time::Duration;

use uidrive_common::config::InteractionConfig;
use uidrive_event_model::event::{InputEvent, MotionActionKind};
use uidrive_event_model::notification::{
    Notification, NotificationKind, NotificationKinds, ScrollPayload,
};
use uidrive_interaction::{
    InjectionSink, InteractionController, MemorySink, NotificationHub, SimulatedDevice, WaitMode,
};

/// Sink that reacts to every accepted touch-up by publishing notifications,
/// like a UI settling after a tap.
struct ReactiveSink {
    events: MemorySink,
    hub: Arc<NotificationHub>,
    on_up: Vec<Notification>,
}

impl ReactiveSink {
    fn new(hub: Arc<NotificationHub>, on_up: Vec<Notification>) -> Self {
        Self {
            events: MemorySink::new(),
            hub,
            on_up,
        }
    }
}

impl InjectionSink for ReactiveSink {
    fn inject(&self, event: &InputEvent) -> bool {
        let accepted = self.events.inject(event);
        let is_up = event
            .as_motion()
            .map(|m| m.action.kind == MotionActionKind::Up)
            .unwrap_or(false);
        if accepted && is_up {
            for notification in &self.on_up {
                self.hub.publish(notification.clone());
            }
        }
        accepted
    }

    fn name(&self) -> &str {
        "reactive"
    }
}

fn controller(hub: Arc<NotificationHub>, on_up: Vec<Notification>) -> InteractionController {
    let sink = Arc::new(ReactiveSink::new(hub.clone(), on_up));
    InteractionController::new(sink, hub, Arc::new(SimulatedDevice::default())).with_config(
        InteractionConfig {
            click_duration_ms: 1,
            injection_delay_ms: 0,
            scroll_event_timeout_ms: 200,
            ..InteractionConfig::default()
        },
    )
}

#[tokio::test]
async fn click_waits_for_new_window() {
    let hub = Arc::new(NotificationHub::default());
    let controller = controller(
        hub,
        vec![
            Notification::new(NotificationKind::WindowContentChanged),
            Notification::new(NotificationKind::ViewClicked),
            Notification::new(NotificationKind::WindowStateChanged),
        ],
    );

    let opened = controller
        .click_and_wait_for_new_window(100, 200, Duration::from_secs(2))
        .await
        .unwrap();
    assert!(opened);
}

#[tokio::test]
async fn click_without_new_window_times_out() {
    let hub = Arc::new(NotificationHub::default());
    let controller = controller(
        hub,
        vec![Notification::new(NotificationKind::WindowContentChanged)],
    );

    let started = std::time::Instant::now();
    let opened = controller
        .click_and_wait_for_new_window(100, 200, Duration::from_millis(50))
        .await
        .unwrap();
    assert!(!opened);
    assert!(started.elapsed() >= Duration::from_millis(50));
}

#[tokio::test]
async fn click_with_any_of_several_kinds() {
    let hub = Arc::new(NotificationHub::default());
    let controller = controller(hub, vec![Notification::new(NotificationKind::ViewSelected)]);

    let seen = controller
        .click_and_wait_for_events(
            1,
            1,
            Duration::from_secs(2),
            WaitMode::Any,
            NotificationKind::ViewClicked | NotificationKind::ViewSelected,
        )
        .await
        .unwrap();
    assert!(seen);
}

#[tokio::test]
async fn empty_kind_set_is_rejected() {
    let hub = Arc::new(NotificationHub::default());
    let controller = controller(hub, Vec::new());

    let err = controller
        .click_and_wait_for_events(
            1,
            1,
            Duration::from_millis(10),
            WaitMode::All,
            NotificationKinds::empty(),
        )
        .await
        .unwrap_err();
    assert!(err.is_invalid_argument());
}

#[tokio::test]
async fn scroll_swipe_reports_more_content() {
    let hub = Arc::new(NotificationHub::default());
    let controller = controller(
        hub,
        vec![Notification::scrolled(ScrollPayload::indexed(3, 6, 10))],
    );
    assert!(controller.scroll_swipe(300, 900, 300, 300, 10).await);
}

#[tokio::test]
async fn scroll_swipe_detects_end_of_list() {
    let hub = Arc::new(NotificationHub::default());
    let controller = controller(
        hub,
        vec![Notification::scrolled(ScrollPayload::indexed(5, 9, 10))],
    );
    assert!(!controller.scroll_swipe(300, 900, 300, 300, 10).await);
}

#[tokio::test]
async fn scroll_swipe_without_scroll_is_false() {
    let hub = Arc::new(NotificationHub::default());
    let controller = controller(hub, Vec::new());
    assert!(!controller.scroll_swipe(300, 900, 300, 300, 10).await);
}

#[tokio::test]
async fn gesture_can_be_correlated_explicitly() {
    use uidrive_event_model::event::Coordinate;

    let hub = Arc::new(NotificationHub::default());
    let controller = controller(
        hub,
        vec![Notification::new(NotificationKind::WindowContentChanged)],
    );
    let left = vec![Coordinate::new(400, 400), Coordinate::new(300, 400)];
    let right = vec![Coordinate::new(600, 400), Coordinate::new(700, 400)];
    let paths = [left, right];

    let notification = controller
        .run_and_wait(
            controller.generate_multi_pointer_gesture(&paths),
            Duration::from_secs(2),
            WaitMode::Any,
            NotificationKind::WindowContentChanged.into(),
        )
        .await
        .unwrap();
    assert_eq!(
        notification.map(|n| n.kind),
        Some(NotificationKind::WindowContentChanged)
    );
}
