//! Gesture orchestrators for taps, long presses, swipes, keys and text.
//!
//! Every public operation reports success as a boolean rather than an
//! error; only precondition violations come back as `Err`. Correlated
//! variants hand their input sequence to the [`Correlator`] as the action
//! and report whether the requested notifications arrived in time.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use uidrive_common::clock::{StepPacer, UptimeClock};
use uidrive_common::config::InteractionConfig;
use uidrive_common::error::{UidriveError, UidriveResult};
use uidrive_event_model::event::{Coordinate, InputEvent};
use uidrive_event_model::keycode::KEYCODE_POWER;
use uidrive_event_model::notification::{Notification, NotificationKind, NotificationKinds};

use crate::builder::{EventBuilder, TouchSession};
use crate::correlator::{Correlator, NotificationSource};
use crate::device::{DeviceControl, Rotation, RotationCommand};
use crate::injector::{InjectionSink, Injector};
use crate::keymap::{KeyCharacterMap, VirtualKeyboard};
use crate::path;
use crate::predicate::WaitMode;

/// Drives synthesized input into a UI and correlates it with notifications.
///
/// Holds no per-gesture state: touch sessions are local to each call, so
/// one controller can be shared between tasks. Events from concurrent
/// gestures still interleave at the sink.
#[derive(Clone)]
pub struct InteractionController {
    pub(crate) injector: Injector,
    pub(crate) correlator: Correlator,
    device: Arc<dyn DeviceControl>,
    keymap: Arc<dyn KeyCharacterMap>,
    custom_keymap: bool,
    pub(crate) builder: EventBuilder,
    pub(crate) config: InteractionConfig,
    pub(crate) pacer: StepPacer,
}

impl InteractionController {
    pub fn new(
        sink: Arc<dyn InjectionSink>,
        notifications: Arc<dyn NotificationSource>,
        device: Arc<dyn DeviceControl>,
    ) -> Self {
        let clock = UptimeClock::start();
        let config = InteractionConfig::default();
        Self {
            injector: Injector::new(sink),
            correlator: Correlator::new(notifications),
            device,
            keymap: Arc::new(VirtualKeyboard::new(clock.clone())),
            custom_keymap: false,
            builder: EventBuilder::new(clock),
            pacer: StepPacer::new(config.injection_delay()),
            config,
        }
    }

    pub fn with_config(mut self, config: InteractionConfig) -> Self {
        self.pacer = StepPacer::new(config.injection_delay());
        self.config = config;
        self
    }

    pub fn with_keymap(mut self, keymap: Arc<dyn KeyCharacterMap>) -> Self {
        self.keymap = keymap;
        self.custom_keymap = true;
        self
    }

    /// Stamp events from `clock` instead of a clock started at construction.
    ///
    /// The built-in keyboard follows the new clock; a map installed with
    /// [`InteractionController::with_keymap`] is left alone.
    pub fn with_clock(mut self, clock: UptimeClock) -> Self {
        if !self.custom_keymap {
            self.keymap = Arc::new(VirtualKeyboard::new(clock.clone()));
        }
        self.builder = EventBuilder::new(clock);
        self
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn builder(&self) -> &EventBuilder {
        &self.builder
    }

    /// Run `action` while waiting for notifications of `kinds`.
    ///
    /// Use this to correlate operations that do not wait on their own, such
    /// as [`InteractionController::generate_multi_pointer_gesture`].
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
        self.correlator.run_and_wait(action, timeout, mode, kinds).await
    }

    /// Click at `(x, y)` and wait for notifications of `kinds`.
    ///
    /// Returns `true` if the notifications arrived before `timeout`.
    pub async fn click_and_wait_for_events(
        &self,
        x: i32,
        y: i32,
        timeout: Duration,
        mode: WaitMode,
        kinds: NotificationKinds,
    ) -> UidriveResult<bool> {
        tracing::debug!(x, y, ?timeout, ?mode, %kinds, "click_and_wait_for_events");
        let at = Coordinate::new(x, y);
        let notification = self
            .run_and_wait(self.tap(at, self.config.click_duration()), timeout, mode, kinds)
            .await?;
        Ok(notification.is_some())
    }

    pub async fn click_and_wait_for_event(
        &self,
        x: i32,
        y: i32,
        timeout: Duration,
        kind: NotificationKind,
    ) -> UidriveResult<bool> {
        self.click_and_wait_for_events(x, y, timeout, WaitMode::Any, kind.into())
            .await
    }

    /// Click and wait until both a window-state and a window-content change
    /// have been observed.
    pub async fn click_and_wait_for_new_window(
        &self,
        x: i32,
        y: i32,
        timeout: Duration,
    ) -> UidriveResult<bool> {
        self.click_and_wait_for_events(
            x,
            y,
            timeout,
            WaitMode::All,
            NotificationKind::WindowStateChanged | NotificationKind::WindowContentChanged,
        )
        .await
    }

    /// Click at `(x, y)` without waiting for the UI.
    pub async fn click(&self, x: i32, y: i32) -> bool {
        tracing::debug!(x, y, "click");
        self.tap(Coordinate::new(x, y), self.config.click_duration())
            .await
    }

    /// Press and hold at `(x, y)` for the device's long-press threshold.
    pub async fn long_tap(&self, x: i32, y: i32) -> bool {
        tracing::debug!(x, y, "long_tap");
        self.tap(Coordinate::new(x, y), self.device.long_press_timeout())
            .await
    }

    /// Swipe from `(down_x, down_y)` to `(up_x, up_y)` in `steps` steps.
    ///
    /// A rejected step does not stop the swipe: the remaining moves and the
    /// touch-up are still injected, and the result is `false`.
    pub async fn swipe(&self, down_x: i32, down_y: i32, up_x: i32, up_y: i32, steps: u32) -> bool {
        tracing::debug!(down_x, down_y, up_x, up_y, steps, "swipe");
        let start = Coordinate::new(down_x, down_y);
        let end = Coordinate::new(up_x, up_y);

        let (session, mut ok) = self.touch_down(start);
        for point in path::swipe_moves(start, end, steps) {
            ok &= self.touch_move(&session, point);
            tokio::time::sleep(self.pacer.delay()).await;
        }
        ok &= self.touch_up(session, end);
        ok
    }

    /// Swipe through `segments`, `segment_steps` steps per leg.
    ///
    /// Touches down only at the first point and up only at the last.
    pub async fn swipe_path(
        &self,
        segments: &[Coordinate],
        segment_steps: u32,
    ) -> UidriveResult<bool> {
        let (first, last) = match (segments.first(), segments.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => {
                return Err(UidriveError::invalid_argument(
                    "swipe path needs at least one point",
                ))
            }
        };
        tracing::debug!(points = segments.len(), segment_steps, "swipe_path");

        let (session, mut ok) = self.touch_down(first);
        for leg in path::segment_moves(segments, segment_steps) {
            for point in leg {
                ok &= self.touch_move(&session, point);
                tokio::time::sleep(self.pacer.delay()).await;
            }
        }
        ok &= self.touch_up(session, last);
        Ok(ok)
    }

    /// Tap a key. The up event is only injected if the down was accepted.
    pub async fn send_key(&self, key_code: i32, meta_state: i32) -> bool {
        tracing::debug!(key_code, meta_state, "send_key");
        self.key_tap(key_code, meta_state)
    }

    /// Tap a key and wait for one notification of `kind`.
    pub async fn send_key_and_wait_for_event(
        &self,
        key_code: i32,
        meta_state: i32,
        kind: NotificationKind,
        timeout: Duration,
    ) -> UidriveResult<bool> {
        tracing::debug!(key_code, meta_state, ?kind, "send_key_and_wait_for_event");
        let action = async { self.key_tap(key_code, meta_state) };
        let notification = self
            .run_and_wait(action, timeout, WaitMode::Any, kind.into())
            .await?;
        Ok(notification.is_some())
    }

    /// Type `text` through the key character map.
    ///
    /// Each event is re-stamped just before injection; mapped events share
    /// one timestamp and would otherwise go stale while earlier characters
    /// are injected. Stops at the first rejected event.
    pub async fn send_text(&self, text: &str) -> bool {
        tracing::debug!(text, "send_text");
        let Some(events) = self.keymap.chars_to_key_events(text) else {
            tracing::warn!(text, "No key events for text");
            return true;
        };

        for event in events {
            let event = InputEvent::Key(event.restamped(self.builder.now()));
            if !self.injector.inject(&event) {
                return false;
            }
        }
        true
    }

    /// Whether the device is at 0 or 180 degrees.
    pub fn is_natural_rotation(&self) -> UidriveResult<bool> {
        Ok(self.device.rotation()?.is_natural())
    }

    /// Rotate to 270 degrees and hold.
    pub fn set_rotation_right(&self) -> UidriveResult<()> {
        self.device
            .set_rotation(RotationCommand::Freeze(Rotation::Deg270))
    }

    /// Rotate to 90 degrees and hold.
    pub fn set_rotation_left(&self) -> UidriveResult<()> {
        self.device
            .set_rotation(RotationCommand::Freeze(Rotation::Deg90))
    }

    pub fn set_rotation_natural(&self) -> UidriveResult<()> {
        self.device
            .set_rotation(RotationCommand::Freeze(Rotation::Deg0))
    }

    /// Hold the current rotation.
    pub fn freeze_rotation(&self) -> UidriveResult<()> {
        self.device.set_rotation(RotationCommand::FreezeCurrent)
    }

    /// Let the rotation follow the physical orientation again.
    pub fn unfreeze_rotation(&self) -> UidriveResult<()> {
        self.device.set_rotation(RotationCommand::Unfreeze)
    }

    pub fn is_screen_on(&self) -> UidriveResult<bool> {
        self.device.is_screen_on()
    }

    /// Press power if the screen is off. Returns whether it was off.
    pub async fn wake_device(&self) -> UidriveResult<bool> {
        if !self.is_screen_on()? {
            self.send_key(KEYCODE_POWER, 0).await;
            return Ok(true);
        }
        Ok(false)
    }

    /// Press power if the screen is on. Returns whether it was on.
    pub async fn sleep_device(&self) -> UidriveResult<bool> {
        if self.is_screen_on()? {
            self.send_key(KEYCODE_POWER, 0).await;
            return Ok(true);
        }
        Ok(false)
    }

    async fn tap(&self, at: Coordinate, dwell: Duration) -> bool {
        let (session, ok) = self.touch_down(at);
        if !ok {
            return false;
        }
        tokio::time::sleep(dwell).await;
        self.touch_up(session, at)
    }

    fn key_tap(&self, key_code: i32, meta_state: i32) -> bool {
        let (down, up) = self.builder.key_tap(key_code, meta_state);
        self.injector.inject(&down) && self.injector.inject(&up)
    }

    fn touch_down(&self, at: Coordinate) -> (TouchSession, bool) {
        tracing::trace!(x = at.x, y = at.y, "touch down");
        let (session, event) = self.builder.touch_down(at);
        let ok = self.injector.inject(&event);
        (session, ok)
    }

    fn touch_move(&self, session: &TouchSession, at: Coordinate) -> bool {
        tracing::trace!(x = at.x, y = at.y, "touch move");
        self.injector.inject(&self.builder.touch_move(session, at))
    }

    fn touch_up(&self, session: TouchSession, at: Coordinate) -> bool {
        tracing::trace!(x = at.x, y = at.y, "touch up");
        self.injector.inject(&self.builder.touch_up(session, at))
    }
}
