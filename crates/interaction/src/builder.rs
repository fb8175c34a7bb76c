//! Input event construction.
//!
//! Session state lives in explicit values: a [`TouchSession`] is created by
//! a touch-down and must be handed back for every move and the final up,
//! and a [`MultiTouchSession`] carries the shared down time and pointer
//! identities of one multi-pointer gesture. The builder itself holds no
//! mutable state and never performs I/O.

use uidrive_common::clock::{UptimeClock, UptimeMs};
use uidrive_event_model::event::{
    Coordinate, InputEvent, InputSource, KeyAction, KeyEvent, MotionAction, MotionActionKind,
    MotionEvent, Pointer, PointerProperties,
};

/// A single-pointer touch in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TouchSession {
    down_time: UptimeMs,
}

impl TouchSession {
    pub fn down_time(&self) -> UptimeMs {
        self.down_time
    }
}

/// A multi-pointer gesture in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiTouchSession {
    down_time: UptimeMs,
    properties: Vec<PointerProperties>,
}

impl MultiTouchSession {
    pub fn down_time(&self) -> UptimeMs {
        self.down_time
    }

    pub fn pointer_count(&self) -> usize {
        self.properties.len()
    }

    fn pointers(&self, coords: &[Coordinate], count: usize) -> Vec<Pointer> {
        self.properties
            .iter()
            .zip(coords)
            .take(count)
            .map(|(properties, coords)| Pointer {
                properties: *properties,
                coords: *coords,
            })
            .collect()
    }
}

/// Builds well-formed touch and key events stamped from an uptime clock.
#[derive(Debug, Clone, Default)]
pub struct EventBuilder {
    clock: UptimeClock,
}

impl EventBuilder {
    pub fn new(clock: UptimeClock) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &UptimeClock {
        &self.clock
    }

    pub fn now(&self) -> UptimeMs {
        self.clock.uptime_ms()
    }

    /// Start a touch at `at`. The returned session fixes the down time.
    pub fn touch_down(&self, at: Coordinate) -> (TouchSession, InputEvent) {
        let down_time = self.now();
        let session = TouchSession { down_time };
        let event = single_pointer(down_time, down_time, MotionActionKind::Down, at);
        (session, event)
    }

    pub fn touch_move(&self, session: &TouchSession, at: Coordinate) -> InputEvent {
        single_pointer(session.down_time, self.now(), MotionActionKind::Move, at)
    }

    /// End a touch. Consumes the session.
    pub fn touch_up(&self, session: TouchSession, at: Coordinate) -> InputEvent {
        single_pointer(session.down_time, self.now(), MotionActionKind::Up, at)
    }

    /// Start a gesture with `pointer_count` fingers, identified 0..N-1.
    pub fn multi_touch(&self, pointer_count: usize) -> MultiTouchSession {
        MultiTouchSession {
            down_time: self.now(),
            properties: (0..pointer_count as u32)
                .map(PointerProperties::finger)
                .collect(),
        }
    }

    /// First pointer of a multi-pointer gesture goes down.
    pub fn primary_down(&self, session: &MultiTouchSession, coords: &[Coordinate]) -> InputEvent {
        self.multi_event(session, MotionAction::new(MotionActionKind::Down), coords, 1)
    }

    /// Pointer `index` (>= 1) goes down. Carries pointers `0..=index`.
    pub fn pointer_down(
        &self,
        session: &MultiTouchSession,
        index: usize,
        coords: &[Coordinate],
    ) -> InputEvent {
        let action = MotionAction::for_pointer(MotionActionKind::PointerDown, index as u32);
        self.multi_event(session, action, coords, index + 1)
    }

    /// All pointers move at once.
    pub fn multi_move(&self, session: &MultiTouchSession, coords: &[Coordinate]) -> InputEvent {
        let action = MotionAction::new(MotionActionKind::Move);
        self.multi_event(session, action, coords, session.pointer_count())
    }

    /// Pointer `index` (>= 1) lifts. Carries every pointer of the gesture.
    pub fn pointer_up(
        &self,
        session: &MultiTouchSession,
        index: usize,
        coords: &[Coordinate],
    ) -> InputEvent {
        let action = MotionAction::for_pointer(MotionActionKind::PointerUp, index as u32);
        self.multi_event(session, action, coords, session.pointer_count())
    }

    /// The first pointer, last one still down, lifts and ends the gesture.
    pub fn primary_up(&self, session: MultiTouchSession, coords: &[Coordinate]) -> InputEvent {
        self.multi_event(&session, MotionAction::new(MotionActionKind::Up), coords, 1)
    }

    fn multi_event(
        &self,
        session: &MultiTouchSession,
        action: MotionAction,
        coords: &[Coordinate],
        count: usize,
    ) -> InputEvent {
        InputEvent::Motion(MotionEvent {
            down_time: session.down_time,
            event_time: self.now(),
            action,
            pointers: session.pointers(coords, count),
            source: InputSource::Touchscreen,
        })
    }

    /// Down and up events of a single key tap, sharing one timestamp.
    pub fn key_tap(&self, key_code: i32, meta_state: i32) -> (InputEvent, InputEvent) {
        let now = self.now();
        (
            InputEvent::Key(key_event(now, KeyAction::Down, key_code, meta_state)),
            InputEvent::Key(key_event(now, KeyAction::Up, key_code, meta_state)),
        )
    }

    /// A standalone key event stamped now.
    pub fn key(&self, action: KeyAction, key_code: i32, meta_state: i32) -> KeyEvent {
        key_event(self.now(), action, key_code, meta_state)
    }
}

fn single_pointer(
    down_time: UptimeMs,
    event_time: UptimeMs,
    kind: MotionActionKind,
    at: Coordinate,
) -> InputEvent {
    InputEvent::Motion(MotionEvent {
        down_time,
        event_time,
        action: MotionAction::new(kind),
        pointers: vec![Pointer {
            properties: PointerProperties::finger(0),
            coords: at,
        }],
        source: InputSource::Touchscreen,
    })
}

pub(crate) fn key_event(
    time: UptimeMs,
    action: KeyAction,
    key_code: i32,
    meta_state: i32,
) -> KeyEvent {
    KeyEvent {
        down_time: time,
        event_time: time,
        action,
        key_code,
        repeat: 0,
        meta_state,
        source: InputSource::Keyboard,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: i32, y: i32) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn test_touch_session_reuses_down_time() {
        let builder = EventBuilder::default();
        let (session, down) = builder.touch_down(c(5, 5));
        let down_time = session.down_time();
        std::thread::sleep(std::time::Duration::from_millis(3));
        let moved = builder.touch_move(&session, c(6, 6));
        let up = builder.touch_up(session, c(7, 7));

        for event in [&down, &moved, &up] {
            let motion = event.as_motion().unwrap();
            assert_eq!(motion.down_time, down_time);
            assert_eq!(motion.pointer_count(), 1);
            assert_eq!(motion.source, InputSource::Touchscreen);
        }
        assert!(up.event_time() > down_time);
        assert_eq!(up.as_motion().unwrap().action.kind, MotionActionKind::Up);
        assert_eq!(moved.as_motion().unwrap().primary_position(), Some(c(6, 6)));
    }

    #[test]
    fn test_pointer_down_carries_active_pointers() {
        let builder = EventBuilder::default();
        let session = builder.multi_touch(3);
        let coords = [c(0, 0), c(10, 10), c(20, 20)];

        let first = builder.primary_down(&session, &coords);
        let second = builder.pointer_down(&session, 2, &coords);
        let first = first.as_motion().unwrap();
        let second = second.as_motion().unwrap();

        assert_eq!(first.pointer_count(), 1);
        assert_eq!(second.pointer_count(), 3);
        assert_eq!(second.action.encoded(), 0x205);
        assert_eq!(second.pointers[2].properties.id, 2);
        assert_eq!(second.pointers[2].coords, c(20, 20));
        assert_eq!(first.down_time, second.down_time);
    }

    #[test]
    fn test_pointer_up_carries_all_pointers() {
        let builder = EventBuilder::default();
        let session = builder.multi_touch(2);
        let coords = [c(1, 1), c(2, 2)];
        let up = builder.pointer_up(&session, 1, &coords);
        let up = up.as_motion().unwrap();
        assert_eq!(up.pointer_count(), 2);
        assert_eq!(up.action.encoded(), 0x106);

        let last = builder.primary_up(session, &coords);
        let last = last.as_motion().unwrap();
        assert_eq!(last.pointer_count(), 1);
        assert_eq!(last.action.encoded(), 1);
    }

    #[test]
    fn test_key_tap_shares_timestamp() {
        let builder = EventBuilder::default();
        let (down, up) = builder.key_tap(66, 0x41);
        let down = down.as_key().unwrap();
        let up = up.as_key().unwrap();
        assert_eq!(down.action, KeyAction::Down);
        assert_eq!(up.action, KeyAction::Up);
        assert_eq!(down.down_time, down.event_time);
        assert_eq!(down.event_time, up.event_time);
        assert_eq!(up.meta_state, 0x41);
        assert_eq!(up.repeat, 0);
        assert_eq!(up.source, InputSource::Keyboard);
    }
}
