//! Synthesized input event types.
//!
//! Events serialize to one JSON object per line (JSONL) so an injected
//! sequence can be recorded and inspected after a test run.

use serde::{Deserialize, Serialize};
use uidrive_common::clock::UptimeMs;

/// Bit offset of the pointer index inside an encoded pointer action.
pub const ACTION_POINTER_INDEX_SHIFT: u32 = 8;

/// Mask selecting the base action from an encoded action.
pub const ACTION_MASK: i32 = 0xff;

/// An integer point in device pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Device class an event claims to originate from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSource {
    Touchscreen,
    Keyboard,
}

impl InputSource {
    /// Numeric source tag used by the input stack.
    pub fn code(self) -> u32 {
        match self {
            InputSource::Touchscreen => 0x0000_1002,
            InputSource::Keyboard => 0x0000_0101,
        }
    }
}

/// Tool that produced a pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolType {
    #[default]
    Finger,
}

/// Stable identity of one pointer for the duration of a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointerProperties {
    pub id: u32,
    pub tool_type: ToolType,
}

impl PointerProperties {
    pub fn finger(id: u32) -> Self {
        Self {
            id,
            tool_type: ToolType::Finger,
        }
    }
}

/// One pointer's identity and position inside a motion event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pointer {
    #[serde(flatten)]
    pub properties: PointerProperties,
    #[serde(flatten)]
    pub coords: Coordinate,
}

/// Base kind of a motion action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionActionKind {
    Down,
    Up,
    Move,
    PointerDown,
    PointerUp,
}

impl MotionActionKind {
    pub fn code(self) -> i32 {
        match self {
            MotionActionKind::Down => 0,
            MotionActionKind::Up => 1,
            MotionActionKind::Move => 2,
            MotionActionKind::PointerDown => 5,
            MotionActionKind::PointerUp => 6,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(MotionActionKind::Down),
            1 => Some(MotionActionKind::Up),
            2 => Some(MotionActionKind::Move),
            5 => Some(MotionActionKind::PointerDown),
            6 => Some(MotionActionKind::PointerUp),
            _ => None,
        }
    }
}

/// A motion action, optionally naming the pointer index that triggered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MotionAction {
    pub kind: MotionActionKind,
    #[serde(default)]
    pub pointer_index: u32,
}

impl MotionAction {
    pub fn new(kind: MotionActionKind) -> Self {
        Self {
            kind,
            pointer_index: 0,
        }
    }

    /// A pointer-specific action for `index`.
    pub fn for_pointer(kind: MotionActionKind, index: u32) -> Self {
        Self {
            kind,
            pointer_index: index,
        }
    }

    /// Action code with the pointer index shifted into its reserved bits.
    pub fn encoded(&self) -> i32 {
        self.kind.code() + ((self.pointer_index as i32) << ACTION_POINTER_INDEX_SHIFT)
    }

    /// Inverse of [`MotionAction::encoded`].
    pub fn decode(encoded: i32) -> Option<Self> {
        let kind = MotionActionKind::from_code(encoded & ACTION_MASK)?;
        Some(Self {
            kind,
            pointer_index: (encoded >> ACTION_POINTER_INDEX_SHIFT) as u32,
        })
    }
}

/// A touch event carrying every pointer that is currently down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotionEvent {
    /// Time the gesture's first pointer went down.
    pub down_time: UptimeMs,
    /// Time of this event.
    pub event_time: UptimeMs,
    pub action: MotionAction,
    pub pointers: Vec<Pointer>,
    pub source: InputSource,
}

impl MotionEvent {
    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// Position of the first pointer.
    pub fn primary_position(&self) -> Option<Coordinate> {
        self.pointers.first().map(|p| p.coords)
    }
}

/// Press or release of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    Down,
    Up,
}

/// A key event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub down_time: UptimeMs,
    pub event_time: UptimeMs,
    pub action: KeyAction,
    pub key_code: i32,
    pub repeat: u32,
    pub meta_state: i32,
    pub source: InputSource,
}

impl KeyEvent {
    /// Copy of this event with a fresh event time and zero repeat count.
    pub fn restamped(&self, event_time: UptimeMs) -> Self {
        Self {
            event_time,
            repeat: 0,
            ..self.clone()
        }
    }
}

/// Any event that can be handed to an injection sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    Motion(MotionEvent),
    Key(KeyEvent),
}

impl InputEvent {
    pub fn source(&self) -> InputSource {
        match self {
            InputEvent::Motion(m) => m.source,
            InputEvent::Key(k) => k.source,
        }
    }

    pub fn event_time(&self) -> UptimeMs {
        match self {
            InputEvent::Motion(m) => m.event_time,
            InputEvent::Key(k) => k.event_time,
        }
    }

    pub fn as_motion(&self) -> Option<&MotionEvent> {
        match self {
            InputEvent::Motion(m) => Some(m),
            InputEvent::Key(_) => None,
        }
    }

    pub fn as_key(&self) -> Option<&KeyEvent> {
        match self {
            InputEvent::Key(k) => Some(k),
            InputEvent::Motion(_) => None,
        }
    }
}

impl From<MotionEvent> for InputEvent {
    fn from(event: MotionEvent) -> Self {
        InputEvent::Motion(event)
    }
}

impl From<KeyEvent> for InputEvent {
    fn from(event: KeyEvent) -> Self {
        InputEvent::Key(event)
    }
}

/// Header line of a recorded event stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventStreamHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Wall-clock time at the uptime clock's epoch (RFC 3339).
    pub epoch_wall: String,

    /// Name of the sink the events were injected through.
    pub sink: String,
}

/// Parse events from JSONL content, skipping blank and `#` header lines.
pub fn parse_events(jsonl: &str) -> Result<Vec<InputEvent>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

/// Serialize events to JSONL format.
pub fn serialize_events(events: &[InputEvent]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for event in events {
        output.push_str(&serde_json::to_string(event)?);
        output.push('\n');
    }
    Ok(output)
}
