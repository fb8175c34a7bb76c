//! Character-to-key-event mapping.

use uidrive_common::clock::UptimeClock;
use uidrive_event_model::event::{KeyAction, KeyEvent};
use uidrive_event_model::keycode::{self, *};

use crate::builder::key_event;

/// Maps text to the key events that would type it.
pub trait KeyCharacterMap: Send + Sync {
    /// Key events for `text`, or `None` if any character cannot be typed.
    fn chars_to_key_events(&self, text: &str) -> Option<Vec<KeyEvent>>;
}

/// US-layout virtual keyboard.
///
/// All returned events share one timestamp; callers re-stamp them before
/// injection.
#[derive(Debug, Clone, Default)]
pub struct VirtualKeyboard {
    clock: UptimeClock,
}

impl VirtualKeyboard {
    pub fn new(clock: UptimeClock) -> Self {
        Self { clock }
    }

    /// Key code and whether shift must be held for `c`.
    pub fn lookup(c: char) -> Option<(i32, bool)> {
        if let Some(code) = keycode::letter(c) {
            return Some((code, c.is_ascii_uppercase()));
        }
        if let Some(code) = keycode::digit(c) {
            return Some((code, false));
        }
        let mapped = match c {
            ' ' => (KEYCODE_SPACE, false),
            '\n' => (KEYCODE_ENTER, false),
            '\t' => (KEYCODE_TAB, false),
            ',' => (KEYCODE_COMMA, false),
            '.' => (KEYCODE_PERIOD, false),
            '-' => (KEYCODE_MINUS, false),
            '=' => (KEYCODE_EQUALS, false),
            '[' => (KEYCODE_LEFT_BRACKET, false),
            ']' => (KEYCODE_RIGHT_BRACKET, false),
            '\\' => (KEYCODE_BACKSLASH, false),
            ';' => (KEYCODE_SEMICOLON, false),
            '\'' => (KEYCODE_APOSTROPHE, false),
            '/' => (KEYCODE_SLASH, false),
            '`' => (KEYCODE_GRAVE, false),
            '@' => (KEYCODE_AT, false),
            '*' => (KEYCODE_STAR, false),
            '#' => (KEYCODE_POUND, false),
            '+' => (KEYCODE_PLUS, false),
            '_' => (KEYCODE_MINUS, true),
            '<' => (KEYCODE_COMMA, true),
            '>' => (KEYCODE_PERIOD, true),
            '?' => (KEYCODE_SLASH, true),
            ':' => (KEYCODE_SEMICOLON, true),
            '"' => (KEYCODE_APOSTROPHE, true),
            '{' => (KEYCODE_LEFT_BRACKET, true),
            '}' => (KEYCODE_RIGHT_BRACKET, true),
            '|' => (KEYCODE_BACKSLASH, true),
            '~' => (KEYCODE_GRAVE, true),
            '!' => (KEYCODE_0 + 1, true),
            '$' => (KEYCODE_0 + 4, true),
            '%' => (KEYCODE_0 + 5, true),
            '^' => (KEYCODE_0 + 6, true),
            '&' => (KEYCODE_0 + 7, true),
            '(' => (KEYCODE_0 + 9, true),
            ')' => (KEYCODE_0, true),
            _ => return None,
        };
        Some(mapped)
    }
}

impl KeyCharacterMap for VirtualKeyboard {
    fn chars_to_key_events(&self, text: &str) -> Option<Vec<KeyEvent>> {
        let now = self.clock.uptime_ms();
        let shift_meta = META_SHIFT_ON | META_SHIFT_LEFT_ON;
        let mut events = Vec::with_capacity(text.len() * 2);

        for c in text.chars() {
            let (code, shifted) = Self::lookup(c)?;
            if shifted {
                events.push(key_event(now, KeyAction::Down, KEYCODE_SHIFT_LEFT, shift_meta));
                events.push(key_event(now, KeyAction::Down, code, shift_meta));
                events.push(key_event(now, KeyAction::Up, code, shift_meta));
                events.push(key_event(now, KeyAction::Up, KEYCODE_SHIFT_LEFT, META_NONE));
            } else {
                events.push(key_event(now, KeyAction::Down, code, META_NONE));
                events.push(key_event(now, KeyAction::Up, code, META_NONE));
            }
        }
        Some(events)
    }
}
