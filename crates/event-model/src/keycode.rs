//! Key code and meta-state constants carried by key events.

pub const KEYCODE_UNKNOWN: i32 = 0;
pub const KEYCODE_HOME: i32 = 3;
pub const KEYCODE_BACK: i32 = 4;
pub const KEYCODE_0: i32 = 7;
pub const KEYCODE_9: i32 = 16;
pub const KEYCODE_STAR: i32 = 17;
pub const KEYCODE_POUND: i32 = 18;
pub const KEYCODE_DPAD_UP: i32 = 19;
pub const KEYCODE_DPAD_DOWN: i32 = 20;
pub const KEYCODE_DPAD_LEFT: i32 = 21;
pub const KEYCODE_DPAD_RIGHT: i32 = 22;
pub const KEYCODE_DPAD_CENTER: i32 = 23;
pub const KEYCODE_POWER: i32 = 26;
pub const KEYCODE_A: i32 = 29;
pub const KEYCODE_Z: i32 = 54;
pub const KEYCODE_COMMA: i32 = 55;
pub const KEYCODE_PERIOD: i32 = 56;
pub const KEYCODE_SHIFT_LEFT: i32 = 59;
pub const KEYCODE_TAB: i32 = 61;
pub const KEYCODE_SPACE: i32 = 62;
pub const KEYCODE_ENTER: i32 = 66;
pub const KEYCODE_DEL: i32 = 67;
pub const KEYCODE_GRAVE: i32 = 68;
pub const KEYCODE_MINUS: i32 = 69;
pub const KEYCODE_EQUALS: i32 = 70;
pub const KEYCODE_LEFT_BRACKET: i32 = 71;
pub const KEYCODE_RIGHT_BRACKET: i32 = 72;
pub const KEYCODE_BACKSLASH: i32 = 73;
pub const KEYCODE_SEMICOLON: i32 = 74;
pub const KEYCODE_APOSTROPHE: i32 = 75;
pub const KEYCODE_SLASH: i32 = 76;
pub const KEYCODE_AT: i32 = 77;
pub const KEYCODE_PLUS: i32 = 81;
pub const KEYCODE_MENU: i32 = 82;
pub const KEYCODE_SEARCH: i32 = 84;
pub const KEYCODE_RECENT_APPS: i32 = 187;

pub const META_NONE: i32 = 0;
pub const META_SHIFT_ON: i32 = 0x01;
pub const META_ALT_ON: i32 = 0x02;
pub const META_SHIFT_LEFT_ON: i32 = 0x40;
pub const META_CTRL_ON: i32 = 0x1000;

/// Key code for an ASCII letter, ignoring case.
pub fn letter(c: char) -> Option<i32> {
    let lower = c.to_ascii_lowercase();
    if lower.is_ascii_lowercase() {
        Some(KEYCODE_A + (lower as i32 - 'a' as i32))
    } else {
        None
    }
}

/// Key code for an ASCII digit.
pub fn digit(c: char) -> Option<i32> {
    c.to_digit(10).map(|d| KEYCODE_0 + d as i32)
}

/// Parse a key code given as a number or a name such as `ENTER` or `KEYCODE_BACK`.
pub fn parse_key_code(name: &str) -> Option<i32> {
    if let Ok(code) = name.parse::<i32>() {
        return Some(code);
    }
    let upper = name.trim().to_ascii_uppercase();
    let bare = upper.strip_prefix("KEYCODE_").unwrap_or(&upper);
    let code = match bare {
        "HOME" => KEYCODE_HOME,
        "BACK" => KEYCODE_BACK,
        "DPAD_UP" => KEYCODE_DPAD_UP,
        "DPAD_DOWN" => KEYCODE_DPAD_DOWN,
        "DPAD_LEFT" => KEYCODE_DPAD_LEFT,
        "DPAD_RIGHT" => KEYCODE_DPAD_RIGHT,
        "DPAD_CENTER" => KEYCODE_DPAD_CENTER,
        "POWER" => KEYCODE_POWER,
        "TAB" => KEYCODE_TAB,
        "SPACE" => KEYCODE_SPACE,
        "ENTER" => KEYCODE_ENTER,
        "DEL" => KEYCODE_DEL,
        "MENU" => KEYCODE_MENU,
        "SEARCH" => KEYCODE_SEARCH,
        "RECENT_APPS" => KEYCODE_RECENT_APPS,
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => return letter(c).or_else(|| digit(c)),
                _ => return None,
            }
        }
    };
    Some(code)
}
