//! uidrive Event Model
//!
//! Defines the data contracts shared by the interaction core:
//! - **Events:** Synthesized touch (single and multi-pointer) and key events
//! - **Key codes:** The key code and meta-state constants events carry
//! - **Notifications:** Asynchronous UI-change notifications and kind sets
//!
//! Coordinates are integer device pixels; timestamps are milliseconds on
//! the uptime clock from `uidrive-common`.

pub mod event;
pub mod keycode;
pub mod notification;

pub use event::*;
pub use notification::*;
