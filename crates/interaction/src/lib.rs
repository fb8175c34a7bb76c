//! uidrive Interaction
//!
//! Synthesizes touch, key and text input, injects it through a pluggable
//! sink and correlates it with the UI notifications it causes:
//!
//! - **Paths:** interpolated pointer trajectories for swipes and gestures
//! - **Builder:** timestamped motion and key events with shared down times
//! - **Injection:** the [`InjectionSink`] seam plus in-memory and recording sinks
//! - **Correlation:** run an action while waiting for any or all notification kinds
//! - **Orchestration:** clicks, swipes, scrolls, multi-pointer gestures, keys, text
//!
//! Every orchestrator is async; dwell times and step pacing suspend the
//! task rather than blocking the thread.

pub mod builder;
pub mod controller;
pub mod correlator;
pub mod device;
pub mod injector;
pub mod keymap;
pub mod multitouch;
pub mod path;
pub mod predicate;
pub mod recording;
pub mod scroll;

pub use builder::{EventBuilder, MultiTouchSession, TouchSession};
pub use controller::InteractionController;
pub use correlator::{
    execute_and_wait_for, CorrelationError, Correlator, NotificationHub, NotificationSource,
    Subscription,
};
pub use device::{DeviceControl, Rotation, RotationCommand, SimulatedDevice};
pub use injector::{Injected, InjectionSink, Injector, MemorySink};
pub use keymap::{KeyCharacterMap, VirtualKeyboard};
pub use predicate::{EventPredicate, WaitMode};
pub use recording::{InjectionRecord, RecordingSink, RecordingSummary};
pub use scroll::has_more_to_scroll;
