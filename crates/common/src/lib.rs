//! uidrive Common Utilities
//!
//! Shared infrastructure for all uidrive crates:
//! - Error types and result aliases
//! - Uptime clock used to stamp synthesized events
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
