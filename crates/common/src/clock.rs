//! Uptime clock used to stamp synthesized input events.
//!
//! Event timestamps are milliseconds on a monotonic clock anchored at an
//! epoch captured when the clock is created, mirroring how input stacks
//! stamp events with system uptime rather than wall-clock time.

use std::time::{Duration, Instant};

/// Milliseconds on the uptime clock.
pub type UptimeMs = u64;

/// A monotonic millisecond clock anchored to a fixed epoch.
#[derive(Debug, Clone)]
pub struct UptimeClock {
    /// The instant the clock was started.
    epoch: Instant,

    /// Wall-clock time at epoch (RFC 3339 string).
    epoch_wall: String,
}

impl UptimeClock {
    /// Create a new clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Milliseconds elapsed since the epoch.
    pub fn uptime_ms(&self) -> UptimeMs {
        self.epoch.elapsed().as_millis() as UptimeMs
    }

    /// Wall-clock time at epoch.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }
}

impl Default for UptimeClock {
    fn default() -> Self {
        Self::start()
    }
}

/// Fixed floor between injected motion steps.
///
/// Pacing is not timing-accurate; it only keeps a gesture from flooding the
/// input stack when the host is fast.
#[derive(Debug, Clone, Copy)]
pub struct StepPacer {
    delay: Duration,
}

impl StepPacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}
