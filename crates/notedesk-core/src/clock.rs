#![forbid(unsafe_code)]

//! Host-controlled monotonic time.
//!
//! The desk never reads a wall clock. The host advances time explicitly
//! (from `requestAnimationFrame` timestamps in a browser, or by hand in
//! tests), which keeps menu timers and scroll-settle bounds deterministic.

use core::time::Duration;

/// Source of monotonic time for timers.
pub trait Clock {
    /// Monotonic time since the host's epoch.
    fn now_mono(&self) -> Duration;
}

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Set current monotonic time. Moving backwards is ignored.
    pub fn set(&mut self, now: Duration) {
        if now > self.now {
            self.now = now;
        }
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }

    /// Advance by a host-supplied millisecond delta.
    ///
    /// Non-finite and negative deltas are ignored.
    pub fn advance_ms(&mut self, dt_ms: f64) {
        if let Some(dt) = duration_from_ms(dt_ms) {
            self.advance(dt);
        }
    }
}

impl Clock for DeterministicClock {
    fn now_mono(&self) -> Duration {
        self.now
    }
}

/// Convert host milliseconds into a `Duration`, rejecting garbage.
#[must_use]
pub fn duration_from_ms(ms: f64) -> Option<Duration> {
    if !ms.is_finite() || ms < 0.0 {
        return None;
    }
    Duration::try_from_secs_f64(ms / 1000.0).ok()
}
