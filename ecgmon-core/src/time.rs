//! Time handling for the sampling loop
//!
//! Timestamps are milliseconds since boot in a `u32`, the width of an
//! Arduino-class `millis()` counter. That counter rolls over after about
//! 49.7 days, so every interval in this crate is taken with
//! [`elapsed_ms`], which subtracts with wrapping arithmetic. An interval is
//! correct across one rollover as long as it is shorter than the full
//! counter period.
//!
//! Time is always passed in. The detector never reads a clock itself,
//! which is what lets tests drive it tick by tick.

/// Timestamp in milliseconds since device boot
pub type Timestamp = u32;

/// Milliseconds from `earlier` to `later`, tolerating one counter rollover
#[inline]
pub const fn elapsed_ms(earlier: Timestamp, later: Timestamp) -> u32 {
    later.wrapping_sub(earlier)
}

/// Source of time for the sampling loop
pub trait TimeSource {
    /// Get current timestamp in milliseconds
    fn now(&self) -> Timestamp;

    /// Get precision in milliseconds
    fn precision_ms(&self) -> u32 {
        1
    }
}

/// Monotonic clock backed by `std::time::Instant`
///
/// Starts at 0 on construction and truncates to the `u32` timestamp width,
/// so host runs wrap exactly like the firmware counter.
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    start: std::time::Instant,
}

#[cfg(feature = "std")]
impl MonotonicClock {
    /// Start a clock at 0 ms
    pub fn new() -> Self {
        Self { start: std::time::Instant::now() }
    }
}

#[cfg(feature = "std")]
impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl TimeSource for MonotonicClock {
    fn now(&self) -> Timestamp {
        self.start.elapsed().as_millis() as Timestamp
    }
}

/// Fixed time source for testing and replay
///
/// Uses a `Cell` so a harness can advance time through a shared reference
/// while the [`Frontend`](crate::Frontend) holds the source.
#[derive(Debug, Clone, Default)]
pub struct FixedTime {
    timestamp: core::cell::Cell<Timestamp>,
}

impl FixedTime {
    /// Create a clock frozen at `timestamp`
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp: core::cell::Cell::new(timestamp) }
    }

    /// Jump to an absolute timestamp
    pub fn set(&self, timestamp: Timestamp) {
        self.timestamp.set(timestamp);
    }

    /// Advance by `ms`, wrapping like the hardware counter
    pub fn advance(&self, ms: u32) {
        self.timestamp.set(self.timestamp.get().wrapping_add(ms));
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> Timestamp {
        self.timestamp.get()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> Timestamp {
        (**self).now()
    }

    fn precision_ms(&self) -> u32 {
        (**self).precision_ms()
    }
}
