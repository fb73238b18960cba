//! Time-Related Constants

/// Milliseconds per second.
pub const MS_PER_SECOND: u32 = 1000;

/// Seconds per minute.
pub const SECONDS_PER_MINUTE: u32 = 60;

/// Milliseconds per minute. BPM is `MS_PER_MINUTE / rr_interval_ms`.
pub const MS_PER_MINUTE: u32 = MS_PER_SECOND * SECONDS_PER_MINUTE;

/// Default delay between samples (milliseconds), roughly 100 Hz.
pub const DEFAULT_SAMPLE_PERIOD_MS: u32 = 10;

/// Default delay between polls while the leads are off (milliseconds).
///
/// Nothing is processed while contact is lost, so polling slows to 10 Hz.
pub const DEFAULT_LEADS_OFF_PERIOD_MS: u32 = 100;
