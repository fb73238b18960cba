//! Constants for EcgMon Core
//!
//! Defaults for every tunable in [`MonitorConfig`](crate::MonitorConfig),
//! plus the unit conversions the detector relies on. Values are calibrated
//! for an AD8232-class analog front-end sampled by a 10-bit ADC.
//!
//! ## Organization
//!
//! - **Detection**: Threshold, hysteresis and refractory timing
//! - **Signal**: ADC range and filter coefficient
//! - **Time**: Unit conversions and loop cadence
//! - **Buffers**: Fixed capacities

/// Beat detection thresholds and timing rules.
pub mod detection;

/// ADC range and conditioning parameters.
pub mod signal;

/// Unit conversions and polling cadence.
pub mod time;

/// Fixed buffer capacities.
pub mod buffers;

pub use detection::{
    DEFAULT_HYSTERESIS, DEFAULT_REFRACTORY_MS, DEFAULT_THRESHOLD, MAX_PLAUSIBLE_BPM,
    MIN_PLAUSIBLE_BPM,
};
pub use signal::{ADC_FULL_SCALE, DEFAULT_FILTER_ALPHA};
pub use time::{DEFAULT_LEADS_OFF_PERIOD_MS, DEFAULT_SAMPLE_PERIOD_MS, MS_PER_MINUTE};
pub use buffers::{RR_HISTORY_CAPACITY, TELEMETRY_LINE_CAPACITY};
