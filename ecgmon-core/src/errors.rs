//! Error Types for Configuration and Acquisition
//!
//! ## Design Philosophy
//!
//! The tick path itself never fails. A missing beat, an empty RR history or
//! a disconnected electrode are operating states, reported through
//! [`TelemetryRecord`](crate::TelemetryRecord) and `Option` values rather
//! than errors. Errors exist only at the two seams where the outside world
//! can hand us something unusable:
//!
//! 1. **Configuration**: a [`MonitorConfig`](crate::MonitorConfig) whose
//!    values would make detection meaningless (hysteresis above the
//!    threshold, a filter that never forgets its state).
//!
//! 2. **Acquisition**: a [`SampleSource`](crate::SampleSource) whose
//!    transport fails or whose recording has ended. Malformed recorded
//!    lines are counted and skipped by the source, not raised.
//!
//! Both error types are `Copy` (when the transport error is) and carry only
//! numbers and `&'static str`, so they can be returned from interrupt
//! context and stored without allocation.
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use ecgmon_core::{ConfigError, Monitor, MonitorConfig};
//!
//! let config = MonitorConfig::default().with_hysteresis(900.0);
//! match Monitor::with_config(config) {
//!     Ok(_) => {}
//!     Err(ConfigError::HysteresisOutOfRange { .. }) => {
//!         // Fall back to factory tuning
//!     }
//!     Err(_) => {}
//! }
//! ```

use core::fmt;

use thiserror_no_std::Error;

/// Result type for configuration checks
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Rejected configuration values
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Threshold outside the ADC range
    #[error("Threshold {threshold} outside (0, {full_scale}]")]
    ThresholdOutOfRange {
        /// Configured threshold in ADC counts
        threshold: f32,
        /// Largest reading the ADC can produce
        full_scale: f32,
    },

    /// Hysteresis negative or not below the threshold
    #[error("Hysteresis {hysteresis} must be in [0, {threshold})")]
    HysteresisOutOfRange {
        /// Configured hysteresis in ADC counts
        hysteresis: f32,
        /// Configured threshold in ADC counts
        threshold: f32,
    },

    /// Filter coefficient outside `[0, 1)`
    #[error("Filter coefficient {alpha} outside [0, 1)")]
    FilterCoefficientOutOfRange {
        /// Configured EMA weight on the previous value
        alpha: f32,
    },

    /// Sample period of zero would spin the poll loop
    #[error("Sample period must be non-zero")]
    ZeroSamplePeriod,

    /// Leads-off polling faster than normal sampling
    #[error("Leads-off period {leads_off_ms}ms shorter than sample period {sample_ms}ms")]
    LeadsOffPeriodTooShort {
        /// Configured leads-off poll period
        leads_off_ms: u32,
        /// Configured sample period
        sample_ms: u32,
    },

    /// Configuration document could not be parsed
    #[error("Malformed configuration: {reason}")]
    Malformed {
        /// Static description of what was wrong
        reason: &'static str,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::ThresholdOutOfRange { threshold, full_scale } =>
                defmt::write!(fmt, "Threshold {} outside (0, {}]", threshold, full_scale),
            Self::HysteresisOutOfRange { hysteresis, threshold } =>
                defmt::write!(fmt, "Hysteresis {} not in [0, {})", hysteresis, threshold),
            Self::FilterCoefficientOutOfRange { alpha } =>
                defmt::write!(fmt, "Filter alpha {} outside [0, 1)", alpha),
            Self::ZeroSamplePeriod =>
                defmt::write!(fmt, "Zero sample period"),
            Self::LeadsOffPeriodTooShort { leads_off_ms, sample_ms } =>
                defmt::write!(fmt, "Leads-off {}ms < sample {}ms", leads_off_ms, sample_ms),
            Self::Malformed { reason } =>
                defmt::write!(fmt, "Malformed config: {}", reason),
        }
    }
}

/// Errors raised while pulling samples from a source
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SourceError<E> {
    /// Transport-level error (ADC driver, file I/O)
    Transport(E),
    /// Finite source exhausted
    EndOfStream,
}

impl<E: fmt::Display> fmt::Display for SourceError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "Transport error: {}", e),
            Self::EndOfStream => write!(f, "End of stream"),
        }
    }
}

#[cfg(feature = "std")]
impl<E: fmt::Debug + fmt::Display> std::error::Error for SourceError<E> {}
