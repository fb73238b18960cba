//! Core beat detection engine for EcgMon
//!
//! Turns a stream of single-lead ECG samples into heartbeat events, an
//! instantaneous heart rate (BPM) and short-term heart-rate variability
//! (RMSSD). Designed for microcontroller front-ends polling an analog
//! front-end at roughly 100 Hz.
//!
//! Key constraints:
//! - No heap allocation anywhere in the tick path
//! - All long-lived state owned by one [`Monitor`] value, no globals
//! - Time is injected, so every tick is deterministic under test
//!
//! ```no_run
//! use ecgmon_core::{ContactStatus, Monitor, MonitorConfig, TelemetryRecord};
//!
//! let mut monitor = Monitor::with_config(MonitorConfig::default())?;
//!
//! // One tick: timestamp (ms), raw ADC sample, electrode contact
//! let tick = monitor.tick(1_000, 612.0, ContactStatus::Attached);
//! match tick.record {
//!     TelemetryRecord::Beat { bpm, hrv, .. } => { let _ = (bpm, hrv); }
//!     TelemetryRecord::Waveform { .. } => {}
//!     TelemetryRecord::LeadsOff => {}
//! }
//! # Ok::<(), ecgmon_core::ConfigError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod logging;

pub mod conditioner;
pub mod config;
pub mod constants;
pub mod detector;
pub mod errors;
pub mod gate;
pub mod history;
pub mod hrv;
pub mod monitor;
pub mod source;
pub mod telemetry;
pub mod time;

// Public API
pub use conditioner::{Conditioner, EmaFilter};
#[cfg(feature = "fixed")]
pub use conditioner::FixedEmaFilter;
pub use config::{FirstBeatPolicy, MonitorConfig, RmssdOrder};
pub use detector::{BeatDetector, BeatEvent, Detection, DetectorPhase, DetectorState};
pub use errors::{ConfigError, ConfigResult, SourceError};
pub use gate::{ContactStatus, GateState, LeadsOffGate};
pub use history::RrHistory;
pub use hrv::rmssd;
pub use monitor::{Monitor, Tick};
pub use source::{Frontend, MemorySource, RawSample, SampleSource};
pub use telemetry::TelemetryRecord;
pub use time::{TimeSource, Timestamp};

/// Crate version reported in startup banners
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
