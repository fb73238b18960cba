//! Beat Detection Constants
//!
//! Threshold values are in raw ADC counts after filtering, so they move
//! with electrode placement and front-end gain. Expect to retune them per
//! device.

/// Default detection threshold (ADC counts).
///
/// An R wave on a mid-rail biased AD8232 output typically peaks around
/// 600-750 counts on a 10-bit ADC, while the baseline sits near 350-450.
/// 550 separates the two with margin for baseline wander.
pub const DEFAULT_THRESHOLD: f32 = 550.0;

/// Default hysteresis below threshold required to re-arm (ADC counts).
///
/// The filtered signal must fall under `threshold - hysteresis` (450 with
/// defaults) before another beat can fire.
pub const DEFAULT_HYSTERESIS: f32 = 100.0;

/// Default refractory period (milliseconds).
///
/// 300 ms caps detection at 200 BPM and rejects T waves, which follow the
/// R peak by roughly 200-300 ms.
pub const DEFAULT_REFRACTORY_MS: u32 = 300;

/// Lowest heart rate the detector is expected to report (BPM).
///
/// Used only for sanity bounds in tests and examples.
pub const MIN_PLAUSIBLE_BPM: f32 = 20.0;

/// Highest heart rate the default refractory period can report (BPM).
pub const MAX_PLAUSIBLE_BPM: f32 = 200.0;
