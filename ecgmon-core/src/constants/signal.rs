//! Signal Conditioning Constants

/// Full-scale reading of the sampling ADC (10-bit).
pub const ADC_FULL_SCALE: f32 = 1023.0;

/// Default EMA weight on the previous filtered value.
///
/// `f' = 0.8 * f + 0.2 * x`. At 100 Hz this gives a time constant of about
/// 45 ms, enough to suppress mains pickup without flattening the QRS.
pub const DEFAULT_FILTER_ALPHA: f32 = 0.8;
