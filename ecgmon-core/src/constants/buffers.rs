//! Buffer Sizes

/// Number of RR intervals retained for HRV estimation.
///
/// Ten beats is 5-10 seconds of rhythm at resting rates, the usual window
/// for ultra-short-term RMSSD.
pub const RR_HISTORY_CAPACITY: usize = 10;

/// Capacity of a rendered telemetry line.
///
/// A beat record is four two-decimal fields and three commas. The monitor
/// clamps samples to the ADC range and validation keeps the threshold
/// inside it; BPM tops out at `60000.00` and RMSSD at the width of a `u32`
/// millisecond interval.
pub const TELEMETRY_LINE_CAPACITY: usize = 64;
