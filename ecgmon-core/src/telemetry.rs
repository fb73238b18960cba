//! Per-tick telemetry records
//!
//! Every tick produces exactly one record. The three shapes keep "no new
//! beat" and "zero" apart: a waveform record has no BPM/HRV at all, while a
//! beat record with `hrv == 0.0` means RMSSD was computed but the history
//! is still too short.
//!
//! ## Wire Format
//!
//! Records render as one comma-separated line, four fields, suited to a
//! serial plotter:
//!
//! ```text
//! !,0,0,0                     leads off
//! 512.40,550.00,,             waveform only (BPM/HRV empty)
//! 612.75,550.00,72.29,38.11   beat
//! ```
//!
//! The transport (UART, USB CDC, log file) is up to the caller.

use core::fmt::{self, Write};

use heapless::String;

use crate::constants::TELEMETRY_LINE_CAPACITY;

/// Marker for a leads-off line
pub const LEADS_OFF_LINE: &str = "!,0,0,0";

/// One tick's worth of output
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum TelemetryRecord {
    /// Electrodes not in contact; nothing was processed
    LeadsOff,
    /// Filtered sample and threshold, no new beat
    Waveform {
        /// Filtered signal (ADC counts)
        signal: f32,
        /// Detection threshold (ADC counts)
        threshold: f32,
    },
    /// Filtered sample at the tick a beat was detected
    Beat {
        /// Filtered signal (ADC counts)
        signal: f32,
        /// Detection threshold (ADC counts)
        threshold: f32,
        /// Instantaneous heart rate
        bpm: f32,
        /// RMSSD over the RR history (ms)
        hrv: f32,
    },
}

impl TelemetryRecord {
    /// Whether this tick was skipped for lost contact
    pub fn is_leads_off(&self) -> bool {
        matches!(self, TelemetryRecord::LeadsOff)
    }

    /// Filtered signal, absent while leads are off
    pub fn signal(&self) -> Option<f32> {
        match *self {
            TelemetryRecord::LeadsOff => None,
            TelemetryRecord::Waveform { signal, .. } | TelemetryRecord::Beat { signal, .. } => {
                Some(signal)
            }
        }
    }

    /// Heart rate, present only on beat ticks
    pub fn bpm(&self) -> Option<f32> {
        match *self {
            TelemetryRecord::Beat { bpm, .. } => Some(bpm),
            _ => None,
        }
    }

    /// RMSSD, present only on beat ticks
    pub fn hrv(&self) -> Option<f32> {
        match *self {
            TelemetryRecord::Beat { hrv, .. } => Some(hrv),
            _ => None,
        }
    }

    /// Render the wire line into a fixed buffer
    pub fn to_line(&self) -> Result<String<TELEMETRY_LINE_CAPACITY>, fmt::Error> {
        let mut line = String::new();
        write!(line, "{}", self)?;
        Ok(line)
    }
}

impl fmt::Display for TelemetryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryRecord::LeadsOff => f.write_str(LEADS_OFF_LINE),
            TelemetryRecord::Waveform { signal, threshold } => {
                write!(f, "{:.2},{:.2},,", signal, threshold)
            }
            TelemetryRecord::Beat { signal, threshold, bpm, hrv } => {
                write!(f, "{:.2},{:.2},{:.2},{:.2}", signal, threshold, bpm, hrv)
            }
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TelemetryRecord {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::LeadsOff => defmt::write!(fmt, "leads off"),
            Self::Waveform { signal, threshold } =>
                defmt::write!(fmt, "signal={} threshold={}", signal, threshold),
            Self::Beat { signal, threshold, bpm, hrv } =>
                defmt::write!(fmt, "signal={} threshold={} bpm={} hrv={}", signal, threshold, bpm, hrv),
        }
    }
}
