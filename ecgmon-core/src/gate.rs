//! Leads-off gate
//!
//! The analog front-end drives two comparator outputs, LO+ and LO−, high
//! when the impedance at the matching electrode rises (pad lifted, gel
//! dried out). Either one high means the waveform is meaningless for that
//! tick.
//!
//! A closed gate pauses detection. It never resets it: the detector state,
//! RR history and filter accumulator are left exactly as they were, so a
//! brief contact glitch costs one interval rather than the whole history.

/// Electrode contact as reported by the front-end comparators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContactStatus {
    /// Both LO+ and LO− low
    Attached,
    /// LO+ and/or LO− high
    Detached {
        /// LO+ comparator asserted
        lo_plus: bool,
        /// LO− comparator asserted
        lo_minus: bool,
    },
}

impl ContactStatus {
    /// Build from the two digital lead-off lines (`true` = line high)
    pub const fn from_lines(lo_plus: bool, lo_minus: bool) -> Self {
        if lo_plus || lo_minus {
            ContactStatus::Detached { lo_plus, lo_minus }
        } else {
            ContactStatus::Attached
        }
    }

    /// Whether both electrodes have good contact
    pub const fn is_attached(&self) -> bool {
        matches!(self, ContactStatus::Attached)
    }
}

/// Result of the contact check for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Good contact: process the sample
    Open,
    /// Leads off: skip processing for this tick
    Closed,
}

/// Contact-quality gate with edge tracking
///
/// Evaluation is a pure function of the two lines; the gate only remembers
/// the previous state so transitions can be logged and counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadsOffGate {
    last: GateState,
    disconnects: u32,
}

impl LeadsOffGate {
    /// Create a gate assuming contact at power-on
    pub const fn new() -> Self {
        Self {
            last: GateState::Open,
            disconnects: 0,
        }
    }

    /// Evaluate contact for this tick
    pub fn evaluate(&mut self, contact: ContactStatus) -> GateState {
        let state = if contact.is_attached() {
            GateState::Open
        } else {
            GateState::Closed
        };

        match (self.last, state) {
            (GateState::Open, GateState::Closed) => {
                self.disconnects = self.disconnects.saturating_add(1);
                ecg_info!("leads off (disconnect #{})", self.disconnects);
            }
            (GateState::Closed, GateState::Open) => {
                ecg_info!("contact restored");
            }
            _ => {}
        }

        self.last = state;
        state
    }

    /// State reported by the most recent evaluation
    pub fn state(&self) -> GateState {
        self.last
    }

    /// Number of attached → detached transitions seen
    pub fn disconnect_count(&self) -> u32 {
        self.disconnects
    }
}

impl Default for LeadsOffGate {
    fn default() -> Self {
        Self::new()
    }
}
