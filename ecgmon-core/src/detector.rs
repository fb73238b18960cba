//! Beat detector
//!
//! Two-state threshold machine over the filtered signal:
//!
//! ```text
//!                 signal > threshold
//!                 and elapsed > refractory
//!   ┌──────────────────┐ ─────────────────────▶ ┌─────────────┐
//!   │ WaitingForRise   │                        │ PeakActive  │
//!   └──────────────────┘ ◀───────────────────── └─────────────┘
//!                 signal < threshold − hysteresis
//! ```
//!
//! Both comparisons are strict. A signal sitting exactly on the threshold or
//! exactly on the re-arm level causes no transition, so a flat trace at a
//! boundary cannot oscillate.
//!
//! A rising transition is a beat. Its RR interval is the time since the
//! previous beat, BPM is `60000 / rr`, and the interval goes into the RR
//! history the detector owns. Before the first beat the previous beat time
//! is 0 (boot); what happens to that first pseudo-interval is governed by
//! [`FirstBeatPolicy`].

use core::num::NonZeroU32;

use crate::config::{FirstBeatPolicy, MonitorConfig};
use crate::constants::{MS_PER_MINUTE, RR_HISTORY_CAPACITY};
use crate::history::RrHistory;
use crate::time::{elapsed_ms, Timestamp};

/// Position in the detection cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorPhase {
    /// Armed, waiting for the signal to cross the threshold
    WaitingForRise,
    /// Beat already counted, waiting for the signal to fall
    PeakActive,
}

/// Long-lived detector state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectorState {
    /// Timestamp of the most recent beat, 0 before the first
    pub last_beat_time: Timestamp,
    /// Whether the detector is inside a peak
    pub is_peak: bool,
    /// Whether any beat has been detected since power-on
    pub has_beat: bool,
}

impl DetectorState {
    /// Power-on state
    pub const fn new() -> Self {
        Self {
            last_beat_time: 0,
            is_peak: false,
            has_beat: false,
        }
    }

    /// Phase implied by `is_peak`
    pub const fn phase(&self) -> DetectorPhase {
        if self.is_peak {
            DetectorPhase::PeakActive
        } else {
            DetectorPhase::WaitingForRise
        }
    }
}

impl Default for DetectorState {
    fn default() -> Self {
        Self::new()
    }
}

/// A detected heartbeat
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BeatEvent {
    /// Tick at which the threshold was crossed
    pub timestamp: Timestamp,
    /// Time since the previous beat (ms), never below `refractory + 1`
    pub rr_interval_ms: u32,
    /// Instantaneous rate, `60000 / rr_interval_ms`
    pub bpm: f32,
}

/// Outcome of one detector update
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Detection {
    /// No state change
    Idle,
    /// Signal fell below the re-arm level; ready for the next beat
    Rearmed,
    /// First beat under [`FirstBeatPolicy::Anchor`]: timeline started, no interval
    Anchored {
        /// Tick at which the threshold was crossed
        timestamp: Timestamp,
    },
    /// Beat with a valid RR interval, already recorded in the history
    Beat(BeatEvent),
}

impl Detection {
    /// The beat event, if this update produced one
    pub fn beat(&self) -> Option<&BeatEvent> {
        match self {
            Detection::Beat(event) => Some(event),
            _ => None,
        }
    }
}

/// Beats per minute for an RR interval in milliseconds
///
/// `None` for a zero interval instead of dividing by zero.
#[inline]
pub fn bpm_from_interval(rr_interval_ms: u32) -> Option<f32> {
    if rr_interval_ms == 0 {
        return None;
    }
    Some(MS_PER_MINUTE as f32 / rr_interval_ms as f32)
}

/// Threshold/hysteresis beat detector owning the RR history
#[derive(Debug, Clone)]
pub struct BeatDetector<const N: usize = RR_HISTORY_CAPACITY> {
    threshold: f32,
    rearm_level: f32,
    refractory_ms: u32,
    first_beat: FirstBeatPolicy,

    state: DetectorState,
    history: RrHistory<N>,
    last_event: Option<BeatEvent>,
}

impl<const N: usize> BeatDetector<N> {
    /// Create a detector in the power-on state
    ///
    /// The config is taken as given; [`Monitor`](crate::Monitor) validates
    /// it before building a detector.
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            threshold: config.threshold,
            rearm_level: config.rearm_level(),
            refractory_ms: config.refractory_ms,
            first_beat: config.first_beat,
            state: DetectorState::new(),
            history: RrHistory::new(),
            last_event: None,
        }
    }

    /// Feed one filtered sample taken at `now`
    pub fn update(&mut self, now: Timestamp, signal: f32) -> Detection {
        match self.state.phase() {
            DetectorPhase::WaitingForRise => self.on_waiting(now, signal),
            DetectorPhase::PeakActive => self.on_peak(signal),
        }
    }

    fn on_waiting(&mut self, now: Timestamp, signal: f32) -> Detection {
        // Written negated so NaN never counts as a crossing
        if !(signal > self.threshold) {
            return Detection::Idle;
        }

        let since_last = elapsed_ms(self.state.last_beat_time, now);
        if since_last <= self.refractory_ms {
            return Detection::Idle;
        }

        let Some(rr) = NonZeroU32::new(since_last) else {
            ecg_warn!("zero RR interval at t={}ms, beat dropped", now);
            return Detection::Idle;
        };

        let first = !self.state.has_beat;
        self.state.last_beat_time = now;
        self.state.is_peak = true;
        self.state.has_beat = true;

        if first && self.first_beat == FirstBeatPolicy::Anchor {
            ecg_debug!("first beat at t={}ms anchors the RR timeline", now);
            return Detection::Anchored { timestamp: now };
        }

        let bpm = MS_PER_MINUTE as f32 / rr.get() as f32;
        self.history.push(rr);

        let event = BeatEvent {
            timestamp: now,
            rr_interval_ms: rr.get(),
            bpm,
        };
        self.last_event = Some(event);

        ecg_debug!("beat at t={}ms rr={}ms bpm={}", now, rr.get(), bpm);
        Detection::Beat(event)
    }

    fn on_peak(&mut self, signal: f32) -> Detection {
        if signal < self.rearm_level {
            self.state.is_peak = false;
            ecg_trace!("detector re-armed at level {}", signal);
            return Detection::Rearmed;
        }
        Detection::Idle
    }

    /// Current position in the detection cycle
    pub fn phase(&self) -> DetectorPhase {
        self.state.phase()
    }

    /// Snapshot of the long-lived state
    pub fn state(&self) -> DetectorState {
        self.state
    }

    /// RR intervals recorded so far
    pub fn history(&self) -> &RrHistory<N> {
        &self.history
    }

    /// Most recent beat with a valid interval
    pub fn last_event(&self) -> Option<&BeatEvent> {
        self.last_event.as_ref()
    }

    /// Detection threshold in ADC counts
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Return to the power-on state, forgetting all history
    pub fn reset(&mut self) {
        self.state = DetectorState::new();
        self.history.clear();
        self.last_event = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector(policy: FirstBeatPolicy) -> BeatDetector {
        BeatDetector::new(&MonitorConfig::default().with_first_beat(policy))
    }

    #[test]
    fn bpm_guard() {
        assert_eq!(bpm_from_interval(0), None);
        assert_eq!(bpm_from_interval(400), Some(150.0));
        assert_eq!(bpm_from_interval(1000), Some(60.0));
    }

    #[test]
    fn below_threshold_never_fires() {
        let mut det = detector(FirstBeatPolicy::SinceBoot);
        for t in (0..5000).step_by(10) {
            assert_eq!(det.update(t, 549.9), Detection::Idle);
        }
        assert!(det.history().is_empty());
    }

    #[test]
    fn threshold_is_strict() {
        let mut det = detector(FirstBeatPolicy::SinceBoot);
        assert_eq!(det.update(1000, 550.0), Detection::Idle);
        assert_eq!(det.phase(), DetectorPhase::WaitingForRise);
    }

    #[test]
    fn refractory_counts_from_boot() {
        let mut det = detector(FirstBeatPolicy::SinceBoot);

        // 300 ms is not strictly greater than the 300 ms refractory period
        assert_eq!(det.update(300, 700.0), Detection::Idle);

        let detection = det.update(301, 700.0);
        let event = detection.beat().copied().unwrap();
        assert_eq!(event.rr_interval_ms, 301);
    }

    #[test]
    fn since_boot_records_first_interval() {
        let mut det = detector(FirstBeatPolicy::SinceBoot);
        assert_eq!(det.update(0, 700.0), Detection::Idle);
        assert_eq!(det.update(50, 400.0), Detection::Idle);

        let event = det.update(400, 700.0).beat().copied().unwrap();
        assert_eq!(event.timestamp, 400);
        assert_eq!(event.rr_interval_ms, 400);
        assert_eq!(event.bpm, 150.0);
        assert_eq!(det.history().last(), Some(400));
    }

    #[test]
    fn anchor_skips_first_interval() {
        let mut det = detector(FirstBeatPolicy::Anchor);

        assert_eq!(det.update(400, 700.0), Detection::Anchored { timestamp: 400 });
        assert!(det.history().is_empty());
        assert_eq!(det.state().last_beat_time, 400);
        assert_eq!(det.phase(), DetectorPhase::PeakActive);

        assert_eq!(det.update(450, 400.0), Detection::Rearmed);

        let event = det.update(900, 700.0).beat().copied().unwrap();
        assert_eq!(event.rr_interval_ms, 500);
        assert_eq!(event.bpm, 120.0);
        assert_eq!(det.history().len(), 1);
    }

    #[test]
    fn no_retrigger_without_rearm() {
        let mut det = detector(FirstBeatPolicy::SinceBoot);
        assert!(det.update(400, 700.0).beat().is_some());

        // Stays high well past the refractory window: still one beat
        for t in (410..2000).step_by(10) {
            assert_eq!(det.update(t, 600.0), Detection::Idle);
        }

        // Exactly at the re-arm level does not re-arm
        assert_eq!(det.update(2000, 450.0), Detection::Idle);
        assert_eq!(det.update(2010, 449.0), Detection::Rearmed);
        assert!(det.update(2020, 700.0).beat().is_some());
    }

    #[test]
    fn rearmed_but_inside_refractory() {
        let mut det = detector(FirstBeatPolicy::SinceBoot);
        det.update(400, 700.0);
        det.update(420, 300.0);

        assert_eq!(det.update(700, 700.0), Detection::Idle);
        assert_eq!(det.phase(), DetectorPhase::WaitingForRise);

        let event = det.update(710, 700.0).beat().copied().unwrap();
        assert_eq!(event.rr_interval_ms, 310);
    }

    #[test]
    fn interval_across_timer_rollover() {
        let mut det = detector(FirstBeatPolicy::Anchor);
        let before = u32::MAX - 199;

        assert!(matches!(det.update(before, 700.0), Detection::Anchored { .. }));
        det.update(before.wrapping_add(50), 300.0);

        let event = det.update(300, 700.0).beat().copied().unwrap();
        assert_eq!(event.rr_interval_ms, 500);
    }

    #[test]
    fn zero_refractory_still_never_divides_by_zero() {
        let config = MonitorConfig::default()
            .with_refractory_ms(0)
            .with_first_beat(FirstBeatPolicy::SinceBoot);
        let mut det: BeatDetector = BeatDetector::new(&config);

        // Same timestamp as the boot reference: elapsed 0 is not > 0
        assert_eq!(det.update(0, 700.0), Detection::Idle);

        let event = det.update(1, 700.0).beat().copied().unwrap();
        assert_eq!(event.rr_interval_ms, 1);
        assert_eq!(event.bpm, 60_000.0);
    }

    #[test]
    fn reset_returns_to_power_on() {
        let mut det = detector(FirstBeatPolicy::SinceBoot);
        det.update(500, 700.0);
        det.reset();

        assert_eq!(det.state(), DetectorState::new());
        assert!(det.history().is_empty());
        assert!(det.last_event().is_none());
    }
}
