//! Per-tick processing pipeline
//!
//! [`Monitor`] owns every piece of long-lived state (filter accumulator,
//! detector, RR history, gate) and runs one tick at a time:
//!
//! ```text
//! raw sample ─▶ Leads-Off Gate ─▶ Conditioner ─▶ Beat Detector ─▶ RMSSD ─▶ record
//!                    │ closed
//!                    └──────────────────────────────────────────────────▶ LeadsOff
//! ```
//!
//! The caller supplies the timestamp, so the same code runs under a
//! hardware timer or a scripted test clock.

use crate::conditioner::{Conditioner, EmaFilter};
use crate::config::MonitorConfig;
use crate::constants::RR_HISTORY_CAPACITY;
use crate::detector::{BeatDetector, Detection};
use crate::errors::ConfigResult;
use crate::gate::{ContactStatus, GateState, LeadsOffGate};
use crate::history::RrHistory;
use crate::hrv::rmssd;
use crate::telemetry::TelemetryRecord;
use crate::time::Timestamp;

/// Output of one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Timestamp the tick was processed at
    pub timestamp: Timestamp,
    /// Telemetry for this tick
    pub record: TelemetryRecord,
    /// Detector outcome, `Idle` while the gate is closed
    pub detection: Detection,
    /// Suggested delay before the next poll (ms)
    pub next_poll_ms: u32,
}

/// Single-channel ECG monitor
#[derive(Debug, Clone)]
pub struct Monitor<C = EmaFilter, const N: usize = RR_HISTORY_CAPACITY> {
    config: MonitorConfig,
    gate: LeadsOffGate,
    conditioner: C,
    detector: BeatDetector<N>,
    ticks: u32,
    beats: u32,
}

impl Monitor<EmaFilter, RR_HISTORY_CAPACITY> {
    /// Floating-point monitor with a ten-interval history
    pub fn with_config(config: MonitorConfig) -> ConfigResult<Self> {
        Self::new(config)
    }
}

impl<C: Conditioner, const N: usize> Monitor<C, N> {
    /// Validate `config` and build a monitor in the power-on state
    pub fn new(config: MonitorConfig) -> ConfigResult<Self> {
        if let Err(e) = config.validate() {
            ecg_warn!("monitor config rejected: {}", e);
            return Err(e);
        }

        Ok(Self {
            config,
            gate: LeadsOffGate::new(),
            conditioner: C::from_alpha(config.filter_alpha),
            detector: BeatDetector::new(&config),
            ticks: 0,
            beats: 0,
        })
    }

    /// Process one sample taken at `now`
    pub fn tick(&mut self, now: Timestamp, raw: f32, contact: ContactStatus) -> Tick {
        self.ticks = self.ticks.wrapping_add(1);

        if self.gate.evaluate(contact) == GateState::Closed {
            return Tick {
                timestamp: now,
                record: TelemetryRecord::LeadsOff,
                detection: Detection::Idle,
                next_poll_ms: self.config.leads_off_period_ms,
            };
        }

        // Finite readings outside the ADC range are pinned to it; non-finite
        // ones pass through for the conditioner to drop
        let raw = if raw.is_finite() {
            raw.clamp(0.0, self.config.adc_full_scale)
        } else {
            raw
        };
        let signal = self.conditioner.apply(raw);
        let detection = self.detector.update(now, signal);
        let threshold = self.config.threshold;

        let record = match detection {
            Detection::Beat(event) => {
                self.beats = self.beats.wrapping_add(1);
                TelemetryRecord::Beat {
                    signal,
                    threshold,
                    bpm: event.bpm,
                    hrv: rmssd(self.detector.history(), self.config.rmssd_order),
                }
            }
            Detection::Idle | Detection::Rearmed | Detection::Anchored { .. } => {
                TelemetryRecord::Waveform { signal, threshold }
            }
        };

        Tick {
            timestamp: now,
            record,
            detection,
            next_poll_ms: self.config.sample_period_ms,
        }
    }

    /// Current RMSSD without waiting for the next beat
    pub fn hrv(&self) -> f32 {
        rmssd(self.detector.history(), self.config.rmssd_order)
    }

    /// Most recent heart rate, if any beat has been measured
    pub fn bpm(&self) -> Option<f32> {
        self.detector.last_event().map(|event| event.bpm)
    }

    /// Active configuration
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Beat detector and its state
    pub fn detector(&self) -> &BeatDetector<N> {
        &self.detector
    }

    /// RR intervals recorded so far
    pub fn history(&self) -> &RrHistory<N> {
        self.detector.history()
    }

    /// Contact gate and its disconnect counter
    pub fn gate(&self) -> &LeadsOffGate {
        &self.gate
    }

    /// Current filtered value
    pub fn signal(&self) -> f32 {
        self.conditioner.value()
    }

    /// Ticks processed, including leads-off ticks
    pub fn tick_count(&self) -> u32 {
        self.ticks
    }

    /// Beats reported with a valid interval
    pub fn beat_count(&self) -> u32 {
        self.beats
    }

    /// Return everything to the power-on state
    pub fn reset(&mut self) {
        self.gate = LeadsOffGate::new();
        self.conditioner.reset();
        self.detector.reset();
        self.ticks = 0;
        self.beats = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FirstBeatPolicy;
    use crate::detector::DetectorPhase;

    /// Unfiltered monitor so tests can place the signal exactly
    fn passthrough(policy: FirstBeatPolicy) -> Monitor {
        let config = MonitorConfig::default()
            .with_filter_alpha(0.0)
            .with_first_beat(policy);
        Monitor::with_config(config).unwrap()
    }

    #[test]
    fn rejects_invalid_config() {
        let config = MonitorConfig::default().with_hysteresis(-1.0);
        assert!(Monitor::with_config(config).is_err());
    }

    #[test]
    fn waveform_between_beats() {
        let mut monitor = passthrough(FirstBeatPolicy::SinceBoot);
        let tick = monitor.tick(10, 420.0, ContactStatus::Attached);

        assert_eq!(tick.record, TelemetryRecord::Waveform { signal: 420.0, threshold: 550.0 });
        assert_eq!(tick.next_poll_ms, 10);
    }

    #[test]
    fn beat_record_carries_bpm_and_hrv() {
        let mut monitor = passthrough(FirstBeatPolicy::SinceBoot);
        let tick = monitor.tick(400, 700.0, ContactStatus::Attached);

        assert_eq!(
            tick.record,
            TelemetryRecord::Beat { signal: 700.0, threshold: 550.0, bpm: 150.0, hrv: 0.0 }
        );
        assert_eq!(monitor.beat_count(), 1);
        assert_eq!(monitor.bpm(), Some(150.0));
    }

    #[test]
    fn anchor_tick_is_waveform_only() {
        let mut monitor = passthrough(FirstBeatPolicy::Anchor);
        let tick = monitor.tick(400, 700.0, ContactStatus::Attached);

        assert!(matches!(tick.detection, Detection::Anchored { timestamp: 400 }));
        assert!(tick.record.bpm().is_none());
        assert_eq!(monitor.beat_count(), 0);
        assert_eq!(monitor.bpm(), None);
    }

    #[test]
    fn leads_off_freezes_state() {
        let mut monitor = passthrough(FirstBeatPolicy::SinceBoot);
        monitor.tick(400, 700.0, ContactStatus::Attached);

        let before_state = monitor.detector().state();
        let before_history = monitor.history().clone();
        let before_signal = monitor.signal();

        let off = ContactStatus::from_lines(true, false);
        for t in (410..1500).step_by(100) {
            let tick = monitor.tick(t, 100.0, off);
            assert_eq!(tick.record, TelemetryRecord::LeadsOff);
            assert_eq!(tick.next_poll_ms, 100);
        }

        assert_eq!(monitor.detector().state(), before_state);
        assert_eq!(monitor.history(), &before_history);
        assert_eq!(monitor.signal(), before_signal);
        assert_eq!(monitor.detector().phase(), DetectorPhase::PeakActive);
        assert_eq!(monitor.gate().disconnect_count(), 1);
    }

    #[test]
    fn out_of_range_samples_are_clamped() {
        let mut monitor = passthrough(FirstBeatPolicy::SinceBoot);

        let tick = monitor.tick(400, 3.0e38, ContactStatus::Attached);
        assert_eq!(tick.record.signal(), Some(1023.0));
        assert_eq!(tick.record.bpm(), Some(150.0));

        let tick = monitor.tick(410, -250.0, ContactStatus::Attached);
        assert_eq!(tick.record.signal(), Some(0.0));
        assert_eq!(tick.detection, Detection::Rearmed);

        // Widest line the monitor can produce: full-scale signal and the
        // largest possible interval difference after a long gap
        let tick = monitor.tick(u32::MAX, f32::MAX, ContactStatus::Attached);
        assert_eq!(tick.record.signal(), Some(1023.0));
        assert!(tick.record.to_line().is_ok());
    }

    #[test]
    fn reset_restores_power_on() {
        let mut monitor = passthrough(FirstBeatPolicy::SinceBoot);
        monitor.tick(400, 700.0, ContactStatus::Attached);
        monitor.reset();

        assert_eq!(monitor.tick_count(), 0);
        assert!(monitor.history().is_empty());
        assert_eq!(monitor.signal(), 0.0);
    }
}
