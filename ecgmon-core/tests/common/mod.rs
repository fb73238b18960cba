//! Shared helpers for integration tests
//!
//! - `Trace`: scripted (time, value, contact) sequences
//! - `SyntheticEcg`: baseline plus square R waves at chosen onsets
//! - `run`: drive a monitor over a trace and collect its ticks

#![allow(dead_code)]

use ecgmon_core::{
    ContactStatus, FirstBeatPolicy, Monitor, MonitorConfig, RawSample, Tick, Timestamp,
};

/// Sample period used by every generated trace (ms)
pub const PERIOD_MS: u32 = 10;

/// Resting baseline of the synthetic front-end (ADC counts)
pub const BASELINE: f32 = 400.0;

/// R-wave peak of the synthetic front-end (ADC counts)
pub const R_PEAK: f32 = 800.0;

/// Samples per synthetic R wave
pub const R_WIDTH_SAMPLES: u32 = 4;

/// Filtered signal crosses 550 on the third sample of an R wave
/// (400 → 480 → 544 → 595 with α = 0.8), so detection lags onset by 20 ms.
pub const DETECTION_LAG_MS: u32 = 20;

/// Monitor that passes raw samples straight to the detector
pub fn passthrough_monitor(policy: FirstBeatPolicy) -> Monitor {
    let config = MonitorConfig::default()
        .with_filter_alpha(0.0)
        .with_first_beat(policy);
    Monitor::with_config(config).expect("valid config")
}

/// Scripted sample sequence
#[derive(Debug, Default, Clone)]
pub struct Trace {
    samples: Vec<RawSample>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    /// One attached sample at `t`
    pub fn at(mut self, t: Timestamp, value: f32) -> Self {
        self.samples.push(RawSample::attached(value).at(t));
        self
    }

    /// One leads-off sample at `t`
    pub fn off_at(mut self, t: Timestamp, value: f32) -> Self {
        self.samples.push(RawSample::with_lines(value, true, false).at(t));
        self
    }

    /// Constant value every `PERIOD_MS` over `[from, to)`
    pub fn hold(mut self, from: Timestamp, to: Timestamp, value: f32) -> Self {
        let mut t = from;
        while t < to {
            self.samples.push(RawSample::attached(value).at(t));
            t += PERIOD_MS;
        }
        self
    }

    pub fn samples(&self) -> &[RawSample] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<RawSample> {
        self.samples
    }
}

/// Baseline with square R waves at the given onsets
pub struct SyntheticEcg {
    onsets: Vec<Timestamp>,
    duration_ms: Timestamp,
}

impl SyntheticEcg {
    /// R waves at `first_onset` and then after each interval in `rr_ms`
    pub fn from_intervals(first_onset: Timestamp, rr_ms: &[u32]) -> Self {
        let mut onsets = vec![first_onset];
        let mut t = first_onset;
        for &rr in rr_ms {
            t += rr;
            onsets.push(t);
        }
        let duration_ms = t + 500;
        Self { onsets, duration_ms }
    }

    /// Regular rhythm at `bpm` for `beats` beats
    pub fn regular(first_onset: Timestamp, bpm: u32, beats: usize) -> Self {
        let rr = 60_000 / bpm;
        let intervals = vec![rr; beats.saturating_sub(1)];
        Self::from_intervals(first_onset, &intervals)
    }

    pub fn onsets(&self) -> &[Timestamp] {
        &self.onsets
    }

    pub fn value_at(&self, t: Timestamp) -> f32 {
        let in_r_wave = self
            .onsets
            .iter()
            .any(|&onset| t >= onset && t < onset + R_WIDTH_SAMPLES * PERIOD_MS);
        if in_r_wave {
            R_PEAK
        } else {
            BASELINE
        }
    }

    /// Sampled trace, every `PERIOD_MS`, attached throughout
    pub fn trace(&self) -> Vec<RawSample> {
        (0..self.duration_ms)
            .step_by(PERIOD_MS as usize)
            .map(|t| RawSample::attached(self.value_at(t)).at(t))
            .collect()
    }
}

/// Run every sample through `monitor`, returning all ticks
pub fn run<C: ecgmon_core::Conditioner>(
    monitor: &mut Monitor<C>,
    samples: &[RawSample],
) -> Vec<Tick> {
    samples
        .iter()
        .map(|s| {
            let now = s.recorded_at.expect("trace samples are timestamped");
            monitor.tick(now, s.value, s.contact)
        })
        .collect()
}

/// Ticks that carried a beat with an interval
pub fn beats(ticks: &[Tick]) -> Vec<ecgmon_core::BeatEvent> {
    ticks.iter().filter_map(|t| t.detection.beat().copied()).collect()
}

/// Contact line state shorthand
pub fn detached() -> ContactStatus {
    ContactStatus::from_lines(true, false)
}
