//! Monitor configuration
//!
//! Every tunable the detector reads lives in [`MonitorConfig`]. Defaults
//! match the factory tuning in [`constants`](crate::constants); the
//! `with_*` setters exist so call sites and tests can override one value
//! without restating the rest.
//!
//! ```rust
//! use ecgmon_core::{FirstBeatPolicy, MonitorConfig};
//!
//! let config = MonitorConfig::default()
//!     .with_threshold(600.0)
//!     .with_refractory_ms(250)
//!     .with_first_beat(FirstBeatPolicy::SinceBoot);
//! assert!(config.validate().is_ok());
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::{
    ADC_FULL_SCALE, DEFAULT_FILTER_ALPHA, DEFAULT_HYSTERESIS, DEFAULT_LEADS_OFF_PERIOD_MS,
    DEFAULT_REFRACTORY_MS, DEFAULT_SAMPLE_PERIOD_MS, DEFAULT_THRESHOLD,
};
use crate::errors::{ConfigError, ConfigResult};

/// How the first beat after boot is treated
///
/// Before any beat has been seen there is no previous R peak, so the first
/// "interval" is really the time since power-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FirstBeatPolicy {
    /// First beat only anchors the timeline: no event, no RR entry
    #[default]
    Anchor,
    /// First beat is measured from timestamp 0 and recorded normally
    SinceBoot,
}

/// Pairing order for RMSSD successive differences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RmssdOrder {
    /// Pair intervals in the order they were recorded
    #[default]
    Chronological,
    /// Pair intervals by physical slot index
    ///
    /// Once the history wraps, one pair compares the newest interval with
    /// the oldest. Matches the behaviour of earlier firmware.
    Storage,
}

/// Tunables for one monitoring channel
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MonitorConfig {
    /// Filtered level a beat must exceed (ADC counts, strict `>`)
    pub threshold: f32,

    /// Drop below threshold needed to re-arm (ADC counts, strict `<`)
    pub hysteresis: f32,

    /// Minimum spacing between beats (ms). Zero disables the window.
    pub refractory_ms: u32,

    /// EMA weight on the previous filtered value, in `[0, 1)`
    pub filter_alpha: f32,

    /// Largest raw reading the ADC produces
    pub adc_full_scale: f32,

    /// Delay between polls while electrodes are attached (ms)
    pub sample_period_ms: u32,

    /// Delay between polls while the leads are off (ms)
    pub leads_off_period_ms: u32,

    /// Treatment of the first beat after boot
    pub first_beat: FirstBeatPolicy,

    /// Pairing order used by the HRV estimator
    pub rmssd_order: RmssdOrder,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            hysteresis: DEFAULT_HYSTERESIS,
            refractory_ms: DEFAULT_REFRACTORY_MS,
            filter_alpha: DEFAULT_FILTER_ALPHA,
            adc_full_scale: ADC_FULL_SCALE,
            sample_period_ms: DEFAULT_SAMPLE_PERIOD_MS,
            leads_off_period_ms: DEFAULT_LEADS_OFF_PERIOD_MS,
            first_beat: FirstBeatPolicy::default(),
            rmssd_order: RmssdOrder::default(),
        }
    }
}

impl MonitorConfig {
    /// Level the filtered signal must fall under to re-arm the detector
    #[inline]
    pub fn rearm_level(&self) -> f32 {
        self.threshold - self.hysteresis
    }

    /// Check every value against its valid range
    pub fn validate(&self) -> ConfigResult<()> {
        // Negated comparisons so NaN fails too
        if !(self.threshold > 0.0 && self.threshold <= self.adc_full_scale) {
            return Err(ConfigError::ThresholdOutOfRange {
                threshold: self.threshold,
                full_scale: self.adc_full_scale,
            });
        }

        if !(self.hysteresis >= 0.0 && self.hysteresis < self.threshold) {
            return Err(ConfigError::HysteresisOutOfRange {
                hysteresis: self.hysteresis,
                threshold: self.threshold,
            });
        }

        if !(self.filter_alpha >= 0.0 && self.filter_alpha < 1.0) {
            return Err(ConfigError::FilterCoefficientOutOfRange { alpha: self.filter_alpha });
        }

        if self.sample_period_ms == 0 {
            return Err(ConfigError::ZeroSamplePeriod);
        }

        if self.leads_off_period_ms < self.sample_period_ms {
            return Err(ConfigError::LeadsOffPeriodTooShort {
                leads_off_ms: self.leads_off_period_ms,
                sample_ms: self.sample_period_ms,
            });
        }

        Ok(())
    }

    /// Load and validate a JSON document; missing fields take defaults
    #[cfg(feature = "std")]
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            ecg_warn!("rejecting config document: {}", e);
            ConfigError::Malformed { reason: "invalid JSON monitor config" }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Set the detection threshold
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the re-arm hysteresis
    pub fn with_hysteresis(mut self, hysteresis: f32) -> Self {
        self.hysteresis = hysteresis;
        self
    }

    /// Set the refractory period
    pub fn with_refractory_ms(mut self, refractory_ms: u32) -> Self {
        self.refractory_ms = refractory_ms;
        self
    }

    /// Set the EMA coefficient
    pub fn with_filter_alpha(mut self, alpha: f32) -> Self {
        self.filter_alpha = alpha;
        self
    }

    /// Set both poll periods
    pub fn with_periods(mut self, sample_period_ms: u32, leads_off_period_ms: u32) -> Self {
        self.sample_period_ms = sample_period_ms;
        self.leads_off_period_ms = leads_off_period_ms;
        self
    }

    /// Set the first-beat policy
    pub fn with_first_beat(mut self, policy: FirstBeatPolicy) -> Self {
        self.first_beat = policy;
        self
    }

    /// Set the RMSSD pairing order
    pub fn with_rmssd_order(mut self, order: RmssdOrder) -> Self {
        self.rmssd_order = order;
        self
    }
}
