//! Sample acquisition
//!
//! The monitor consumes one scalar sample plus a contact flag per tick.
//! Where that sample comes from (an ADC channel, a lead-vector computed
//! from several electrodes, a recorded trace) is behind [`SampleSource`].
//!
//! Sources are pull-based and use `nb::Result`, the same non-blocking model
//! embedded-hal drivers use:
//!
//! - `Ok(sample)` - a sample is due and was read
//! - `Err(nb::Error::WouldBlock)` - nothing due yet, poll again later
//! - `Err(nb::Error::Other(e))` - transport failure or end of a recording
//!
//! ## Module Organization
//!
//! - `memory` - In-memory replay for tests and examples
//! - `csv` - Recorded traces from disk (requires `std`)
//!
//! [`Frontend`] ties a source, a clock and a [`Monitor`] into the polling
//! loop the firmware runs.

use crate::conditioner::{Conditioner, EmaFilter};
use crate::constants::RR_HISTORY_CAPACITY;
use crate::errors::SourceError;
use crate::gate::ContactStatus;
use crate::monitor::{Monitor, Tick};
use crate::time::{TimeSource, Timestamp};

pub mod memory;

#[cfg(feature = "std")]
pub mod csv;

pub use memory::MemorySource;

#[cfg(feature = "std")]
pub use csv::{CsvReplaySource, ReplayStats};

/// One acquired sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSample {
    /// Lead value in ADC counts
    pub value: f32,
    /// Electrode contact when the sample was taken
    pub contact: ContactStatus,
    /// Capture time for recorded samples; live sources leave this `None`
    pub recorded_at: Option<Timestamp>,
}

impl RawSample {
    /// Live sample with good contact
    pub const fn attached(value: f32) -> Self {
        Self {
            value,
            contact: ContactStatus::Attached,
            recorded_at: None,
        }
    }

    /// Live sample with the given lead-off lines
    pub const fn with_lines(value: f32, lo_plus: bool, lo_minus: bool) -> Self {
        Self {
            value,
            contact: ContactStatus::from_lines(lo_plus, lo_minus),
            recorded_at: None,
        }
    }

    /// Stamp the sample with its capture time
    pub fn at(mut self, timestamp: Timestamp) -> Self {
        self.recorded_at = Some(timestamp);
        self
    }
}

/// Pull-based source of samples
///
/// ## Example Implementation
///
/// ```rust
/// use ecgmon_core::{RawSample, SampleSource, SourceError};
///
/// struct AdcChannel {
///     ready: bool,
///     last: u16,
/// }
///
/// impl SampleSource for AdcChannel {
///     type Error = ();
///
///     fn poll_sample(&mut self) -> nb::Result<RawSample, SourceError<()>> {
///         if !self.ready {
///             return Err(nb::Error::WouldBlock);
///         }
///         self.ready = false;
///         Ok(RawSample::attached(self.last as f32))
///     }
/// }
/// ```
pub trait SampleSource {
    /// Transport error type
    type Error;

    /// Attempt to read the next sample
    ///
    /// Finite sources return `SourceError::EndOfStream` once exhausted and
    /// keep returning it.
    fn poll_sample(&mut self) -> nb::Result<RawSample, SourceError<Self::Error>>;
}

impl<S: SampleSource + ?Sized> SampleSource for &mut S {
    type Error = S::Error;

    fn poll_sample(&mut self) -> nb::Result<RawSample, SourceError<Self::Error>> {
        (**self).poll_sample()
    }
}

/// Source, clock and monitor bound into one polling loop
///
/// ```rust
/// use ecgmon_core::{Frontend, MemorySource, Monitor, MonitorConfig, RawSample};
/// use ecgmon_core::time::FixedTime;
///
/// let trace = [RawSample::attached(400.0).at(0), RawSample::attached(410.0).at(10)];
/// let monitor = Monitor::with_config(MonitorConfig::default())?;
/// let mut frontend = Frontend::new(MemorySource::new(&trace), FixedTime::new(0), monitor);
///
/// let ticks = frontend.replay(|_tick| {}).unwrap();
/// assert_eq!(ticks, 2);
/// # Ok::<(), ecgmon_core::ConfigError>(())
/// ```
pub struct Frontend<S, T, C = EmaFilter, const N: usize = RR_HISTORY_CAPACITY> {
    source: S,
    clock: T,
    monitor: Monitor<C, N>,
}

impl<S, T, C, const N: usize> Frontend<S, T, C, N>
where
    S: SampleSource,
    T: TimeSource,
    C: Conditioner,
{
    /// Bind a source and clock to a monitor
    pub fn new(source: S, clock: T, monitor: Monitor<C, N>) -> Self {
        Self { source, clock, monitor }
    }

    /// Run one tick if a sample is due
    ///
    /// Recorded samples are processed at their capture time; live samples
    /// at the clock's current time.
    pub fn poll(&mut self) -> nb::Result<Tick, SourceError<S::Error>> {
        let sample = self.source.poll_sample()?;
        let now = sample.recorded_at.unwrap_or_else(|| self.clock.now());
        Ok(self.monitor.tick(now, sample.value, sample.contact))
    }

    /// Drive a finite source to its end, handing every tick to `sink`
    ///
    /// Returns the number of ticks processed. Spins on `WouldBlock`, so
    /// only use it with sources that eventually end.
    pub fn replay<F>(&mut self, mut sink: F) -> Result<usize, SourceError<S::Error>>
    where
        F: FnMut(&Tick),
    {
        let mut count = 0;
        loop {
            match self.poll() {
                Ok(tick) => {
                    sink(&tick);
                    count += 1;
                }
                Err(nb::Error::WouldBlock) => continue,
                Err(nb::Error::Other(SourceError::EndOfStream)) => return Ok(count),
                Err(nb::Error::Other(e)) => return Err(e),
            }
        }
    }

    /// The monitor and its state
    pub fn monitor(&self) -> &Monitor<C, N> {
        &self.monitor
    }

    /// Mutable access to the monitor
    pub fn monitor_mut(&mut self) -> &mut Monitor<C, N> {
        &mut self.monitor
    }

    /// The sample source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Split back into parts
    pub fn into_parts(self) -> (S, T, Monitor<C, N>) {
        (self.source, self.clock, self.monitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MonitorConfig;
    use crate::telemetry::TelemetryRecord;
    use crate::time::FixedTime;

    /// Live source that yields one queued value per poll
    struct Queued {
        values: heapless::Deque<f32, 8>,
    }

    impl SampleSource for Queued {
        type Error = ();

        fn poll_sample(&mut self) -> nb::Result<RawSample, SourceError<()>> {
            match self.values.pop_front() {
                Some(v) => Ok(RawSample::attached(v)),
                None => Err(nb::Error::WouldBlock),
            }
        }
    }

    #[test]
    fn live_samples_use_clock() {
        let clock = FixedTime::new(1_000);
        let mut values = heapless::Deque::new();
        values.push_back(400.0).unwrap();
        values.push_back(410.0).unwrap();

        let monitor = Monitor::with_config(MonitorConfig::default()).unwrap();
        let mut frontend = Frontend::new(Queued { values }, &clock, monitor);

        let tick = frontend.poll().unwrap();
        assert_eq!(tick.timestamp, 1_000);

        clock.advance(10);
        let tick = frontend.poll().unwrap();
        assert_eq!(tick.timestamp, 1_010);

        assert!(matches!(frontend.poll(), Err(nb::Error::WouldBlock)));
    }

    #[test]
    fn recorded_samples_keep_their_time() {
        let trace = [
            RawSample::attached(400.0).at(20),
            RawSample::with_lines(400.0, true, false).at(30),
        ];
        let monitor = Monitor::with_config(MonitorConfig::default()).unwrap();
        let mut frontend = Frontend::new(MemorySource::new(&trace), FixedTime::new(5_000), monitor);

        let mut seen = heapless::Vec::<(Timestamp, bool), 4>::new();
        let count = frontend
            .replay(|tick| {
                seen.push((tick.timestamp, tick.record == TelemetryRecord::LeadsOff)).unwrap();
            })
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(seen.as_slice(), &[(20, false), (30, true)]);
    }
}
