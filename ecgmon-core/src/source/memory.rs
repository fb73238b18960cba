//! Memory-based sources for testing and replay
//!
//! Useful for:
//! - Unit testing with hand-built traces
//! - Replaying captured sessions
//! - Feeding synthetic waveforms in examples

use core::convert::Infallible;

use super::{RawSample, SampleSource};
use crate::errors::SourceError;

/// Replays a slice of samples, one per poll
///
/// ```rust
/// use ecgmon_core::{MemorySource, RawSample, SampleSource};
///
/// let trace = [RawSample::attached(512.0).at(0), RawSample::attached(530.0).at(10)];
/// let mut source = MemorySource::new(&trace);
///
/// while let Ok(sample) = source.poll_sample() {
///     let _ = sample.value;
/// }
/// assert!(source.is_exhausted());
/// ```
pub struct MemorySource<'a> {
    samples: &'a [RawSample],
    position: usize,
}

impl<'a> MemorySource<'a> {
    /// Create a source over `samples`
    pub fn new(samples: &'a [RawSample]) -> Self {
        Self { samples, position: 0 }
    }

    /// Rewind to the first sample
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Index of the next sample
    pub fn position(&self) -> usize {
        self.position
    }

    /// Whether every sample has been handed out
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.samples.len()
    }

    /// Samples left to replay
    pub fn remaining(&self) -> usize {
        self.samples.len().saturating_sub(self.position)
    }
}

impl<'a> SampleSource for MemorySource<'a> {
    type Error = Infallible;

    fn poll_sample(&mut self) -> nb::Result<RawSample, SourceError<Infallible>> {
        let Some(sample) = self.samples.get(self.position) else {
            return Err(nb::Error::Other(SourceError::EndOfStream));
        };

        self.position += 1;
        Ok(*sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_in_order_then_ends() {
        let trace = [RawSample::attached(1.0), RawSample::attached(2.0)];
        let mut source = MemorySource::new(&trace);

        assert_eq!(source.remaining(), 2);
        assert_eq!(source.poll_sample().unwrap().value, 1.0);
        assert_eq!(source.poll_sample().unwrap().value, 2.0);
        assert!(source.is_exhausted());

        // End of stream is sticky
        for _ in 0..3 {
            assert!(matches!(
                source.poll_sample(),
                Err(nb::Error::Other(SourceError::EndOfStream))
            ));
        }
    }

    #[test]
    fn reset_rewinds() {
        let trace = [RawSample::attached(7.0)];
        let mut source = MemorySource::new(&trace);
        source.poll_sample().unwrap();
        source.reset();
        assert_eq!(source.position(), 0);
        assert_eq!(source.poll_sample().unwrap().value, 7.0);
    }
}
