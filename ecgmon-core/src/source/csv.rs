//! Recorded traces from CSV
//!
//! Replays captures made on the bench so detector tuning can be checked on
//! a host. One sample per line:
//!
//! ```csv
//! t_ms,value,lo_plus,lo_minus
//! 0,402,0,0
//! 10,405,0,0
//! 20,0,1,0
//! ```
//!
//! Lead-off fields accept `0`/`1` or `false`/`true`. Blank lines and lines
//! starting with `#` are ignored. Malformed lines are counted in
//! [`ReplayStats`] and skipped so one corrupt row does not end a session.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use super::{RawSample, SampleSource};
use crate::errors::SourceError;
use crate::time::Timestamp;

/// Counters for one replay session
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReplayStats {
    /// Samples handed to the caller
    pub samples_read: usize,
    /// Lines consumed, including skipped ones
    pub lines_processed: usize,
    /// Lines rejected by the parser
    pub parse_errors: usize,
}

/// Line-oriented CSV replay source
pub struct CsvReplaySource<R> {
    reader: R,
    line: String,
    skip_lines: usize,
    eof: bool,
    stats: ReplayStats,
}

impl CsvReplaySource<BufReader<File>> {
    /// Open a capture file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SourceError<io::Error>> {
        let file = File::open(path).map_err(SourceError::Transport)?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> CsvReplaySource<R> {
    /// Replay from any buffered reader
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            skip_lines: 0,
            eof: false,
            stats: ReplayStats::default(),
        }
    }

    /// Skip the first `lines` lines (headers)
    pub fn with_skip_lines(mut self, lines: usize) -> Self {
        self.skip_lines = lines;
        self
    }

    /// Session counters
    pub fn stats(&self) -> &ReplayStats {
        &self.stats
    }
}

impl<R: BufRead> SampleSource for CsvReplaySource<R> {
    type Error = io::Error;

    fn poll_sample(&mut self) -> nb::Result<RawSample, SourceError<io::Error>> {
        loop {
            if self.eof {
                return Err(nb::Error::Other(SourceError::EndOfStream));
            }

            self.line.clear();
            let read = self
                .reader
                .read_line(&mut self.line)
                .map_err(|e| nb::Error::Other(SourceError::Transport(e)))?;

            if read == 0 {
                self.eof = true;
                continue;
            }

            self.stats.lines_processed += 1;

            if self.skip_lines > 0 {
                self.skip_lines -= 1;
                continue;
            }

            let text = self.line.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }

            match parse_line(text) {
                Ok(sample) => {
                    self.stats.samples_read += 1;
                    return Ok(sample);
                }
                Err(reason) => {
                    self.stats.parse_errors += 1;
                    ecg_warn!("skipping line {}: {}", self.stats.lines_processed, reason);
                }
            }
        }
    }
}

/// Parse `t_ms,value,lo_plus,lo_minus`
pub fn parse_line(line: &str) -> Result<RawSample, &'static str> {
    let mut fields = line.split(',').map(str::trim);

    let timestamp: Timestamp = fields
        .next()
        .ok_or("missing timestamp")?
        .parse()
        .map_err(|_| "invalid timestamp")?;

    let value: f32 = fields
        .next()
        .ok_or("missing value")?
        .parse()
        .map_err(|_| "invalid value")?;

    if !value.is_finite() {
        return Err("non-finite value");
    }

    let lo_plus = parse_flag(fields.next().ok_or("missing lo_plus")?)?;
    let lo_minus = parse_flag(fields.next().ok_or("missing lo_minus")?)?;

    if fields.next().is_some() {
        return Err("too many fields");
    }

    Ok(RawSample::with_lines(value, lo_plus, lo_minus).at(timestamp))
}

fn parse_flag(field: &str) -> Result<bool, &'static str> {
    match field {
        "0" | "false" => Ok(false),
        "1" | "true" => Ok(true),
        _ => Err("invalid lead-off flag"),
    }
}
