//! Example 02: Replaying a Bench Capture
//!
//! This example demonstrates how to:
//! - Load a monitor configuration from JSON
//! - Replay a recorded CSV trace through a `Frontend`
//! - Print the telemetry lines the serial plotter would receive
//! - Collect replay statistics, including skipped malformed lines
//!
//! Run from the crate directory:
//!
//! ```text
//! cargo run --example 02_csv_replay -- examples/data/session.csv
//! ```

use std::io;

use ecgmon_core::source::CsvReplaySource;
use ecgmon_core::time::MonotonicClock;
use ecgmon_core::{Frontend, Monitor, MonitorConfig, SourceError, TelemetryRecord};

const CONFIG_JSON: &str = r#"{
    "threshold": 550.0,
    "hysteresis": 100.0,
    "refractory_ms": 300,
    "first_beat": "anchor",
    "rmssd_order": "chronological"
}"#;

fn main() {
    println!("=== EcgMon CSV Replay Example ===\n");

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "examples/data/session.csv".to_string());

    if let Err(e) = replay(&path) {
        println!("Replay error: {}", e);
    }
}

fn replay(path: &str) -> Result<(), SourceError<io::Error>> {
    let config = match MonitorConfig::from_json(CONFIG_JSON) {
        Ok(config) => config,
        Err(e) => {
            println!("Invalid configuration: {}", e);
            return Ok(());
        }
    };
    println!(
        "Config: threshold={} re-arm={} refractory={}ms\n",
        config.threshold,
        config.rearm_level(),
        config.refractory_ms
    );

    let monitor = match Monitor::with_config(config) {
        Ok(monitor) => monitor,
        Err(e) => {
            println!("Monitor rejected configuration: {}", e);
            return Ok(());
        }
    };

    let source = CsvReplaySource::open(path)?.with_skip_lines(1);
    let mut frontend = Frontend::new(source, MonotonicClock::new(), monitor);

    let mut waveform_lines = 0;
    let mut leads_off_lines = 0;

    let ticks = frontend.replay(|tick| match tick.record {
        TelemetryRecord::Beat { .. } => println!("{:>6}ms  {}", tick.timestamp, tick.record),
        TelemetryRecord::LeadsOff => {
            if leads_off_lines == 0 {
                println!("{:>6}ms  {}  (leads off)", tick.timestamp, tick.record);
            }
            leads_off_lines += 1;
        }
        TelemetryRecord::Waveform { .. } => waveform_lines += 1,
    })?;

    let stats = frontend.source().stats().clone();
    let monitor = frontend.monitor();

    println!("\nReplay statistics:");
    println!("  lines processed: {}", stats.lines_processed);
    println!("  samples read:    {}", stats.samples_read);
    println!("  parse errors:    {}", stats.parse_errors);
    println!("  ticks:           {}", ticks);
    println!("  waveform lines:  {}", waveform_lines);
    println!("  leads-off lines: {}", leads_off_lines);
    println!("  beats measured:  {}", monitor.beat_count());
    println!("  final RMSSD:     {:.2} ms", monitor.hrv());

    Ok(())
}
