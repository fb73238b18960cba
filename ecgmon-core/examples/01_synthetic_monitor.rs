//! Example 01: Synthetic Monitor
//!
//! This example demonstrates how to:
//! - Build a monitor from a validated configuration
//! - Feed it a synthetic lead signal one tick at a time
//! - Read heart rate and RMSSD from the telemetry stream
//! - See the leads-off gate pause detection without losing history

use ecgmon_core::constants::{MAX_PLAUSIBLE_BPM, MIN_PLAUSIBLE_BPM};
use ecgmon_core::{
    ContactStatus, Detection, FirstBeatPolicy, Monitor, MonitorConfig, TelemetryRecord, Timestamp,
};

/// RR intervals (ms) of the synthetic rhythm, roughly 72 bpm with sinus arrhythmia
const RHYTHM: [u32; 12] = [820, 840, 860, 840, 810, 790, 780, 800, 830, 850, 830, 810];

fn main() {
    println!("=== EcgMon Synthetic Monitor Example ===\n");

    let config = MonitorConfig::default()
        .with_threshold(560.0)
        .with_first_beat(FirstBeatPolicy::Anchor);

    let mut monitor = match Monitor::with_config(config) {
        Ok(monitor) => monitor,
        Err(e) => {
            println!("Invalid configuration: {}", e);
            return;
        }
    };

    let onsets = onsets(600, &RHYTHM);
    let end = onsets.last().copied().unwrap_or(0) + 600;

    // Pads come off for a second and a half in the middle of the session
    let detached_from = 5_000;
    let detached_until = 6_500;

    let mut now: Timestamp = 0;
    let mut leads_off_ticks = 0;

    while now < end {
        let contact = if (detached_from..detached_until).contains(&now) {
            ContactStatus::from_lines(true, false)
        } else {
            ContactStatus::Attached
        };

        let tick = monitor.tick(now, lead_value(now, &onsets), contact);

        match (&tick.detection, &tick.record) {
            (Detection::Anchored { timestamp }, _) => {
                println!("t={:>5}ms  first R wave, timeline anchored at {}", now, timestamp);
            }
            (Detection::Beat(event), TelemetryRecord::Beat { hrv, .. }) => {
                println!(
                    "t={:>5}ms  beat  rr={:>4}ms  bpm={:>6.2}  rmssd={:>6.2}ms  line={}",
                    now,
                    event.rr_interval_ms,
                    event.bpm,
                    hrv,
                    tick.record
                );
                if !(MIN_PLAUSIBLE_BPM..=MAX_PLAUSIBLE_BPM).contains(&event.bpm) {
                    println!(
                        "           rate outside {}-{} bpm, check electrode placement",
                        MIN_PLAUSIBLE_BPM, MAX_PLAUSIBLE_BPM
                    );
                }
            }
            (_, TelemetryRecord::LeadsOff) => {
                if leads_off_ticks == 0 {
                    println!("t={:>5}ms  leads off, line={}", now, tick.record);
                }
                leads_off_ticks += 1;
            }
            _ => {}
        }

        now += tick.next_poll_ms;
    }

    println!("\nSession summary:");
    println!("  ticks:           {}", monitor.tick_count());
    println!("  beats measured:  {}", monitor.beat_count());
    println!("  leads-off ticks: {}", leads_off_ticks);
    println!("  disconnects:     {}", monitor.gate().disconnect_count());
    println!("  intervals held:  {}/{}", monitor.history().len(), monitor.history().capacity());
    println!("  final RMSSD:     {:.2} ms", monitor.hrv());
    if let Some(bpm) = monitor.bpm() {
        println!("  last rate:       {:.1} bpm", bpm);
    }
}

/// R-wave onsets starting at `first` and following `rhythm`
fn onsets(first: Timestamp, rhythm: &[u32]) -> Vec<Timestamp> {
    let mut t = first;
    let mut out = vec![t];
    for rr in rhythm {
        t += rr;
        out.push(t);
    }
    out
}

/// Baseline with a small T wave and a sharp R wave after each onset
fn lead_value(t: Timestamp, onsets: &[Timestamp]) -> f32 {
    let baseline = 410.0;
    let since = onsets
        .iter()
        .rev()
        .find(|&&onset| onset <= t)
        .map(|&onset| t - onset);

    match since {
        Some(0..=9) => 700.0,
        Some(10..=29) => 860.0,
        Some(30..=39) => 520.0,
        Some(200..=299) => baseline + 60.0,
        _ => baseline,
    }
}
