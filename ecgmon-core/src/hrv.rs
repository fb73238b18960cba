//! HRV estimation (RMSSD)
//!
//! Root mean square of successive differences over the RR history:
//!
//! ```text
//! RMSSD = sqrt( Σ (rr[i] − rr[i+1])² / pairs )
//! ```
//!
//! Only pairs where both intervals are recorded count. With fewer than one
//! valid pair the result is 0.0, which is the designed cold-start value and
//! not an error: telemetry shows "computed, not enough history yet".
//!
//! Pairing follows [`RmssdOrder`]. `Chronological` walks intervals in the
//! order they were recorded. `Storage` walks physical slots `0..N-1` and
//! skips zero slots, so after a wrap it also pairs the newest interval with
//! the oldest one.

use libm::sqrtf;

use crate::config::RmssdOrder;
use crate::history::RrHistory;

/// RMSSD in milliseconds, 0.0 when no valid pair exists
pub fn rmssd<const N: usize>(history: &RrHistory<N>, order: RmssdOrder) -> f32 {
    let (sum_sq, pairs) = match order {
        RmssdOrder::Chronological => sum_squared_diffs(history.iter()),
        RmssdOrder::Storage => sum_squared_diffs_by_slot(history.slots()),
    };

    if pairs == 0 {
        return 0.0;
    }

    sqrtf((sum_sq / pairs as f64) as f32)
}

/// Accumulated in f64: a single 2 s difference squared is already 4e6
fn sum_squared_diffs<I: Iterator<Item = u32>>(mut intervals: I) -> (f64, u32) {
    let Some(mut prev) = intervals.next() else {
        return (0.0, 0);
    };

    let mut sum = 0.0;
    let mut pairs = 0;
    for next in intervals {
        let diff = prev as f64 - next as f64;
        sum += diff * diff;
        pairs += 1;
        prev = next;
    }

    (sum, pairs)
}

fn sum_squared_diffs_by_slot(slots: &[u32]) -> (f64, u32) {
    let mut sum = 0.0;
    let mut pairs = 0;

    for window in slots.windows(2) {
        let (a, b) = (window[0], window[1]);
        if a > 0 && b > 0 {
            let diff = a as f64 - b as f64;
            sum += diff * diff;
            pairs += 1;
        }
    }

    (sum, pairs)
}
