//! Fixed-Capacity RR Interval History
//!
//! ## Overview
//!
//! Holds the last `N` inter-beat intervals for the HRV estimator. Storage is
//! a plain array sized at compile time, so the history lives inside the
//! [`Monitor`](crate::Monitor) with no allocation.
//!
//! ## Zero Sentinel
//!
//! Slots start at 0 and 0 means "never written". A real RR interval can
//! never be zero: [`push`](RrHistory::push) takes a `NonZeroU32`, and the
//! detector's refractory rule keeps every interval at one millisecond or
//! more. Readers that pair intervals by physical slot, skipping zeros, use
//! [`slots`](RrHistory::slots).
//!
//! ## Memory Layout
//!
//! ```text
//! RrHistory<5> after 7 pushes (a..g):
//! ┌─────┬─────┬─────┬─────┬─────┐
//! │  f  │  g  │  c  │  d  │  e  │  ← physical slots
//! └─────┴─────┴─────┴─────┴─────┘
//!              ↑
//!              └── head = 2 (next write, also the oldest entry)
//!
//! Chronological view: c, d, e, f, g
//! ```

use core::num::NonZeroU32;

use crate::constants::RR_HISTORY_CAPACITY;

/// Circular buffer of RR intervals in milliseconds
///
/// ## Internal Invariants
///
/// - `head < N` (next write position is always valid)
/// - `len <= N`
/// - Slots at chronological positions `0..len` are non-zero, the rest are 0
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RrHistory<const N: usize = RR_HISTORY_CAPACITY> {
    /// Interval per slot, 0 for unfilled
    slots: [u32; N],

    /// Index where the next write will occur
    head: usize,

    /// Number of filled slots, saturates at N
    len: usize,
}

impl<const N: usize> RrHistory<N> {
    /// Creates an empty history with every slot zeroed
    pub const fn new() -> Self {
        Self {
            slots: [0; N],
            head: 0,
            len: 0,
        }
    }

    /// Records an interval, overwriting the oldest once full
    pub fn push(&mut self, interval_ms: NonZeroU32) {
        if N == 0 {
            return;
        }

        self.slots[self.head] = interval_ms.get();
        self.head = (self.head + 1) % N;

        if self.len < N {
            self.len += 1;
        }
    }

    /// Number of recorded intervals
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether every slot holds an interval
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// Total number of slots
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Most recent interval
    pub fn last(&self) -> Option<u32> {
        if self.is_empty() {
            return None;
        }

        let idx = if self.head == 0 { N - 1 } else { self.head - 1 };
        Some(self.slots[idx])
    }

    /// Raw slots in physical order, unfilled slots read 0
    pub fn slots(&self) -> &[u32; N] {
        &self.slots
    }

    /// Recorded intervals from oldest to newest
    pub fn iter(&self) -> RrHistoryIter<'_, N> {
        RrHistoryIter {
            history: self,
            index: 0,
        }
    }

    /// Forget all intervals
    pub fn clear(&mut self) {
        self.slots = [0; N];
        self.head = 0;
        self.len = 0;
    }

    /// Interval at chronological position `index` (0 = oldest)
    ///
    /// Until the buffer fills, data starts at slot 0. Once full, the oldest
    /// entry sits at `head`, the slot about to be overwritten.
    fn get(&self, index: usize) -> Option<u32> {
        if index >= self.len {
            return None;
        }

        let physical = if self.len < N {
            index
        } else {
            (self.head + index) % N
        };

        Some(self.slots[physical])
    }
}

impl<const N: usize> Default for RrHistory<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over recorded intervals, oldest first
pub struct RrHistoryIter<'a, const N: usize> {
    history: &'a RrHistory<N>,
    index: usize,
}

impl<'a, const N: usize> Iterator for RrHistoryIter<'a, N> {
    type Item = u32;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.history.get(self.index)?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.history.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<'a, const N: usize> ExactSizeIterator for RrHistoryIter<'a, N> {}
