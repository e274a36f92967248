//! Rolling history buffers and the per-run dataset.
//!
//! Each signal keeps its most recent [`HISTORY_DEPTH`] samples in a
//! fixed-capacity FIFO: once full, the oldest sample is evicted in O(1)
//! (ring buffer, no reordering). The observation/export layer reads these
//! chronologically, oldest first.

use heapless::Deque;

/// Samples retained per signal.
pub const HISTORY_DEPTH: usize = 20;

/// Fixed-capacity FIFO of the most recent samples, oldest → newest.
#[derive(Debug, Default, Clone)]
pub struct History {
    buf: Deque<f64, HISTORY_DEPTH>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample, evicting the oldest once at capacity.
    pub fn push(&mut self, value: f64) {
        if self.buf.is_full() {
            let _ = self.buf.pop_front();
        }
        // Cannot fail: a slot was just freed if the deque was full.
        let _ = self.buf.push_back(value);
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Newest sample, if any.
    pub fn last(&self) -> Option<f64> {
        self.buf.back().copied()
    }

    /// The two newest samples as `(second_last, last)`.
    pub fn last_two(&self) -> Option<(f64, f64)> {
        let len = self.buf.len();
        if len < 2 {
            return None;
        }
        let mut newest = self.iter().skip(len - 2);
        let second_last = newest.next()?;
        let last = newest.next()?;
        Some((second_last, last))
    }

    /// Chronological iterator, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.buf.iter().copied()
    }

    /// Chronological copy, for the export layer.
    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }
}

/// Discrete derivative over the last two samples of `values` against the
/// last two of `times`.
///
/// `None` when either buffer holds fewer than two samples, or when the
/// time axis fails to advance (a zero or negative interval must degrade
/// to "unavailable", not propagate infinity or a sign-flipped rate).
pub fn derivative(values: &History, times: &History) -> Option<f64> {
    let (v0, v1) = values.last_two()?;
    let (t0, t1) = times.last_two()?;
    let dt = t1 - t0;
    if dt <= 0.0 {
        return None;
    }
    Some((v1 - v0) / dt)
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// Everything one run of the polling loop accumulates.
///
/// Owned by the loop, mutated only inside a tick, handed back to the menu
/// layer (read-only) for observation and export when the run stops.
#[derive(Debug, Default, Clone)]
pub struct Dataset {
    /// Last good temperature reading (°C, rounded to a whole degree).
    pub current_temp: f64,
    /// Last good illuminance reading (lux).
    pub current_lux: f64,

    pub temperature: History,
    /// Temperature derivative (°C per second).
    pub gradient: History,
    pub illuminance: History,
    /// Cumulative elapsed seconds, one entry per completed tick.
    pub time: History,
}

impl Dataset {
    /// Fresh dataset. The time axis is seeded with zero so the first
    /// completed tick has a previous timestamp to accumulate onto.
    pub fn new() -> Self {
        let mut ds = Self::default();
        ds.time.push(0.0);
        ds
    }
}
