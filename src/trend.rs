//! Temperature trend estimation.
//!
//! Works on the gradient history: a change of more than [`RAPID_DELTA`]
//! between the two newest derivative samples flags a rapid rise or fall.
//! The two directions stay separate branches because the alert renderer
//! drives a different pin and message for each.

use crate::history::History;

/// Gradient jump (°C/s between consecutive samples) that counts as rapid.
pub const RAPID_DELTA: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Steady,
    Rising,
    Falling,
}

/// Direction of the current trend, [`TrendDirection::Steady`] when fewer
/// than two gradient samples exist or the jump is within the threshold.
pub fn classify_trend(gradient: &History) -> TrendDirection {
    let Some((second_last, last)) = gradient.last_two() else {
        return TrendDirection::Steady;
    };
    if last - RAPID_DELTA > second_last {
        TrendDirection::Rising
    } else if last + RAPID_DELTA < second_last {
        TrendDirection::Falling
    } else {
        TrendDirection::Steady
    }
}

/// True iff the temperature is changing rapidly in either direction.
pub fn is_rapid_change(gradient: &History) -> bool {
    classify_trend(gradient) != TrendDirection::Steady
}
