//! Tunable parameters.
//!
//! [`Settings`] is what the operator can change at runtime through the
//! maintenance menu (PIN-gated). [`Timing`] collects every dwell and
//! strobe constant in one place so tests can shrink them to near zero;
//! the defaults are what the hardware needs for flicker-free output.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::classify::FanSpeed;
use crate::error::Error;

/// Bounds the operator may configure, inclusive (degrees Celsius).
pub const BOUND_MIN: i32 = 5;
pub const BOUND_MAX: i32 = 30;

/// Where the effective fan speed comes from each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FanSpeedMode {
    /// Recompute from illuminance every tick (historical behaviour: the
    /// light sensor overrides whatever the operator configured).
    #[default]
    Auto,
    /// Honour the operator-configured speed.
    Manual,
}

/// Operator-facing settings, owned by the menu layer and passed by
/// reference into each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Lower edge of the acceptable temperature band (°C).
    pub low_bound: i32,
    /// Upper edge of the acceptable temperature band (°C).
    pub high_bound: i32,
    /// Configured ventilation speed (effective only in `Manual` mode).
    pub fan_speed: FanSpeed,
    /// Auto (light-sensor driven) or Manual fan speed.
    pub fan_speed_mode: FanSpeedMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            low_bound: 18,
            high_bound: 20,
            fan_speed: FanSpeed::Low,
            fan_speed_mode: FanSpeedMode::Auto,
        }
    }
}

impl Settings {
    /// Validate the band invariant. Called at the menu boundary so the
    /// polling loop never sees an invalid value.
    pub fn validate(&self) -> Result<(), Error> {
        if self.low_bound >= self.high_bound {
            return Err(Error::Config("low bound must be below high bound"));
        }
        if !(BOUND_MIN..=BOUND_MAX).contains(&self.low_bound)
            || !(BOUND_MIN..=BOUND_MAX).contains(&self.high_bound)
        {
            return Err(Error::Config("bounds must lie within [5, 30]"));
        }
        Ok(())
    }

    /// Midpoint of the configured band.
    pub fn midpoint(&self) -> f64 {
        f64::from(self.low_bound + self.high_bound) / 2.0
    }
}

/// Every wall-clock constant the loop and renderers consume.
///
/// These are blocking dwells — they directly shape what the eye sees on
/// the multiplexed display, so the defaults are not arbitrary.
#[derive(Debug, Clone, Copy)]
pub struct Timing {
    /// Half-period of a shift/latch clock pulse.
    pub clock_pulse: Duration,
    /// How long each digit-enable line is held low per scan pass.
    pub digit_dwell: Duration,
    /// Hold time per 4-character window while scrolling a long message.
    pub scroll_window: Duration,
    /// How long the current temperature stays on the display each tick.
    pub message_dwell: Duration,
    /// How long the rapid-change alert message and pin stay active.
    pub alert_dwell: Duration,
    /// Dwell used when blanking the display.
    pub blank_dwell: Duration,
    /// Sleep between ticks.
    pub tick_sleep: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            clock_pulse: Duration::from_micros(100),
            digit_dwell: Duration::from_micros(100),
            scroll_window: Duration::from_millis(200),
            message_dwell: Duration::from_millis(2500),
            alert_dwell: Duration::from_secs(1),
            blank_dwell: Duration::from_millis(1),
            tick_sleep: Duration::from_millis(5),
        }
    }
}

impl Timing {
    /// Effectively-zero dwells for tests and dry runs.
    pub fn instant() -> Self {
        Self {
            clock_pulse: Duration::ZERO,
            digit_dwell: Duration::ZERO,
            scroll_window: Duration::ZERO,
            message_dwell: Duration::ZERO,
            alert_dwell: Duration::ZERO,
            blank_dwell: Duration::ZERO,
            tick_sleep: Duration::ZERO,
        }
    }
}
