//! Temperature and fan-speed classification.
//!
//! The configured `[low, high]` band splits the temperature axis into nine
//! tiers: three neutral tiers inside the band (around its midpoint) and
//! three escalating tiers on each side, stepping at ±5 and ±10 degrees
//! beyond the band edges. Comparisons are strict throughout, so a reading
//! exactly on a boundary always falls to the less extreme tier.

use serde::{Deserialize, Serialize};

use crate::config::{FanSpeedMode, Settings};

/// Illuminance above which the fan runs at high speed (lux).
pub const FAN_LUX_THRESHOLD: f64 = 1000.0;

/// Nine-level severity, ordered coldest → hottest so that tier
/// comparisons read naturally (`TooCold < … < Neutral2 < … < TooHot`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Classification {
    TooCold,
    Cold,
    SlightlyCold,
    Neutral1,
    Neutral2,
    Neutral3,
    SlightlyHot,
    Hot,
    TooHot,
}

impl Classification {
    /// True for the three tiers above the band.
    pub fn is_hot(self) -> bool {
        self >= Self::SlightlyHot
    }

    /// True for the three tiers below the band.
    pub fn is_cold(self) -> bool {
        self <= Self::SlightlyCold
    }
}

/// Ventilation speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FanSpeed {
    Low,
    High,
}

/// Classify a temperature against the configured band.
pub fn classify_temperature(current: f64, low: i32, high: i32) -> Classification {
    debug_assert!(low < high, "settings invariant violated: {low} >= {high}");
    let low_f = f64::from(low);
    let high_f = f64::from(high);

    if current > high_f {
        if current > high_f + 10.0 {
            Classification::TooHot
        } else if current > high_f + 5.0 {
            Classification::Hot
        } else {
            Classification::SlightlyHot
        }
    } else if current < low_f {
        if current < low_f - 10.0 {
            Classification::TooCold
        } else if current < low_f - 5.0 {
            Classification::Cold
        } else {
            Classification::SlightlyCold
        }
    } else {
        let midpoint = (low_f + high_f) / 2.0;
        if current > midpoint {
            Classification::Neutral3
        } else if current < midpoint {
            Classification::Neutral1
        } else {
            Classification::Neutral2
        }
    }
}

/// Fan speed derived from illuminance alone.
pub fn classify_fan_speed(lux: f64) -> FanSpeed {
    if lux > FAN_LUX_THRESHOLD {
        FanSpeed::High
    } else {
        FanSpeed::Low
    }
}

/// The fan speed actually applied this tick.
///
/// In `Auto` mode the light sensor decides every tick, overriding whatever
/// the operator configured; `Manual` honours the configured speed.
pub fn effective_fan_speed(settings: &Settings, lux: f64) -> FanSpeed {
    match settings.fan_speed_mode {
        FanSpeedMode::Auto => classify_fan_speed(lux),
        FanSpeedMode::Manual => settings.fan_speed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn far_above_band_is_too_hot() {
        // Band [18, 20]: 31 > 20 + 10.
        assert_eq!(classify_temperature(31.0, 18, 20), Classification::TooHot);
    }

    #[test]
    fn hot_tiers_step_at_five_and_ten() {
        assert_eq!(classify_temperature(26.0, 18, 20), Classification::Hot);
        assert_eq!(
            classify_temperature(23.0, 18, 20),
            Classification::SlightlyHot
        );
        // Exactly on a step boundary falls to the less extreme tier.
        assert_eq!(
            classify_temperature(25.0, 18, 20),
            Classification::SlightlyHot
        );
        assert_eq!(classify_temperature(30.0, 18, 20), Classification::Hot);
    }

    #[test]
    fn cold_tiers_mirror_hot_tiers() {
        assert_eq!(classify_temperature(7.0, 18, 20), Classification::TooCold);
        assert_eq!(classify_temperature(12.0, 18, 20), Classification::Cold);
        assert_eq!(
            classify_temperature(16.0, 18, 20),
            Classification::SlightlyCold
        );
        assert_eq!(
            classify_temperature(13.0, 18, 20),
            Classification::SlightlyCold
        );
    }

    #[test]
    fn in_band_tiers_split_at_midpoint() {
        // Band [18, 20], midpoint 19.
        assert_eq!(classify_temperature(18.0, 18, 20), Classification::Neutral1);
        assert_eq!(classify_temperature(19.0, 18, 20), Classification::Neutral2);
        assert_eq!(classify_temperature(20.0, 18, 20), Classification::Neutral3);
    }

    #[test]
    fn band_edges_stay_inside_the_band() {
        assert!(!classify_temperature(20.0, 18, 20).is_hot());
        assert!(!classify_temperature(18.0, 18, 20).is_cold());
    }

    #[test]
    fn ordering_matches_severity() {
        assert!(Classification::TooHot > Classification::Hot);
        assert!(Classification::Hot > Classification::Neutral3);
        assert!(Classification::Neutral1 > Classification::SlightlyCold);
        assert!(Classification::Cold > Classification::TooCold);
    }

    #[test]
    fn fan_threshold_is_strict() {
        assert_eq!(classify_fan_speed(1500.0), FanSpeed::High);
        assert_eq!(classify_fan_speed(500.0), FanSpeed::Low);
        assert_eq!(classify_fan_speed(1000.0), FanSpeed::Low);
    }

    #[test]
    fn auto_mode_overrides_configured_speed() {
        let settings = Settings {
            fan_speed: FanSpeed::Low,
            ..Settings::default()
        };
        assert_eq!(effective_fan_speed(&settings, 1500.0), FanSpeed::High);
    }

    #[test]
    fn manual_mode_honours_configured_speed() {
        let settings = Settings {
            fan_speed: FanSpeed::High,
            fan_speed_mode: FanSpeedMode::Manual,
            ..Settings::default()
        };
        assert_eq!(effective_fan_speed(&settings, 0.0), FanSpeed::High);
    }
}
