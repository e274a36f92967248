//! 16-LED status bank behind two daisy-chained shift registers.
//!
//! Each tick the bank shows one pattern chosen from the classification
//! tier and the effective fan speed. The selection is an exhaustive match
//! over `(Classification, FanSpeed)`, so adding a tier without a pattern
//! is a compile error rather than a dark panel.

use crate::board::BoardPort;
use crate::classify::{Classification, FanSpeed};
use crate::config::Timing;
use crate::error::BoardError;
use crate::pins::PinMap;

use super::shift::ShiftRegister;

/// One full 16-bit frame for the bank.
///
/// Bit layout, MSB first: bits 15..14 fan-high pair, bits 13..11 heat
/// severity ladder, bits 10..8 neutral ladder, bits 7..5 cold severity
/// ladder, bit 4 rapid-change marker, bit 3 cold-side fan indicator,
/// bits 1..0 hot-side fan indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedPattern {
    TooHotVentLow,
    HotVentLow,
    SlightlyHotVentLow,
    TooHotVentHigh,
    HotVentHigh,
    SlightlyHotVentHigh,
    TooColdVentLow,
    ColdVentLow,
    SlightlyColdVentLow,
    TooColdVentHigh,
    ColdVentHigh,
    SlightlyColdVentHigh,
    NeutralUpper,
    NeutralMid,
    NeutralLower,
    RapidChangeAlert,
    Reset,
}

impl LedPattern {
    /// The 16 output bits for this pattern.
    pub const fn bits(self) -> u16 {
        match self {
            Self::TooHotVentLow /*      */ => 0b0111_1000_0000_0001,
            Self::HotVentLow /*         */ => 0b0101_1000_0000_0001,
            Self::SlightlyHotVentLow /* */ => 0b0100_1000_0000_0001,
            Self::TooHotVentHigh /*     */ => 0b1111_1000_0000_0011,
            Self::HotVentHigh /*        */ => 0b1101_1000_0000_0011,
            Self::SlightlyHotVentHigh /**/ => 0b1100_1000_0000_0011,
            Self::TooColdVentLow /*     */ => 0b0100_0000_1110_1000,
            Self::ColdVentLow /*        */ => 0b0100_0000_0110_1000,
            Self::SlightlyColdVentLow /**/ => 0b0100_0000_0010_1000,
            Self::TooColdVentHigh /*    */ => 0b1100_0000_1111_1000,
            Self::ColdVentHigh /*       */ => 0b1100_0000_0111_1000,
            Self::SlightlyColdVentHigh /**/ => 0b1100_0000_0011_1000,
            Self::NeutralUpper /*       */ => 0b0000_0111_0000_0000,
            Self::NeutralMid /*         */ => 0b0000_0011_0000_0000,
            Self::NeutralLower /*       */ => 0b0000_0001_0000_0000,
            Self::RapidChangeAlert /*   */ => 0b0000_0000_0001_0000,
            Self::Reset /*              */ => 0,
        }
    }

    /// Pattern for a classification tier under the effective fan speed.
    /// Neutral tiers show the same ladder regardless of the fan.
    pub fn select(class: Classification, fan: FanSpeed) -> Self {
        use Classification as C;
        use FanSpeed as F;
        match (class, fan) {
            (C::TooHot, F::Low) => Self::TooHotVentLow,
            (C::Hot, F::Low) => Self::HotVentLow,
            (C::SlightlyHot, F::Low) => Self::SlightlyHotVentLow,
            (C::TooHot, F::High) => Self::TooHotVentHigh,
            (C::Hot, F::High) => Self::HotVentHigh,
            (C::SlightlyHot, F::High) => Self::SlightlyHotVentHigh,
            (C::TooCold, F::Low) => Self::TooColdVentLow,
            (C::Cold, F::Low) => Self::ColdVentLow,
            (C::SlightlyCold, F::Low) => Self::SlightlyColdVentLow,
            (C::TooCold, F::High) => Self::TooColdVentHigh,
            (C::Cold, F::High) => Self::ColdVentHigh,
            (C::SlightlyCold, F::High) => Self::SlightlyColdVentHigh,
            (C::Neutral3, _) => Self::NeutralUpper,
            (C::Neutral2, _) => Self::NeutralMid,
            (C::Neutral1, _) => Self::NeutralLower,
        }
    }
}

/// Driver for the bank.
pub struct LedBank {
    shift: ShiftRegister,
}

impl LedBank {
    pub fn new(pins: &PinMap, timing: &Timing) -> Self {
        Self {
            shift: ShiftRegister::new(pins.led_bank, timing.clock_pulse),
        }
    }

    /// Load and latch a pattern.
    pub fn apply(&self, board: &mut impl BoardPort, pattern: LedPattern) -> Result<(), BoardError> {
        self.shift.load_u16(board, pattern.bits())
    }

    /// All LEDs off.
    pub fn reset(&self, board: &mut impl BoardPort) -> Result<(), BoardError> {
        self.apply(board, LedPattern::Reset)
    }
}
