//! Sensor subsystem — divider maths and the aggregating [`SensorHub`].
//!
//! The hub reads raw counts through the [`BoardPort`] and converts them to
//! physical units. A sensor fault (open/short circuit) is recovered by the
//! caller — skip the signal this tick, retain the last good value — so the
//! conversion functions return a typed [`SensorFault`] rather than
//! clamping to a sentinel.

pub mod ldr;
pub mod thermistor;

use crate::board::{ADC_MAX, BoardPort};
use crate::error::{Result, SensorFault};
use crate::pins::PinMap;

/// Divider resistance (kΩ) from a raw 10-bit reading.
///
/// `volts = raw · 5 / 1023`, then `R = (volts · 10 / 5) / (1 − volts / 5)`
/// for the fixed 10 kΩ series resistor. Faults at either rail: 0 V means
/// an open circuit; the full rail makes the expression divide by zero.
fn divider_resistance(raw: u16) -> core::result::Result<f64, SensorFault> {
    let volts = f64::from(raw) * 5.0 / f64::from(ADC_MAX);
    if volts <= 0.0 {
        return Err(SensorFault::OpenCircuit);
    }
    if volts >= 5.0 {
        return Err(SensorFault::ShortCircuit);
    }
    Ok((volts * 10.0 / 5.0) / (1.0 - volts / 5.0))
}

/// Reads both analog channels and applies the transfer functions.
#[derive(Debug, Clone, Copy)]
pub struct SensorHub {
    therm_channel: u8,
    light_channel: u8,
}

impl SensorHub {
    pub fn new(pins: &PinMap) -> Self {
        Self {
            therm_channel: pins.therm_channel,
            light_channel: pins.light_channel,
        }
    }

    /// Current temperature in whole degrees Celsius.
    ///
    /// `Err(Error::Sensor(..))` is a per-tick condition the loop absorbs;
    /// `Err(Error::Board(..))` means the link itself failed.
    pub fn sample_temperature(&self, board: &mut impl BoardPort) -> Result<f64> {
        let raw = board.read_analog(self.therm_channel)?;
        Ok(thermistor::convert(raw)?)
    }

    /// Current illuminance in lux.
    pub fn sample_illuminance(&self, board: &mut impl BoardPort) -> Result<f64> {
        let raw = board.read_analog(self.light_channel)?;
        Ok(ldr::convert(raw)?)
    }
}
