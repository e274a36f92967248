//! Thermistor transfer function.
//!
//! The probe sits in a voltage divider with a fixed 10 kΩ series resistor
//! on a 5 V rail, read through the board's 10-bit ADC. Resistance maps to
//! temperature via an exponential fit calibrated against a reference
//! thermometer.

use crate::error::SensorFault;

use super::divider_resistance;

/// Exponential-fit calibration: `T = A · exp(B · R)` with R in kΩ.
const CAL_A: f64 = 83.966_601_613_537_95;
const CAL_B: f64 = -0.116_185_042_196_742;

/// Convert a raw ADC reading to whole degrees Celsius.
///
/// The display and the classification tiers work in whole degrees, so the
/// fit output is rounded here rather than at every consumer.
pub fn convert(raw: u16) -> Result<f64, SensorFault> {
    let res = divider_resistance(raw)?;
    Ok((CAL_A * (CAL_B * res).exp()).round())
}

/// Inverse of the fit: the divider resistance (kΩ) a given temperature
/// would produce. Used by the simulated board to encode an ambient.
pub fn resistance_for_celsius(celsius: f64) -> f64 {
    (celsius / CAL_A).ln() / CAL_B
}
