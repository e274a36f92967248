//! Light-dependent resistor transfer function.
//!
//! Same 10 kΩ divider arrangement as the thermistor; resistance maps to
//! illuminance through its own exponential fit. Illuminance stays
//! fractional — only the fan-speed threshold consumes it.

use crate::error::SensorFault;

use super::divider_resistance;

/// Exponential-fit calibration: `L = C · exp(D · R)` with R in kΩ.
const CAL_C: f64 = 1_560.314_960_685_66;
const CAL_D: f64 = -0.000_651_660_320_890_482_8;

/// Convert a raw ADC reading to lux.
pub fn convert(raw: u16) -> Result<f64, SensorFault> {
    let res = divider_resistance(raw)?;
    Ok(CAL_C * (CAL_D * res).exp())
}

/// Inverse of the fit, for the simulated board.
pub fn resistance_for_lux(lux: f64) -> f64 {
    (lux / CAL_C).ln() / CAL_D
}
