//! Board I/O port — the boundary between the control core and the
//! physical (or simulated) board.
//!
//! ```text
//!   SimBoard / serial adapter ──▶ BoardPort ──▶ sensors · render · poll
//! ```
//!
//! The upstream link models reads/writes as infallible; the port wraps
//! them in [`BoardError`] anyway so a lost link surfaces as a recoverable
//! error instead of a panic.

use std::time::{Duration, Instant};

use crate::error::BoardError;
use crate::sensors::{ldr, thermistor};

/// Full scale of the board's 10-bit ADC.
pub const ADC_MAX: u16 = 1023;

/// Synchronous board access. All hardware writes are blocking; the
/// polling loop owns the only handle, so no locking is needed.
pub trait BoardPort {
    /// Read a raw 10-bit value (0–1023) from an analog channel.
    fn read_analog(&mut self, channel: u8) -> Result<u16, BoardError>;

    /// Drive a digital pin high or low.
    fn write_digital(&mut self, pin: u8, high: bool) -> Result<(), BoardError>;

    /// Block for the given dwell. Strobe timing rides on this, so
    /// implementations must not return early.
    fn delay(&mut self, dwell: Duration);
}

// ---------------------------------------------------------------------------
// Simulated board
// ---------------------------------------------------------------------------

/// Host-side board with a deterministic synthetic environment.
///
/// Temperature drifts sinusoidally around the comfort band and the light
/// level follows a slower wave across the fan threshold, so every code
/// path (classification tiers, fan speeds, rapid changes) is exercised in
/// a plain desktop run.
pub struct SimBoard {
    started: Instant,
    /// Last commanded level per digital pin, for debug inspection.
    pin_levels: [bool; 64],
}

impl SimBoard {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            pin_levels: [false; 64],
        }
    }

    /// Level last written to `pin` (false if never written).
    pub fn pin_level(&self, pin: u8) -> bool {
        self.pin_levels.get(pin as usize).copied().unwrap_or(false)
    }

    /// Synthetic ambient temperature (°C) at `t` seconds after start.
    fn ambient_celsius(t: f64) -> f64 {
        19.0 + 8.0 * (t / 45.0 * core::f64::consts::TAU).sin()
    }

    /// Synthetic illuminance (lux) at `t` seconds after start.
    fn ambient_lux(t: f64) -> f64 {
        900.0 + 400.0 * (t / 70.0 * core::f64::consts::TAU).sin()
    }

    /// Invert the divider + exponential fit back to a raw ADC count.
    fn raw_from_resistance(res: f64) -> u16 {
        // res = 2V / (1 - V/5)  ⇒  V = 5·res / (10 + res)
        let volts = 5.0 * res / (10.0 + res);
        let raw = (volts * f64::from(ADC_MAX) / 5.0).round();
        raw.clamp(1.0, f64::from(ADC_MAX - 1)) as u16
    }
}

impl Default for SimBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardPort for SimBoard {
    fn read_analog(&mut self, channel: u8) -> Result<u16, BoardError> {
        let t = self.started.elapsed().as_secs_f64();
        match channel {
            0 => {
                let res = thermistor::resistance_for_celsius(Self::ambient_celsius(t));
                Ok(Self::raw_from_resistance(res))
            }
            1 => {
                let res = ldr::resistance_for_lux(Self::ambient_lux(t));
                Ok(Self::raw_from_resistance(res))
            }
            other => Err(BoardError::ReadFailed(other)),
        }
    }

    fn write_digital(&mut self, pin: u8, high: bool) -> Result<(), BoardError> {
        match self.pin_levels.get_mut(pin as usize) {
            Some(level) => {
                *level = high;
                Ok(())
            }
            None => Err(BoardError::WriteFailed(pin)),
        }
    }

    fn delay(&mut self, dwell: Duration) {
        if !dwell.is_zero() {
            std::thread::sleep(dwell);
        }
    }
}
