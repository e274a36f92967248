//! Output rendering: LED bank, seven-segment display, discrete alert LEDs.
//!
//! [`Renderer`] owns the two shift-register drivers and the three discrete
//! alert pins, and presents the polling loop with tick-level operations:
//! show the steady-state status, run the rapid-change alert sequence, and
//! blank everything on shutdown.

pub mod led_bank;
pub mod sevseg;
pub mod shift;

use std::time::Duration;

use log::{debug, warn};

use crate::board::BoardPort;
use crate::cancel::CancelToken;
use crate::classify::{Classification, FanSpeed};
use crate::config::Timing;
use crate::error::{BoardError, Error};
use crate::pins::PinMap;
use crate::trend::TrendDirection;

pub use led_bank::{LedBank, LedPattern};
pub use sevseg::{Glyph, SevenSegment};
pub use shift::ShiftRegister;

pub struct Renderer {
    sevseg: SevenSegment,
    bank: LedBank,
    alert_pin: u8,
    rise_pin: u8,
    fall_pin: u8,
    message_dwell: Duration,
    alert_dwell: Duration,
    blank_dwell: Duration,
}

impl Renderer {
    pub fn new(pins: &PinMap, timing: &Timing) -> Self {
        Self {
            sevseg: SevenSegment::new(pins, timing),
            bank: LedBank::new(pins, timing),
            alert_pin: pins.alert,
            rise_pin: pins.rise,
            fall_pin: pins.fall,
            message_dwell: timing.message_dwell,
            alert_dwell: timing.alert_dwell,
            blank_dwell: timing.blank_dwell,
        }
    }

    /// Tick-start blank: shift the reset frame and clear the display so
    /// the previous tick's state never lingers through this tick's alert
    /// sequence or frame.
    pub fn begin_tick(&self, board: &mut impl BoardPort) -> Result<(), BoardError> {
        self.bank.reset(board)?;
        self.sevseg.clear(board)
    }

    /// Steady-state output for one tick: the LED bank shows the tier and
    /// fan frame, the display dwells on the current temperature. Callers
    /// blank via [`begin_tick`](Self::begin_tick) first.
    ///
    /// A message character without a glyph is logged and skipped — the
    /// LEDs already carry the state, a blank display beats a dead tick.
    /// Board errors propagate.
    pub fn render_tick(
        &self,
        board: &mut impl BoardPort,
        class: Classification,
        fan: FanSpeed,
        current_temp: f64,
        cancel: &CancelToken,
    ) -> Result<(), BoardError> {
        self.bank.apply(board, LedPattern::select(class, fan))?;
        debug!("render: {class:?} fan={fan:?} temp={current_temp:.0}");

        let msg = format!("{current_temp:.0}*C");
        match self.sevseg.show(board, &msg, self.message_dwell, cancel) {
            Ok(()) => Ok(()),
            Err(Error::Render(e)) => {
                warn!("display message {msg:?} skipped: {e}");
                Ok(())
            }
            Err(Error::Board(e)) => Err(e),
            // show() only raises render and board errors.
            Err(other) => {
                warn!("display message {msg:?} skipped: {other}");
                Ok(())
            }
        }
    }

    /// Rapid-change alert sequence: common alert LED plus the directional
    /// LED, a scrolled message for the alert dwell, then the bank's
    /// rapid-change marker. Steady trends are a no-op.
    pub fn render_alert(
        &self,
        board: &mut impl BoardPort,
        trend: TrendDirection,
        cancel: &CancelToken,
    ) -> Result<(), BoardError> {
        let (direction_pin, msg) = match trend {
            TrendDirection::Steady => return Ok(()),
            TrendDirection::Rising => (self.rise_pin, "RAPID RISE"),
            TrendDirection::Falling => (self.fall_pin, "RAPID FALL"),
        };

        board.write_digital(self.alert_pin, true)?;
        board.write_digital(direction_pin, true)?;
        if let Err(Error::Board(e)) = self.sevseg.show(board, msg, self.alert_dwell, cancel) {
            return Err(e);
        }
        board.write_digital(direction_pin, false)?;
        board.write_digital(self.alert_pin, false)?;
        self.bank.apply(board, LedPattern::RapidChangeAlert)
    }

    /// Blank every output. Runs on every loop exit path, including errors.
    pub fn clear_outputs(&self, board: &mut impl BoardPort) -> Result<(), BoardError> {
        self.bank.reset(board)?;
        board.write_digital(self.alert_pin, false)?;
        board.write_digital(self.rise_pin, false)?;
        board.write_digital(self.fall_pin, false)?;
        self.sevseg.clear(board)?;
        board.delay(self.blank_dwell);
        Ok(())
    }
}
