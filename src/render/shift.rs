//! 3-wire shift-register serializer.
//!
//! Serial-in, parallel-out: present a bit on the data line, pulse the
//! shift clock, repeat, then pulse the register clock to latch the shifted
//! word onto the outputs. Bits go out MSB first, matching the physical
//! left-to-right ordering of the LED banks and segment lines.
//!
//! The seven-segment scanner needs to interleave the latch edge with its
//! digit-enable strobe, so the register-clock line is exposed directly in
//! addition to the plain [`latch`](ShiftRegister::latch).

use std::time::Duration;

use crate::board::BoardPort;
use crate::error::BoardError;
use crate::pins::ShiftPins;

#[derive(Debug, Clone, Copy)]
pub struct ShiftRegister {
    pins: ShiftPins,
    clock_pulse: Duration,
}

impl ShiftRegister {
    pub fn new(pins: ShiftPins, clock_pulse: Duration) -> Self {
        Self { pins, clock_pulse }
    }

    /// Shift a single bit into the register.
    pub fn shift_bit(&self, board: &mut impl BoardPort, bit: bool) -> Result<(), BoardError> {
        board.write_digital(self.pins.serial, bit)?;
        board.write_digital(self.pins.shift_clock, true)?;
        board.delay(self.clock_pulse);
        board.write_digital(self.pins.shift_clock, false)
    }

    /// Shift an 8-bit word, MSB first.
    pub fn shift_u8(&self, board: &mut impl BoardPort, word: u8) -> Result<(), BoardError> {
        for i in (0..8).rev() {
            self.shift_bit(board, word & (1 << i) != 0)?;
        }
        Ok(())
    }

    /// Shift a 16-bit word, MSB first (spans two daisy-chained registers).
    pub fn shift_u16(&self, board: &mut impl BoardPort, word: u16) -> Result<(), BoardError> {
        for i in (0..16).rev() {
            self.shift_bit(board, word & (1 << i) != 0)?;
        }
        Ok(())
    }

    /// Drive the register-clock line directly.
    pub fn set_register_clock(
        &self,
        board: &mut impl BoardPort,
        high: bool,
    ) -> Result<(), BoardError> {
        board.write_digital(self.pins.register_clock, high)
    }

    /// Pulse the register clock: present the shifted word on the outputs.
    pub fn latch(&self, board: &mut impl BoardPort) -> Result<(), BoardError> {
        self.set_register_clock(board, true)?;
        board.delay(self.clock_pulse);
        self.set_register_clock(board, false)
    }

    /// Shift a 16-bit word and latch it in one call.
    pub fn load_u16(&self, board: &mut impl BoardPort, word: u16) -> Result<(), BoardError> {
        self.shift_u16(board, word)?;
        self.latch(board)
    }
}
