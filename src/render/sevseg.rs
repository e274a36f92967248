//! Seven-segment display: glyph table and multiplexed scanner.
//!
//! Four common-cathode digits share one shift-register-driven set of
//! segment lines; a message is shown by scanning — shift one character's
//! segments, strobe that digit's enable line low for the digit dwell,
//! move on. Messages longer than four characters scroll: a four-wide
//! window advances one character per hold period until the caller's
//! duration is spent.
//!
//! The glyph table is enum-keyed: a character without a glyph is a typed
//! [`RenderError::UnknownGlyph`], never a silent blank. Each glyph's bit
//! pattern is unique, so the table decodes unambiguously; `O` and `S` are
//! aliases of `0` and `5` (physically identical segments).

use std::time::{Duration, Instant};

use crate::board::BoardPort;
use crate::cancel::CancelToken;
use crate::config::Timing;
use crate::error::{BoardError, RenderError, Result};
use crate::pins::PinMap;

use super::shift::ShiftRegister;

/// Visible digit count.
pub const DIGITS: usize = 4;

/// One renderable character. Segment ordering is `0b0abcdefg`
/// (bit 6 = segment a … bit 0 = segment g); bit 7 is reserved for the
/// decimal point, unused by the current board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    D0, D1, D2, D3, D4, D5, D6, D7, D8, D9,
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, P, Q, R, T, U, V, X, Y, Z,
    Space,
    Asterisk,
    Minus,
}

impl Glyph {
    /// Segment bit pattern for this glyph.
    pub const fn segments(self) -> u8 {
        match self {
            Self::D0 => 0b0111_1110,
            Self::D1 => 0b0011_0000,
            Self::D2 => 0b0110_1101,
            Self::D3 => 0b0111_1001,
            Self::D4 => 0b0011_0011,
            Self::D5 => 0b0101_1011,
            Self::D6 => 0b0101_1111,
            Self::D7 => 0b0111_0000,
            Self::D8 => 0b0111_1111,
            Self::D9 => 0b0111_1011,
            Self::A => 0b0111_0111,
            Self::B => 0b0001_1111,
            Self::C => 0b0100_1110,
            Self::D => 0b0011_1101,
            Self::E => 0b0100_1111,
            Self::F => 0b0100_0111,
            Self::G => 0b0101_1110,
            Self::H => 0b0001_0111,
            Self::I => 0b0000_0110,
            Self::J => 0b0011_1100,
            Self::K => 0b0101_0111,
            Self::L => 0b0000_1110,
            Self::M => 0b0101_0100,
            Self::N => 0b0111_0110,
            Self::P => 0b0110_0111,
            Self::Q => 0b0111_0011,
            Self::R => 0b0110_0110,
            Self::T => 0b0000_1111,
            Self::U => 0b0011_1110,
            Self::V => 0b0011_1010,
            Self::X => 0b0011_0111,
            Self::Y => 0b0011_1011,
            Self::Z => 0b0110_1001,
            Self::Space => 0b0000_0000,
            Self::Asterisk => 0b0110_0011,
            Self::Minus => 0b0000_0001,
        }
    }

    /// Look up the glyph for a character. Lowercase letters are folded to
    /// uppercase; `O` and `S` map onto the identical digit glyphs.
    pub fn from_char(c: char) -> Result<Self> {
        let glyph = match c.to_ascii_uppercase() {
            '0' | 'O' => Self::D0,
            '1' => Self::D1,
            '2' => Self::D2,
            '3' => Self::D3,
            '4' => Self::D4,
            '5' | 'S' => Self::D5,
            '6' => Self::D6,
            '7' => Self::D7,
            '8' => Self::D8,
            '9' => Self::D9,
            'A' => Self::A,
            'B' => Self::B,
            'C' => Self::C,
            'D' => Self::D,
            'E' => Self::E,
            'F' => Self::F,
            'G' => Self::G,
            'H' => Self::H,
            'I' => Self::I,
            'J' => Self::J,
            'K' => Self::K,
            'L' => Self::L,
            'M' => Self::M,
            'N' => Self::N,
            'P' => Self::P,
            'Q' => Self::Q,
            'R' => Self::R,
            'T' => Self::T,
            'U' => Self::U,
            'V' => Self::V,
            'X' => Self::X,
            'Y' => Self::Y,
            'Z' => Self::Z,
            ' ' => Self::Space,
            '*' => Self::Asterisk,
            '-' => Self::Minus,
            _ => return Err(RenderError::UnknownGlyph(c).into()),
        };
        Ok(glyph)
    }

    /// Inverse of [`segments`](Self::segments): the glyph a bit pattern
    /// belongs to, if any.
    pub fn decode(pattern: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|g| g.segments() == pattern)
    }

    /// Every glyph, for table-wide checks.
    pub const ALL: [Self; 36] = [
        Self::D0, Self::D1, Self::D2, Self::D3, Self::D4, Self::D5,
        Self::D6, Self::D7, Self::D8, Self::D9,
        Self::A, Self::B, Self::C, Self::D, Self::E, Self::F, Self::G,
        Self::H, Self::I, Self::J, Self::K, Self::L, Self::M, Self::N,
        Self::P, Self::Q, Self::R, Self::T, Self::U, Self::V, Self::X,
        Self::Y, Self::Z, Self::Space, Self::Asterisk, Self::Minus,
    ];
}

/// Encode a whole message, failing fast on the first unknown character.
pub fn encode(msg: &str) -> Result<Vec<Glyph>> {
    msg.chars().map(Glyph::from_char).collect()
}

// ---------------------------------------------------------------------------
// Scanner
// ---------------------------------------------------------------------------

/// The multiplexed display driver.
pub struct SevenSegment {
    shift: ShiftRegister,
    digit_enable: [u8; DIGITS],
    digit_dwell: Duration,
    scroll_window: Duration,
}

impl SevenSegment {
    pub fn new(pins: &PinMap, timing: &Timing) -> Self {
        Self {
            shift: ShiftRegister::new(pins.sevseg, timing.clock_pulse),
            digit_enable: pins.digit_enable,
            digit_dwell: timing.digit_dwell,
            scroll_window: timing.scroll_window,
        }
    }

    /// Clear the segment register (all segments off).
    pub fn clear(&self, board: &mut impl BoardPort) -> core::result::Result<(), BoardError> {
        self.shift.shift_u8(board, 0)?;
        self.shift.latch(board)
    }

    /// Show `msg` for `duration`, scrolling if it exceeds four characters.
    ///
    /// The message is encoded up front so an unknown character fails the
    /// whole call before anything is driven. At least one scan pass runs
    /// even for a zero duration. Cancellation is honoured between digit
    /// strobes.
    pub fn show(
        &self,
        board: &mut impl BoardPort,
        msg: &str,
        duration: Duration,
        cancel: &CancelToken,
    ) -> Result<()> {
        let glyphs = encode(msg)?;
        self.clear(board)?;

        if glyphs.len() <= DIGITS {
            let window = pad_window(&glyphs, 0);
            let start = Instant::now();
            loop {
                self.scan_once(board, &window, cancel)?;
                if cancel.is_cancelled() || start.elapsed() >= duration {
                    return Ok(());
                }
            }
        }

        // Scrolling: slide a four-wide window one character at a time,
        // holding each position for the window dwell, until the total
        // duration is spent.
        let start = Instant::now();
        loop {
            for offset in 0..glyphs.len() {
                let window = pad_window(&glyphs, offset);
                let hold_start = Instant::now();
                loop {
                    self.scan_once(board, &window, cancel)?;
                    if cancel.is_cancelled() {
                        return Ok(());
                    }
                    if hold_start.elapsed() >= self.scroll_window {
                        break;
                    }
                }
            }
            if cancel.is_cancelled() || start.elapsed() >= duration {
                return Ok(());
            }
        }
    }

    /// One scan pass: strobe each digit once.
    fn scan_once(
        &self,
        board: &mut impl BoardPort,
        window: &[Glyph; DIGITS],
        cancel: &CancelToken,
    ) -> Result<()> {
        for (glyph, &enable_pin) in window.iter().zip(&self.digit_enable) {
            if cancel.is_cancelled() {
                return Ok(());
            }
            self.shift.shift_u8(board, glyph.segments())?;
            // Latch while the digit line is strobed low (active low), so
            // the new segments appear only on the enabled digit.
            self.shift.set_register_clock(board, true)?;
            board.write_digital(enable_pin, false)?;
            board.delay(self.digit_dwell);
            board.write_digital(enable_pin, true)?;
            self.shift.set_register_clock(board, false)?;
        }
        Ok(())
    }
}

/// Four-glyph view of `glyphs` starting at `offset`, space-padded.
fn pad_window(glyphs: &[Glyph], offset: usize) -> [Glyph; DIGITS] {
    let mut window = [Glyph::Space; DIGITS];
    for (slot, glyph) in window.iter_mut().zip(glyphs.iter().skip(offset)) {
        *slot = *glyph;
    }
    window
}
