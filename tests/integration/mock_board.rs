//! Recording mock board for integration tests.
//!
//! Analog channels replay scripted physical values through the real
//! transfer functions, every digital write and delay is recorded, and the
//! shift-register traffic can be replayed afterwards to recover the
//! frames that were actually latched onto the outputs.

use std::collections::VecDeque;
use std::time::Duration;

use thermovent::board::{ADC_MAX, BoardPort};
use thermovent::cancel::CancelToken;
use thermovent::error::BoardError;
use thermovent::pins::ShiftPins;
use thermovent::sensors::{ldr, thermistor};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ReadAnalog(u8),
    WriteDigital(u8, bool),
    Delay(Duration),
}

pub struct MockBoard {
    pub calls: Vec<Call>,
    /// Scripted raw readings per channel; the last value repeats.
    therm_script: VecDeque<u16>,
    light_script: VecDeque<u16>,
    pin_levels: [bool; 64],
    /// Fail every analog read once this many have succeeded.
    pub fail_reads_after: Option<usize>,
    reads_served: usize,
    /// Cancel this token once the given number of reads have been served,
    /// so a run stops after a deterministic number of ticks.
    pub cancel_after_reads: Option<(usize, CancelToken)>,
}

fn raw_for_resistance(res: f64) -> u16 {
    let volts = 5.0 * res / (10.0 + res);
    (volts * f64::from(ADC_MAX) / 5.0).round().clamp(1.0, f64::from(ADC_MAX - 1)) as u16
}

impl MockBoard {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            therm_script: VecDeque::new(),
            light_script: VecDeque::new(),
            pin_levels: [false; 64],
            fail_reads_after: None,
            reads_served: 0,
            cancel_after_reads: None,
        }
    }

    /// Queue temperatures (°C) for the thermistor channel, encoded the way
    /// the real probe would present them.
    pub fn script_celsius(&mut self, temps: &[f64]) {
        for &t in temps {
            self.therm_script
                .push_back(raw_for_resistance(thermistor::resistance_for_celsius(t)));
        }
    }

    /// Queue illuminance values (lux) for the LDR channel.
    pub fn script_lux(&mut self, values: &[f64]) {
        for &l in values {
            self.light_script
                .push_back(raw_for_resistance(ldr::resistance_for_lux(l)));
        }
    }

    pub fn pin_level(&self, pin: u8) -> bool {
        self.pin_levels[pin as usize]
    }

    /// Whether `pin` was ever driven to `level`.
    pub fn ever_wrote(&self, pin: u8, level: bool) -> bool {
        self.calls
            .iter()
            .any(|c| matches!(c, Call::WriteDigital(p, l) if *p == pin && *l == level))
    }

    /// Replay the recorded writes against one shift register's wiring and
    /// return every word latched onto it, in order.
    pub fn latched_frames(&self, pins: ShiftPins) -> Vec<u16> {
        self.latched_frames_indexed(pins)
            .into_iter()
            .map(|(_, frame)| frame)
            .collect()
    }

    /// Like [`latched_frames`](Self::latched_frames), but each frame
    /// carries the index of the recorded call that latched it, so frames
    /// can be ordered against other pin activity.
    pub fn latched_frames_indexed(&self, pins: ShiftPins) -> Vec<(usize, u16)> {
        let mut frames = Vec::new();
        let mut register: u16 = 0;
        let mut serial = false;
        let mut shift_clock = false;
        let mut register_clock = false;
        for (index, call) in self.calls.iter().enumerate() {
            let Call::WriteDigital(pin, level) = call else {
                continue;
            };
            if *pin == pins.serial {
                serial = *level;
            } else if *pin == pins.shift_clock {
                if *level && !shift_clock {
                    register = (register << 1) | u16::from(serial);
                }
                shift_clock = *level;
            } else if *pin == pins.register_clock {
                if *level && !register_clock {
                    frames.push((index, register));
                }
                register_clock = *level;
            }
        }
        frames
    }

    fn next_raw(script: &mut VecDeque<u16>, fallback: u16) -> u16 {
        if script.len() > 1 {
            script.pop_front().unwrap_or(fallback)
        } else {
            script.front().copied().unwrap_or(fallback)
        }
    }
}

impl Default for MockBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardPort for MockBoard {
    fn read_analog(&mut self, channel: u8) -> Result<u16, BoardError> {
        self.calls.push(Call::ReadAnalog(channel));
        if let Some(limit) = self.fail_reads_after {
            if self.reads_served >= limit {
                return Err(BoardError::ReadFailed(channel));
            }
        }
        self.reads_served += 1;
        if let Some((limit, token)) = &self.cancel_after_reads {
            if self.reads_served >= *limit {
                token.cancel();
            }
        }
        let raw = match channel {
            0 => Self::next_raw(&mut self.therm_script, 512),
            1 => Self::next_raw(&mut self.light_script, 512),
            other => return Err(BoardError::ReadFailed(other)),
        };
        Ok(raw)
    }

    fn write_digital(&mut self, pin: u8, high: bool) -> Result<(), BoardError> {
        self.calls.push(Call::WriteDigital(pin, high));
        match self.pin_levels.get_mut(pin as usize) {
            Some(level) => {
                *level = high;
                Ok(())
            }
            None => Err(BoardError::WriteFailed(pin)),
        }
    }

    fn delay(&mut self, dwell: Duration) {
        // Recorded, never served: integration runs are instant.
        self.calls.push(Call::Delay(dwell));
    }
}
