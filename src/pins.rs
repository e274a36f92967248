//! Board channel / pin assignments.
//!
//! Single source of truth — everything that touches the board receives a
//! [`PinMap`] by reference rather than hard-coding pin numbers. Change a
//! pin here and it propagates everywhere.
//!
//! Defaults match the prototype wiring: two analog channels, one 74HC595
//! pair for the LED bank, one 74HC595 for the seven-segment segments,
//! four direct digit-enable lines, and three discrete alert LEDs.

/// Wiring of a 3-wire shift register (serial data, shift clock, register clock).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftPins {
    /// Serial data in.
    pub serial: u8,
    /// Shift-register clock (one pulse per bit).
    pub shift_clock: u8,
    /// Register (latch) clock — pulse once to present the shifted bits.
    pub register_clock: u8,
}

/// Complete pin map for the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinMap {
    /// Analog channel for the thermistor divider.
    pub therm_channel: u8,
    /// Analog channel for the LDR divider.
    pub light_channel: u8,

    /// Two daisy-chained registers driving the 16-LED bank.
    pub led_bank: ShiftPins,
    /// Register driving the seven-segment segment lines.
    pub sevseg: ShiftPins,
    /// Digit-enable lines, leftmost digit first. Active low.
    pub digit_enable: [u8; 4],

    /// Discrete LED: any rapid-change alert is active.
    pub alert: u8,
    /// Discrete LED: temperature rising rapidly.
    pub rise: u8,
    /// Discrete LED: temperature falling rapidly.
    pub fall: u8,
}

impl Default for PinMap {
    fn default() -> Self {
        Self {
            therm_channel: 0,
            light_channel: 1,
            led_bank: ShiftPins {
                serial: 6,
                shift_clock: 4,
                register_clock: 5,
            },
            sevseg: ShiftPins {
                serial: 7,
                shift_clock: 9,
                register_clock: 8,
            },
            digit_enable: [10, 11, 12, 13],
            alert: 3,
            rise: 16,
            fall: 17,
        }
    }
}

impl PinMap {
    /// Every digital output pin, for bulk pin-mode setup by the board owner.
    pub fn digital_outputs(&self) -> impl Iterator<Item = u8> {
        [
            self.led_bank.serial,
            self.led_bank.shift_clock,
            self.led_bank.register_clock,
            self.sevseg.serial,
            self.sevseg.shift_clock,
            self.sevseg.register_clock,
            self.alert,
            self.rise,
            self.fall,
        ]
        .into_iter()
        .chain(self.digit_enable)
    }
}
