//! PIN gate in front of the maintenance menu.
//!
//! The operator enrols a four-digit PIN at startup. Entering maintenance
//! requires the PIN; three wrong answers lock the gate for two minutes.
//! Settings mutation happens only after [`PinGate::authenticate`] returns
//! `true` — a lockout or an abandoned prompt never falls through into the
//! maintenance flow.

use std::io;
use std::time::Duration;

use log::{info, warn};

use crate::console::{Console, Reply};

/// Wrong answers allowed before the lockout trips.
pub const MAX_ATTEMPTS: u32 = 3;
/// How long the gate stays locked after the attempts are spent.
pub const LOCKOUT: Duration = Duration::from_secs(120);

/// A validated four-digit PIN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pin([u8; 4]);

impl Pin {
    /// Parse exactly four ASCII digits.
    pub fn parse(input: &str) -> Option<Self> {
        let bytes = input.as_bytes();
        if bytes.len() != 4 || !bytes.iter().all(u8::is_ascii_digit) {
            return None;
        }
        let mut digits = [0u8; 4];
        digits.copy_from_slice(bytes);
        Some(Self(digits))
    }
}

pub struct PinGate {
    pin: Pin,
    lockout: Duration,
}

impl PinGate {
    pub fn new(pin: Pin) -> Self {
        Self {
            pin,
            lockout: LOCKOUT,
        }
    }

    /// Override the lockout duration (tests shrink it).
    pub fn with_lockout(pin: Pin, lockout: Duration) -> Self {
        Self { pin, lockout }
    }

    /// Startup enrolment: keep asking until the operator supplies a valid
    /// four-digit PIN. `None` when input ends before one is given.
    pub fn enroll(console: &mut impl Console) -> io::Result<Option<Self>> {
        loop {
            match console.prompt("Please input a 4-digit number as a PIN: ", None)? {
                Reply::Line(input) => match Pin::parse(&input) {
                    Some(pin) => return Ok(Some(Self::new(pin))),
                    None => console.say("Please only put in 4 digits")?,
                },
                Reply::Back | Reply::TimedOut => return Ok(None),
            }
        }
    }

    /// One gate session: up to [`MAX_ATTEMPTS`] answers, then the lockout.
    ///
    /// Malformed answers (wrong length, non-digits) are re-prompted without
    /// consuming an attempt; only a well-formed wrong PIN does.
    pub fn authenticate(&self, console: &mut impl Console) -> io::Result<bool> {
        let mut failures = 0;
        while failures < MAX_ATTEMPTS {
            let answer = match console.prompt("Please enter the PIN: ", None)? {
                Reply::Line(input) => input,
                Reply::Back | Reply::TimedOut => return Ok(false),
            };
            let Some(pin) = Pin::parse(&answer) else {
                console.say("Please only put in 4 digits")?;
                continue;
            };
            if pin == self.pin {
                info!("maintenance gate opened");
                console.say("Correct")?;
                return Ok(true);
            }
            failures += 1;
            if failures < MAX_ATTEMPTS {
                console.say(&format!(
                    "Wrong PIN, please try again. You have {} tries left",
                    MAX_ATTEMPTS - failures
                ))?;
            }
        }

        warn!(
            "maintenance gate locked for {}s after {MAX_ATTEMPTS} failures",
            self.lockout.as_secs()
        );
        console.say("You're locked out for some time")?;
        console.sleep(self.lockout);
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::script::ScriptedConsole as Scripted;

    fn gate() -> PinGate {
        PinGate::new(Pin::parse("2468").unwrap())
    }

    #[test]
    fn pin_must_be_exactly_four_digits() {
        assert!(Pin::parse("0000").is_some());
        assert!(Pin::parse("123").is_none());
        assert!(Pin::parse("12345").is_none());
        assert!(Pin::parse("12a4").is_none());
        assert!(Pin::parse("").is_none());
    }

    #[test]
    fn correct_pin_opens_the_gate() {
        let mut console = Scripted::lines(&["2468"]);
        assert!(gate().authenticate(&mut console).unwrap());
        assert_eq!(console.slept, Duration::ZERO);
    }

    #[test]
    fn third_try_still_counts() {
        let mut console = Scripted::lines(&["1111", "2222", "2468"]);
        assert!(gate().authenticate(&mut console).unwrap());
    }

    #[test]
    fn three_failures_lock_the_gate() {
        let mut console = Scripted::lines(&["1111", "2222", "3333"]);
        let locked = PinGate::with_lockout(Pin::parse("2468").unwrap(), Duration::from_secs(7));
        assert!(!locked.authenticate(&mut console).unwrap());
        assert_eq!(console.slept, Duration::from_secs(7));
    }

    #[test]
    fn malformed_answers_do_not_consume_attempts() {
        let mut console = Scripted::lines(&["24", "abcd", "99999", "2468"]);
        assert!(gate().authenticate(&mut console).unwrap());
    }

    #[test]
    fn abandoning_the_prompt_denies_entry() {
        let mut console = Scripted::lines(&[]);
        assert!(!gate().authenticate(&mut console).unwrap());
        assert_eq!(console.slept, Duration::ZERO);
    }

    #[test]
    fn enrolment_retries_until_valid() {
        let mut console = Scripted::lines(&["12", "hello", "7913"]);
        let gate = PinGate::enroll(&mut console).unwrap().unwrap();
        let mut session = Scripted::lines(&["7913"]);
        assert!(gate.authenticate(&mut session).unwrap());
    }
}
