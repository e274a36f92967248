//! Interactive service menu.
//!
//! The operator shell around the controller: turn the polling loop on and
//! off, change settings behind the PIN gate, and observe or export the
//! recorded series. The menu owns the [`Settings`] and the
//! [`PollingLoop`] (and with it the run data); the loop itself runs on a
//! worker thread so the console stays responsive, and is stopped through
//! a [`CancelToken`] when the operator presses Enter.
//!
//! Maintenance prompts carry a 60-second answer deadline; letting one
//! expire drops the session and the operator must log in again.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, anyhow};
use log::info;

use crate::board::BoardPort;
use crate::cancel::CancelToken;
use crate::classify::FanSpeed;
use crate::config::{BOUND_MAX, BOUND_MIN, FanSpeedMode, Settings, Timing};
use crate::console::{Console, Reply};
use crate::error::Error;
use crate::export::{self, Series};
use crate::pin_gate::PinGate;
use crate::pins::PinMap;
use crate::poll::PollingLoop;

/// How long a maintenance prompt waits before the session expires.
pub const ANSWER_LIMIT: Duration = Duration::from_secs(60);

const DIVIDER: &str = "--------------------";

pub struct Menu {
    gate: PinGate,
    settings: Settings,
    poll: PollingLoop,
    export_dir: PathBuf,
    answer_limit: Duration,
}

impl Menu {
    pub fn new(gate: PinGate, pins: &PinMap, timing: Timing, export_dir: PathBuf) -> Self {
        Self {
            gate,
            settings: Settings::default(),
            poll: PollingLoop::new(pins, timing),
            export_dir,
            answer_limit: ANSWER_LIMIT,
        }
    }

    /// Override the maintenance answer deadline (tests shrink it).
    pub fn with_answer_limit(mut self, limit: Duration) -> Self {
        self.answer_limit = limit;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn poll(&self) -> &PollingLoop {
        &self.poll
    }

    /// Top-level menu loop; returns when the operator terminates.
    pub fn run<B>(&mut self, console: &mut impl Console, board: &mut B) -> anyhow::Result<()>
    where
        B: BoardPort + Send,
    {
        loop {
            console.say("")?;
            console.say("1. Turn on/off")?;
            console.say("2. Maintenance mode")?;
            console.say("3. Data observation")?;
            console.say("4. Terminate the program")?;
            console.say(DIVIDER)?;
            match console.prompt("Please pick one of the options: ", None)? {
                Reply::Line(input) => match input.as_str() {
                    "1" => self.turn_on_off(console, board)?,
                    "2" => self.maintenance(console)?,
                    "3" => self.observation(console)?,
                    "4" => return Ok(()),
                    _ => console.say("Please only input from the menu available")?,
                },
                Reply::Back | Reply::TimedOut => return Ok(()),
            }
        }
    }

    fn turn_on_off<B>(&mut self, console: &mut impl Console, board: &mut B) -> anyhow::Result<()>
    where
        B: BoardPort + Send,
    {
        loop {
            console.say("1. Turn on system")?;
            console.say("2. Turn off system")?;
            console.say("Leave blank to return to the main menu")?;
            console.say(DIVIDER)?;
            match console.prompt("Please pick one of the options: ", None)? {
                Reply::Line(input) => match input.as_str() {
                    "1" => self.run_system(console, board)?,
                    "2" => console.say("System is already off")?,
                    _ => console.say("Please only input from the menu available")?,
                },
                Reply::Back | Reply::TimedOut => return Ok(()),
            }
        }
    }

    /// Run the polling loop on a worker thread until the operator presses
    /// Enter; the run data accumulates onto previous runs.
    fn run_system<B>(&mut self, console: &mut impl Console, board: &mut B) -> anyhow::Result<()>
    where
        B: BoardPort + Send,
    {
        let cancel = CancelToken::new();
        let worker_cancel = cancel.clone();
        let settings = self.settings;
        let poll = &mut self.poll;

        let (prompt, run) = thread::scope(|scope| {
            let worker = scope.spawn(move || poll.run(board, &settings, &worker_cancel));
            let prompt = console.prompt("System running. Press Enter to stop.\n", None);
            cancel.cancel();
            let run = worker
                .join()
                .map_err(|_| anyhow!("polling worker panicked"));
            (prompt, run)
        });

        prompt?;
        run?.map_err(Error::from).context("polling loop failed")?;
        console.say("System stopped")?;
        Ok(())
    }

    /// PIN-gated settings mutation. Settings change only after the gate
    /// opens, and every change is validated before it is applied.
    fn maintenance(&mut self, console: &mut impl Console) -> anyhow::Result<()> {
        if !self.gate.authenticate(console)? {
            return Ok(());
        }

        loop {
            console.say(&format!(
                "Current temperature range is between {} and {}",
                self.settings.low_bound, self.settings.high_bound
            ))?;
            console.say(&format!(
                "Current ventilation speed: {:?} (mode {:?})",
                self.settings.fan_speed, self.settings.fan_speed_mode
            ))?;
            console.say(DIVIDER)?;
            console.say("1. Change the temperature range")?;
            console.say("2. Change the ventilation speed")?;
            console.say("3. Change the fan control mode")?;
            console.say("Leave blank to return to the main menu")?;
            console.say(DIVIDER)?;

            let choice = match self.timed_prompt(console, "Please pick one of the options: ")? {
                Some(input) => input,
                None => return Ok(()),
            };
            match choice.as_str() {
                "1" => {
                    if !self.change_band(console)? {
                        return Ok(());
                    }
                }
                "2" => {
                    if !self.change_fan_speed(console)? {
                        return Ok(());
                    }
                }
                "3" => {
                    if !self.change_fan_mode(console)? {
                        return Ok(());
                    }
                }
                _ => console.say("Please only input from the menu available")?,
            }
        }
    }

    /// Returns `Ok(false)` when the session ended (timeout or back-out).
    fn change_band(&mut self, console: &mut impl Console) -> anyhow::Result<bool> {
        loop {
            console.say(&format!(
                "Please only input values between {BOUND_MIN} and {BOUND_MAX}"
            ))?;
            let Some(low_input) = self.timed_prompt(console, "Input new low temp: ")? else {
                return Ok(false);
            };
            let Some(high_input) = self.timed_prompt(console, "Input new high temp: ")? else {
                return Ok(false);
            };
            let (Ok(low), Ok(high)) = (low_input.parse::<i32>(), high_input.parse::<i32>()) else {
                console.say("Please only input whole numbers")?;
                continue;
            };

            let candidate = Settings {
                low_bound: low,
                high_bound: high,
                ..self.settings
            };
            match candidate.validate() {
                Ok(()) => {
                    self.settings = candidate;
                    info!("temperature band changed to [{low}, {high}]");
                    console.say("Temperature range updated")?;
                    return Ok(true);
                }
                Err(e) => console.say(&format!("Rejected: {e}"))?,
            }
        }
    }

    fn change_fan_speed(&mut self, console: &mut impl Console) -> anyhow::Result<bool> {
        loop {
            console.say("1 for low")?;
            console.say("2 for high")?;
            let Some(input) = self.timed_prompt(console, "Input new vent speed: ")? else {
                return Ok(false);
            };
            let speed = match input.as_str() {
                "1" => FanSpeed::Low,
                "2" => FanSpeed::High,
                _ => {
                    console.say("Please only input 1 or 2")?;
                    continue;
                }
            };
            self.settings.fan_speed = speed;
            info!("fan speed changed to {speed:?}");
            if self.settings.fan_speed_mode == FanSpeedMode::Auto {
                console.say("Note: fan mode is Auto; the light sensor still decides")?;
            }
            console.say("Ventilation speed updated")?;
            return Ok(true);
        }
    }

    fn change_fan_mode(&mut self, console: &mut impl Console) -> anyhow::Result<bool> {
        loop {
            console.say("1 for auto (light sensor decides)")?;
            console.say("2 for manual (configured speed applies)")?;
            let Some(input) = self.timed_prompt(console, "Input new fan mode: ")? else {
                return Ok(false);
            };
            let mode = match input.as_str() {
                "1" => FanSpeedMode::Auto,
                "2" => FanSpeedMode::Manual,
                _ => {
                    console.say("Please only input 1 or 2")?;
                    continue;
                }
            };
            self.settings.fan_speed_mode = mode;
            info!("fan mode changed to {mode:?}");
            console.say("Fan control mode updated")?;
            return Ok(true);
        }
    }

    /// Read-only view over the recorded series, with optional CSV export.
    fn observation(&mut self, console: &mut impl Console) -> anyhow::Result<()> {
        loop {
            console.say("")?;
            console.say("In data observation mode")?;
            console.say("1. Temperature series")?;
            console.say("2. Change-in-temperature series")?;
            console.say("3. Light series")?;
            console.say("Leave blank to return to the main menu")?;
            console.say(DIVIDER)?;

            let series = match console.prompt("Please pick one of the options: ", None)? {
                Reply::Line(input) => match input.as_str() {
                    "1" => Series::Temperature,
                    "2" => Series::Gradient,
                    "3" => Series::Illuminance,
                    _ => {
                        console.say("Please only input whole numbers between 1 and 3")?;
                        continue;
                    }
                },
                Reply::Back | Reply::TimedOut => return Ok(()),
            };

            let points = export::series_points(self.poll.dataset(), series);
            if points.len() < series.min_samples() {
                console.say(&format!(
                    "Not enough data to observe ({} of {} samples)",
                    points.len(),
                    series.min_samples()
                ))?;
                continue;
            }

            let save = console.prompt("Do you want to save the data (y/n): ", None)?;
            if save == Reply::Line("y".into()) {
                let path = export::save_csv(self.poll.dataset(), series, &self.export_dir)
                    .context("could not save series")?;
                console.say(&format!("Saved to {}", path.display()))?;
            } else {
                for (time, value) in &points {
                    console.say(&format!("{time:>10.1}s  {value:.2}"))?;
                }
            }
        }
    }

    /// Prompt with the maintenance deadline. `None` ends the session,
    /// either by timeout (with the historical message) or by backing out.
    fn timed_prompt(
        &self,
        console: &mut impl Console,
        text: &str,
    ) -> anyhow::Result<Option<String>> {
        match console.prompt(text, Some(self.answer_limit))? {
            Reply::Line(input) => Ok(Some(input)),
            Reply::Back => Ok(None),
            Reply::TimedOut => {
                console.say("Took too long to answer, please login again")?;
                Ok(None)
            }
        }
    }
}
