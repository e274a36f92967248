//! The polling loop — the controller's main acquisition/render cycle.
//!
//! One tick: sample both sensors, update the rolling histories and the
//! derivative, classify, drive the LED bank and display, append the
//! elapsed-time axis. The loop runs until cancelled or the board link
//! fails; every exit path blanks the outputs.
//!
//! Error handling is tiered. A sensor fault costs at most this tick's
//! sample of that signal: the last good value carries the classification.
//! A render fault is absorbed inside the renderer. Only a board error
//! stops the loop.

use std::time::Instant;

use log::{error, info, warn};

use crate::board::BoardPort;
use crate::cancel::CancelToken;
use crate::classify::{classify_temperature, effective_fan_speed};
use crate::config::{Settings, Timing};
use crate::error::{BoardError, Error};
use crate::history::{Dataset, derivative};
use crate::pins::PinMap;
use crate::render::Renderer;
use crate::sensors::SensorHub;
use crate::trend::{TrendDirection, classify_trend};

pub struct PollingLoop {
    hub: SensorHub,
    renderer: Renderer,
    timing: Timing,
    dataset: Dataset,
}

impl PollingLoop {
    pub fn new(pins: &PinMap, timing: Timing) -> Self {
        Self {
            hub: SensorHub::new(pins),
            renderer: Renderer::new(pins, &timing),
            timing,
            dataset: Dataset::new(),
        }
    }

    /// The accumulated run data, readable at any point between runs.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn into_dataset(self) -> Dataset {
        self.dataset
    }

    /// Run ticks until `cancel` fires or the board link fails.
    ///
    /// The outputs are blanked on both exits. On a board error the blanking
    /// is best-effort (the link may already be gone) and the error is
    /// returned; the dataset collected so far stays available through
    /// [`dataset`](Self::dataset).
    pub fn run(
        &mut self,
        board: &mut impl BoardPort,
        settings: &Settings,
        cancel: &CancelToken,
    ) -> Result<(), BoardError> {
        info!(
            "polling loop started (band [{}, {}], fan mode {:?})",
            settings.low_bound, settings.high_bound, settings.fan_speed_mode
        );

        while !cancel.is_cancelled() {
            let tick_started = Instant::now();
            if let Err(e) = self.tick(board, settings, &tick_started, cancel) {
                error!("board link failed, stopping: {e}");
                if let Err(blank) = self.renderer.clear_outputs(board) {
                    warn!("could not blank outputs after failure: {blank}");
                }
                return Err(e);
            }
            board.delay(self.timing.tick_sleep);
        }

        info!(
            "polling loop stopped after {} ticks",
            self.dataset.temperature.len()
        );
        self.renderer.clear_outputs(board)
    }

    /// One acquisition/render cycle. `tick_started` marks this tick's
    /// start; its elapsed time extends the cumulative time axis.
    fn tick(
        &mut self,
        board: &mut impl BoardPort,
        settings: &Settings,
        tick_started: &Instant,
        cancel: &CancelToken,
    ) -> Result<(), BoardError> {
        // 1. Temperature. A sensor fault retains the last good value and
        //    skips this signal's history append for the tick.
        match self.hub.sample_temperature(board) {
            Ok(celsius) => {
                self.dataset.current_temp = celsius;
                self.dataset.temperature.push(celsius);
                // 2. Derivative against the time axis of previous ticks.
                if let Some(rate) = derivative(&self.dataset.temperature, &self.dataset.time) {
                    self.dataset.gradient.push(rate);
                }
            }
            Err(Error::Board(e)) => return Err(e),
            Err(e) => warn!("temperature sample skipped: {e}"),
        }

        // 3. Illuminance, same fault policy.
        match self.hub.sample_illuminance(board) {
            Ok(lux) => {
                self.dataset.current_lux = lux;
                self.dataset.illuminance.push(lux);
            }
            Err(Error::Board(e)) => return Err(e),
            Err(e) => warn!("illuminance sample skipped: {e}"),
        }

        // 4. Classify.
        let class = classify_temperature(
            self.dataset.current_temp,
            settings.low_bound,
            settings.high_bound,
        );
        let fan = effective_fan_speed(settings, self.dataset.current_lux);
        let trend = classify_trend(&self.dataset.gradient);

        // 5. Render: blank first so the previous tick's frame never shows
        //    through the alert dwell, then any alert, then the frame.
        self.renderer.begin_tick(board)?;
        if trend != TrendDirection::Steady {
            info!(
                "rapid temperature {}",
                if trend == TrendDirection::Rising { "rise" } else { "fall" }
            );
            self.renderer.render_alert(board, trend, cancel)?;
        }
        self.renderer
            .render_tick(board, class, fan, self.dataset.current_temp, cancel)?;

        // 6. Extend the time axis: the running total plus this tick's
        //    elapsed time. The dataset outlives individual runs, so the
        //    axis accumulates monotonically across stop/start cycles.
        let total = self.dataset.time.last().unwrap_or(0.0);
        self.dataset.time.push(total + tick_started.elapsed().as_secs_f64());
        Ok(())
    }
}
