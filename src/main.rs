//! Thermovent — host entry point.
//!
//! Wires the simulated board, the PIN gate, and the service menu
//! together. All controller behaviour lives in the library; this binary
//! only initialises logging, enrols the PIN, and hands control to the
//! menu loop.

use std::env;

use anyhow::Context;
use log::info;

use thermovent::board::SimBoard;
use thermovent::config::Timing;
use thermovent::console::{Console, StdConsole};
use thermovent::menu::Menu;
use thermovent::pin_gate::PinGate;
use thermovent::pins::PinMap;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let pins = PinMap::default();
    let mut board = SimBoard::new();
    let mut console = StdConsole::new();
    info!("thermovent controller starting (simulated board)");

    let Some(gate) = PinGate::enroll(&mut console)? else {
        console.say("No PIN set, exiting")?;
        return Ok(());
    };

    let export_dir = env::current_dir().context("no working directory for exports")?;
    let mut menu = Menu::new(gate, &pins, Timing::default(), export_dir);
    menu.run(&mut console, &mut board)?;

    info!("terminated by operator");
    Ok(())
}
