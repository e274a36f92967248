//! HVAC-style controller core: sensor sampling, trend detection,
//! nine-tier classification, and shift-register-driven output rendering,
//! wrapped in a PIN-gated service menu.
//!
//! Layering, leaves first:
//!
//! ```text
//!   pins · config · error
//!        └─ board (BoardPort, SimBoard)
//!             └─ sensors (thermistor, ldr)    history
//!                  └─ trend · classify         │
//!                       └─ render ─────────────┤
//!                            └─ poll ──────────┘
//!                                 └─ menu (console, pin_gate, export)
//! ```
//!
//! Everything below `menu` is deterministic and board-agnostic: hardware
//! access goes through [`board::BoardPort`], so the whole stack runs
//! against [`board::SimBoard`] on a plain desktop.

pub mod board;
pub mod cancel;
pub mod classify;
pub mod config;
pub mod console;
pub mod error;
pub mod export;
pub mod history;
pub mod menu;
pub mod pin_gate;
pub mod pins;
pub mod poll;
pub mod render;
pub mod sensors;
pub mod trend;

pub use board::{BoardPort, SimBoard};
pub use cancel::CancelToken;
pub use classify::{Classification, FanSpeed};
pub use config::{FanSpeedMode, Settings, Timing};
pub use error::{Error, Result};
pub use history::{Dataset, History};
pub use pins::PinMap;
pub use poll::PollingLoop;
pub use trend::TrendDirection;
