//! Unified error types for the controller.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! polling loop's error handling uniform. All variants are `Copy` so they
//! can be passed around freely without allocation.
//!
//! The taxonomy mirrors how faults are actually handled:
//! [`SensorFault`] and insufficient-history conditions are recovered
//! locally inside a tick; [`RenderError`] is fatal to the render call but
//! recoverable by its caller; [`BoardError`] is the only thing that ends
//! the loop.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An analog sample could not be converted to a physical unit.
    Sensor(SensorFault),
    /// The board link failed.
    Board(BoardError),
    /// A display/LED render operation failed.
    Render(RenderError),
    /// Settings are invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Board(e) => write!(f, "board: {e}"),
            Self::Render(e) => write!(f, "render: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor faults (recovered locally — skip the signal for this tick)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorFault {
    /// Divider voltage at or below 0 V: open circuit or disconnected probe.
    OpenCircuit,
    /// Divider voltage at the rail: conversion undefined (would divide by zero).
    ShortCircuit,
}

impl fmt::Display for SensorFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenCircuit => write!(f, "open circuit (0 V on divider)"),
            Self::ShortCircuit => write!(f, "short circuit (rail voltage on divider)"),
        }
    }
}

impl From<SensorFault> for Error {
    fn from(e: SensorFault) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Board link errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Analog read failed on the given channel.
    ReadFailed(u8),
    /// Digital write failed on the given pin.
    WriteFailed(u8),
    /// The board link is gone (unplugged, protocol error).
    Disconnected,
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFailed(ch) => write!(f, "analog read failed (channel {ch})"),
            Self::WriteFailed(pin) => write!(f, "digital write failed (pin {pin})"),
            Self::Disconnected => write!(f, "board disconnected"),
        }
    }
}

impl From<BoardError> for Error {
    fn from(e: BoardError) -> Self {
        Self::Board(e)
    }
}

// ---------------------------------------------------------------------------
// Render errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderError {
    /// Character has no entry in the seven-segment glyph table.
    UnknownGlyph(char),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownGlyph(c) => write!(f, "no seven-segment glyph for {c:?}"),
        }
    }
}

impl From<RenderError> for Error {
    fn from(e: RenderError) -> Self {
        Self::Render(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
