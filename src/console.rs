//! Line-oriented console port for the menu shell.
//!
//! The maintenance flow needs prompts with an answer deadline, and stdin
//! cannot be interrupted once a blocking read starts. [`StdConsole`] pins
//! a dedicated reader thread on stdin and hands lines over a channel, so
//! deadlines become a `recv_timeout` on this side. Tests drive the menu
//! with a scripted implementation instead.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

/// Outcome of one prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A non-empty input line, trimmed.
    Line(String),
    /// Empty line or end of input: return to the previous menu.
    Back,
    /// The answer deadline passed.
    TimedOut,
}

pub trait Console {
    /// Print a line of menu text.
    fn say(&mut self, text: &str) -> io::Result<()>;

    /// Prompt and wait for one line, optionally bounded by a deadline.
    fn prompt(&mut self, text: &str, limit: Option<Duration>) -> io::Result<Reply>;

    /// Block for `dwell`. The PIN lockout rides on this; the scripted
    /// test console shrinks it to nothing.
    fn sleep(&mut self, dwell: Duration) {
        thread::sleep(dwell);
    }
}

/// Real console over stdin/stdout.
pub struct StdConsole {
    lines: Receiver<io::Result<String>>,
}

impl StdConsole {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("stdin-reader".into())
            .spawn(move || {
                let stdin = io::stdin();
                for line in stdin.lock().lines() {
                    if tx.send(line).is_err() {
                        return;
                    }
                }
            })
            // Thread spawning only fails when the process is out of
            // resources; nothing interactive can proceed then anyway.
            .ok();
        Self { lines: rx }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for StdConsole {
    fn say(&mut self, text: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(text.as_bytes())?;
        out.write_all(b"\n")
    }

    fn prompt(&mut self, text: &str, limit: Option<Duration>) -> io::Result<Reply> {
        {
            let mut out = io::stdout().lock();
            out.write_all(text.as_bytes())?;
            out.flush()?;
        }
        let received = match limit {
            Some(deadline) => match self.lines.recv_timeout(deadline) {
                Ok(line) => line,
                Err(RecvTimeoutError::Timeout) => return Ok(Reply::TimedOut),
                Err(RecvTimeoutError::Disconnected) => return Ok(Reply::Back),
            },
            None => match self.lines.recv() {
                Ok(line) => line,
                // Reader thread gone: stdin hit EOF.
                Err(_) => return Ok(Reply::Back),
            },
        };
        let line = received?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            Ok(Reply::Back)
        } else {
            Ok(Reply::Line(trimmed.to_owned()))
        }
    }
}
