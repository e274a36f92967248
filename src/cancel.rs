//! Cooperative cancellation.
//!
//! The polling loop and the renderers poll a shared flag at defined
//! suspension points: tick boundaries and between blocking hardware
//! writes. Nothing is interrupted mid-protocol; cleanup (blanking the
//! outputs) runs on every exit path of the loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cloneable stop flag. One side calls [`cancel`](Self::cancel), the
/// loop observes it at its next suspension point.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a stop. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}
