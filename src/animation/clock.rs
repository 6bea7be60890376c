//! Monotonic time sources for the animation scheduler

use std::{cell::Cell, rc::Rc, time::Instant};

/// A source of wall-clock time in seconds
pub trait Clock {
    /// Seconds elapsed since some fixed origin
    fn now_seconds(&self) -> f64;
}

/// Clock backed by [`Instant`], measured from its own creation
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_seconds(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Hand-driven clock for tests and headless stepping.
///
/// Clones share the same time, so a test can keep one copy and hand the
/// other to a scheduler.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, seconds: f64) {
        self.now.set(self.now.get() + seconds);
    }

    pub fn set(&self, seconds: f64) {
        self.now.set(seconds);
    }
}

impl Clock for ManualClock {
    fn now_seconds(&self) -> f64 {
        self.now.get()
    }
}
