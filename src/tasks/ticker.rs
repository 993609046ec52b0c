//! Fixed-cadence scheduling for the foreground loop

use std::{
    ops::ControlFlow,
    sync::atomic::{AtomicBool, Ordering},
    thread,
    time::{Duration, Instant},
};

/// Refresh cadence of the overlay
pub const DEFAULT_CADENCE: Duration = Duration::from_millis(50);

/// Invokes a tick function on a fixed cadence until cancelled
#[derive(Debug, Clone, Copy)]
pub struct Ticker {
    cadence: Duration,
}

impl Ticker {
    pub fn new(cadence: Duration) -> Self {
        Self { cadence }
    }

    pub fn cadence(&self) -> Duration {
        self.cadence
    }

    /// Run `tick` until it breaks or `stop` is set.
    ///
    /// Each period sleeps only for what the tick left unused, so a slow tick
    /// shortens the following pause instead of stretching the cadence.
    /// Returns the break value, or `None` when stopped by the flag.
    pub fn run<B, F>(&self, stop: &AtomicBool, mut tick: F) -> Option<B>
    where
        F: FnMut(Instant) -> ControlFlow<B>,
    {
        while !stop.load(Ordering::Relaxed) {
            let started = Instant::now();
            if let ControlFlow::Break(value) = tick(started) {
                return Some(value);
            }
            let spent = started.elapsed();
            if let Some(rest) = self.cadence.checked_sub(spent) {
                thread::sleep(rest);
            }
        }
        None
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(DEFAULT_CADENCE)
    }
}
