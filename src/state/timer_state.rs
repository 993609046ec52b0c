//! Countdown state machine
//!
//! While running, the remaining time is always derived from a monotonic
//! anchor instead of being decremented tick by tick, so a late or skipped
//! tick never accumulates drift.

use std::time::{Duration, Instant};

use super::{Command, TimerConfig};

/// Point from which the running countdown is measured
#[derive(Debug, Clone, Copy)]
struct Anchor {
    at: Instant,
    remaining_at: f64,
}

impl Anchor {
    fn remaining(&self, now: Instant) -> f64 {
        self.remaining_at - signed_seconds_since(self.at, now)
    }
}

/// Seconds from `from` to `to`, negative when `to` precedes `from`
fn signed_seconds_since(from: Instant, to: Instant) -> f64 {
    if to >= from {
        (to - from).as_secs_f64()
    } else {
        -(from - to).as_secs_f64()
    }
}

/// Timer state for the countdown bar
#[derive(Debug, Clone, Copy)]
struct TimerState {
    /// Negative once the timer is in overtime
    remaining_seconds: f64,
    is_paused: bool,
    anchor: Option<Anchor>,
}

/// The values a frame is rendered from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimerSnapshot {
    pub remaining_seconds: f64,
    pub total_seconds: f64,
    pub is_paused: bool,
}

impl TimerSnapshot {
    pub fn is_overtime(&self) -> bool {
        self.remaining_seconds < 0.0
    }
}

/// Owns the timer state; every mutation goes through here
#[derive(Debug, Clone)]
pub struct TimerEngine {
    config: TimerConfig,
    state: TimerState,
}

impl TimerEngine {
    /// Create a paused timer holding the full duration
    pub fn new(config: TimerConfig) -> Self {
        Self {
            config,
            state: TimerState {
                remaining_seconds: config.total_seconds,
                is_paused: true,
                anchor: None,
            },
        }
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn remaining_seconds(&self) -> f64 {
        self.state.remaining_seconds
    }

    pub fn is_paused(&self) -> bool {
        self.state.is_paused
    }

    pub fn is_overtime(&self) -> bool {
        self.state.remaining_seconds < 0.0
    }

    /// Instant at which the running timer reaches zero.
    ///
    /// `None` while paused, or when that instant is not representable
    /// (deep overtime right after process start).
    pub fn end_instant(&self) -> Option<Instant> {
        if self.state.is_paused {
            return None;
        }
        let anchor = self.state.anchor?;
        if anchor.remaining_at >= 0.0 {
            let until_end = Duration::try_from_secs_f64(anchor.remaining_at).ok()?;
            anchor.at.checked_add(until_end)
        } else {
            let since_end = Duration::try_from_secs_f64(-anchor.remaining_at).ok()?;
            anchor.at.checked_sub(since_end)
        }
    }

    /// Pause or resume, measured from the current instant
    pub fn toggle(&mut self) {
        self.toggle_at(Instant::now());
    }

    /// Pause or resume.
    ///
    /// Resuming anchors the countdown at `now` with the current remaining
    /// time, however long the timer was paused. The remaining time itself is
    /// not touched.
    pub fn toggle_at(&mut self, now: Instant) {
        self.state.is_paused = !self.state.is_paused;
        if !self.state.is_paused {
            self.state.anchor = Some(Anchor {
                at: now,
                remaining_at: self.state.remaining_seconds,
            });
        }
    }

    /// Restore the full duration and pause
    pub fn reset(&mut self) {
        self.state.remaining_seconds = self.config.total_seconds;
        self.state.is_paused = true;
    }

    /// Advance the countdown to `now` and return the remaining time.
    ///
    /// Paused timers return their remaining time unchanged.
    pub fn sample(&mut self, now: Instant) -> f64 {
        if !self.state.is_paused {
            if let Some(anchor) = self.state.anchor {
                self.state.remaining_seconds = anchor.remaining(now);
            }
        }
        self.state.remaining_seconds
    }

    /// Apply a remote or local command
    pub fn apply(&mut self, command: Command, now: Instant) {
        match command {
            Command::Toggle => self.toggle_at(now),
            Command::Reset => self.reset(),
        }
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            remaining_seconds: self.state.remaining_seconds,
            total_seconds: self.config.total_seconds,
            is_paused: self.state.is_paused,
        }
    }
}
