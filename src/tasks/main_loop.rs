//! The foreground loop: the only writer of timer state
//!
//! Each tick drains remote commands, applies local input, samples the timer
//! and pushes a fresh frame to every display.

use std::{io, ops::ControlFlow, sync::atomic::AtomicBool, time::Instant};

use tracing::{debug, info, warn};

use super::{command_channel::CommandConsumer, ticker::Ticker};
use crate::{
    platform::{BarWidget, LocalAction, LocalControls},
    render::{render_frame, DisplayGeometry},
    state::{Command, TimerEngine},
};

/// Whether the loop should keep going after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Quit,
}

/// Owns the timer engine and the display widgets.
///
/// `displays[i]` and `widgets[i]` describe the same screen.
pub struct MainLoop {
    engine: TimerEngine,
    commands: CommandConsumer,
    displays: Vec<DisplayGeometry>,
    widgets: Vec<Box<dyn BarWidget>>,
    controls: Option<Box<dyn LocalControls>>,
}

impl MainLoop {
    pub fn new(
        engine: TimerEngine,
        commands: CommandConsumer,
        displays: Vec<DisplayGeometry>,
        widgets: Vec<Box<dyn BarWidget>>,
    ) -> Self {
        if displays.len() != widgets.len() {
            warn!(
                "{} displays but {} widgets; only the first {} will be drawn",
                displays.len(),
                widgets.len(),
                displays.len().min(widgets.len())
            );
        }
        Self {
            engine,
            commands,
            displays,
            widgets,
            controls: None,
        }
    }

    /// Attach local keyboard controls
    pub fn with_controls(mut self, controls: Box<dyn LocalControls>) -> Self {
        self.controls = Some(controls);
        self
    }

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    fn apply(&mut self, command: Command, now: Instant, origin: &str) {
        debug!("Applying {} command: {}", origin, command);
        self.engine.apply(command, now);
        match command {
            Command::Toggle if self.engine.is_paused() => info!("Timer paused"),
            Command::Toggle => info!("Timer running"),
            Command::Reset => info!("Timer reset"),
        }
    }

    /// Run one iteration at `now`
    pub fn tick(&mut self, now: Instant) -> io::Result<TickOutcome> {
        let mut outcome = TickOutcome::Continue;

        for command in self.commands.drain_all() {
            self.apply(command, now, "remote");
        }

        if let Some(controls) = self.controls.as_mut() {
            let actions = controls.poll()?;
            for action in actions {
                match action {
                    LocalAction::Command(command) => self.apply(command, now, "local"),
                    LocalAction::Quit => outcome = TickOutcome::Quit,
                }
            }
        }

        self.engine.sample(now);

        let snapshot = self.engine.snapshot();
        let config = *self.engine.config();
        let bars = self.displays.iter().zip(self.widgets.iter_mut());
        for (index, (geometry, widget)) in bars.enumerate() {
            let width = widget.current_width().unwrap_or(geometry.width);
            let frame = render_frame(&snapshot, &config, index, width);
            widget.apply(&frame)?;
        }

        Ok(outcome)
    }

    /// Tick on `ticker`'s cadence until `stop` is set, the user quits, or a
    /// widget fails
    pub fn run(&mut self, stop: &AtomicBool, ticker: Ticker) -> io::Result<()> {
        info!(
            "Main loop started: {} display(s), {}ms cadence",
            self.displays.len(),
            ticker.cadence().as_millis()
        );

        let result = ticker.run(stop, |now| match self.tick(now) {
            Ok(TickOutcome::Continue) => ControlFlow::Continue(()),
            Ok(TickOutcome::Quit) => ControlFlow::Break(Ok(())),
            Err(e) => ControlFlow::Break(Err(e)),
        });

        info!("Main loop finished");
        result.unwrap_or(Ok(()))
    }
}
