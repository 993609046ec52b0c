//! Platform bindings
//!
//! The main loop only ever talks to displays through [`BarWidget`] and reads
//! local input through [`LocalControls`]; everything that touches a real
//! screen or keyboard lives behind these traits.

pub mod headless;
pub mod terminal;

use std::io;

use crate::{render::RenderFrame, state::Command};

pub use headless::HeadlessBar;
pub use terminal::{TerminalBar, TerminalControls, TerminalSession};

/// One display's bar
pub trait BarWidget {
    /// Width the widget currently has, in the units frames are rendered in.
    /// `None` falls back to the startup display geometry.
    fn current_width(&self) -> Option<u32>;

    fn apply(&mut self, frame: &RenderFrame) -> io::Result<()>;
}

/// Something the local user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalAction {
    Command(Command),
    Quit,
}

/// Non-blocking source of local user input
pub trait LocalControls {
    /// Everything the user did since the last poll, oldest first
    fn poll(&mut self) -> io::Result<Vec<LocalAction>>;
}
