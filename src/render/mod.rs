//! Rendering module
//!
//! Pure functions turning a timer snapshot into per-display frames. Nothing
//! in here knows about windows, terminals or widgets.

pub mod color;
pub mod frame;

pub use color::{color_for, Rgb};
pub use frame::{fill_fraction, format_label, render, render_frame, DisplayGeometry, RenderFrame};
