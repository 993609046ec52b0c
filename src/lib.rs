//! timerbar - a remotely controllable countdown bar
//!
//! The overlay side is a timer state machine driven by a single foreground
//! loop, fed by a background poller through a bounded command channel. The
//! service side is a small HTTP server holding one pending command.

pub mod api;
pub mod config;
pub mod error;
pub mod platform;
pub mod render;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use error::{ConfigError, WatchError};
pub use render::{color_for, render, DisplayGeometry, RenderFrame, Rgb};
pub use state::{AppState, Command, TimerConfig, TimerEngine};
pub use tasks::{command_channel, MainLoop, RemoteWatcher};
pub use utils::signals::shutdown_signal;
