//! Overlay tasks module
//!
//! The foreground main loop, its scheduling primitive, and the background
//! remote watcher together with the channel between them.

pub mod command_channel;
pub mod main_loop;
pub mod remote_watcher;
pub mod ticker;

// Re-export main types
pub use command_channel::{command_channel, CommandConsumer, CommandProducer};
pub use main_loop::{MainLoop, TickOutcome};
pub use remote_watcher::{
    CommandSource, HttpCommandSource, RemoteWatcher, WatcherConfig, WatcherPhase,
};
pub use ticker::Ticker;
