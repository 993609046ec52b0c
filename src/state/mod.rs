//! State management module
//!
//! Timer state machine for the overlay, and the command slot and shared
//! state of the remote service.

pub mod app_state;
pub mod command;
pub mod command_slot;
pub mod timer_config;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use command::{Command, CommandStatus};
pub use command_slot::CommandSlot;
pub use timer_config::TimerConfig;
pub use timer_state::{TimerEngine, TimerSnapshot};
