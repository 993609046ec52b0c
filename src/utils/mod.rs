//! Utility functions module
//!
//! Logging setup and signal handling used by both binaries.

pub mod logging;
pub mod signals;

// Re-export main functions
pub use logging::StderrGate;
pub use signals::{shutdown_signal, stop_flag};
