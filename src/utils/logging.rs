//! Tracing subscriber setup shared by both binaries

use std::{
    fs::OpenOptions,
    io,
    path::Path,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

use tracing_subscriber::{
    fmt::writer::{BoxMakeWriter, MakeWriterExt},
    EnvFilter,
};

/// Log level for the verbose flag
pub fn log_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

fn env_filter(verbose: bool) -> EnvFilter {
    let default_filter = format!("timerbar={},tower_http=info", log_level(verbose));
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Initialise logging to stderr. `RUST_LOG` overrides the default filter.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(io::stderr)
        .try_init();
}

/// Switch that silences stderr logging while the terminal bar owns the screen
#[derive(Debug, Clone, Default)]
pub struct StderrGate {
    muted: Arc<AtomicBool>,
}

impl StderrGate {
    pub fn is_muted(&self) -> bool {
        self.muted.load(Ordering::Relaxed)
    }

    /// Silence stderr until the returned guard is dropped
    pub fn mute(&self) -> MuteGuard {
        self.muted.store(true, Ordering::Relaxed);
        MuteGuard { gate: self.clone() }
    }
}

/// Unmutes its [`StderrGate`] on drop
#[derive(Debug)]
pub struct MuteGuard {
    gate: StderrGate,
}

impl Drop for MuteGuard {
    fn drop(&mut self) {
        self.gate.muted.store(false, Ordering::Relaxed);
    }
}

/// Whether stderr logging has to be silenced while bars are drawn.
///
/// Only when the bars and stderr share a terminal: headless runs and runs
/// logging to a file keep their output.
pub fn should_mute_stderr(headless: bool, logs_to_file: bool, stderr_is_terminal: bool) -> bool {
    !headless && !logs_to_file && stderr_is_terminal
}

/// Initialise logging for the overlay.
///
/// With `log_file` every line is appended to that file. Otherwise lines go
/// to stderr unless `gate` is muted.
pub fn init_overlay(verbose: bool, log_file: Option<&Path>, gate: &StderrGate) -> io::Result<()> {
    let writer = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => {
            let gate = gate.clone();
            BoxMakeWriter::new(io::stderr.with_filter(move |_| !gate.is_muted()))
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_ansi(log_file.is_none())
        .with_writer(writer)
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutes_only_when_bars_share_the_terminal() {
        assert!(should_mute_stderr(false, false, true));
        assert!(!should_mute_stderr(true, false, true));
        assert!(!should_mute_stderr(false, true, true));
        assert!(!should_mute_stderr(false, false, false));
    }

    #[test]
    fn mute_guard_restores_output() {
        let gate = StderrGate::default();
        assert!(!gate.is_muted());
        {
            let _guard = gate.mute();
            assert!(gate.is_muted());
            assert!(gate.clone().is_muted());
        }
        assert!(!gate.is_muted());
    }

    #[test]
    fn verbose_raises_level() {
        assert_eq!(log_level(true), "debug");
        assert_eq!(log_level(false), "info");
    }
}
