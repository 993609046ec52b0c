//! Error types shared by the overlay and the remote watcher

use std::path::PathBuf;

use thiserror::Error;

/// Startup configuration errors. Any of these is fatal: the overlay refuses
/// to start rather than run with an undefined color ramp.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("duration must be a positive number of seconds, got {0}")]
    InvalidDuration(f64),

    #[error("start fade must be a non-negative number of seconds, got {0}")]
    InvalidStartFade(f64),

    #[error("end fade ({end}s) must be greater than start fade ({start}s)")]
    FadeOrder { start: f64, end: f64 },

    #[error("invalid color {value:?}: {reason}")]
    InvalidColor { value: String, reason: String },

    #[error("invalid display geometry {0:?}, expected WIDTHxHEIGHT+X+Y")]
    InvalidDisplay(String),

    #[error("invalid server url {url:?}: {reason}")]
    InvalidServerUrl { url: String, reason: String },

    #[error("{name} must be greater than zero")]
    ZeroInterval { name: &'static str },

    #[error("failed to read CA certificate {path}: {source}")]
    ReadCaCert {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid CA certificate {path}: {source}")]
    InvalidCaCert {
        path: PathBuf,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// A single failed poll of the remote command service.
///
/// The watcher treats every variant as transient: it is logged and the next
/// interval simply tries again.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service answered with status {0}")]
    Status(u16),
}
