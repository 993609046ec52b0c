//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};

use clap::Parser;

use crate::{
    error::ConfigError,
    platform::terminal::LabelAnchor,
    render::{DisplayGeometry, Rgb},
    state::{timer_config, TimerConfig},
    tasks::{HttpCommandSource, WatcherConfig},
};

/// CLI arguments of the overlay
#[derive(Parser, Debug)]
#[command(name = "timerbar")]
#[command(about = "A countdown bar across every display, remotely controllable")]
#[command(version)]
pub struct OverlayArgs {
    /// Countdown duration in minutes
    #[arg(short, long, default_value = "10")]
    pub duration_minutes: f64,

    /// Overtime in seconds after which the bar starts changing color
    #[arg(long, default_value = "15")]
    pub start_fade: f64,

    /// Overtime in seconds at which the bar reaches the end color
    #[arg(long, default_value = "45")]
    pub end_fade: f64,

    /// Bar color while counting down
    #[arg(long, default_value_t = timer_config::DEFAULT_START_COLOR)]
    pub start_color: Rgb,

    /// Bar color once the fade is complete
    #[arg(long, default_value_t = timer_config::DEFAULT_END_COLOR)]
    pub end_color: Rgb,

    /// Display geometry as WIDTHxHEIGHT+X+Y; repeat once per display
    #[arg(long = "display", value_name = "GEOMETRY")]
    pub displays: Vec<DisplayGeometry>,

    /// Base URL of the remote command service
    #[arg(short, long, env = "TIMERBAR_SERVER_URL")]
    pub server_url: Option<String>,

    /// Shared secret sent to the remote command service
    #[arg(long, env = "TIMERBAR_AUTH_TOKEN", hide_env_values = true)]
    pub auth_token: Option<String>,

    /// Extra PEM root certificate to trust when the service uses TLS
    #[arg(long, env = "TIMERBAR_CA_CERT")]
    pub ca_cert: Option<PathBuf>,

    /// Interval between polls of the remote service, in milliseconds
    #[arg(long, default_value = "1000")]
    pub poll_interval_ms: u64,

    /// Timeout of a single poll, in milliseconds
    #[arg(long, default_value = "500")]
    pub request_timeout_ms: u64,

    /// Center the time label instead of anchoring it left
    #[arg(long)]
    pub center_label: bool,

    /// Report frames in the log instead of drawing on the terminal
    #[arg(long)]
    pub headless: bool,

    /// Append logs to this file instead of stderr
    #[arg(long, env = "TIMERBAR_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl OverlayArgs {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Validated timer configuration
    pub fn timer_config(&self) -> Result<TimerConfig, ConfigError> {
        TimerConfig::new(
            self.duration_minutes * 60.0,
            self.start_fade,
            self.end_fade,
            self.start_color,
            self.end_color,
        )
    }

    /// Displays to draw on, one default display when none were given
    pub fn displays(&self) -> Vec<DisplayGeometry> {
        if self.displays.is_empty() {
            vec![DisplayGeometry::default()]
        } else {
            self.displays.clone()
        }
    }

    /// Remote service connection, `None` when running local-only
    pub fn watcher_config(&self) -> Result<Option<WatcherConfig>, ConfigError> {
        let server_url = self.server_url.as_deref().filter(|url| !url.trim().is_empty());
        let Some(server_url) = server_url else {
            return Ok(None);
        };
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval { name: "poll interval" });
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::ZeroInterval { name: "request timeout" });
        }

        let mut config = WatcherConfig::new(server_url, self.auth_token.clone())?;
        config.poll_interval = Duration::from_millis(self.poll_interval_ms);
        config.request_timeout = Duration::from_millis(self.request_timeout_ms);
        config.ca_cert = self.ca_cert.clone();
        Ok(Some(config))
    }

    /// Remote service connection together with its HTTP client.
    ///
    /// Certificate problems are configuration errors like any other.
    pub fn command_source(
        &self,
    ) -> Result<Option<(WatcherConfig, HttpCommandSource)>, ConfigError> {
        let Some(config) = self.watcher_config()? else {
            return Ok(None);
        };
        let source = HttpCommandSource::new(&config)?;
        Ok(Some((config, source)))
    }

    pub fn label_anchor(&self) -> LabelAnchor {
        if self.center_label { LabelAnchor::Center } else { LabelAnchor::Left }
    }
}

/// CLI arguments of the remote command service
#[derive(Parser, Debug)]
#[command(name = "timerbar-remote")]
#[command(about = "Holds one pending command for the timerbar overlay to pick up")]
#[command(version)]
pub struct RemoteArgs {
    /// Port to bind the server to
    #[arg(short, long, default_value = "5000")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Shared secret required on command endpoints
    #[arg(long, env = "TIMERBAR_AUTH_TOKEN", hide_env_values = true)]
    pub auth_token: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl RemoteArgs {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
