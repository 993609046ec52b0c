//! Shared state of the remote command service

use std::{sync::Mutex, time::Instant};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::{Command, CommandSlot};

/// State shared by all request handlers of the remote service
#[derive(Debug)]
pub struct AppState {
    /// Pending command waiting for the overlay's next status read
    pub slot: CommandSlot,
    /// Shared secret; `None` disables the check
    pub auth_token: Option<String>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last command stored, for the health endpoint
    pub last_action: Mutex<Option<Command>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
}

impl AppState {
    pub fn new(port: u16, host: String, auth_token: Option<String>) -> Self {
        Self {
            slot: CommandSlot::new(),
            auth_token: auth_token.filter(|token| !token.is_empty()),
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
        }
    }

    /// Whether requests must present a token
    pub fn requires_token(&self) -> bool {
        self.auth_token.is_some()
    }

    /// Check a presented token. Always true when no token is configured.
    pub fn token_accepted(&self, presented: Option<&str>) -> bool {
        match self.auth_token.as_deref() {
            None => true,
            Some(expected) => presented == Some(expected),
        }
    }

    /// Store a command for the overlay to pick up
    pub fn submit(&self, command: Command) -> Result<(), String> {
        if let Some(previous) = self.slot.store(command)? {
            debug!("Overwriting undelivered command {} with {}", previous, command);
        }
        info!("Command stored: {}", command);

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(command);
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
        Ok(())
    }

    /// Hand the pending command to the caller and clear the slot
    pub fn take_pending(&self) -> Result<Option<Command>, String> {
        let command = self.slot.take()?;
        if let Some(command) = command {
            info!("Command delivered: {}", command);
        }
        Ok(command)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<Command>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| *a);
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
