//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::state::{AppState, Command};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub uptime: String,
    pub host: String,
    pub port: u16,
    pub auth_required: bool,
    /// Command stored but not yet collected by the overlay
    pub pending_command: Option<Command>,
    pub last_action: Option<Command>,
    pub last_action_time: Option<DateTime<Utc>>,
}

impl HealthResponse {
    /// Build a health response from the server state without clearing the slot
    pub fn ok(state: &AppState) -> Self {
        let (last_action, last_action_time) = state.get_last_action();
        let pending_command = state.slot.peek().unwrap_or_else(|e| {
            warn!("Failed to read pending command for health check: {}", e);
            None
        });

        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime: state.get_uptime(),
            host: state.host.clone(),
            port: state.port,
            auth_required: state.requires_token(),
            pending_command,
            last_action,
            last_action_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_pending_command_without_taking_it() {
        let state = AppState::new(5000, "127.0.0.1".to_string(), None);
        state.submit(Command::Toggle).unwrap();

        let health = HealthResponse::ok(&state);
        assert_eq!(health.host, "127.0.0.1");
        assert_eq!(health.port, 5000);
        assert_eq!(health.pending_command, Some(Command::Toggle));
        assert_eq!(state.take_pending().unwrap(), Some(Command::Toggle));

        assert_eq!(HealthResponse::ok(&state).pending_command, None);
    }
}
