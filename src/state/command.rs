//! Remote command type and its wire representation

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A command that drives the timer remotely
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    /// Start the timer if paused, pause it if running
    Toggle,
    /// Restore the full duration and pause
    Reset,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Toggle => "toggle",
            Command::Reset => "reset",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "toggle" => Ok(Command::Toggle),
            "reset" => Ok(Command::Reset),
            other => Err(format!("unknown command: {}", other)),
        }
    }
}

/// Body of `GET /status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandStatus {
    pub last_command: Option<Command>,
}

impl CommandStatus {
    pub fn new(last_command: Option<Command>) -> Self {
        Self { last_command }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_with_null_when_empty() {
        let json = serde_json::to_string(&CommandStatus::new(None)).unwrap();
        assert_eq!(json, r#"{"last_command":null}"#);
    }

    #[test]
    fn status_serializes_lowercase_command() {
        let json = serde_json::to_string(&CommandStatus::new(Some(Command::Toggle))).unwrap();
        assert_eq!(json, r#"{"last_command":"toggle"}"#);
    }

    #[test]
    fn status_rejects_unknown_command() {
        let body = r#"{"last_command":"explode"}"#;
        let parsed: Result<CommandStatus, _> = serde_json::from_str(body);
        assert!(parsed.is_err());
    }

    #[test]
    fn command_parses_from_text() {
        assert_eq!("reset".parse::<Command>(), Ok(Command::Reset));
        assert!("Toggle".parse::<Command>().is_err());
    }
}
