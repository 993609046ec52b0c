//! The service's single pending-command slot

use std::sync::Mutex;

use super::Command;

/// Holds at most one pending command.
///
/// Storing overwrites whatever was pending; taking clears the slot, so each
/// stored command is delivered to at most one reader.
#[derive(Debug, Default)]
pub struct CommandSlot {
    pending: Mutex<Option<Command>>,
}

impl CommandSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the pending command, returning the one it overwrote
    pub fn store(&self, command: Command) -> Result<Option<Command>, String> {
        let mut pending = self.pending.lock()
            .map_err(|e| format!("Failed to lock command slot: {}", e))?;
        Ok(pending.replace(command))
    }

    /// Swap the pending command out, leaving the slot empty
    pub fn take(&self) -> Result<Option<Command>, String> {
        let mut pending = self.pending.lock()
            .map_err(|e| format!("Failed to lock command slot: {}", e))?;
        Ok(pending.take())
    }

    /// Look at the pending command without clearing it
    pub fn peek(&self) -> Result<Option<Command>, String> {
        self.pending.lock()
            .map(|pending| *pending)
            .map_err(|e| format!("Failed to lock command slot: {}", e))
    }
}
