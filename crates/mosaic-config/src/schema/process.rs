//! Process lifecycle timing.

use serde::{Deserialize, Serialize};

/// Timeouts governing shell termination.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessConfig {
    /// Time a shell gets to exit after the hangup signal before it is
    /// killed (valid range: 0-30000 ms).
    pub terminate_grace_ms: u64,
    /// Upper bound on how long `close` waits for a shell to die
    /// (valid range: 100-60000 ms, and at least the grace plus one second
    /// for the kill).
    pub close_timeout_ms: u64,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            terminate_grace_ms: 500,
            close_timeout_ms: 2000,
        }
    }
}
