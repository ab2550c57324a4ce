use std::path::PathBuf;

use crate::id::PaneId;
use crate::types::PaneState;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failure to bring up a shell process for a pane.
#[derive(Debug, thiserror::Error)]
pub enum SpawnError {
    #[error("failed to open pty: {0}")]
    OpenPty(String),

    #[error("failed to launch '{program}': {reason}")]
    Launch { program: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum TerminateError {
    #[error("failed to signal process: {0}")]
    Signal(String),

    #[error("process did not exit within {0:?}")]
    Timeout(std::time::Duration),
}

/// Errors returned by pane commands.
#[derive(Debug, thiserror::Error)]
pub enum PaneError {
    #[error("pane not found: {0}")]
    PaneNotFound(PaneId),

    #[error("no running process in {0}")]
    ProcessNotRunning(PaneId),

    #[error("spawn failed for {id}: {source}")]
    Spawn {
        id: PaneId,
        #[source]
        source: SpawnError,
    },

    #[error("cannot {action} {id} while {from}")]
    InvalidTransition {
        id: PaneId,
        action: &'static str,
        from: PaneState,
    },
}

impl PaneError {
    /// The pane the error refers to.
    pub fn pane_id(&self) -> PaneId {
        match self {
            PaneError::PaneNotFound(id)
            | PaneError::ProcessNotRunning(id)
            | PaneError::Spawn { id, .. }
            | PaneError::InvalidTransition { id, .. } => *id,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("layout not found: {0}")]
    NotFound(String),

    #[error("layout persistence error: {0}")]
    Persistence(String),

    #[error("layout format error: {0}")]
    Format(String),
}

impl From<std::io::Error> for LayoutError {
    fn from(e: std::io::Error) -> Self {
        LayoutError::Persistence(e.to_string())
    }
}

impl From<serde_json::Error> for LayoutError {
    fn from(e: serde_json::Error) -> Self {
        LayoutError::Format(e.to_string())
    }
}

/// Non-fatal failure while tearing a pane down.
///
/// Reported through logs and the event bus; never stops a close.
#[derive(Debug, Clone, thiserror::Error)]
#[error("cleanup of {id} incomplete: {reason}")]
pub struct ResourceCleanupError {
    pub id: PaneId,
    pub reason: String,
}
