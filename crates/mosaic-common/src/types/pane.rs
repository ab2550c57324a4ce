use serde::{Deserialize, Serialize};
use std::fmt;

/// How a pane reaches its shell. `Remote` is a tag only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionKind {
    #[default]
    Local,
    Remote,
}

/// Lifecycle state of a pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaneState {
    Created,
    Connecting,
    Active,
    Minimized,
    Maximized,
    Disconnected,
    Closed,
}

impl PaneState {
    /// States in which a shell process is attached and accepting input.
    pub fn is_live(self) -> bool {
        matches!(
            self,
            PaneState::Active | PaneState::Minimized | PaneState::Maximized
        )
    }

    /// Whether the state machine permits moving from `self` to `next`.
    pub fn can_transition_to(self, next: PaneState) -> bool {
        use PaneState::*;
        match (self, next) {
            (Closed, _) => false,
            (_, Closed) => true,
            (Created, Connecting) => true,
            (Connecting, Active | Disconnected) => true,
            (Active, Minimized | Maximized | Disconnected) => true,
            (Minimized, Active | Maximized | Disconnected) => true,
            (Maximized, Active | Disconnected) => true,
            (Disconnected, Connecting) => true,
            _ => false,
        }
    }
}

impl fmt::Display for PaneState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaneState::Created => "created",
            PaneState::Connecting => "connecting",
            PaneState::Active => "active",
            PaneState::Minimized => "minimized",
            PaneState::Maximized => "maximized",
            PaneState::Disconnected => "disconnected",
            PaneState::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// How a shell process ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitStatus {
    pub code: u32,
    /// Name of the terminating signal, when the platform reports one.
    pub signal: Option<String>,
}

impl ExitStatus {
    pub fn with_code(code: u32) -> Self {
        Self { code, signal: None }
    }

    pub fn success(&self) -> bool {
        self.code == 0 && self.signal.is_none()
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.signal {
            Some(signal) => write!(f, "signal {signal}"),
            None => write!(f, "code {}", self.code),
        }
    }
}
