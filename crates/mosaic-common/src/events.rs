use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::id::PaneId;
use crate::types::{ExitStatus, PaneState};

/// Notifications published by a pane manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PaneEvent {
    Opened(PaneId),
    StateChanged {
        id: PaneId,
        from: PaneState,
        to: PaneState,
    },
    Focused(PaneId),
    Output {
        id: PaneId,
        bytes: Vec<u8>,
    },
    Exited {
        id: PaneId,
        status: Option<ExitStatus>,
    },
    CleanupFailed {
        id: PaneId,
        reason: String,
    },
    Closed(PaneId),
}

impl PaneEvent {
    pub fn pane_id(&self) -> PaneId {
        match self {
            PaneEvent::Opened(id) | PaneEvent::Focused(id) | PaneEvent::Closed(id) => *id,
            PaneEvent::StateChanged { id, .. }
            | PaneEvent::Output { id, .. }
            | PaneEvent::Exited { id, .. }
            | PaneEvent::CleanupFailed { id, .. } => *id,
        }
    }
}

pub struct EventBus {
    sender: broadcast::Sender<PaneEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PaneEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: PaneEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}
