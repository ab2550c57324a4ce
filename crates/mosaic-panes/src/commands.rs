use mosaic_common::{PaneError, PaneId, Rect};

use crate::manager::PaneManager;

/// The fixed set of commands that change a pane.
///
/// Interactive gestures and programmatic callers both go through these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneCommand {
    Move { id: PaneId, x: i32, y: i32 },
    Resize { id: PaneId, width: i32, height: i32 },
    Minimize(PaneId),
    Maximize(PaneId),
    Focus(PaneId),
    Close(PaneId),
}

impl PaneCommand {
    pub fn pane_id(&self) -> PaneId {
        match *self {
            PaneCommand::Move { id, .. } | PaneCommand::Resize { id, .. } => id,
            PaneCommand::Minimize(id)
            | PaneCommand::Maximize(id)
            | PaneCommand::Focus(id)
            | PaneCommand::Close(id) => id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The rect that was committed.
    Applied(Rect),
    Done,
}

impl PaneManager {
    /// Apply one command. Interactive gestures and programmatic callers
    /// share this path.
    pub async fn execute(&self, command: PaneCommand) -> Result<CommandOutcome, PaneError> {
        tracing::trace!(?command, "executing pane command");
        match command {
            PaneCommand::Move { id, x, y } => self.move_pane(id, x, y).map(CommandOutcome::Applied),
            PaneCommand::Resize { id, width, height } => {
                self.resize(id, width, height).map(CommandOutcome::Applied)
            }
            PaneCommand::Minimize(id) => self.minimize(id).map(|_| CommandOutcome::Done),
            PaneCommand::Maximize(id) => self.maximize(id).map(CommandOutcome::Applied),
            PaneCommand::Focus(id) => self.focus(id).map(|_| CommandOutcome::Done),
            PaneCommand::Close(id) => self.close(id).await.map(|_| CommandOutcome::Done),
        }
    }

    /// Apply a batch in order, stopping at the first failure.
    pub async fn execute_all(
        &self,
        commands: impl IntoIterator<Item = PaneCommand>,
    ) -> Result<Vec<CommandOutcome>, PaneError> {
        let mut outcomes = Vec::new();
        for command in commands {
            outcomes.push(self.execute(command).await?);
        }
        Ok(outcomes)
    }
}
