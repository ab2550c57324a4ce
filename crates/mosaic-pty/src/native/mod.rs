//! `portable-pty` backed process spawner.
//!
//! Each terminal pane gets its own PTY with three background threads:
//! a reader (PTY → output channel), a writer (input channel → PTY), and a
//! waiter that reports the exit status exactly once.

mod control;
mod spawn;

use async_trait::async_trait;
use mosaic_common::SpawnError;

use crate::spawner::ProcessSpawner;
use crate::types::{ShellProcess, SpawnRequest};

pub(crate) use control::NativeControl;

/// Spawns shells inside native pseudo-terminals.
#[derive(Debug, Clone, Copy, Default)]
pub struct PtySpawner;

#[async_trait]
impl ProcessSpawner for PtySpawner {
    async fn spawn(&self, request: SpawnRequest) -> Result<ShellProcess, SpawnError> {
        let program = request.program.clone();
        tokio::task::spawn_blocking(move || spawn::spawn_pty(request))
            .await
            .map_err(|e| SpawnError::Launch {
                program,
                reason: format!("spawn task failed: {e}"),
            })?
    }
}

// =============================================================================
// TESTS
// =============================================================================
