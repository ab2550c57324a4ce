//! The seam between the pane manager and whatever starts processes.

use async_trait::async_trait;
use mosaic_common::{SpawnError, TerminateError};

use crate::types::{ShellProcess, SpawnRequest};

/// Starts shell processes.
///
/// A call resolves to exactly one of: a live [`ShellProcess`] (whose
/// [`ExitWatch`](crate::ExitWatch) later fires once) or a [`SpawnError`].
#[async_trait]
pub trait ProcessSpawner: Send + Sync {
    async fn spawn(&self, request: SpawnRequest) -> Result<ShellProcess, SpawnError>;
}

/// Out-of-band control over a spawned process.
pub trait ProcessControl: Send {
    /// Tell the process its terminal changed size.
    fn resize(&mut self, cols: u16, rows: u16) -> std::io::Result<()>;

    /// Ask the process to exit (SIGHUP on Unix).
    fn hangup(&mut self) -> Result<(), TerminateError>;

    /// Force the process to exit (SIGKILL on Unix).
    fn kill(&mut self) -> Result<(), TerminateError>;
}
