//! Graceful-then-forceful shutdown of a shell process.

use std::time::Duration;

use mosaic_common::{ExitStatus, TerminateError};
use tokio::time::timeout;

use crate::spawner::ProcessControl;
use crate::types::ExitWatch;

/// How long to wait for the exit report after a forceful kill.
pub const KILL_WAIT: Duration = Duration::from_secs(1);

/// Stop a process: hang it up, wait up to `grace`, then kill it and wait
/// up to [`KILL_WAIT`].
///
/// Returns the exit status (`None` if it could not be collected), or
/// `TerminateError::Timeout` if the process never reported an exit.
pub async fn terminate(
    control: &mut dyn ProcessControl,
    exit: &mut ExitWatch,
    grace: Duration,
) -> Result<Option<ExitStatus>, TerminateError> {
    if exit.has_exited() {
        return Ok(exit.status());
    }

    match control.hangup() {
        Ok(()) => {
            if let Ok(status) = timeout(grace, exit.wait()).await {
                return Ok(status);
            }
            tracing::debug!(?grace, "process ignored hangup, killing");
        }
        Err(e) => tracing::debug!(error = %e, "hangup failed, killing"),
    }

    control.kill()?;
    timeout(KILL_WAIT, exit.wait())
        .await
        .map_err(|_| TerminateError::Timeout(grace + KILL_WAIT))
}
