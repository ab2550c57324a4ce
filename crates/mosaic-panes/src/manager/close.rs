//! Pane teardown.

use mosaic_common::{
    ExitStatus, PaneError, PaneEvent, PaneId, PaneState, ResourceCleanupError,
};
use tokio::time::timeout;

use super::types::{Inner, LiveBridge};
use super::PaneManager;

impl PaneManager {
    /// Close a pane: stop its output task, terminate its shell, dispose
    /// its surface, and drop it from the registry.
    ///
    /// A shell that will not die is reported as a cleanup failure, but the
    /// pane is removed regardless.
    pub async fn close(&self, id: PaneId) -> Result<(), PaneError> {
        let (from, bridge, refocused) = {
            let mut guard = self.inner.lock();
            let reg = &mut *guard;
            let pane = reg.open_pane_mut(id)?;
            let from = pane.transition(PaneState::Closed, "close")?;
            pane.process = None;
            if let Some(task) = reg.subscriptions.remove(&id) {
                task.abort();
            }
            let bridge = reg.bridges.remove(&id);
            (from, bridge, reg.refocus_away_from(id))
        };
        tracing::info!(pane_id = %id, from = %from, "closing pane");
        self.inner.publish(PaneEvent::StateChanged {
            id,
            from,
            to: PaneState::Closed,
        });
        if let Some(Some(next)) = refocused {
            self.inner.publish(PaneEvent::Focused(next));
        }

        if let Some(mut bridge) = bridge {
            match self.inner.stop_bridge(id, &mut bridge).await {
                Ok(status) => tracing::debug!(pane_id = %id, status = ?status, "shell stopped"),
                Err(e) => self.inner.report_cleanup(e),
            }
        }

        let surface = self.inner.lock().remove(id);
        if let Some(mut surface) = surface {
            surface.dispose();
        }
        self.inner.publish(PaneEvent::Closed(id));
        Ok(())
    }

    /// Close every pane. Returns how many were closed.
    pub async fn shutdown(&self) -> usize {
        let ids = self.pane_ids();
        tracing::info!(workspace = %self.inner.id, panes = ids.len(), "shutting down workspace");
        let mut closed = 0;
        for id in ids {
            if self.close(id).await.is_ok() {
                closed += 1;
            }
        }
        closed
    }
}

impl Inner {
    /// Terminate a detached bridge, bounded by the close timeout.
    pub(super) async fn stop_bridge(
        &self,
        id: PaneId,
        bridge: &mut LiveBridge,
    ) -> Result<Option<ExitStatus>, ResourceCleanupError> {
        let LiveBridge { exit, control, .. } = bridge;
        let stop = mosaic_pty::terminate(
            control.as_mut(),
            exit,
            self.settings.terminate_grace,
        );
        let stopped = timeout(self.settings.close_timeout, stop).await;
        match stopped {
            Ok(Ok(status)) => Ok(status),
            Ok(Err(e)) => Err(ResourceCleanupError {
                id,
                reason: e.to_string(),
            }),
            Err(_) => {
                // The deadline can land inside the hangup grace, before the
                // kill was ever sent.
                if !exit.has_exited() {
                    if let Err(e) = control.kill() {
                        tracing::debug!(pane_id = %id, error = %e, "kill after close timeout failed");
                    }
                }
                if exit.has_exited() {
                    return Ok(exit.status());
                }
                Err(ResourceCleanupError {
                    id,
                    reason: format!(
                        "shell still running after {:?}",
                        self.settings.close_timeout
                    ),
                })
            }
        }
    }

    pub(super) fn report_cleanup(&self, err: ResourceCleanupError) {
        tracing::warn!(pane_id = %err.id, error = %err, "pane cleanup incomplete");
        self.publish(PaneEvent::CleanupFailed {
            id: err.id,
            reason: err.reason,
        });
    }
}
