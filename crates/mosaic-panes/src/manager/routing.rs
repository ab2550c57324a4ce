//! Per-pane output delivery and exit handling.
//!
//! Each attached shell gets one task that moves its output into the
//! pane's surface in arrival order. The task holds only a weak reference
//! to the manager and is aborted when the pane closes.

use std::sync::Weak;
use std::time::Duration;

use mosaic_common::{ExitStatus, PaneEvent, PaneId, PaneState};
use mosaic_pty::{ExitWatch, OutputStream};
use tokio::time::timeout;

use super::types::Inner;
use super::PaneManager;

/// How long to keep draining output after the exit report.
const DRAIN_LINGER: Duration = Duration::from_millis(50);

pub(super) async fn pump(
    inner: Weak<Inner>,
    id: PaneId,
    mut output: OutputStream,
    mut exit: ExitWatch,
) {
    let status = loop {
        tokio::select! {
            chunk = output.recv() => match chunk {
                Some(bytes) => {
                    if !deliver(&inner, id, &bytes) {
                        return;
                    }
                }
                None => break exit.wait().await,
            },
            status = exit.wait() => {
                while let Ok(Some(bytes)) = timeout(DRAIN_LINGER, output.recv()).await {
                    if !deliver(&inner, id, &bytes) {
                        return;
                    }
                }
                break status;
            }
        }
    };

    if let Some(inner) = inner.upgrade() {
        PaneManager { inner }.on_pane_exit(id, status);
    }
}

fn deliver(inner: &Weak<Inner>, id: PaneId, bytes: &[u8]) -> bool {
    match inner.upgrade() {
        Some(inner) => PaneManager { inner }.on_pane_output(id, bytes),
        None => false,
    }
}

impl PaneManager {
    /// Route one output chunk. Returns `false` once the pane is gone.
    pub(super) fn on_pane_output(&self, id: PaneId, bytes: &[u8]) -> bool {
        {
            let mut guard = self.inner.lock();
            let reg = &mut *guard;
            let Some(pane) = reg.panes.get_mut(&id) else {
                return false;
            };
            if pane.state == PaneState::Closed {
                return false;
            }
            pane.metadata.touch();
            if let Some(surface) = reg.surfaces.get_mut(&id) {
                surface.write(bytes);
            }
            if let Some(buffer) = reg.outputs.get_mut(&id) {
                buffer.push(bytes);
            }
        }
        self.inner.publish(PaneEvent::Output {
            id,
            bytes: bytes.to_vec(),
        });
        true
    }

    /// The shell behind `id` exited on its own. The pane stays, now
    /// `Disconnected`, until it is restarted or closed.
    pub(super) fn on_pane_exit(&self, id: PaneId, status: Option<ExitStatus>) {
        let from = {
            let mut guard = self.inner.lock();
            let reg = &mut *guard;
            let Some(pane) = reg.panes.get_mut(&id) else {
                return;
            };
            let from = pane.state;
            if !from.is_live() || pane.transition(PaneState::Disconnected, "disconnect").is_err() {
                return;
            }
            pane.process = None;
            if from == PaneState::Maximized {
                if let Some(prior) = pane.prior_rect.take() {
                    pane.rect = prior;
                }
            }
            let rect = pane.rect;
            reg.bridges.remove(&id);
            reg.subscriptions.remove(&id);

            let notice = match &status {
                Some(status) => format!("\r\n[process exited with {status}]\r\n"),
                None => "\r\n[process exited]\r\n".to_string(),
            };
            if let Some(surface) = reg.surfaces.get_mut(&id) {
                if from == PaneState::Minimized {
                    surface.set_visible(true);
                }
                if from == PaneState::Maximized {
                    let (cols, rows) = rect.cells(
                        self.inner.settings.cell_width,
                        self.inner.settings.cell_height,
                    );
                    surface.resize(cols, rows);
                }
                surface.write(notice.as_bytes());
            }
            from
        };

        tracing::info!(pane_id = %id, status = ?status, "shell exited");
        self.inner.publish(PaneEvent::StateChanged {
            id,
            from,
            to: PaneState::Disconnected,
        });
        self.inner.publish(PaneEvent::Exited { id, status });
    }
}
