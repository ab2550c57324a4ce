//! Pane creation, restart, and process attachment.

use std::sync::Arc;

use mosaic_common::{PaneError, PaneEvent, PaneId, PaneState, SpawnError};
use mosaic_pty::{ShellProcess, SpawnRequest};

use crate::output::OutputBuffer;
use crate::pane::{LineRecorder, Pane, PaneConfig, ProcessRef};

use super::routing;
use super::types::LiveBridge;
use super::PaneManager;

impl PaneManager {
    /// Create a pane and start its shell.
    ///
    /// The pane is registered before the spawn is attempted: if the spawn
    /// fails the pane stays in the registry as `Disconnected` and the error
    /// names it. If the pane is closed while the spawn is in flight, the new
    /// process is terminated and `PaneNotFound` is returned.
    pub async fn create(&self, config: PaneConfig) -> Result<PaneId, PaneError> {
        let settings = &self.inner.settings;
        let title = config
            .title
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| settings.default_title.clone());
        let rect = config.rect.unwrap_or(settings.default_rect);

        let id = {
            let mut reg = self.inner.lock();
            let id = reg.allocate_id();
            reg.insert(Pane::new(
                id,
                title.clone(),
                config,
                rect,
                settings.history_limit,
            ));
            id
        };
        tracing::info!(pane_id = %id, title = %title, "pane created");
        self.inner.publish(PaneEvent::Opened(id));

        let mut surface = self.inner.displays.create(id, &title);

        let request = {
            let mut guard = self.inner.lock();
            let reg = &mut *guard;
            match reg.open_pane_mut(id) {
                Ok(pane) => {
                    pane.transition(PaneState::Connecting, "connect")?;
                    let request = self.inner.spawn_request(pane);
                    surface.resize(request.cols, request.rows);
                    reg.surfaces.insert(id, surface);
                    reg.outputs
                        .insert(id, OutputBuffer::new(settings.output_buffer_bytes));
                    reg.recorders.insert(id, LineRecorder::default());
                    request
                }
                Err(e) => {
                    drop(guard);
                    surface.dispose();
                    return Err(e);
                }
            }
        };
        self.inner.publish(PaneEvent::StateChanged {
            id,
            from: PaneState::Created,
            to: PaneState::Connecting,
        });

        self.connect(id, request).await?;
        Ok(id)
    }

    /// Start a fresh shell in a `Disconnected` pane.
    pub async fn restart(&self, id: PaneId) -> Result<(), PaneError> {
        let request = {
            let mut reg = self.inner.lock();
            let pane = reg.open_pane_mut(id)?;
            if pane.state != PaneState::Disconnected {
                return Err(PaneError::InvalidTransition {
                    id,
                    action: "restart",
                    from: pane.state,
                });
            }
            pane.transition(PaneState::Connecting, "restart")?;
            self.inner.spawn_request(pane)
        };
        tracing::info!(pane_id = %id, "restarting shell");
        self.inner.publish(PaneEvent::StateChanged {
            id,
            from: PaneState::Disconnected,
            to: PaneState::Connecting,
        });

        self.connect(id, request).await
    }

    /// Spawn for a `Connecting` pane and attach the result.
    async fn connect(&self, id: PaneId, request: SpawnRequest) -> Result<(), PaneError> {
        tracing::debug!(pane_id = %id, program = %request.program, "spawning shell");
        match self.inner.spawner.spawn(request).await {
            Ok(process) => self.attach(id, process).await,
            Err(source) => {
                self.spawn_failed(id, &source)?;
                Err(PaneError::Spawn { id, source })
            }
        }
    }

    async fn attach(&self, id: PaneId, process: ShellProcess) -> Result<(), PaneError> {
        let ShellProcess {
            pid,
            input,
            output,
            exit,
            control,
        } = process;

        let orphan = {
            let mut guard = self.inner.lock();
            let reg = &mut *guard;
            let accepted = match reg.panes.get_mut(&id) {
                Some(pane) if pane.state == PaneState::Connecting => {
                    pane.transition(PaneState::Active, "attach")?;
                    pane.process = Some(ProcessRef { pid });
                    pane.metadata.touch();
                    true
                }
                _ => false,
            };
            if accepted {
                let task = tokio::spawn(routing::pump(
                    Arc::downgrade(&self.inner),
                    id,
                    output,
                    exit.clone(),
                ));
                reg.subscriptions.insert(id, task);
                reg.bridges.insert(
                    id,
                    LiveBridge {
                        input,
                        exit,
                        control,
                    },
                );
                reg.active = Some(id);
                None
            } else {
                Some(LiveBridge {
                    input,
                    exit,
                    control,
                })
            }
        };

        if let Some(mut bridge) = orphan {
            tracing::info!(pane_id = %id, "pane closed during spawn, stopping new shell");
            if let Err(e) = self.inner.stop_bridge(id, &mut bridge).await {
                self.inner.report_cleanup(e);
            }
            return Err(PaneError::PaneNotFound(id));
        }

        tracing::info!(pane_id = %id, pid = ?pid, "shell attached");
        self.inner.publish(PaneEvent::StateChanged {
            id,
            from: PaneState::Connecting,
            to: PaneState::Active,
        });
        self.inner.publish(PaneEvent::Focused(id));
        Ok(())
    }

    fn spawn_failed(&self, id: PaneId, source: &SpawnError) -> Result<(), PaneError> {
        tracing::warn!(pane_id = %id, error = %source, "shell failed to start");
        {
            let mut guard = self.inner.lock();
            let reg = &mut *guard;
            let pane = reg
                .panes
                .get_mut(&id)
                .filter(|p| p.state == PaneState::Connecting)
                .ok_or(PaneError::PaneNotFound(id))?;
            pane.transition(PaneState::Disconnected, "disconnect")?;
            if let Some(surface) = reg.surfaces.get_mut(&id) {
                surface.write(format!("\r\n[failed to start shell: {source}]\r\n").as_bytes());
            }
        }
        self.inner.publish(PaneEvent::StateChanged {
            id,
            from: PaneState::Connecting,
            to: PaneState::Disconnected,
        });
        Ok(())
    }
}
