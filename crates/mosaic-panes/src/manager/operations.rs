//! Synchronous pane commands: input, geometry, minimize/maximize, focus.
//!
//! None of these suspend. Each validates and mutates the registry under
//! one lock acquisition, then publishes events after releasing it.

use mosaic_common::{PaneError, PaneEvent, PaneId, PaneState, Rect};

use super::types::Registry;
use super::PaneManager;

impl PaneManager {
    /// Forward bytes to the pane's shell, unmodified and in call order.
    pub fn write(&self, id: PaneId, bytes: &[u8]) -> Result<(), PaneError> {
        let mut guard = self.inner.lock();
        let reg = &mut *guard;
        if !reg.open_pane_mut(id)?.state.is_live() {
            return Err(PaneError::ProcessNotRunning(id));
        }
        let bridge = reg
            .bridges
            .get(&id)
            .ok_or(PaneError::ProcessNotRunning(id))?;
        bridge
            .input
            .write(bytes)
            .map_err(|_| PaneError::ProcessNotRunning(id))?;

        if let Some(pane) = reg.panes.get_mut(&id) {
            pane.metadata.touch();
            if let Some(recorder) = reg.recorders.get_mut(&id) {
                for line in recorder.feed(bytes) {
                    pane.metadata.command_history.push(line);
                }
            }
        }
        Ok(())
    }

    /// Move a pane, keeping its size. Returns the applied rect.
    pub fn move_pane(&self, id: PaneId, x: i32, y: i32) -> Result<Rect, PaneError> {
        let mut reg = self.inner.lock();
        let pane = reg.open_pane_mut(id)?;
        pane.rect = Rect::new(x, y, pane.rect.width, pane.rect.height).clamped();
        Ok(pane.rect)
    }

    /// Resize a pane. Sizes below the minimum are clamped, not rejected.
    ///
    /// The surface and the shell learn the new grid only after the rect
    /// is committed.
    pub fn resize(&self, id: PaneId, width: i32, height: i32) -> Result<Rect, PaneError> {
        let mut guard = self.inner.lock();
        let reg = &mut *guard;
        let pane = reg.open_pane_mut(id)?;
        pane.rect = Rect::new(pane.rect.x, pane.rect.y, width, height).clamped();
        let rect = pane.rect;
        self.propagate_size(reg, id, rect);
        Ok(rect)
    }

    /// Toggle between `Active` and `Minimized`. The shell keeps running.
    pub fn minimize(&self, id: PaneId) -> Result<PaneState, PaneError> {
        let (from, to) = {
            let mut guard = self.inner.lock();
            let reg = &mut *guard;
            let pane = reg.open_pane_mut(id)?;
            let (next, visible) = match pane.state {
                PaneState::Active => (PaneState::Minimized, false),
                PaneState::Minimized => (PaneState::Active, true),
                from => {
                    return Err(PaneError::InvalidTransition {
                        id,
                        action: "minimize",
                        from,
                    })
                }
            };
            let from = pane.transition(next, "minimize")?;
            if let Some(surface) = reg.surfaces.get_mut(&id) {
                surface.set_visible(visible);
            }
            (from, next)
        };
        tracing::debug!(pane_id = %id, state = %to, "minimize toggled");
        self.inner.publish(PaneEvent::StateChanged { id, from, to });
        Ok(to)
    }

    /// Fill the workspace, or restore the exact rect from before.
    ///
    /// Restoring always lands in `Active`. Returns the applied rect.
    pub fn maximize(&self, id: PaneId) -> Result<Rect, PaneError> {
        let (from, to, rect) = {
            let mut guard = self.inner.lock();
            let reg = &mut *guard;
            let workspace = reg.workspace;
            let pane = reg.open_pane_mut(id)?;
            let from = pane.state;
            match from {
                PaneState::Active | PaneState::Minimized => {
                    pane.transition(PaneState::Maximized, "maximize")?;
                    pane.prior_rect = Some(pane.rect);
                    pane.rect = workspace.clamped();
                }
                PaneState::Maximized => {
                    pane.transition(PaneState::Active, "restore")?;
                    if let Some(prior) = pane.prior_rect.take() {
                        pane.rect = prior;
                    }
                }
                _ => {
                    return Err(PaneError::InvalidTransition {
                        id,
                        action: "maximize",
                        from,
                    })
                }
            }
            let (to, rect) = (pane.state, pane.rect);
            if from == PaneState::Minimized {
                if let Some(surface) = reg.surfaces.get_mut(&id) {
                    surface.set_visible(true);
                }
            }
            self.propagate_size(reg, id, rect);
            (from, to, rect)
        };
        tracing::debug!(pane_id = %id, state = %to, "maximize toggled");
        self.inner.publish(PaneEvent::StateChanged { id, from, to });
        Ok(rect)
    }

    /// Make `id` the active pane.
    pub fn focus(&self, id: PaneId) -> Result<(), PaneError> {
        {
            let mut reg = self.inner.lock();
            let pane = reg.open_pane_mut(id)?;
            pane.metadata.touch();
            if reg.active == Some(id) {
                return Ok(());
            }
            reg.active = Some(id);
        }
        self.inner.publish(PaneEvent::Focused(id));
        Ok(())
    }

    /// Change the workspace bounds. Maximized panes are refitted.
    pub fn set_workspace_bounds(&self, bounds: Rect) {
        let mut guard = self.inner.lock();
        let reg = &mut *guard;
        let bounds = bounds.clamped();
        reg.workspace = bounds;
        let maximized: Vec<PaneId> = reg
            .panes
            .values()
            .filter(|p| p.state == PaneState::Maximized)
            .map(|p| p.id)
            .collect();
        for id in maximized {
            if let Some(pane) = reg.panes.get_mut(&id) {
                pane.rect = bounds;
            }
            self.propagate_size(reg, id, bounds);
        }
    }

    /// Tell the surface and the shell about a committed rect.
    fn propagate_size(&self, reg: &mut Registry, id: PaneId, rect: Rect) {
        let (cols, rows) = rect.cells(
            self.inner.settings.cell_width,
            self.inner.settings.cell_height,
        );
        if let Some(surface) = reg.surfaces.get_mut(&id) {
            surface.resize(cols, rows);
        }
        if let Some(bridge) = reg.bridges.get_mut(&id) {
            if let Err(e) = bridge.control.resize(cols, rows) {
                tracing::warn!(pane_id = %id, error = %e, "failed to resize pty");
            }
        }
    }
}
