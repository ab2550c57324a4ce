//! Core types and constructors for PaneManager.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use mosaic_common::{EventBus, PaneError, PaneEvent, PaneId, PaneState, Rect, WorkspaceId};
use mosaic_config::MosaicConfig;
use mosaic_pty::{
    ExitWatch, InputSink, LoginShell, ProcessControl, ProcessSpawner, ShellStrategy, SpawnRequest,
};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::display::{DisplayFactory, DisplaySurface};
use crate::output::OutputBuffer;
use crate::pane::{LineRecorder, Pane};

// =============================================================================
// SETTINGS
// =============================================================================

/// Workspace-wide knobs, usually derived from [`MosaicConfig`].
#[derive(Debug, Clone)]
pub struct ManagerSettings {
    /// Bounds a maximized pane fills.
    pub workspace: Rect,
    pub cell_width: u32,
    pub cell_height: u32,
    pub default_title: String,
    pub default_rect: Rect,
    pub history_limit: usize,
    pub output_buffer_bytes: usize,
    /// Time a process gets to exit after hangup before it is killed.
    pub terminate_grace: Duration,
    /// Upper bound on waiting for a process during `close`.
    pub close_timeout: Duration,
    pub event_capacity: usize,
    /// Shell used when a pane does not name one. `None` detects it.
    pub shell_program: Option<String>,
    pub shell_args: Vec<String>,
    pub login_shell: bool,
    pub working_directory: Option<PathBuf>,
    pub env: BTreeMap<String, String>,
}

impl ManagerSettings {
    pub fn from_config(config: &MosaicConfig) -> Self {
        let ws = &config.workspace;
        let panes = &config.panes;
        Self {
            workspace: Rect::new(0, 0, ws.width as i32, ws.height as i32).clamped(),
            cell_width: ws.cell_width,
            cell_height: ws.cell_height,
            default_title: panes.title.clone(),
            default_rect: Rect::new(panes.x, panes.y, panes.width, panes.height),
            history_limit: panes.history_limit as usize,
            output_buffer_bytes: panes.output_buffer_bytes as usize,
            terminate_grace: Duration::from_millis(config.process.terminate_grace_ms),
            close_timeout: Duration::from_millis(config.process.close_timeout_ms),
            event_capacity: ws.event_capacity as usize,
            shell_program: config.shell.program().map(str::to_string),
            shell_args: config.shell.args.clone(),
            login_shell: config.shell.login_shell,
            working_directory: config.shell.working_directory(),
            env: config.shell.env.clone(),
        }
    }
}

impl Default for ManagerSettings {
    fn default() -> Self {
        Self::from_config(&MosaicConfig::default())
    }
}

// =============================================================================
// REGISTRY
// =============================================================================

/// The live process half of a pane.
pub(super) struct LiveBridge {
    pub(super) input: InputSink,
    pub(super) exit: ExitWatch,
    pub(super) control: Box<dyn ProcessControl>,
}

/// Every pane and its side tables, keyed by the same id.
#[derive(Default)]
pub(super) struct Registry {
    pub(super) panes: HashMap<PaneId, Pane>,
    /// Insertion order of `panes`.
    pub(super) order: Vec<PaneId>,
    pub(super) bridges: HashMap<PaneId, LiveBridge>,
    pub(super) surfaces: HashMap<PaneId, Box<dyn DisplaySurface>>,
    pub(super) subscriptions: HashMap<PaneId, JoinHandle<()>>,
    pub(super) outputs: HashMap<PaneId, OutputBuffer>,
    pub(super) recorders: HashMap<PaneId, LineRecorder>,
    pub(super) active: Option<PaneId>,
    pub(super) workspace: Rect,
    pub(super) next_id: u32,
}

impl Registry {
    pub(super) fn allocate_id(&mut self) -> PaneId {
        self.next_id += 1;
        PaneId(self.next_id)
    }

    pub(super) fn insert(&mut self, pane: Pane) {
        self.order.push(pane.id);
        self.panes.insert(pane.id, pane);
    }

    /// Look up a pane that has not been closed.
    pub(super) fn open_pane_mut(&mut self, id: PaneId) -> Result<&mut Pane, PaneError> {
        self.panes
            .get_mut(&id)
            .filter(|p| p.state != PaneState::Closed)
            .ok_or(PaneError::PaneNotFound(id))
    }

    /// Move focus off `closing` if it had it. Returns the new focus when
    /// it changed.
    pub(super) fn refocus_away_from(&mut self, closing: PaneId) -> Option<Option<PaneId>> {
        if self.active != Some(closing) {
            return None;
        }
        let next = self
            .order
            .iter()
            .rev()
            .copied()
            .find(|id| {
                self.panes
                    .get(id)
                    .is_some_and(|p| p.state != PaneState::Closed)
            });
        self.active = next;
        Some(next)
    }

    /// Drop a pane and every side-table entry. Returns its surface so the
    /// caller can dispose it outside the lock.
    pub(super) fn remove(&mut self, id: PaneId) -> Option<Box<dyn DisplaySurface>> {
        self.panes.remove(&id);
        self.order.retain(|p| *p != id);
        self.bridges.remove(&id);
        if let Some(task) = self.subscriptions.remove(&id) {
            task.abort();
        }
        self.outputs.remove(&id);
        self.recorders.remove(&id);
        if self.active == Some(id) {
            self.active = None;
        }
        self.surfaces.remove(&id)
    }
}

// =============================================================================
// MANAGER
// =============================================================================

pub(super) struct Inner {
    pub(super) id: WorkspaceId,
    pub(super) settings: ManagerSettings,
    pub(super) spawner: Arc<dyn ProcessSpawner>,
    pub(super) displays: Arc<dyn DisplayFactory>,
    pub(super) shell: Arc<dyn ShellStrategy>,
    pub(super) events: EventBus,
    pub(super) registry: Mutex<Registry>,
}

impl Inner {
    /// The registry lock. Never held across an `.await`.
    pub(super) fn lock(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(super) fn publish(&self, event: PaneEvent) {
        self.events.publish(event);
    }

    pub(super) fn spawn_request(&self, pane: &Pane) -> SpawnRequest {
        let args = if pane.terminal.args.is_empty() {
            &self.settings.shell_args
        } else {
            &pane.terminal.args
        };
        let command = self.shell.resolve(pane.terminal.shell.as_deref(), args);
        let (cols, rows) = pane
            .rect
            .cells(self.settings.cell_width, self.settings.cell_height);

        let mut request = SpawnRequest::new(command.program)
            .args(command.args)
            .size(cols, rows);
        if let Some(dir) = pane
            .metadata
            .working_directory
            .clone()
            .or_else(|| self.settings.working_directory.clone())
        {
            request = request.cwd(dir);
        }
        request.env.extend(
            self.settings
                .env
                .iter()
                .chain(&pane.terminal.env)
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        request
            .env
            .insert("MOSAIC_PANE".into(), pane.id.0.to_string());
        request
            .env
            .insert("MOSAIC_WORKSPACE".into(), self.id.to_string());
        request
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        let reg = self
            .registry
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        for task in reg.subscriptions.values() {
            task.abort();
        }
        for (id, bridge) in reg.bridges.iter_mut() {
            if let Err(e) = bridge.control.kill() {
                tracing::warn!(pane_id = %id, error = %e, "failed to kill shell on drop");
            }
        }
        for surface in reg.surfaces.values_mut() {
            surface.dispose();
        }
    }
}

/// Registry and orchestrator for every pane in one workspace.
///
/// Cheap to clone; clones share the same workspace. Panes still open when
/// the last handle drops have their processes killed; prefer
/// [`shutdown`](PaneManager::shutdown) for an orderly teardown.
#[derive(Clone)]
pub struct PaneManager {
    pub(super) inner: Arc<Inner>,
}

impl PaneManager {
    /// Create a manager whose shells follow the configured login shell.
    pub fn new(
        settings: ManagerSettings,
        spawner: Arc<dyn ProcessSpawner>,
        displays: Arc<dyn DisplayFactory>,
    ) -> Self {
        let shell = Arc::new(LoginShell {
            default_program: settings.shell_program.clone(),
            login: settings.login_shell,
        });
        Self::with_shell(settings, spawner, displays, shell)
    }

    /// Create a manager with a custom shell strategy.
    pub fn with_shell(
        settings: ManagerSettings,
        spawner: Arc<dyn ProcessSpawner>,
        displays: Arc<dyn DisplayFactory>,
        shell: Arc<dyn ShellStrategy>,
    ) -> Self {
        let registry = Registry {
            workspace: settings.workspace.clamped(),
            ..Registry::default()
        };
        Self {
            inner: Arc::new(Inner {
                id: WorkspaceId::new(),
                events: EventBus::new(settings.event_capacity),
                settings,
                spawner,
                displays,
                shell,
                registry: Mutex::new(registry),
            }),
        }
    }

    // -- Accessors --

    pub fn settings(&self) -> &ManagerSettings {
        &self.inner.settings
    }

    pub fn workspace_id(&self) -> &WorkspaceId {
        &self.inner.id
    }

    /// Snapshot of one pane.
    pub fn pane(&self, id: PaneId) -> Option<Pane> {
        self.inner.lock().panes.get(&id).cloned()
    }

    /// Snapshots of every pane in creation order.
    pub fn panes(&self) -> Vec<Pane> {
        let reg = self.inner.lock();
        reg.order
            .iter()
            .filter_map(|id| reg.panes.get(id).cloned())
            .collect()
    }

    pub fn pane_ids(&self) -> Vec<PaneId> {
        self.inner.lock().order.clone()
    }

    pub fn pane_count(&self) -> usize {
        self.inner.lock().panes.len()
    }

    pub fn active_pane_id(&self) -> Option<PaneId> {
        self.inner.lock().active
    }

    pub fn workspace_bounds(&self) -> Rect {
        self.inner.lock().workspace
    }

    /// Bytes of recent output retained for a pane.
    pub fn output_tail(&self, id: PaneId) -> Option<Vec<u8>> {
        self.inner.lock().outputs.get(&id).map(OutputBuffer::contents)
    }

    /// Stream of [`PaneEvent`]s from this workspace.
    pub fn subscribe(&self) -> broadcast::Receiver<PaneEvent> {
        self.inner.events.subscribe()
    }
}
