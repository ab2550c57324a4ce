//! Scripted collaborators for manager tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use mosaic_common::{ExitStatus, PaneId, SpawnError, TerminateError};
use mosaic_pty::{
    exit_channel, ExitNotifier, InputSink, LoginShell, ProcessControl, ProcessSpawner,
    ShellProcess, SpawnRequest,
};
use tokio::sync::{mpsc, Semaphore};

use crate::display::{DisplayFactory, DisplaySurface};
use crate::manager::{ManagerSettings, PaneManager};

// =============================================================================
// SPAWNER
// =============================================================================

/// How a fake process reacts to termination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Resistance {
    None,
    IgnoresHangup,
    Immortal,
}

/// Fires a fake process's single exit and keeps the live count.
struct ExitCell {
    notifier: Mutex<Option<ExitNotifier>>,
    live: Arc<AtomicUsize>,
}

impl ExitCell {
    fn fire(&self, status: ExitStatus) {
        if let Some(notifier) = self.notifier.lock().unwrap().take() {
            notifier.notify(status);
            self.live.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

/// Test-side end of one fake shell.
pub(crate) struct FakeHandle {
    output: mpsc::UnboundedSender<Vec<u8>>,
    input: Mutex<mpsc::UnboundedReceiver<Vec<u8>>>,
    exit: Arc<ExitCell>,
    resizes: Arc<Mutex<Vec<(u16, u16)>>>,
    signals: Arc<Mutex<Vec<&'static str>>>,
}

impl FakeHandle {
    pub(crate) fn emit(&self, bytes: &[u8]) {
        let _ = self.output.send(bytes.to_vec());
    }

    /// Whether the manager dropped its end of the output stream.
    pub(crate) fn output_closed(&self) -> bool {
        self.output.is_closed()
    }

    pub(crate) fn exit(&self, code: u32) {
        self.exit.fire(ExitStatus::with_code(code));
    }

    /// Everything written to the shell so far.
    pub(crate) fn take_input(&self) -> Vec<u8> {
        let mut rx = self.input.lock().unwrap();
        let mut all = Vec::new();
        while let Ok(chunk) = rx.try_recv() {
            all.extend(chunk);
        }
        all
    }

    pub(crate) fn resizes(&self) -> Vec<(u16, u16)> {
        self.resizes.lock().unwrap().clone()
    }

    pub(crate) fn signals(&self) -> Vec<&'static str> {
        self.signals.lock().unwrap().clone()
    }
}

struct FakeControl {
    exit: Arc<ExitCell>,
    resistance: Resistance,
    resizes: Arc<Mutex<Vec<(u16, u16)>>>,
    signals: Arc<Mutex<Vec<&'static str>>>,
}

impl ProcessControl for FakeControl {
    fn resize(&mut self, cols: u16, rows: u16) -> std::io::Result<()> {
        self.resizes.lock().unwrap().push((cols, rows));
        Ok(())
    }

    fn hangup(&mut self) -> Result<(), TerminateError> {
        self.signals.lock().unwrap().push("hangup");
        if self.resistance == Resistance::None {
            self.exit.fire(ExitStatus {
                code: 1,
                signal: Some("SIGHUP".into()),
            });
        }
        Ok(())
    }

    fn kill(&mut self) -> Result<(), TerminateError> {
        self.signals.lock().unwrap().push("kill");
        if self.resistance != Resistance::Immortal {
            self.exit.fire(ExitStatus {
                code: 1,
                signal: Some("SIGKILL".into()),
            });
        }
        Ok(())
    }
}

/// In-memory [`ProcessSpawner`] driven by the test.
pub(crate) struct FakeSpawner {
    gated: AtomicBool,
    gate: Semaphore,
    failing: AtomicBool,
    resistance: Mutex<Resistance>,
    live: Arc<AtomicUsize>,
    requests: Mutex<Vec<SpawnRequest>>,
    handles: Mutex<Vec<Arc<FakeHandle>>>,
}

impl FakeSpawner {
    pub(crate) fn new() -> Self {
        Self {
            gated: AtomicBool::new(false),
            gate: Semaphore::new(0),
            failing: AtomicBool::new(false),
            resistance: Mutex::new(Resistance::None),
            live: Arc::new(AtomicUsize::new(0)),
            requests: Mutex::new(Vec::new()),
            handles: Mutex::new(Vec::new()),
        }
    }

    /// Hold every spawn until [`release`](Self::release) is called.
    pub(crate) fn hold(&self) {
        self.gated.store(true, Ordering::SeqCst);
    }

    pub(crate) fn release(&self, spawns: usize) {
        self.gate.add_permits(spawns);
    }

    pub(crate) fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub(crate) fn set_resistance(&self, resistance: Resistance) {
        *self.resistance.lock().unwrap() = resistance;
    }

    /// Processes spawned and not yet exited.
    pub(crate) fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    pub(crate) fn requests(&self) -> Vec<SpawnRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The n-th successfully spawned process.
    pub(crate) fn handle(&self, n: usize) -> Arc<FakeHandle> {
        Arc::clone(&self.handles.lock().unwrap()[n])
    }

    pub(crate) fn spawned(&self) -> usize {
        self.handles.lock().unwrap().len()
    }
}

#[async_trait]
impl ProcessSpawner for FakeSpawner {
    async fn spawn(&self, request: SpawnRequest) -> Result<ShellProcess, SpawnError> {
        self.requests.lock().unwrap().push(request.clone());
        if self.gated.load(Ordering::SeqCst) {
            let permit = self
                .gate
                .acquire()
                .await
                .map_err(|e| SpawnError::OpenPty(e.to_string()))?;
            permit.forget();
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(SpawnError::Launch {
                program: request.program,
                reason: "scripted failure".into(),
            });
        }

        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let (output_tx, output_rx) = mpsc::unbounded_channel();
        let (notifier, exit) = exit_channel();
        self.live.fetch_add(1, Ordering::SeqCst);

        let cell = Arc::new(ExitCell {
            notifier: Mutex::new(Some(notifier)),
            live: Arc::clone(&self.live),
        });
        let resizes = Arc::new(Mutex::new(Vec::new()));
        let signals = Arc::new(Mutex::new(Vec::new()));
        self.handles.lock().unwrap().push(Arc::new(FakeHandle {
            output: output_tx,
            input: Mutex::new(input_rx),
            exit: Arc::clone(&cell),
            resizes: Arc::clone(&resizes),
            signals: Arc::clone(&signals),
        }));

        let pid = self.handles.lock().unwrap().len() as u32 + 1000;
        Ok(ShellProcess {
            pid: Some(pid),
            input: InputSink::new(input_tx),
            output: output_rx,
            exit,
            control: Box::new(FakeControl {
                exit: cell,
                resistance: *self.resistance.lock().unwrap(),
                resizes,
                signals,
            }),
        })
    }
}

// =============================================================================
// DISPLAYS
// =============================================================================

/// What one recording surface has seen.
#[derive(Debug, Clone, Default)]
pub(crate) struct SurfaceLog {
    pub(crate) title: String,
    pub(crate) written: Vec<u8>,
    pub(crate) resizes: Vec<(u16, u16)>,
    pub(crate) visibility: Vec<bool>,
    pub(crate) disposed: usize,
}

impl SurfaceLog {
    pub(crate) fn text(&self) -> String {
        String::from_utf8_lossy(&self.written).into_owned()
    }
}

struct RecordingSurface(Arc<Mutex<SurfaceLog>>);

impl DisplaySurface for RecordingSurface {
    fn write(&mut self, bytes: &[u8]) {
        self.0.lock().unwrap().written.extend_from_slice(bytes);
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        self.0.lock().unwrap().resizes.push((cols, rows));
    }

    fn dispose(&mut self) {
        self.0.lock().unwrap().disposed += 1;
    }

    fn set_visible(&mut self, visible: bool) {
        self.0.lock().unwrap().visibility.push(visible);
    }
}

#[derive(Default)]
pub(crate) struct RecordingDisplays {
    logs: Mutex<HashMap<PaneId, Arc<Mutex<SurfaceLog>>>>,
}

impl RecordingDisplays {
    pub(crate) fn log(&self, id: PaneId) -> SurfaceLog {
        self.logs
            .lock()
            .unwrap()
            .get(&id)
            .map(|log| log.lock().unwrap().clone())
            .unwrap_or_default()
    }
}

impl DisplayFactory for RecordingDisplays {
    fn create(&self, id: PaneId, title: &str) -> Box<dyn DisplaySurface> {
        let log = Arc::new(Mutex::new(SurfaceLog {
            title: title.to_string(),
            ..SurfaceLog::default()
        }));
        self.logs.lock().unwrap().insert(id, Arc::clone(&log));
        Box::new(RecordingSurface(log))
    }
}

// =============================================================================
// HELPERS
// =============================================================================

pub(crate) fn test_settings() -> ManagerSettings {
    ManagerSettings {
        terminate_grace: Duration::from_millis(50),
        close_timeout: Duration::from_millis(300),
        shell_program: Some("/bin/sh".into()),
        login_shell: false,
        ..ManagerSettings::default()
    }
}

/// A manager wired to a fresh fake spawner and recording displays.
pub(crate) fn harness() -> (PaneManager, Arc<FakeSpawner>, Arc<RecordingDisplays>) {
    harness_with(test_settings())
}

pub(crate) fn harness_with(
    settings: ManagerSettings,
) -> (PaneManager, Arc<FakeSpawner>, Arc<RecordingDisplays>) {
    let spawner = Arc::new(FakeSpawner::new());
    let displays = Arc::new(RecordingDisplays::default());
    let shell = Arc::new(LoginShell {
        default_program: settings.shell_program.clone(),
        login: settings.login_shell,
    });
    let mgr = PaneManager::with_shell(settings, spawner.clone(), displays.clone(), shell);
    (mgr, spawner, displays)
}

/// Poll `cond` until it holds, failing the test after two seconds.
pub(crate) async fn wait_until(mut cond: impl FnMut() -> bool) {
    for _ in 0..200 {
        if cond() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not met within 2s");
}
