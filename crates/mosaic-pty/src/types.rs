//! Bridge types: spawn requests, the live process handle, and its
//! input/exit channels.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use mosaic_common::ExitStatus;
use tokio::sync::{mpsc, watch};

use crate::spawner::ProcessControl;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Maximum bytes read from a PTY in one call (8 KB).
pub const PTY_READ_CHUNK: usize = 8_192;

/// Default terminal columns.
pub const DEFAULT_COLS: u16 = 80;

/// Default terminal rows.
pub const DEFAULT_ROWS: u16 = 24;

// =============================================================================
// SPAWN REQUEST
// =============================================================================

/// Everything needed to start one shell.
#[derive(Debug, Clone)]
pub struct SpawnRequest {
    pub program: String,
    pub args: Vec<String>,
    /// Working directory. `None` inherits the current directory.
    pub cwd: Option<PathBuf>,
    /// Extra environment variables on top of the sanitized base set.
    pub env: HashMap<String, String>,
    pub cols: u16,
    pub rows: u16,
}

impl SpawnRequest {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: HashMap::new(),
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn size(mut self, cols: u16, rows: u16) -> Self {
        self.cols = cols;
        self.rows = rows;
        self
    }
}

// =============================================================================
// INPUT
// =============================================================================

/// Write side of a shell's input. Chunks reach the process in the order
/// they were written.
#[derive(Debug, Clone)]
pub struct InputSink {
    tx: mpsc::UnboundedSender<Vec<u8>>,
}

impl InputSink {
    pub fn new(tx: mpsc::UnboundedSender<Vec<u8>>) -> Self {
        Self { tx }
    }

    /// Queue bytes for the process. Fails once the writer has gone away.
    pub fn write(&self, bytes: &[u8]) -> io::Result<()> {
        self.tx
            .send(bytes.to_vec())
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "shell input closed"))
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Output chunks in the order the process produced them.
pub type OutputStream = mpsc::UnboundedReceiver<Vec<u8>>;

// =============================================================================
// EXIT
// =============================================================================

/// Create the exit reporting pair for one process.
pub fn exit_channel() -> (ExitNotifier, ExitWatch) {
    let (tx, rx) = watch::channel(None);
    (ExitNotifier { tx }, ExitWatch { rx })
}

/// Reports a process's exit. Consumed on use, so a process reports at most
/// one exit; dropping it unused reports an exit with unknown status.
#[derive(Debug)]
pub struct ExitNotifier {
    tx: watch::Sender<Option<ExitStatus>>,
}

impl ExitNotifier {
    pub fn notify(self, status: ExitStatus) {
        self.tx.send_replace(Some(status));
    }
}

/// Observes a process's exit. Clones observe the same event.
#[derive(Debug, Clone)]
pub struct ExitWatch {
    rx: watch::Receiver<Option<ExitStatus>>,
}

impl ExitWatch {
    /// Exit status if the process has already been reported as exited.
    pub fn status(&self) -> Option<ExitStatus> {
        self.rx.borrow().clone()
    }

    /// Whether the exit event has fired (with or without a status).
    pub fn has_exited(&self) -> bool {
        self.status().is_some() || self.rx.has_changed().is_err()
    }

    /// Wait for the exit event. `None` means the process is gone but its
    /// status could not be collected.
    pub async fn wait(&mut self) -> Option<ExitStatus> {
        loop {
            if let Some(status) = self.rx.borrow_and_update().clone() {
                return Some(status);
            }
            if self.rx.changed().await.is_err() {
                return self.rx.borrow().clone();
            }
        }
    }
}

// =============================================================================
// SHELL PROCESS
// =============================================================================

/// A live shell bound to one pane.
pub struct ShellProcess {
    pub pid: Option<u32>,
    pub input: InputSink,
    pub output: OutputStream,
    pub exit: ExitWatch,
    pub control: Box<dyn ProcessControl>,
}

impl std::fmt::Debug for ShellProcess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShellProcess")
            .field("pid", &self.pid)
            .field("exited", &self.exit.has_exited())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// TESTS
// =============================================================================
