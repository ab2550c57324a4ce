//! PTY spawn logic: open a PTY, start the shell, wire up the I/O threads.

use std::io::{Read, Write};
use std::thread;

use mosaic_common::{ExitStatus, SpawnError};
use portable_pty::{native_pty_system, CommandBuilder, PtySize};
use tokio::sync::mpsc;

use super::NativeControl;
use crate::types::{exit_channel, InputSink, ShellProcess, SpawnRequest, PTY_READ_CHUNK};

// =============================================================================
// ENVIRONMENT SANITIZATION
// =============================================================================

/// Environment variables inherited by pane shells.
///
/// Everything else is dropped so host secrets (API keys, tokens) do not
/// leak into the shell environment.
pub(crate) const ALLOWED_ENV_VARS: &[&str] = &[
    "HOME",
    "USER",
    "LOGNAME",
    "SHELL",
    "PATH",
    "TERM",
    "LANG",
    "LC_ALL",
    "LC_CTYPE",
    "DISPLAY",
    "WAYLAND_DISPLAY",
    "XDG_RUNTIME_DIR",
    "TMPDIR",
    "TMP",
    "TEMP",
    // Windows-specific
    "USERPROFILE",
    "APPDATA",
    "LOCALAPPDATA",
    "SYSTEMROOT",
    "COMSPEC",
    "HOMEDRIVE",
    "HOMEPATH",
];

fn build_command(request: &SpawnRequest) -> CommandBuilder {
    let mut cmd = CommandBuilder::new(&request.program);
    cmd.args(&request.args);

    cmd.env_clear();
    for key in ALLOWED_ENV_VARS {
        if let Ok(val) = std::env::var(key) {
            cmd.env(key, val);
        }
    }
    cmd.env("TERM", "xterm-256color");
    for (key, val) in &request.env {
        cmd.env(key, val);
    }

    if let Some(cwd) = &request.cwd {
        cmd.cwd(cwd);
    }

    cmd
}

// =============================================================================
// SPAWN
// =============================================================================

/// Blocking half of [`PtySpawner::spawn`](super::PtySpawner).
pub(super) fn spawn_pty(request: SpawnRequest) -> Result<ShellProcess, SpawnError> {
    let size = PtySize {
        rows: request.rows,
        cols: request.cols,
        pixel_width: 0,
        pixel_height: 0,
    };

    let pair = native_pty_system()
        .openpty(size)
        .map_err(|e| SpawnError::OpenPty(e.to_string()))?;

    let launch_error = |reason: String| SpawnError::Launch {
        program: request.program.clone(),
        reason,
    };

    let mut child = pair
        .slave
        .spawn_command(build_command(&request))
        .map_err(|e| launch_error(e.to_string()))?;

    // Only the master side stays open in this process.
    drop(pair.slave);

    let pid = child.process_id();
    let killer = child.clone_killer();

    let writer = pair
        .master
        .take_writer()
        .map_err(|e| launch_error(format!("failed to take PTY writer: {e}")))?;
    let reader = pair
        .master
        .try_clone_reader()
        .map_err(|e| launch_error(format!("failed to clone PTY reader: {e}")))?;

    let (output_tx, output_rx) = mpsc::unbounded_channel::<Vec<u8>>();
    let (input_tx, input_rx) = mpsc::unbounded_channel::<Vec<u8>>();
    let (notifier, exit) = exit_channel();

    let started = spawn_reader(reader, output_tx)
        .and_then(|_| spawn_writer(writer, input_rx))
        .and_then(|_| {
            thread::Builder::new()
                .name("pty-waiter".to_string())
                .spawn(move || match child.wait() {
                    Ok(status) => notifier.notify(ExitStatus {
                        code: status.exit_code(),
                        signal: status.signal().map(str::to_string),
                    }),
                    Err(e) => tracing::debug!("PTY wait error: {e}"),
                })
        });

    if let Err(e) = started {
        let mut killer = killer;
        let _ = killer.kill();
        return Err(SpawnError::Io(e));
    }

    tracing::debug!(pid, program = %request.program, "shell spawned");

    Ok(ShellProcess {
        pid,
        input: InputSink::new(input_tx),
        output: output_rx,
        exit,
        control: Box::new(NativeControl {
            master: pair.master,
            killer,
            pid,
        }),
    })
}

fn spawn_reader(
    mut reader: Box<dyn Read + Send>,
    tx: mpsc::UnboundedSender<Vec<u8>>,
) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("pty-reader".to_string())
        .spawn(move || {
            let mut buf = [0u8; PTY_READ_CHUNK];
            loop {
                match reader.read(&mut buf) {
                    Ok(0) => break, // EOF: shell exited
                    Ok(n) => {
                        if tx.send(buf[..n].to_vec()).is_err() {
                            break; // Receiver dropped
                        }
                    }
                    Err(e) => {
                        tracing::debug!("PTY reader error: {e}");
                        break;
                    }
                }
            }
        })
}

fn spawn_writer(
    mut writer: Box<dyn Write + Send>,
    mut rx: mpsc::UnboundedReceiver<Vec<u8>>,
) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("pty-writer".to_string())
        .spawn(move || {
            while let Some(chunk) = rx.blocking_recv() {
                if let Err(e) = writer.write_all(&chunk).and_then(|_| writer.flush()) {
                    tracing::debug!("PTY write failed: {e}");
                    break;
                }
            }
        })
}

// =============================================================================
// TESTS
// =============================================================================
