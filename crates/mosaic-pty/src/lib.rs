//! Shell process bridge: spawns a shell per pane and exposes its byte
//! streams, resize, and termination.
//!
//! [`ProcessSpawner`] is the seam the pane manager consumes. [`PtySpawner`]
//! implements it with `portable-pty`; each spawned shell gets a reader
//! thread (output → channel), a writer thread (channel → PTY), and a
//! waiter thread that reports the single exit event.

mod native;
mod shell;
mod spawner;
mod terminate;
mod types;

pub use native::PtySpawner;
pub use shell::{detect_shell, shell_args, FixedShell, LoginShell, ShellCommand, ShellStrategy};
pub use spawner::{ProcessControl, ProcessSpawner};
pub use terminate::{terminate, KILL_WAIT};
pub use types::{
    exit_channel, ExitNotifier, ExitWatch, InputSink, OutputStream, ShellProcess, SpawnRequest,
    DEFAULT_COLS, DEFAULT_ROWS, PTY_READ_CHUNK,
};
