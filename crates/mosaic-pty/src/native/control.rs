//! Resize and signal delivery for a native PTY child.

use mosaic_common::TerminateError;
use portable_pty::{ChildKiller, MasterPty, PtySize};

use crate::spawner::ProcessControl;

pub(crate) struct NativeControl {
    pub(super) master: Box<dyn MasterPty + Send>,
    pub(super) killer: Box<dyn ChildKiller + Send + Sync>,
    pub(super) pid: Option<u32>,
}

impl ProcessControl for NativeControl {
    fn resize(&mut self, cols: u16, rows: u16) -> std::io::Result<()> {
        let size = PtySize {
            rows,
            cols,
            pixel_width: 0,
            pixel_height: 0,
        };
        self.master
            .resize(size)
            .map_err(|e| std::io::Error::other(format!("PTY resize failed: {e}")))
    }

    #[cfg(unix)]
    fn hangup(&mut self) -> Result<(), TerminateError> {
        match self.pid {
            Some(pid) => send_signal(pid, nix::sys::signal::Signal::SIGHUP),
            None => self.kill(),
        }
    }

    #[cfg(not(unix))]
    fn hangup(&mut self) -> Result<(), TerminateError> {
        self.kill()
    }

    #[cfg(unix)]
    fn kill(&mut self) -> Result<(), TerminateError> {
        match self.pid {
            Some(pid) => send_signal(pid, nix::sys::signal::Signal::SIGKILL),
            None => self
                .killer
                .kill()
                .map_err(|e| TerminateError::Signal(e.to_string())),
        }
    }

    #[cfg(not(unix))]
    fn kill(&mut self) -> Result<(), TerminateError> {
        self.killer
            .kill()
            .map_err(|e| TerminateError::Signal(e.to_string()))
    }
}

#[cfg(unix)]
fn send_signal(pid: u32, signal: nix::sys::signal::Signal) -> Result<(), TerminateError> {
    use nix::errno::Errno;
    use nix::unistd::Pid;

    match nix::sys::signal::kill(Pid::from_raw(pid as i32), signal) {
        // Already gone.
        Ok(()) | Err(Errno::ESRCH) => Ok(()),
        Err(e) => Err(TerminateError::Signal(format!("{signal:?}: {e}"))),
    }
}
