//! Headless display surface: pane output echoed to stdout, each line
//! tagged with the pane title.

use std::io::Write;

use mosaic_common::PaneId;
use mosaic_panes::{DisplayFactory, DisplaySurface};

/// Tag every line of `bytes` with `prefix`. `at_line_start` carries the
/// line state between chunks.
pub fn prefix_lines(prefix: &str, at_line_start: &mut bool, bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len() + prefix.len());
    for &b in bytes {
        if *at_line_start && b != b'\r' {
            out.extend_from_slice(prefix.as_bytes());
            *at_line_start = false;
        }
        out.push(b);
        if b == b'\n' {
            *at_line_start = true;
        }
    }
    out
}

pub struct StdoutSurface {
    prefix: String,
    visible: bool,
    at_line_start: bool,
}

impl StdoutSurface {
    fn new(id: PaneId, title: &str) -> Self {
        Self {
            prefix: format!("[{title} {}] ", id.0),
            visible: true,
            at_line_start: true,
        }
    }

    fn emit(&mut self, bytes: &[u8]) {
        let out = prefix_lines(&self.prefix, &mut self.at_line_start, bytes);
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = stdout.write_all(&out).and_then(|_| stdout.flush()) {
            tracing::debug!(error = %e, "stdout write failed");
        }
    }
}

impl DisplaySurface for StdoutSurface {
    fn write(&mut self, bytes: &[u8]) {
        if self.visible {
            self.emit(bytes);
        }
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        tracing::debug!(surface = %self.prefix.trim_end(), cols, rows, "surface resized");
    }

    fn dispose(&mut self) {
        if !self.at_line_start {
            self.emit(b"\n");
        }
        self.emit(b"(closed)\n");
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

#[derive(Debug, Default)]
pub struct StdoutDisplays;

impl DisplayFactory for StdoutDisplays {
    fn create(&self, id: PaneId, title: &str) -> Box<dyn DisplaySurface> {
        Box::new(StdoutSurface::new(id, title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_each_line() {
        let mut start = true;
        let out = prefix_lines("> ", &mut start, b"one\r\ntwo\r\n");
        assert_eq!(out, b"> one\r\n> two\r\n");
        assert!(start);
    }

    #[test]
    fn line_state_carries_across_chunks() {
        let mut start = true;
        let mut out = prefix_lines("> ", &mut start, b"par");
        out.extend(prefix_lines("> ", &mut start, b"tial\nnext"));
        assert_eq!(out, b"> partial\n> next");
        assert!(!start);
    }

    #[test]
    fn empty_chunk_changes_nothing() {
        let mut start = true;
        assert!(prefix_lines("> ", &mut start, b"").is_empty());
        assert!(start);
    }

    #[test]
    fn hidden_surface_swallows_output() {
        let mut surface = StdoutSurface::new(PaneId(1), "t");
        surface.set_visible(false);
        surface.write(b"secret");
        assert!(surface.at_line_start);
        assert_eq!(surface.prefix, "[t 1] ");
    }
}
