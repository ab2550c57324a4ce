//! The rendering side of a pane, as the core sees it.
//!
//! Whatever draws a pane (a GPU terminal, a webview, stdout) implements
//! [`DisplaySurface`]. The core never inspects it beyond these calls.

use mosaic_common::PaneId;

/// Rendering target for one pane.
pub trait DisplaySurface: Send {
    /// Feed shell output (or a core notice) to the surface.
    fn write(&mut self, bytes: &[u8]);

    /// The pane's grid size changed.
    fn resize(&mut self, cols: u16, rows: u16);

    /// Release the surface. Called once, when the pane closes.
    fn dispose(&mut self);

    /// Show or hide the surface (minimize/restore).
    fn set_visible(&mut self, _visible: bool) {}
}

/// Creates a surface for each new pane.
pub trait DisplayFactory: Send + Sync {
    fn create(&self, id: PaneId, title: &str) -> Box<dyn DisplaySurface>;
}
