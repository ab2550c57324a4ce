//! Pane management core: the registry of terminal panes, their shell
//! processes and display surfaces, pointer interaction, and saved layouts.

pub mod commands;
pub mod display;
pub mod interaction;
pub mod layout_store;
pub mod manager;
pub mod output;
pub mod pane;

#[cfg(test)]
pub(crate) mod testing;

pub use commands::{CommandOutcome, PaneCommand};
pub use display::{DisplayFactory, DisplaySurface};
pub use interaction::{
    drag_rect, hit_test, DragKind, HitZone, InteractionController, InteractionSettings, ResizeEdge,
};
pub use layout_store::{
    FileBackend, LayoutSnapshot, LayoutStore, MemoryBackend, PaneConfigRecord, PersistenceBackend,
    LAYOUT_SCHEMA_VERSION,
};
pub use manager::{ManagerSettings, PaneManager};
pub use output::{OutputBuffer, DEFAULT_OUTPUT_BUFFER_BYTES};
pub use pane::{CommandHistory, Pane, PaneConfig, PaneMetadata, ProcessRef, TerminalConfig};
