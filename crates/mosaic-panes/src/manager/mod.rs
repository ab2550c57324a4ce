//! The PaneManager owns every pane, its shell bridge, and its surface.

mod close;
mod create;
mod operations;
mod routing;
mod types;

pub use types::*;
