//! Workspace geometry and pane default types.

use serde::{Deserialize, Serialize};

/// Bounds of the area panes live in, plus the terminal cell metrics used
/// to turn pixel rects into grid sizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Workspace width in pixels (valid range: 200-16384).
    pub width: u32,
    /// Workspace height in pixels (valid range: 150-16384).
    pub height: u32,
    /// Width of one terminal cell in pixels (valid range: 1-64).
    pub cell_width: u32,
    /// Height of one terminal cell in pixels (valid range: 1-128).
    pub cell_height: u32,
    /// Capacity of the pane event channel (valid range: 16-65536).
    pub event_capacity: u32,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            cell_width: 8,
            cell_height: 16,
            event_capacity: 1024,
        }
    }
}

/// Defaults applied to panes created without explicit settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaneDefaultsConfig {
    pub title: String,
    pub x: i32,
    pub y: i32,
    /// Initial width in pixels; raised to 200 if smaller.
    pub width: i32,
    /// Initial height in pixels; raised to 150 if smaller.
    pub height: i32,
    /// Commands remembered per pane (valid range: 0-10000).
    pub history_limit: u32,
    /// Output bytes retained per pane (valid range: 4096-67108864).
    pub output_buffer_bytes: u32,
}

impl Default for PaneDefaultsConfig {
    fn default() -> Self {
        Self {
            title: "Terminal".into(),
            x: 0,
            y: 0,
            width: 800,
            height: 600,
            history_limit: 100,
            output_buffer_bytes: 256 * 1024,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
