//! Pointer interaction tuning.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Minimum time between drag commands (valid range: 1-1000 ms).
    pub frame_interval_ms: u64,
    /// Distance from a pane edge that starts a resize (valid range: 1-32 px).
    pub edge_margin: u32,
    /// Height of the strip at the top of a pane that starts a move
    /// (valid range: 0-200 px).
    pub title_bar_height: u32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: 16,
            edge_margin: 6,
            title_bar_height: 28,
        }
    }
}
