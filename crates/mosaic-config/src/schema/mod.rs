//! Configuration schema types for Mosaic.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod interaction;
mod process;
mod shell;
mod system;
mod workspace;

pub use interaction::*;
pub use process::*;
pub use shell::*;
pub use system::*;
pub use workspace::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Mosaic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MosaicConfig {
    pub shell: ShellConfig,
    pub workspace: WorkspaceConfig,
    pub panes: PaneDefaultsConfig,
    pub process: ProcessConfig,
    pub interaction: InteractionConfig,
    pub layouts: LayoutStoreConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================
