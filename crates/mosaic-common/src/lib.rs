pub mod errors;
pub mod events;
pub mod id;
pub mod types;

pub use errors::{
    ConfigError, LayoutError, PaneError, ResourceCleanupError, SpawnError, TerminateError,
};
pub use events::{EventBus, PaneEvent};
pub use id::{new_id, PaneId, WorkspaceId};
pub use types::{ConnectionKind, ExitStatus, PaneState, Rect, MIN_PANE_HEIGHT, MIN_PANE_WIDTH};

pub type Result<T> = std::result::Result<T, PaneError>;
