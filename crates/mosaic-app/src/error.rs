use mosaic_common::{LayoutError, PaneError};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Pane(#[from] PaneError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
