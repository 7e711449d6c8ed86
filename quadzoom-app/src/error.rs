use std::path::PathBuf;

use thiserror::Error;

use quadzoom_core::CoreError;
use quadzoom_render::RenderError;

/// Errors that end a session.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid frame dimension {0} (must be >= 2)")]
    InvalidDimension(u32),

    #[error("cannot use display surface {}: {source}", path.display())]
    Display {
        path: PathBuf,
        #[source]
        source: RenderError,
    },

    #[error("failed to read commands: {0}")]
    Input(#[from] std::io::Error),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Core(#[from] CoreError),
}
