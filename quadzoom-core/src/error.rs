use thiserror::Error;

/// Errors originating from the core zoom engine.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid viewport: {reason}")]
    InvalidViewport { reason: String },

    #[error("unknown command symbol {0:?} in replay sequence")]
    UnknownCommand(char),
}
