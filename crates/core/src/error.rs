use std::io;

/// Errors that can occur during mbed-runner operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("`{0}` was not found in PATH, install mbed-cli or point --tool at it")]
    ToolNotFound(String),

    #[error("Could not query {what}: {reason}")]
    ConfigQueryFailed { what: &'static str, reason: String },

    #[error("{0}")]
    ValidationFailed(String),

    #[error("Cancelled: {0}")]
    Cancelled(String),

    #[error("Settings error: {0}")]
    SettingsError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl Error {
    /// Fatal errors abort the whole session instead of the current action
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::ToolNotFound(_))
    }
}

/// Result type alias for mbed-runner operations
pub type Result<T> = std::result::Result<T, Error>;
