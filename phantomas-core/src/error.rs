//! Error types for phantomas

use thiserror::Error;

/// Main error type for phantomas operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A fiber or region source cannot be discretized
    #[error("Invalid source: {0}")]
    InvalidSource(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl Error {
    /// Shorthand for [`Error::InvalidSource`]
    pub fn invalid_source(message: impl Into<String>) -> Self {
        Error::InvalidSource(message.into())
    }
}

/// Result type alias for phantomas operations
pub type Result<T> = std::result::Result<T, Error>;
