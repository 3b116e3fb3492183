//! Error types for codemap.

use thiserror::Error;

/// codemap error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for codemap operations.
pub type Result<T> = std::result::Result<T, Error>;
