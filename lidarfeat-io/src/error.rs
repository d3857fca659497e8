//! Error types for I/O operations

use thiserror::Error;

/// Errors that can occur during record persistence
#[derive(Error, Debug)]
pub enum IoError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for persistence operations
pub type Result<T> = std::result::Result<T, IoError>;
