//! Error types for lidarfeat

use thiserror::Error;

/// Main error type for lidarfeat operations
#[derive(Error, Debug)]
pub enum Error {
    /// A caller handed an operation an argument it must never receive,
    /// e.g. an empty cluster or a degenerate bounding box
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Algorithm error: {0}")]
    Algorithm(String),
}

/// Result type alias for lidarfeat operations
pub type Result<T> = std::result::Result<T, Error>;
