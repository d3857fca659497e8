//! I/O operations for lidarfeat cluster records
//!
//! The pipeline itself never touches the filesystem; this crate owns the
//! persistence format: one JSON document of cluster records per frame, named
//! after the frame, plus the existence check used to skip frames that were
//! already processed on a previous run.

pub mod error;
pub mod json;

pub use error::*;
pub use json::*;
