//! # lidarfeat-algorithms
//!
//! The numeric pipeline for turning one labeled LIDAR frame into classifier
//! training records: ground-plane removal, per-bounding-box clustering,
//! per-cluster feature descriptors, and density-based quality filtering.

pub mod ground;
pub mod clustering;
pub mod features;
pub mod quality;
pub mod pipeline;

// Re-export commonly used items
pub use ground::*;
pub use clustering::*;
pub use features::*;
pub use quality::*;
pub use pipeline::*;
