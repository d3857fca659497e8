//! Core data structures for lidarfeat
//!
//! This crate provides the fundamental types for extracting labeled object
//! clusters from LIDAR frames: points, point clouds, oriented bounding boxes,
//! clusters, and the per-cluster feature records consumed by classifier
//! training.

pub mod point;
pub mod point_cloud;
pub mod bbox;
pub mod cluster;
pub mod record;
pub mod error;

pub use point::*;
pub use point_cloud::*;
pub use bbox::*;
pub use cluster::*;
pub use record::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3, Rotation3};

/// Common result type for lidarfeat operations
pub type Result<T> = std::result::Result<T, Error>;
