//! Point types and related functionality

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D point with double precision coordinates
pub type Point3d = Point3<f64>;

/// A 3D vector with double precision components
pub type Vector3d = Vector3<f64>;

/// A LIDAR return: 3D position plus intensity channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LidarPoint {
    pub position: Point3d,
    pub intensity: f64,
}

impl LidarPoint {
    /// Create a point from coordinates and intensity
    pub fn new(x: f64, y: f64, z: f64, intensity: f64) -> Self {
        Self {
            position: Point3d::new(x, y, z),
            intensity,
        }
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn z(&self) -> f64 {
        self.position.z
    }
}

impl Default for LidarPoint {
    fn default() -> Self {
        Self {
            position: Point3d::origin(),
            intensity: 0.0,
        }
    }
}
