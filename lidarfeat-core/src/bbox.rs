//! Oriented 3D bounding-box labels

use crate::point::{Point3d, Vector3d};
use nalgebra::{Rotation3, Vector3};
use serde::{Deserialize, Serialize};

/// Object class assigned to a bounding-box label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectClass {
    Unknown,
    Vehicle,
    Pedestrian,
    Sign,
    Cyclist,
}

impl Default for ObjectClass {
    fn default() -> Self {
        ObjectClass::Unknown
    }
}

/// An oriented 3D bounding-box label for one object in a frame
///
/// The box is axis-aligned in its own frame: `dimensions` holds the full
/// extents (length, width, height) and `heading` is the yaw rotation about
/// the z axis that maps box-local x onto the world. Labels are produced by
/// the frame decoder and are read-only to the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Label id, unique within the frame
    pub id: String,
    pub class: ObjectClass,
    pub center: Point3d,
    /// Full extents: (length, width, height)
    pub dimensions: Vector3d,
    /// Yaw rotation about z, radians
    pub heading: f64,
}

impl BoundingBox {
    pub fn new(
        id: impl Into<String>,
        class: ObjectClass,
        center: Point3d,
        dimensions: Vector3d,
        heading: f64,
    ) -> Self {
        Self {
            id: id.into(),
            class,
            center,
            dimensions,
            heading,
        }
    }

    /// Geometric volume of the box in cubic meters
    pub fn volume(&self) -> f64 {
        self.dimensions.x * self.dimensions.y * self.dimensions.z
    }

    /// Test whether a point lies inside the oriented box
    ///
    /// The point is translated into the box frame and un-rotated by the
    /// heading, then each coordinate is compared against the half-extent.
    /// Boundary points count as inside.
    pub fn contains(&self, point: &Point3d) -> bool {
        let rotation = Rotation3::from_axis_angle(&Vector3::z_axis(), -self.heading);
        let local = rotation * (point - self.center);

        local.x.abs() <= self.dimensions.x / 2.0
            && local.y.abs() <= self.dimensions.y / 2.0
            && local.z.abs() <= self.dimensions.z / 2.0
    }

    /// Axis-aligned bound that encloses the oriented box
    ///
    /// A rotation about z leaves the worst-case horizontal reach at half the
    /// planar diagonal. Used as a cheap pre-test before the exact oriented
    /// check; never rejects a contained point.
    pub fn aabb(&self) -> (Point3d, Point3d) {
        let reach = (self.dimensions.x.hypot(self.dimensions.y)) / 2.0;
        let half_height = self.dimensions.z / 2.0;
        let min = Point3d::new(
            self.center.x - reach,
            self.center.y - reach,
            self.center.z - half_height,
        );
        let max = Point3d::new(
            self.center.x + reach,
            self.center.y + reach,
            self.center.z + half_height,
        );
        (min, max)
    }
}
