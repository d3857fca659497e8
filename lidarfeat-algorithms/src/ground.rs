//! Ground-plane removal
//!
//! Strips the dominant ground surface from a raw frame before clustering so
//! that box clusters contain object points only. Two interchangeable ground
//! models are provided: a height band (cheap, idempotent) and a RANSAC plane
//! fit for frames where the ground is not level.

use lidarfeat_core::{LidarCloud, LidarPoint, Point3d, Vector3d};
use nalgebra::Vector4;
use rand::prelude::*;
use std::collections::HashSet;
use tracing::debug;

/// Default ground-height cut for the height-band model, meters
pub const DEFAULT_GROUND_HEIGHT: f64 = 0.5;

/// Strategy for deciding which points belong to the ground surface
#[derive(Debug, Clone, PartialEq)]
pub enum GroundModel {
    /// Drop every point at or below `cutoff` meters. Re-applying to its own
    /// output removes nothing further.
    HeightBand { cutoff: f64 },
    /// Fit the dominant plane with RANSAC and drop its inliers. Seeded so
    /// identical input always yields identical output.
    RansacPlane {
        distance_threshold: f64,
        max_iterations: usize,
        seed: u64,
    },
}

/// Configuration for ground removal
#[derive(Debug, Clone, PartialEq)]
pub struct GroundFilterConfig {
    pub model: GroundModel,
}

impl Default for GroundFilterConfig {
    fn default() -> Self {
        Self {
            model: GroundModel::HeightBand {
                cutoff: DEFAULT_GROUND_HEIGHT,
            },
        }
    }
}

/// Outcome of ground removal
#[derive(Debug, Clone)]
pub struct GroundFilterResult {
    /// Surviving points, a sub-multiset of the input in input order
    pub cloud: LidarCloud,
    /// Number of points attributed to the ground and removed
    pub removed: usize,
}

/// A 3D plane model defined by the equation ax + by + cz + d = 0
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneModel {
    /// Plane coefficients [a, b, c, d] where ax + by + cz + d = 0
    pub coefficients: Vector4<f64>,
}

impl PlaneModel {
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self {
            coefficients: Vector4::new(a, b, c, d),
        }
    }

    /// Create a plane model from three points, `None` if they are collinear
    pub fn from_points(p1: &Point3d, p2: &Point3d, p3: &Point3d) -> Option<Self> {
        let v1 = p2 - p1;
        let v2 = p3 - p1;
        let normal = v1.cross(&v2);

        if normal.magnitude() < 1e-12 {
            return None;
        }

        let normal = normal.normalize();
        let d = -normal.dot(&p1.coords);
        Some(PlaneModel::new(normal.x, normal.y, normal.z, d))
    }

    pub fn normal(&self) -> Vector3d {
        Vector3d::new(
            self.coefficients.x,
            self.coefficients.y,
            self.coefficients.z,
        )
    }

    /// Perpendicular distance from a point to the plane
    pub fn distance_to_point(&self, point: &Point3d) -> f64 {
        let normal_magnitude = self.normal().magnitude();
        if normal_magnitude < 1e-12 {
            return f64::INFINITY;
        }

        (self.coefficients.x * point.x
            + self.coefficients.y * point.y
            + self.coefficients.z * point.z
            + self.coefficients.w)
            .abs()
            / normal_magnitude
    }

    /// Count points within `threshold` of the plane
    pub fn count_inliers(&self, points: &[LidarPoint], threshold: f64) -> usize {
        points
            .iter()
            .filter(|p| self.distance_to_point(&p.position) <= threshold)
            .count()
    }
}

/// Remove ground points from a frame
///
/// Output is always a sub-multiset of the input, in input order. Empty input
/// yields empty output; no ground model ever raises.
pub fn remove_ground(cloud: &LidarCloud, config: &GroundFilterConfig) -> GroundFilterResult {
    let filtered = match &config.model {
        GroundModel::HeightBand { cutoff } => height_band_filter(cloud, *cutoff),
        GroundModel::RansacPlane {
            distance_threshold,
            max_iterations,
            seed,
        } => ransac_plane_filter(cloud, *distance_threshold, *max_iterations, *seed),
    };

    let removed = cloud.len() - filtered.len();
    debug!(removed, kept = filtered.len(), "ground points removed");

    GroundFilterResult {
        cloud: filtered,
        removed,
    }
}

fn height_band_filter(cloud: &LidarCloud, cutoff: f64) -> LidarCloud {
    cloud.iter().filter(|p| p.z() > cutoff).copied().collect()
}

fn ransac_plane_filter(
    cloud: &LidarCloud,
    threshold: f64,
    max_iterations: usize,
    seed: u64,
) -> LidarCloud {
    // Too few points to define a plane; nothing to remove
    if cloud.len() < 3 {
        return cloud.clone();
    }

    let points = &cloud.points;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut best_model: Option<PlaneModel> = None;
    let mut best_score = 0;

    for _ in 0..max_iterations {
        let mut indices = HashSet::new();
        while indices.len() < 3 {
            indices.insert(rng.gen_range(0..points.len()));
        }
        let mut indices: Vec<usize> = indices.into_iter().collect();
        indices.sort_unstable();

        if let Some(model) = PlaneModel::from_points(
            &points[indices[0]].position,
            &points[indices[1]].position,
            &points[indices[2]].position,
        ) {
            let inlier_count = model.count_inliers(points, threshold);
            if inlier_count > best_score {
                best_score = inlier_count;
                best_model = Some(model);
            }
        }
    }

    match best_model {
        Some(model) => points
            .iter()
            .filter(|p| model.distance_to_point(&p.position) > threshold)
            .copied()
            .collect(),
        // Every sample was collinear; leave the cloud untouched
        None => cloud.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_frame() -> LidarCloud {
        let mut points = Vec::new();
        // Ground plane at z = 0
        for i in 0..10 {
            for j in 0..10 {
                points.push(LidarPoint::new(i as f64 * 0.5, j as f64 * 0.5, 0.0, 0.1));
            }
        }
        // Object points above the ground
        for k in 0..20 {
            points.push(LidarPoint::new(1.0, 1.0, 1.0 + k as f64 * 0.05, 0.8));
        }
        LidarCloud::from_points(points)
    }

    #[test]
    fn test_height_band_removes_ground() {
        let cloud = flat_frame();
        let result = remove_ground(&cloud, &GroundFilterConfig::default());
        assert_eq!(result.removed, 100);
        assert_eq!(result.cloud.len(), 20);
        assert!(result.cloud.iter().all(|p| p.z() > DEFAULT_GROUND_HEIGHT));
    }

    #[test]
    fn test_height_band_idempotent() {
        let cloud = flat_frame();
        let config = GroundFilterConfig::default();
        let once = remove_ground(&cloud, &config);
        let twice = remove_ground(&once.cloud, &config);
        assert_eq!(twice.removed, 0);
        assert_eq!(once.cloud, twice.cloud);
    }

    #[test]
    fn test_height_band_empty_input() {
        let result = remove_ground(&LidarCloud::new(), &GroundFilterConfig::default());
        assert!(result.cloud.is_empty());
        assert_eq!(result.removed, 0);
    }

    #[test]
    fn test_output_is_subset_in_input_order() {
        let cloud = flat_frame();
        let result = remove_ground(&cloud, &GroundFilterConfig::default());
        let mut cursor = cloud.iter();
        for kept in result.cloud.iter() {
            assert!(cursor.any(|p| p == kept));
        }
    }

    #[test]
    fn test_ransac_removes_dominant_plane() {
        let cloud = flat_frame();
        let config = GroundFilterConfig {
            model: GroundModel::RansacPlane {
                distance_threshold: 0.05,
                max_iterations: 100,
                seed: 42,
            },
        };
        let result = remove_ground(&cloud, &config);
        // The 100 ground points form the dominant plane
        assert_eq!(result.removed, 100);
        assert!(result.cloud.iter().all(|p| p.z() > 0.5));
    }

    #[test]
    fn test_ransac_deterministic() {
        let cloud = flat_frame();
        let config = GroundFilterConfig {
            model: GroundModel::RansacPlane {
                distance_threshold: 0.05,
                max_iterations: 50,
                seed: 7,
            },
        };
        let a = remove_ground(&cloud, &config);
        let b = remove_ground(&cloud, &config);
        assert_eq!(a.cloud, b.cloud);
        assert_eq!(a.removed, b.removed);
    }

    #[test]
    fn test_ransac_too_few_points() {
        let cloud = LidarCloud::from_points(vec![
            LidarPoint::new(0.0, 0.0, 0.0, 0.0),
            LidarPoint::new(1.0, 0.0, 0.0, 0.0),
        ]);
        let config = GroundFilterConfig {
            model: GroundModel::RansacPlane {
                distance_threshold: 0.1,
                max_iterations: 10,
                seed: 0,
            },
        };
        let result = remove_ground(&cloud, &config);
        assert_eq!(result.cloud.len(), 2);
        assert_eq!(result.removed, 0);
    }

    #[test]
    fn test_plane_model_collinear_points() {
        let p1 = Point3d::new(0.0, 0.0, 0.0);
        let p2 = Point3d::new(1.0, 0.0, 0.0);
        let p3 = Point3d::new(2.0, 0.0, 0.0);
        assert!(PlaneModel::from_points(&p1, &p2, &p3).is_none());
    }

    #[test]
    fn test_plane_distance() {
        use approx::assert_relative_eq;
        // Plane z = 1
        let model = PlaneModel::new(0.0, 0.0, 1.0, -1.0);
        assert_relative_eq!(
            model.distance_to_point(&Point3d::new(0.0, 0.0, 2.0)),
            1.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            model.distance_to_point(&Point3d::new(5.0, -3.0, 1.0)),
            0.0,
            epsilon = 1e-9
        );
    }
}
