//! Cluster feature records
//!
//! The descriptor layout is a stable contract: downstream training code and
//! the quality filter index into it by position. In particular
//! [`FeatureVector::DENSITY`] must always address points per cubic meter of
//! the labeled box.

use crate::bbox::ObjectClass;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Number of parameters in a cluster descriptor
pub const FEATURE_LEN: usize = 10;

/// Fixed-order numeric descriptor of one cluster
///
/// Layout:
/// - 0: point count
/// - 1..=3: extents along x, y, z
/// - 4..=6: centroid x, y, z
/// - 7: density, points per cubic meter of the labeled box
/// - 8: mean intensity
/// - 9: intensity standard deviation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector(pub [f64; FEATURE_LEN]);

impl FeatureVector {
    /// Index of the occupied-volume density parameter
    pub const DENSITY: usize = 7;

    pub fn density(&self) -> f64 {
        self.0[Self::DENSITY]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl Index<usize> for FeatureVector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

/// Feature record for one cluster, the unit of the produced dataset
///
/// Created once by feature extraction and never mutated; serialized as-is
/// by the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterRecord {
    /// Bounding-box id of the originating label
    pub cluster_id: String,
    /// Index of the frame within the processing run
    pub frame_id: i64,
    pub class: ObjectClass,
    pub point_count: usize,
    pub features: FeatureVector,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_density_index() {
        let mut params = [0.0; FEATURE_LEN];
        params[7] = 12.5;
        let features = FeatureVector(params);
        assert_eq!(features.density(), 12.5);
        assert_eq!(features[FeatureVector::DENSITY], 12.5);
    }
}
