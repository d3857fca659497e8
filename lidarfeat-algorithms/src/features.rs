//! Cluster feature extraction
//!
//! Boils one cluster down to the fixed-order descriptor consumed by
//! classifier training. Pure function of its inputs; no I/O.

use itertools::Itertools;
use lidarfeat_core::{
    BoundingBox, Cluster, ClusterRecord, Error, FeatureVector, Result, FEATURE_LEN,
};

/// Compute the feature record for one cluster
///
/// The descriptor packs point count, per-axis extents, centroid, density,
/// and intensity statistics in the order documented on [`FeatureVector`].
/// Density is point count over the labeled box's geometric volume, not the
/// cluster's own extent, so sparsely hit boxes score low.
///
/// Passing an empty cluster is a caller bug and yields
/// [`Error::InvalidArgument`]; the pipeline never invokes extraction on an
/// absent cluster. A box with non-positive volume is rejected the same way
/// before any density is computed.
pub fn extract_cluster_features(
    cluster: &Cluster,
    bbox: &BoundingBox,
    frame_id: i64,
) -> Result<ClusterRecord> {
    if cluster.is_empty() {
        return Err(Error::InvalidArgument(format!(
            "empty cluster for box '{}' - did an absent cluster slip past the caller?",
            bbox.id
        )));
    }

    let volume = bbox.volume();
    if !(volume > 0.0) {
        return Err(Error::InvalidArgument(format!(
            "box '{}' has non-positive volume {}",
            bbox.id, volume
        )));
    }

    let count = cluster.len();
    let n = count as f64;

    let (min_x, max_x) = min_max(cluster, |p| p.x());
    let (min_y, max_y) = min_max(cluster, |p| p.y());
    let (min_z, max_z) = min_max(cluster, |p| p.z());

    let centroid_x = cluster.points.iter().map(|p| p.x()).sum::<f64>() / n;
    let centroid_y = cluster.points.iter().map(|p| p.y()).sum::<f64>() / n;
    let centroid_z = cluster.points.iter().map(|p| p.z()).sum::<f64>() / n;

    let intensity_mean = cluster.points.iter().map(|p| p.intensity).sum::<f64>() / n;
    let intensity_var = cluster
        .points
        .iter()
        .map(|p| (p.intensity - intensity_mean).powi(2))
        .sum::<f64>()
        / n;

    let density = n / volume;

    let mut parameters = [0.0; FEATURE_LEN];
    parameters[0] = n;
    parameters[1] = max_x - min_x;
    parameters[2] = max_y - min_y;
    parameters[3] = max_z - min_z;
    parameters[4] = centroid_x;
    parameters[5] = centroid_y;
    parameters[6] = centroid_z;
    parameters[FeatureVector::DENSITY] = density;
    parameters[8] = intensity_mean;
    parameters[9] = intensity_var.sqrt();

    Ok(ClusterRecord {
        cluster_id: bbox.id.clone(),
        frame_id,
        class: bbox.class,
        point_count: count,
        features: FeatureVector(parameters),
    })
}

fn min_max(cluster: &Cluster, coord: impl Fn(&lidarfeat_core::LidarPoint) -> f64) -> (f64, f64) {
    // Cluster is non-empty; checked on entry
    cluster
        .points
        .iter()
        .map(coord)
        .minmax_by(|a, b| a.total_cmp(b))
        .into_option()
        .unwrap()
}
