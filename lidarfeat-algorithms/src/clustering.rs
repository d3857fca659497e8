//! Partitioning a frame into per-label clusters
//!
//! Every labeled bounding box is tested independently against the full
//! (ground-filtered) cloud, so a point may land in zero, one, or several
//! overlapping boxes. The scan is O(|boxes| x |cloud|) and runs one box per
//! rayon task; a cheap axis-aligned pre-test rejects most points before the
//! exact oriented check.

use lidarfeat_core::{BoundingBox, Cluster, ClusterMap, LidarCloud};
use rayon::prelude::*;
use tracing::debug;

/// Default minimum cluster size
///
/// Small threshold kept to prevent degenerate statistics in feature
/// extraction, not a quality gate; that is the density filter's job.
pub const DEFAULT_MIN_POINTS: usize = 5;

/// Extract the points inside each labeled box as one cluster per box
///
/// Returns one entry per box id. A box whose cluster would have fewer than
/// `min_points` points maps to `None`; absence and "too small" are reported
/// identically, and neither is an error.
pub fn cluster_by_bbox(
    cloud: &LidarCloud,
    boxes: &[BoundingBox],
    min_points: usize,
) -> ClusterMap {
    debug!(box_count = boxes.len(), cloud_size = cloud.len(), "clustering frame");

    let clusters: ClusterMap = boxes
        .par_iter()
        .map(|bbox| (bbox.id.clone(), points_in_box(cloud, bbox, min_points)))
        .collect();

    let present = clusters.values().filter(|c| c.is_some()).count();
    debug!(present, absent = boxes.len() - present, "clustering done");

    clusters
}

fn points_in_box(cloud: &LidarCloud, bbox: &BoundingBox, min_points: usize) -> Option<Cluster> {
    let (min, max) = bbox.aabb();

    let points: LidarCloud = cloud
        .iter()
        .filter(|p| {
            p.x() >= min.x
                && p.x() <= max.x
                && p.y() >= min.y
                && p.y() <= max.y
                && p.z() >= min.z
                && p.z() <= max.z
                && bbox.contains(&p.position)
        })
        .copied()
        .collect();

    if points.len() >= min_points {
        Some(Cluster::new(&bbox.id, points))
    } else {
        debug!(
            id = %bbox.id,
            cluster_size = points.len(),
            threshold = min_points,
            "cluster under size threshold"
        );
        None
    }
}
