//! Density-based quality filtering
//!
//! Sparse clusters make poor training examples even when the box contained
//! enough points to survive clustering. This stage drops every record whose
//! occupied-volume density is at or below the threshold and reduces the
//! cluster map to match.

use lidarfeat_core::{Cluster, ClusterRecord};
use std::collections::HashMap;
use tracing::debug;

/// Default minimum density, points per cubic meter
pub const DEFAULT_MIN_DENSITY: f64 = 20.0;

/// Keep only records denser than `min_density`
///
/// Record order is preserved; the returned cluster map contains exactly the
/// ids of the surviving records. Inputs are never mutated, and a dropped
/// record is an ordinary outcome, not an error.
pub fn filter_by_density(
    records: &[ClusterRecord],
    clusters: &HashMap<String, Cluster>,
    min_density: f64,
) -> (Vec<ClusterRecord>, HashMap<String, Cluster>) {
    let mut filtered_records = Vec::new();
    let mut filtered_clusters = HashMap::new();

    for record in records {
        if record.features.density() > min_density {
            if let Some(cluster) = clusters.get(&record.cluster_id) {
                filtered_clusters.insert(record.cluster_id.clone(), cluster.clone());
            }
            filtered_records.push(record.clone());
        } else {
            debug!(
                id = %record.cluster_id,
                density = record.features.density(),
                threshold = min_density,
                "sparse cluster dropped"
            );
        }
    }

    (filtered_records, filtered_clusters)
}
