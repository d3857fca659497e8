//! Per-label point clusters

use crate::point_cloud::LidarCloud;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The points of one frame attributed to a single bounding-box label
///
/// A cluster is only ever built from a non-empty point set. "No cluster for
/// this box" is represented by `None` in a [`ClusterMap`], covering both a
/// box containing zero points and one whose point count fell under the
/// clustering threshold; the two are deliberately indistinguishable to
/// downstream consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Id of the bounding box this cluster belongs to
    pub box_id: String,
    pub points: LidarCloud,
}

impl Cluster {
    pub fn new(box_id: impl Into<String>, points: LidarCloud) -> Self {
        Self {
            box_id: box_id.into(),
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Mapping from bounding-box id to its cluster, `None` when absent
pub type ClusterMap = HashMap<String, Option<Cluster>>;
