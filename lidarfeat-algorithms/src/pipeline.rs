//! Frame pipeline orchestration
//!
//! One frame in, surviving (record, cluster) pairs out:
//! ground removal -> per-box clustering -> feature extraction -> density
//! filtering. The pipeline holds no mutable state, so one instance may
//! process frames from multiple threads, and separate instances share
//! nothing at all.

use crate::clustering::{cluster_by_bbox, DEFAULT_MIN_POINTS};
use crate::features::extract_cluster_features;
use crate::ground::{remove_ground, GroundFilterConfig};
use crate::quality::{filter_by_density, DEFAULT_MIN_DENSITY};
use lidarfeat_core::{BoundingBox, Cluster, ClusterRecord, Error, LidarCloud, Result};
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::info;

/// Pipeline stages an observer can watch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Raw,
    GroundFiltered,
    Clustered,
    DensityFiltered,
}

/// Callback invoked after each pipeline stage
///
/// Receives the stage's point cloud and the boxes still in play (for the
/// clustered stages, only boxes whose cluster survived). Intended for
/// visualization front ends; a pipeline without an observer skips the
/// snapshot work entirely.
pub trait StageObserver: Send + Sync {
    fn on_stage(&self, stage: PipelineStage, cloud: &LidarCloud, boxes: &[BoundingBox]);
}

/// Tuning knobs for one pipeline instance
///
/// `min_points` and `min_density` are independent gates applied at different
/// stages: the first keeps degenerate clusters out of feature extraction,
/// the second enforces dataset quality on the finished descriptors.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Minimum cluster size, below which a box is reported absent
    pub min_points: usize,
    /// Minimum points per cubic meter for a record to survive
    pub min_density: f64,
    pub ground: GroundFilterConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_points: DEFAULT_MIN_POINTS,
            min_density: DEFAULT_MIN_DENSITY,
            ground: GroundFilterConfig::default(),
        }
    }
}

/// Per-frame extraction pipeline
pub struct FramePipeline {
    config: PipelineConfig,
    observer: Option<Box<dyn StageObserver>>,
}

impl FramePipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            observer: None,
        }
    }

    /// Attach a stage observer, e.g. a visualization front end
    pub fn with_observer(mut self, observer: Box<dyn StageObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Process one decoded frame into surviving (record, cluster) pairs
    ///
    /// Boxes whose cluster is absent are skipped before extraction; that is
    /// expected output, not an error. An [`Error::InvalidArgument`] from
    /// extraction (degenerate box) propagates unmodified; the caller
    /// decides whether to skip the frame or abort. Identical frame input
    /// always produces identical output.
    pub fn process(
        &self,
        cloud: &LidarCloud,
        boxes: &[BoundingBox],
        frame_id: i64,
    ) -> Result<Vec<(ClusterRecord, Cluster)>> {
        self.notify(PipelineStage::Raw, cloud, boxes);

        let ground = remove_ground(cloud, &self.config.ground);
        self.notify(PipelineStage::GroundFiltered, &ground.cloud, boxes);

        let mut cluster_map = cluster_by_bbox(&ground.cloud, boxes, self.config.min_points);

        // Present clusters in box order; absent boxes drop out here and
        // never reach the extractor
        let present: Vec<(&BoundingBox, Cluster)> = boxes
            .iter()
            .filter_map(|bbox| {
                cluster_map
                    .remove(&bbox.id)
                    .flatten()
                    .map(|cluster| (bbox, cluster))
            })
            .collect();

        if let Some(observer) = &self.observer {
            let (snapshot_cloud, snapshot_boxes) = stage_snapshot(&present);
            observer.on_stage(PipelineStage::Clustered, &snapshot_cloud, &snapshot_boxes);
        }

        let records: Vec<ClusterRecord> = present
            .par_iter()
            .map(|(bbox, cluster)| extract_cluster_features(cluster, bbox, frame_id))
            .collect::<Result<_>>()?;

        let present_clusters: HashMap<String, Cluster> = present
            .into_iter()
            .map(|(bbox, cluster)| (bbox.id.clone(), cluster))
            .collect();

        let (filtered_records, mut filtered_clusters) =
            filter_by_density(&records, &present_clusters, self.config.min_density);

        if let Some(observer) = &self.observer {
            let surviving: Vec<(&BoundingBox, Cluster)> = boxes
                .iter()
                .filter_map(|bbox| {
                    filtered_clusters
                        .get(&bbox.id)
                        .cloned()
                        .map(|cluster| (bbox, cluster))
                })
                .collect();
            let (snapshot_cloud, snapshot_boxes) = stage_snapshot(&surviving);
            observer.on_stage(
                PipelineStage::DensityFiltered,
                &snapshot_cloud,
                &snapshot_boxes,
            );
        }

        info!(
            frame_id,
            labeled = boxes.len(),
            extracted = records.len(),
            kept = filtered_records.len(),
            "frame processed"
        );

        filtered_records
            .into_iter()
            .map(|record| {
                let cluster = filtered_clusters
                    .remove(&record.cluster_id)
                    .ok_or_else(|| {
                        Error::Algorithm(format!(
                            "no cluster for surviving record '{}'",
                            record.cluster_id
                        ))
                    })?;
                Ok((record, cluster))
            })
            .collect()
    }

    fn notify(&self, stage: PipelineStage, cloud: &LidarCloud, boxes: &[BoundingBox]) {
        if let Some(observer) = &self.observer {
            observer.on_stage(stage, cloud, boxes);
        }
    }
}

fn stage_snapshot(entries: &[(&BoundingBox, Cluster)]) -> (LidarCloud, Vec<BoundingBox>) {
    let mut cloud = LidarCloud::new();
    let mut boxes = Vec::with_capacity(entries.len());
    for (bbox, cluster) in entries {
        cloud.extend(cluster.points.iter().copied());
        boxes.push((*bbox).clone());
    }
    (cloud, boxes)
}
