//! End-to-end pipeline tests over synthetic frames

use lidarfeat_algorithms::{FramePipeline, PipelineConfig};
use lidarfeat_core::{BoundingBox, LidarCloud, LidarPoint, ObjectClass, Point3d, Vector3d};

/// A 2x2x2 box (volume 8) floating above the ground cut
fn test_box(id: &str) -> BoundingBox {
    BoundingBox::new(
        id,
        ObjectClass::Vehicle,
        Point3d::new(0.0, 0.0, 2.0),
        Vector3d::new(2.0, 2.0, 2.0),
        0.0,
    )
}

/// `count` points spread inside the test box, none on the ground
fn points_in_test_box(count: usize) -> Vec<LidarPoint> {
    (0..count)
        .map(|i| {
            let layer = (i / 100) as f64;
            let row = ((i % 100) / 10) as f64;
            let col = (i % 10) as f64;
            LidarPoint::new(
                -0.9 + col * 0.2,
                -0.9 + row * 0.2,
                1.5 + layer * 0.5,
                0.4,
            )
        })
        .collect()
}

#[test]
fn sparse_box_is_filtered_out() {
    // 100 points in 8 m^3 -> density 12.5, under the default threshold of 20
    let cloud = LidarCloud::from_points(points_in_test_box(100));
    let boxes = vec![test_box("sparse")];

    let pipeline = FramePipeline::new(PipelineConfig::default());
    let pairs = pipeline.process(&cloud, &boxes, 0).unwrap();
    assert!(pairs.is_empty());
}

#[test]
fn dense_box_survives() {
    // 200 points in 8 m^3 -> density 25
    let cloud = LidarCloud::from_points(points_in_test_box(200));
    let boxes = vec![test_box("dense")];

    let pipeline = FramePipeline::new(PipelineConfig::default());
    let pairs = pipeline.process(&cloud, &boxes, 0).unwrap();
    assert_eq!(pairs.len(), 1);

    let (record, cluster) = &pairs[0];
    assert_eq!(record.cluster_id, "dense");
    assert_eq!(record.point_count, 200);
    assert_eq!(cluster.len(), 200);
    assert_eq!(record.features.density(), 25.0);
}

#[test]
fn undersized_cluster_never_reaches_extraction() {
    // 3 points is under the default min_points of 5; the box is absent and
    // the frame still processes cleanly
    let cloud = LidarCloud::from_points(points_in_test_box(3));
    let boxes = vec![test_box("undersized")];

    let pipeline = FramePipeline::new(PipelineConfig::default());
    let pairs = pipeline.process(&cloud, &boxes, 0).unwrap();
    assert!(pairs.is_empty());
}

#[test]
fn mixed_frame_keeps_only_the_dense_box() {
    let mut points = points_in_test_box(200);
    // Second box far away with a sparse population
    let far = BoundingBox::new(
        "far-sparse",
        ObjectClass::Pedestrian,
        Point3d::new(20.0, 0.0, 2.0),
        Vector3d::new(2.0, 2.0, 2.0),
        0.0,
    );
    for i in 0..40 {
        points.push(LidarPoint::new(
            19.2 + (i % 8) as f64 * 0.2,
            -0.5 + (i / 8) as f64 * 0.2,
            2.0,
            0.4,
        ));
    }
    let cloud = LidarCloud::from_points(points);
    let boxes = vec![test_box("dense"), far];

    let pipeline = FramePipeline::new(PipelineConfig::default());
    let pairs = pipeline.process(&cloud, &boxes, 7).unwrap();

    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].0.cluster_id, "dense");
    assert_eq!(pairs[0].0.frame_id, 7);
}

#[test]
fn ground_points_do_not_leak_into_clusters() {
    // Box low enough that its lower half dips under the ground cut
    let low_box = BoundingBox::new(
        "low",
        ObjectClass::Vehicle,
        Point3d::new(0.0, 0.0, 1.0),
        Vector3d::new(2.0, 2.0, 2.0),
        0.0,
    );
    let mut points = points_in_test_box(200);
    // Ground returns inside the box footprint, below the height cut
    for i in 0..50 {
        points.push(LidarPoint::new(
            -0.9 + (i % 10) as f64 * 0.2,
            -0.9 + (i / 10) as f64 * 0.2,
            0.2,
            0.1,
        ));
    }
    let cloud = LidarCloud::from_points(points);

    let pipeline = FramePipeline::new(PipelineConfig::default());
    let pairs = pipeline.process(&cloud, &[low_box], 0).unwrap();
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].0.point_count, 200);
}

#[test]
fn thresholds_are_plain_parameters() {
    // Relaxing min_density lets the sparse scenario through
    let cloud = LidarCloud::from_points(points_in_test_box(100));
    let boxes = vec![test_box("sparse")];

    let config = PipelineConfig {
        min_density: 10.0,
        ..PipelineConfig::default()
    };
    let pipeline = FramePipeline::new(config);
    let pairs = pipeline.process(&cloud, &boxes, 0).unwrap();
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].0.features.density(), 12.5);
}
