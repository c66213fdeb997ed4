//! Shared fixtures for posture integration tests

#![allow(dead_code)]

use posture::{KeypointSet, Landmark, Point3, PostureDetector, PostureConfig};

pub const CALIBRATION_FRAMES: usize = 90;

/// Install a test subscriber so pipeline logs show up on failure
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Seated subject, upright, facing the camera
pub fn upright() -> KeypointSet {
    KeypointSet {
        nose: Point3::new(0.50, 0.20, -0.30),
        left_ear: Point3::new(0.45, 0.22, -0.10),
        right_ear: Point3::new(0.55, 0.22, -0.10),
        left_shoulder: Point3::new(0.40, 0.40, -0.05),
        right_shoulder: Point3::new(0.60, 0.40, -0.05),
        left_hip: Point3::new(0.42, 0.70, 0.00),
        right_hip: Point3::new(0.58, 0.70, 0.00),
    }
}

/// Head pushed well toward the camera
pub fn head_forward() -> KeypointSet {
    let mut points = upright();
    points.nose.z = -0.60;
    points
}

/// Nose dropped below its usual height relative to the ears
pub fn head_tilted_down() -> KeypointSet {
    let mut points = upright();
    points.nose.y = 0.26;
    points
}

/// Shoulder line closer to the hips than during calibration
pub fn shoulders_shifted() -> KeypointSet {
    let mut points = upright();
    points.left_shoulder.y = 0.50;
    points.right_shoulder.y = 0.50;
    points
}

/// Upright pose with a small deterministic wobble
pub fn jittered(frame: usize) -> KeypointSet {
    let offset = ((frame % 5) as f64 - 2.0) * 0.002;
    let mut points = upright();
    points.nose.x += offset;
    points.nose.z += offset;
    points.left_shoulder.y += offset;
    points.right_shoulder.y -= offset;
    points.left_hip.x += offset;
    points
}

/// Full 33-landmark detector output built around a keypoint set
pub fn landmarks_for(points: &KeypointSet) -> Vec<Landmark> {
    let mut landmarks = vec![Landmark::new(0.5, 0.5, 0.0); 33];
    let mut set = |index: usize, p: Point3| landmarks[index] = Landmark::new(p.x, p.y, p.z);
    set(0, points.nose);
    set(7, points.left_ear);
    set(8, points.right_ear);
    set(11, points.left_shoulder);
    set(12, points.right_shoulder);
    set(23, points.left_hip);
    set(24, points.right_hip);
    landmarks
}

/// Detector with default configuration, calibrated on `frame`
pub fn calibrated_detector(frame: &KeypointSet) -> PostureDetector {
    let mut detector = PostureDetector::new(PostureConfig::default()).unwrap();
    for _ in 0..CALIBRATION_FRAMES {
        detector.process(Some(frame)).unwrap();
    }
    assert!(detector.is_calibrated());
    detector
}
