//! Scalar posture measurements derived from keypoints

use serde::{Deserialize, Serialize};
use crate::keypoint::KeypointSet;

/// Image-space "up" (y grows downward in image coordinates)
const VERTICAL: [f64; 2] = [0.0, -1.0];
const HORIZONTAL: [f64; 2] = [1.0, 0.0];

/// Angle between two 2D vectors in degrees, in [0, 180]
///
/// The cosine is clamped to [-1, 1] before `acos`. A zero-length vector has
/// no direction and yields 0.
pub fn angle_between(a: [f64; 2], b: [f64; 2]) -> f64 {
    let norm_a = a[0].hypot(a[1]);
    let norm_b = b[0].hypot(b[1]);
    if norm_a == 0.0 || norm_b == 0.0 || !norm_a.is_finite() || !norm_b.is_finite() {
        return 0.0;
    }

    let dot = (a[0] / norm_a) * (b[0] / norm_b) + (a[1] / norm_a) * (b[1] / norm_b);
    dot.clamp(-1.0, 1.0).acos().to_degrees()
}

/// One of the five calibrated measurement channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    HeadForwardDistance,
    ShoulderHeightDiff,
    NeckAngle,
    SpineAngle,
    ShoulderElevationAngle,
}

impl Channel {
    pub const ALL: [Channel; 5] = [
        Channel::HeadForwardDistance,
        Channel::ShoulderHeightDiff,
        Channel::NeckAngle,
        Channel::SpineAngle,
        Channel::ShoulderElevationAngle,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Channel::HeadForwardDistance => "head_forward_distance",
            Channel::ShoulderHeightDiff => "shoulder_height_diff",
            Channel::NeckAngle => "neck_angle",
            Channel::SpineAngle => "spine_angle",
            Channel::ShoulderElevationAngle => "shoulder_elevation_angle",
        }
    }
}

/// Per-frame posture measurements
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementVector {
    /// |nose.z - shoulder_mid.z|
    pub head_forward_distance: f64,
    /// |left_shoulder.y - right_shoulder.y|
    pub shoulder_height_diff: f64,
    /// Ear-midpoint to shoulder-midpoint line vs vertical (degrees)
    pub neck_angle: f64,
    /// Hip-midpoint to shoulder-midpoint line vs vertical (degrees)
    pub spine_angle: f64,
    /// Shoulder line vs horizontal (degrees)
    pub shoulder_elevation_angle: f64,
}

impl MeasurementVector {
    pub fn get(&self, channel: Channel) -> f64 {
        match channel {
            Channel::HeadForwardDistance => self.head_forward_distance,
            Channel::ShoulderHeightDiff => self.shoulder_height_diff,
            Channel::NeckAngle => self.neck_angle,
            Channel::SpineAngle => self.spine_angle,
            Channel::ShoulderElevationAngle => self.shoulder_elevation_angle,
        }
    }

    pub fn set(&mut self, channel: Channel, value: f64) {
        match channel {
            Channel::HeadForwardDistance => self.head_forward_distance = value,
            Channel::ShoulderHeightDiff => self.shoulder_height_diff = value,
            Channel::NeckAngle => self.neck_angle = value,
            Channel::SpineAngle => self.spine_angle = value,
            Channel::ShoulderElevationAngle => self.shoulder_elevation_angle = value,
        }
    }
}

/// Frame-local quantities used by the head-tilt, forward-lean and
/// shoulder-lift checks
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AuxiliaryMeasurements {
    /// |hip_mid.y - shoulder_mid.y|
    pub shoulder_hip_distance: f64,
    /// nose.y - ear_mid.y (positive when the nose sits below the ears)
    pub head_tilt: f64,
    /// hip_mid.z - shoulder_mid.z (positive when shoulders are nearer the camera)
    pub forward_lean: f64,
}

/// Stateless measurement computation
pub struct MeasurementEngine;

impl MeasurementEngine {
    /// Compute the five calibrated channels for a frame
    pub fn measure(points: &KeypointSet) -> MeasurementVector {
        let ear_mid = points.ear_midpoint();
        let shoulder_mid = points.shoulder_midpoint();
        let hip_mid = points.hip_midpoint();

        let neck = [ear_mid.x - shoulder_mid.x, ear_mid.y - shoulder_mid.y];
        let spine = [shoulder_mid.x - hip_mid.x, shoulder_mid.y - hip_mid.y];
        let shoulder_line = [
            points.right_shoulder.x - points.left_shoulder.x,
            points.right_shoulder.y - points.left_shoulder.y,
        ];

        MeasurementVector {
            head_forward_distance: (points.nose.z - shoulder_mid.z).abs(),
            shoulder_height_diff: (points.left_shoulder.y - points.right_shoulder.y).abs(),
            neck_angle: angle_between(neck, VERTICAL),
            spine_angle: angle_between(spine, VERTICAL),
            shoulder_elevation_angle: angle_between(shoulder_line, HORIZONTAL),
        }
    }

    /// Compute the frame-local auxiliary quantities
    pub fn auxiliary(points: &KeypointSet) -> AuxiliaryMeasurements {
        let ear_mid = points.ear_midpoint();
        let shoulder_mid = points.shoulder_midpoint();
        let hip_mid = points.hip_midpoint();

        AuxiliaryMeasurements {
            shoulder_hip_distance: (hip_mid.y - shoulder_mid.y).abs(),
            head_tilt: points.nose.y - ear_mid.y,
            forward_lean: hip_mid.z - shoulder_mid.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keypoint::Point3;
    use proptest::prelude::*;

    fn upright() -> KeypointSet {
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

    #[test]
    fn test_right_angle() {
        assert!((angle_between([1.0, 0.0], [0.0, 1.0]) - 90.0).abs() < 1e-9);
        assert!((angle_between([1.0, 1.0], [1.0, 0.0]) - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_vector_is_zero() {
        assert_eq!(angle_between([0.0, 0.0], [0.0, -1.0]), 0.0);
    }

    #[test]
    fn test_upright_measurements() {
        let m = MeasurementEngine::measure(&upright());
        assert!((m.head_forward_distance - 0.25).abs() < 1e-9);
        assert!(m.shoulder_height_diff.abs() < 1e-12);
        assert!(m.neck_angle.abs() < 1e-6);
        assert!(m.spine_angle.abs() < 1e-6);
        assert!(m.shoulder_elevation_angle.abs() < 1e-6);
    }

    #[test]
    fn test_leaning_spine() {
        let mut points = upright();
        // Shift shoulders sideways by the same amount as the spine height
        points.left_shoulder.x += 0.30;
        points.right_shoulder.x += 0.30;
        let m = MeasurementEngine::measure(&points);
        assert!((m.spine_angle - 45.0).abs() < 1e-6);
    }

    #[test]
    fn test_tilted_shoulders() {
        let mut points = upright();
        points.right_shoulder.y = 0.60;
        let m = MeasurementEngine::measure(&points);
        assert!((m.shoulder_height_diff - 0.20).abs() < 1e-9);
        assert!((m.shoulder_elevation_angle - 45.0).abs() < 1e-6);
    }

    #[test]
    fn test_auxiliary() {
        let aux = MeasurementEngine::auxiliary(&upright());
        assert!((aux.shoulder_hip_distance - 0.30).abs() < 1e-9);
        assert!((aux.head_tilt + 0.02).abs() < 1e-9);
        assert!((aux.forward_lean - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_channel_accessors() {
        let mut m = MeasurementVector::default();
        for (i, channel) in Channel::ALL.into_iter().enumerate() {
            m.set(channel, i as f64);
        }
        assert_eq!(m.get(Channel::SpineAngle), 3.0);
        assert_eq!(m.neck_angle, 2.0);
    }

    proptest! {
        #[test]
        fn angle_with_self_is_zero(theta in 0.0f64..std::f64::consts::TAU) {
            let v = [theta.cos(), theta.sin()];
            prop_assert!(angle_between(v, v).abs() < 1e-4);
        }

        #[test]
        fn angle_with_opposite_is_straight(theta in 0.0f64..std::f64::consts::TAU) {
            let v = [theta.cos(), theta.sin()];
            prop_assert!((angle_between(v, [-v[0], -v[1]]) - 180.0).abs() < 1e-4);
        }

        #[test]
        fn angle_stays_in_range(ax in -10.0f64..10.0, ay in -10.0f64..10.0, bx in -10.0f64..10.0, by in -10.0f64..10.0) {
            let angle = angle_between([ax, ay], [bx, by]);
            prop_assert!((0.0..=180.0).contains(&angle));
        }
    }
}
