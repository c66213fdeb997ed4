//! Posture issue classification against a calibrated profile

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;
use crate::calibration::CalibrationProfile;
use crate::config::PostureConfig;
use crate::keypoint::KeypointSet;
use crate::measurement::{AuxiliaryMeasurements, MeasurementEngine, MeasurementVector};

/// Detected posture problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueTag {
    /// Head pushed toward the camera
    HeadForward,
    /// Looking down (nose dropped below its usual height relative to the ears)
    HeadTiltDown,
    /// Uneven and tilted shoulder line
    ShoulderMisaligned,
    /// Torso leaning away from vertical
    SpineCurved,
    /// Shoulders pulled up toward the ears
    ShoulderElevated,
    /// Upper body leaning toward the camera
    ForwardLean,
}

impl IssueTag {
    pub const ALL: [IssueTag; 6] = [
        IssueTag::HeadForward,
        IssueTag::HeadTiltDown,
        IssueTag::ShoulderMisaligned,
        IssueTag::SpineCurved,
        IssueTag::ShoulderElevated,
        IssueTag::ForwardLean,
    ];

    /// Stable tag name
    pub const fn as_str(self) -> &'static str {
        match self {
            IssueTag::HeadForward => "head_forward",
            IssueTag::HeadTiltDown => "head_tilt_down",
            IssueTag::ShoulderMisaligned => "shoulder_misaligned",
            IssueTag::SpineCurved => "spine_curved",
            IssueTag::ShoulderElevated => "shoulder_elevated",
            IssueTag::ForwardLean => "forward_lean",
        }
    }

    /// Short label for display
    pub const fn description(self) -> &'static str {
        match self {
            IssueTag::HeadForward => "Head too far forward",
            IssueTag::HeadTiltDown => "Head tilted down",
            IssueTag::ShoulderMisaligned => "Shoulders misaligned",
            IssueTag::SpineCurved => "Spine curved",
            IssueTag::ShoulderElevated => "Shoulders raised",
            IssueTag::ForwardLean => "Body leaning forward",
        }
    }
}

impl fmt::Display for IssueTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unordered set of issues detected in one frame
pub type IssueSet = BTreeSet<IssueTag>;

/// Evaluates each frame against the calibrated profile
///
/// Every predicate is independent; the result is a set.
#[derive(Debug, Clone)]
pub struct PostureClassifier {
    escape_factor: f64,
    shoulder_lift_ratio: f64,
    head_tilt_margin: f64,
    forward_lean_margin: f64,
}

impl PostureClassifier {
    pub fn new(config: &PostureConfig) -> Self {
        Self {
            escape_factor: config.head_forward_escape_factor,
            shoulder_lift_ratio: config.shoulder_lift_ratio,
            head_tilt_margin: config.head_tilt_margin,
            forward_lean_margin: config.forward_lean_margin,
        }
    }

    /// Classify a frame
    ///
    /// Without a profile (detector not calibrated) no issue is ever raised.
    pub fn classify(
        &self,
        profile: Option<&CalibrationProfile>,
        measurements: &MeasurementVector,
        points: &KeypointSet,
    ) -> IssueSet {
        let mut issues = IssueSet::new();
        let Some(profile) = profile else {
            return issues;
        };

        let aux = MeasurementEngine::auxiliary(points);

        if self.head_forward(profile, measurements) {
            issues.insert(IssueTag::HeadForward);
        }
        if self.head_tilt_down(profile, &aux) {
            issues.insert(IssueTag::HeadTiltDown);
        }
        if self.shoulder_misaligned(profile, measurements) {
            issues.insert(IssueTag::ShoulderMisaligned);
        }
        if self.spine_curved(profile, measurements) {
            issues.insert(IssueTag::SpineCurved);
        }
        if self.shoulder_elevated(profile, &aux) {
            issues.insert(IssueTag::ShoulderElevated);
        }
        if self.forward_lean(profile, &aux) {
            issues.insert(IssueTag::ForwardLean);
        }

        if !issues.is_empty() {
            debug!(?issues, "Posture issues detected");
        }
        issues
    }

    /// Both distance and neck angle past their thresholds, or either one
    /// past a multiple of its baseline
    pub fn head_forward(&self, profile: &CalibrationProfile, m: &MeasurementVector) -> bool {
        let distance = m.head_forward_distance;
        let angle = m.neck_angle.abs();
        let base_distance = profile.baseline.head_forward_distance;
        let base_angle = profile.baseline.neck_angle.abs();

        let distance_exceeded = distance > base_distance + profile.threshold.head_forward_distance;
        let angle_exceeded = angle > base_angle + profile.threshold.neck_angle;

        (distance_exceeded && angle_exceeded)
            || distance > base_distance * self.escape_factor
            || angle > base_angle * self.escape_factor
    }

    /// Height difference and elevation angle must both exceed their thresholds
    pub fn shoulder_misaligned(&self, profile: &CalibrationProfile, m: &MeasurementVector) -> bool {
        let height_exceeded = m.shoulder_height_diff
            > profile.baseline.shoulder_height_diff + profile.threshold.shoulder_height_diff;
        let elevation_exceeded = m.shoulder_elevation_angle.abs()
            > profile.baseline.shoulder_elevation_angle.abs() + profile.threshold.shoulder_elevation_angle;

        height_exceeded && elevation_exceeded
    }

    pub fn spine_curved(&self, profile: &CalibrationProfile, m: &MeasurementVector) -> bool {
        m.spine_angle.abs() > profile.baseline.spine_angle.abs() + profile.threshold.spine_angle
    }

    /// Shoulder-hip distance shrunk by more than the configured fraction
    pub fn shoulder_elevated(&self, profile: &CalibrationProfile, aux: &AuxiliaryMeasurements) -> bool {
        let reduction = profile.shoulder_hip_distance - aux.shoulder_hip_distance;
        reduction > profile.shoulder_hip_distance * self.shoulder_lift_ratio
    }

    pub fn head_tilt_down(&self, profile: &CalibrationProfile, aux: &AuxiliaryMeasurements) -> bool {
        aux.head_tilt > profile.head_tilt + self.head_tilt_margin
    }

    pub fn forward_lean(&self, profile: &CalibrationProfile, aux: &AuxiliaryMeasurements) -> bool {
        aux.forward_lean < profile.forward_lean - self.forward_lean_margin
    }
}
