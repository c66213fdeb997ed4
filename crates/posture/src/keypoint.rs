//! Body keypoints consumed from the pose landmark detector

use serde::{Deserialize, Serialize};
use crate::{PostureError, Result};

/// 3D point in normalized image coordinates
///
/// `x` and `y` are relative to the image size, `z` is relative depth
/// (smaller is closer to the camera).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Arithmetic mean of two points
    pub fn midpoint(a: Point3, b: Point3) -> Self {
        Self {
            x: (a.x + b.x) / 2.0,
            y: (a.y + b.y) / 2.0,
            z: (a.z + b.z) / 2.0,
        }
    }
}

/// Raw landmark as returned by the pose detector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Detector confidence that the landmark is visible (0-1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
}

impl Landmark {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z, visibility: None }
    }

    pub fn position(&self) -> Point3 {
        Point3::new(self.x, self.y, self.z)
    }
}

/// Body parts required for posture analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPart {
    Nose,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftHip,
    RightHip,
}

impl BodyPart {
    pub const ALL: [BodyPart; 7] = [
        BodyPart::Nose,
        BodyPart::LeftEar,
        BodyPart::RightEar,
        BodyPart::LeftShoulder,
        BodyPart::RightShoulder,
        BodyPart::LeftHip,
        BodyPart::RightHip,
    ];

    /// Index in the standard 33-point pose landmark layout
    pub const fn landmark_index(self) -> usize {
        match self {
            BodyPart::Nose => 0,
            BodyPart::LeftEar => 7,
            BodyPart::RightEar => 8,
            BodyPart::LeftShoulder => 11,
            BodyPart::RightShoulder => 12,
            BodyPart::LeftHip => 23,
            BodyPart::RightHip => 24,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            BodyPart::Nose => "nose",
            BodyPart::LeftEar => "left_ear",
            BodyPart::RightEar => "right_ear",
            BodyPart::LeftShoulder => "left_shoulder",
            BodyPart::RightShoulder => "right_shoulder",
            BodyPart::LeftHip => "left_hip",
            BodyPart::RightHip => "right_hip",
        }
    }
}

/// The seven named keypoints of a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KeypointSet {
    pub nose: Point3,
    pub left_ear: Point3,
    pub right_ear: Point3,
    pub left_shoulder: Point3,
    pub right_shoulder: Point3,
    pub left_hip: Point3,
    pub right_hip: Point3,
}

impl KeypointSet {
    pub fn get(&self, part: BodyPart) -> Point3 {
        match part {
            BodyPart::Nose => self.nose,
            BodyPart::LeftEar => self.left_ear,
            BodyPart::RightEar => self.right_ear,
            BodyPart::LeftShoulder => self.left_shoulder,
            BodyPart::RightShoulder => self.right_shoulder,
            BodyPart::LeftHip => self.left_hip,
            BodyPart::RightHip => self.right_hip,
        }
    }

    pub fn ear_midpoint(&self) -> Point3 {
        Point3::midpoint(self.left_ear, self.right_ear)
    }

    pub fn shoulder_midpoint(&self) -> Point3 {
        Point3::midpoint(self.left_shoulder, self.right_shoulder)
    }

    pub fn hip_midpoint(&self) -> Point3 {
        Point3::midpoint(self.left_hip, self.right_hip)
    }
}

/// Selects the posture keypoints from a full detector landmark array
pub struct KeypointExtractor;

impl KeypointExtractor {
    /// Extract the seven required keypoints
    ///
    /// Fails with [`PostureError::MissingLandmark`] when the detector output
    /// is too short to contain one of the required indices.
    pub fn extract(landmarks: &[Landmark]) -> Result<KeypointSet> {
        let point = |part: BodyPart| -> Result<Point3> {
            landmarks
                .get(part.landmark_index())
                .map(Landmark::position)
                .ok_or(PostureError::MissingLandmark {
                    landmark: part.name(),
                    index: part.landmark_index(),
                })
        };

        Ok(KeypointSet {
            nose: point(BodyPart::Nose)?,
            left_ear: point(BodyPart::LeftEar)?,
            right_ear: point(BodyPart::RightEar)?,
            left_shoulder: point(BodyPart::LeftShoulder)?,
            right_shoulder: point(BodyPart::RightShoulder)?,
            left_hip: point(BodyPart::LeftHip)?,
            right_hip: point(BodyPart::RightHip)?,
        })
    }
}
