//! Calibration: collect a window of frames and derive a personal baseline

use feature_engine::StatisticalFeatures;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use crate::config::PostureConfig;
use crate::keypoint::KeypointSet;
use crate::measurement::{AuxiliaryMeasurements, Channel, MeasurementEngine, MeasurementVector};
use crate::{PostureError, Result};

/// Personalized reference posture
///
/// Derived once per calibration cycle and replaced wholesale on
/// recalibration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationProfile {
    /// Mean of each channel over the window
    pub baseline: MeasurementVector,
    /// Allowed deviation above baseline for each channel
    pub threshold: MeasurementVector,
    /// Mean |hip_mid.y - shoulder_mid.y| over the window
    pub shoulder_hip_distance: f64,
    /// Mean nose.y - ear_mid.y over the window
    pub head_tilt: f64,
    /// Mean hip_mid.z - shoulder_mid.z over the window
    pub forward_lean: f64,
    /// Frames the profile was derived from
    pub frame_count: usize,
}

impl CalibrationProfile {
    /// Derive a profile from collected frames
    ///
    /// `threshold = (|mean| + std_multiplier * stddev) * base_tolerance`,
    /// using population statistics.
    pub fn from_frames(frames: &[KeypointSet], std_multiplier: f64, base_tolerance: f64) -> Self {
        let measurements: Vec<MeasurementVector> =
            frames.iter().map(MeasurementEngine::measure).collect();
        let auxiliary: Vec<AuxiliaryMeasurements> =
            frames.iter().map(MeasurementEngine::auxiliary).collect();

        let mut baseline = MeasurementVector::default();
        let mut threshold = MeasurementVector::default();
        for channel in Channel::ALL {
            let stats = StatisticalFeatures::compute_by(&measurements, |m| m.get(channel));
            baseline.set(channel, stats.mean);
            threshold.set(
                channel,
                (stats.mean.abs() + std_multiplier * stats.std_dev) * base_tolerance,
            );
        }

        Self {
            baseline,
            threshold,
            shoulder_hip_distance: StatisticalFeatures::compute_by(&auxiliary, |a| a.shoulder_hip_distance).mean,
            head_tilt: StatisticalFeatures::compute_by(&auxiliary, |a| a.head_tilt).mean,
            forward_lean: StatisticalFeatures::compute_by(&auxiliary, |a| a.forward_lean).mean,
            frame_count: frames.len(),
        }
    }
}

/// Collects raw keypoints over the calibration window
///
/// Raw points are kept rather than measurements so the auxiliary series
/// can be derived alongside the five channels.
#[derive(Debug, Clone)]
pub struct CalibrationController {
    frames: Vec<KeypointSet>,
    required: usize,
    std_multiplier: f64,
    base_tolerance: f64,
}

impl CalibrationController {
    pub fn new(config: &PostureConfig) -> Self {
        Self {
            frames: Vec::with_capacity(config.calibration_frames),
            required: config.calibration_frames,
            std_multiplier: config.std_multiplier,
            base_tolerance: config.base_tolerance,
        }
    }

    /// Discard collected frames and begin a new window
    pub fn start(&mut self) {
        self.frames.clear();
        info!(
            "Starting posture calibration: hold a correct posture for {} frames",
            self.required
        );
    }

    /// Add a frame to the window, returning whether the window is now full
    pub fn add_frame(&mut self, points: KeypointSet) -> bool {
        if self.is_full() {
            warn!(
                "Calibration frame offered to a full window ({} frames); ignoring",
                self.required
            );
            return true;
        }

        self.frames.push(points);

        if self.frames.len() % 10 == 0 {
            debug!(
                "Calibration: {}/{} frames ({:.0}%)",
                self.frames.len(),
                self.required(),
                self.progress()
            );
        }

        self.is_full()
    }

    /// Derive the calibration profile from the full window
    pub fn complete(&self) -> Result<CalibrationProfile> {
        if !self.is_full() {
            return Err(PostureError::InsufficientCalibrationData {
                collected: self.frames.len(),
                required: self.required,
            });
        }

        let profile = CalibrationProfile::from_frames(&self.frames, self.std_multiplier, self.base_tolerance);

        info!(
            head_forward = profile.threshold.head_forward_distance,
            shoulder_height = profile.threshold.shoulder_height_diff,
            neck_angle = profile.threshold.neck_angle,
            spine_angle = profile.threshold.spine_angle,
            shoulder_elevation = profile.threshold.shoulder_elevation_angle,
            "Calibration complete, adaptive thresholds derived"
        );

        Ok(profile)
    }

    /// Frames collected so far
    pub fn collected(&self) -> usize {
        self.frames.len()
    }

    /// Frames needed to complete the window
    pub fn required(&self) -> usize {
        self.required
    }

    pub fn is_full(&self) -> bool {
        self.frames.len() >= self.required
    }

    /// Progress percentage (0-100)
    pub fn progress(&self) -> f64 {
        self.frames.len() as f64 / self.required as f64 * 100.0
    }
}
