//! Posture Monitoring
//!
//! Personalized posture classification from body keypoints:
//! - Keypoint extraction from pose landmark detector output
//! - Posture measurements (head forward distance, neck/spine/shoulder angles)
//! - Calibration of a per-user baseline with adaptive thresholds
//! - Issue classification against the calibrated baseline
//! - Temporal smoothing of the per-frame verdict

pub mod analysis;
pub mod calibration;
pub mod classifier;
pub mod config;
pub mod keypoint;
pub mod measurement;
pub mod smoothing;
pub mod state;

pub use analysis::Verdict;
pub use calibration::{CalibrationController, CalibrationProfile};
pub use classifier::{IssueSet, IssueTag, PostureClassifier};
pub use config::PostureConfig;
pub use keypoint::{BodyPart, KeypointExtractor, KeypointSet, Landmark, Point3};
pub use measurement::{angle_between, AuxiliaryMeasurements, Channel, MeasurementEngine, MeasurementVector};
pub use smoothing::TemporalSmoother;
pub use state::DetectorState;

use thiserror::Error;
use tracing::{debug, info};

/// Posture error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PostureError {
    #[error("Landmark {landmark} (index {index}) missing from detector output")]
    MissingLandmark {
        landmark: &'static str,
        index: usize,
    },

    #[error("Insufficient calibration data: {collected} of {required} frames collected")]
    InsufficientCalibrationData { collected: usize, required: usize },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PostureError>;

/// Posture detector for a single subject
///
/// One instance per capture stream. Each call to [`process`](Self::process)
/// fully updates the detector before returning.
#[derive(Debug)]
pub struct PostureDetector {
    config: PostureConfig,
    calibration: CalibrationController,
    classifier: PostureClassifier,
    smoother: TemporalSmoother,
    state: DetectorState,
}

impl PostureDetector {
    /// Create a new detector with configuration
    pub fn new(config: PostureConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            calibration: CalibrationController::new(&config),
            classifier: PostureClassifier::new(&config),
            smoother: TemporalSmoother::new(&config),
            state: DetectorState::Uncalibrated,
            config,
        })
    }

    /// Process one frame of keypoints (`None` when no pose was found)
    pub fn process(&mut self, points: Option<&KeypointSet>) -> Result<Verdict> {
        let Some(points) = points else {
            return Ok(Verdict::no_pose(self.state.is_calibrated()));
        };

        if let DetectorState::Calibrated { profile } = &self.state {
            let measurements = MeasurementEngine::measure(points);
            let issues = self.classifier.classify(Some(profile), &measurements, points);
            let bad = self.smoother.update(!issues.is_empty());

            debug!(bad, raw_issues = issues.len(), "Posture frame classified");

            return Ok(Verdict {
                calibrating: false,
                progress: 100.0,
                complete: false,
                bad,
                issues,
            });
        }

        if self.state == DetectorState::Uncalibrated {
            self.start_calibration();
        }

        let full = self.calibration.add_frame(*points);
        let progress = self.calibration.progress();

        if !full {
            self.state = DetectorState::Calibrating {
                collected: self.calibration.collected(),
            };
            return Ok(Verdict {
                calibrating: true,
                progress,
                ..Default::default()
            });
        }

        let profile = self.calibration.complete()?;
        self.smoother.reset();
        self.state = DetectorState::Calibrated { profile };

        Ok(Verdict {
            calibrating: true,
            progress,
            complete: true,
            ..Default::default()
        })
    }

    /// Process raw detector output (`None` when no pose was found)
    pub fn process_landmarks(&mut self, landmarks: Option<&[Landmark]>) -> Result<Verdict> {
        let points = landmarks.map(KeypointExtractor::extract).transpose()?;
        self.process(points.as_ref())
    }

    /// Start (or restart) calibration, discarding any existing profile
    pub fn start_calibration(&mut self) {
        if self.state.is_calibrated() {
            info!("Recalibrating posture baseline");
        }
        self.calibration.start();
        self.smoother.reset();
        self.state = DetectorState::Calibrating { collected: 0 };
    }

    /// Return to the uncalibrated state
    pub fn reset(&mut self) {
        info!(from = self.state.name(), "Resetting posture detector");
        self.calibration = CalibrationController::new(&self.config);
        self.smoother.reset();
        self.state = DetectorState::Uncalibrated;
    }

    pub fn state(&self) -> &DetectorState {
        &self.state
    }

    pub fn is_calibrated(&self) -> bool {
        self.state.is_calibrated()
    }

    /// Calibration progress percentage (100 once calibrated)
    pub fn calibration_progress(&self) -> f64 {
        match self.state {
            DetectorState::Uncalibrated => 0.0,
            DetectorState::Calibrating { .. } => self.calibration.progress(),
            DetectorState::Calibrated { .. } => 100.0,
        }
    }

    pub fn profile(&self) -> Option<&CalibrationProfile> {
        self.state.profile()
    }

    pub fn config(&self) -> &PostureConfig {
        &self.config
    }
}
