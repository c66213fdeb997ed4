//! Detector lifecycle state

use crate::calibration::CalibrationProfile;

/// Calibration lifecycle
///
/// `Uncalibrated -> Calibrating` on the first frame or an explicit start,
/// `Calibrating -> Calibrated` once the window fills, and
/// `Calibrated -> Calibrating` only on an explicit recalibration.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DetectorState {
    #[default]
    Uncalibrated,
    Calibrating {
        collected: usize,
    },
    Calibrated {
        profile: CalibrationProfile,
    },
}

impl DetectorState {
    pub fn is_calibrated(&self) -> bool {
        matches!(self, DetectorState::Calibrated { .. })
    }

    pub fn profile(&self) -> Option<&CalibrationProfile> {
        match self {
            DetectorState::Calibrated { profile } => Some(profile),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DetectorState::Uncalibrated => "uncalibrated",
            DetectorState::Calibrating { .. } => "calibrating",
            DetectorState::Calibrated { .. } => "calibrated",
        }
    }
}
