//! Per-frame posture verdict

use serde::{Deserialize, Serialize};
use crate::classifier::{IssueSet, IssueTag};

/// Result of processing one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Detector has not finished calibrating
    pub calibrating: bool,

    /// Calibration progress percentage (0-100)
    pub progress: f64,

    /// Calibration finished on this frame
    pub complete: bool,

    /// Smoothed posture verdict
    pub bad: bool,

    /// Un-smoothed issues detected in this frame
    pub issues: IssueSet,
}

impl Verdict {
    /// Verdict for a frame where no pose was found
    pub fn no_pose(calibrated: bool) -> Self {
        Self {
            calibrating: !calibrated,
            ..Default::default()
        }
    }

    /// Check if any issues were raised this frame
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    /// Check for a specific issue
    pub fn has_issue(&self, tag: IssueTag) -> bool {
        self.issues.contains(&tag)
    }
}
