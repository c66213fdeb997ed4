//! Posture detector configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::{PostureError, Result};

/// Posture detector configuration
///
/// Every field is a policy constant; missing fields in a loaded file fall
/// back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostureConfig {
    /// Frames collected before the calibration profile is derived (90 = 3s at 30fps)
    pub calibration_frames: usize,

    /// Standard deviations added to each channel baseline
    pub std_multiplier: f64,

    /// Multiplier applied to (|baseline| + k * stddev)
    pub base_tolerance: f64,

    /// Raw verdicts kept for smoothing
    pub history_size: usize,

    /// Fraction of bad frames in a full history that yields a bad verdict
    pub bad_posture_ratio: f64,

    /// Head-forward fires when either channel exceeds this multiple of its baseline
    pub head_forward_escape_factor: f64,

    /// Fractional loss of shoulder-hip distance that counts as raised shoulders
    pub shoulder_lift_ratio: f64,

    /// Head-tilt margin in normalized image units
    pub head_tilt_margin: f64,

    /// Forward-lean margin in relative depth units
    pub forward_lean_margin: f64,
}

impl Default for PostureConfig {
    fn default() -> Self {
        Self {
            calibration_frames: 90,
            std_multiplier: 2.5,
            base_tolerance: 1.3,
            history_size: 8,
            bad_posture_ratio: 0.6,
            head_forward_escape_factor: 2.0,
            shoulder_lift_ratio: 0.15,
            head_tilt_margin: 0.02,
            forward_lean_margin: 0.03,
        }
    }
}

impl PostureConfig {
    /// Create strict config (tighter thresholds, faster reaction)
    pub fn strict() -> Self {
        Self {
            std_multiplier: 2.0,
            base_tolerance: 1.1,
            history_size: 6,
            bad_posture_ratio: 0.5,
            ..Default::default()
        }
    }

    /// Create lenient config (wider thresholds, more smoothing)
    pub fn lenient() -> Self {
        Self {
            std_multiplier: 3.0,
            base_tolerance: 1.5,
            history_size: 12,
            bad_posture_ratio: 0.7,
            ..Default::default()
        }
    }

    /// Load config from a file, then apply `POSTURE_*` environment overrides
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path.as_ref()))
            .add_source(::config::Environment::with_prefix("POSTURE").try_parsing(true))
            .build()
            .map_err(|e| PostureError::Config(e.to_string()))?;

        let config: PostureConfig = settings
            .try_deserialize()
            .map_err(|e| PostureError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the pipeline meaningless
    pub fn validate(&self) -> Result<()> {
        if self.calibration_frames == 0 {
            return Err(PostureError::Config("calibration_frames must be > 0".into()));
        }
        if self.history_size == 0 {
            return Err(PostureError::Config("history_size must be > 0".into()));
        }
        if self.bad_posture_ratio.is_nan() || self.bad_posture_ratio <= 0.0 || self.bad_posture_ratio > 1.0 {
            return Err(PostureError::Config(format!(
                "bad_posture_ratio must be in (0, 1], got {}",
                self.bad_posture_ratio
            )));
        }

        let non_negative = [
            ("std_multiplier", self.std_multiplier),
            ("base_tolerance", self.base_tolerance),
            ("head_forward_escape_factor", self.head_forward_escape_factor),
            ("shoulder_lift_ratio", self.shoulder_lift_ratio),
            ("head_tilt_margin", self.head_tilt_margin),
            ("forward_lean_margin", self.forward_lean_margin),
        ];
        for (name, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(PostureError::Config(format!("{name} must be >= 0, got {value}")));
            }
        }

        Ok(())
    }
}
