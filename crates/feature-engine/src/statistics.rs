//! Statistical Features Computation

use serde::{Deserialize, Serialize};

/// Statistical features for a signal
///
/// All moments are population statistics (divided by `n`, not `n - 1`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticalFeatures {
    /// Mean value
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// Number of samples
    pub count: usize,
}

impl StatisticalFeatures {
    /// Compute statistical features from a slice of values
    pub fn compute(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let n = values.len() as f64;

        // Min/Max
        let min = values.iter().cloned().fold(f64::MAX, f64::min);
        let max = values.iter().cloned().fold(f64::MIN, f64::max);

        // Constant window: summing would drift the mean off the sample value
        if min == max {
            return Self {
                mean: min,
                std_dev: 0.0,
                min,
                max,
                count: values.len(),
            };
        }

        // Mean
        let mean = values.iter().sum::<f64>() / n;

        // Variance
        let m2: f64 = values.iter().map(|&v| (v - mean) * (v - mean)).sum();
        let std_dev = (m2 / n).sqrt();

        Self {
            mean,
            std_dev,
            min,
            max,
            count: values.len(),
        }
    }

    /// Compute features over a value derived from each item of a window
    pub fn compute_by<T, F>(items: &[T], extract: F) -> Self
    where
        F: Fn(&T) -> f64,
    {
        let values: Vec<f64> = items.iter().map(extract).collect();
        Self::compute(&values)
    }

    /// Spread of the window (max - min)
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}
