//! Temporal smoothing of raw per-frame verdicts

use ring_buffer::RingBuffer;
use crate::config::PostureConfig;

/// Moving-ratio debounce over the most recent raw verdicts
///
/// Until the history is full the raw verdict passes through unchanged.
#[derive(Debug, Clone)]
pub struct TemporalSmoother {
    history: RingBuffer<bool>,
    bad_ratio: f64,
}

impl TemporalSmoother {
    pub fn new(config: &PostureConfig) -> Self {
        Self {
            history: RingBuffer::new(config.history_size),
            bad_ratio: config.bad_posture_ratio,
        }
    }

    /// Record a raw verdict and return the smoothed one
    pub fn update(&mut self, raw_bad: bool) -> bool {
        self.history.push(raw_bad);

        if !self.history.is_full() {
            return raw_bad;
        }

        self.ratio() >= self.bad_ratio
    }

    /// Fraction of bad verdicts currently in the history
    pub fn ratio(&self) -> f64 {
        if self.history.is_empty() {
            return 0.0;
        }
        self.history.count_matching(|&bad| bad) as f64 / self.history.len() as f64
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn reset(&mut self) {
        self.history.clear();
    }
}
