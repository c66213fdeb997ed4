//! Feature Engineering Engine
//!
//! Provides statistical summaries over windows of per-frame measurements.

mod statistics;

pub use statistics::StatisticalFeatures;
