//! Fixed-Capacity Ring Buffer
//!
//! Provides a bounded FIFO that evicts its oldest entry once full. Used to
//! hold the rolling window of per-frame posture verdicts.

mod buffer;

pub use buffer::{Iter, RingBuffer};
