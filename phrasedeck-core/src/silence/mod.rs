//! Non-silent interval detection.
//!
//! The `SilenceDetector` trait lets the estimator run against any
//! classification strategy. `EnergySplitter` (relative-dB frame energy) is
//! the default.

pub mod energy;

pub use energy::EnergySplitter;

use crate::audio::AudioTrack;

/// A contiguous non-silent span of samples, half-open: `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: usize,
    pub end: usize,
}

impl Interval {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "interval start {start} > end {end}");
        Self { start, end }
    }

    /// Number of samples covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Trait for all silence detectors.
///
/// Implementations must be deterministic and stateless across calls: the
/// same track always yields the same intervals.
pub trait SilenceDetector: Send + Sync {
    /// Return the maximal non-silent spans of `track`.
    ///
    /// The result is ascending, disjoint and bounded by `track.len()`.
    /// An empty result means the whole track is silent.
    fn non_silent_intervals(&self, track: &AudioTrack) -> Vec<Interval>;
}
