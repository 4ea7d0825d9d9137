//! Relative-energy splitter: frame mean-square against the loudest frame.
//!
//! ## Algorithm
//!
//! 1. Cut the track into frames of `frame_length` samples every
//!    `hop_length` samples (the last frame is truncated at the track end).
//! 2. Compute the mean square of each frame.
//! 3. A frame is audible when its energy is within `top_db` decibels of the
//!    loudest frame: `10·log10(ms / max_ms) > -top_db`.
//! 4. Each run of audible frames `[a, b)` becomes the sample interval
//!    `[a·hop, b·hop)`, clipped to the track (a run touching the final frame
//!    extends to the last sample).
//! 5. Intervals shorter than `min_interval_ms` are dropped.

use tracing::trace;

use super::{Interval, SilenceDetector};
use crate::audio::AudioTrack;

/// Energies at or below this are treated as digital silence.
const AMIN: f64 = 1e-10;

/// Frame-energy silence detector.
#[derive(Debug, Clone)]
pub struct EnergySplitter {
    /// Decibels below the loudest frame at which a frame counts as silent.
    top_db: f64,
    /// Frame width in samples.
    frame_length: usize,
    /// Frame stride in samples. Never larger than `frame_length`.
    hop_length: usize,
    /// Intervals shorter than this (milliseconds) are discarded. 0 disables.
    min_interval_ms: u32,
}

impl EnergySplitter {
    /// Create a new splitter.
    ///
    /// `frame_length` and `hop_length` are raised to at least 1 and
    /// `hop_length` is capped at `frame_length` so that every sample lands
    /// in some frame.
    pub fn new(top_db: f64, frame_length: usize, hop_length: usize, min_interval_ms: u32) -> Self {
        let frame_length = frame_length.max(1);
        Self {
            top_db,
            frame_length,
            hop_length: hop_length.clamp(1, frame_length),
            min_interval_ms,
        }
    }

    pub fn top_db(&self) -> f64 {
        self.top_db
    }

    /// Number of frames needed to reach the last sample of a `len`-sample track.
    fn frame_count(&self, len: usize) -> usize {
        if len == 0 {
            0
        } else if len <= self.frame_length {
            1
        } else {
            1 + (len - self.frame_length).div_ceil(self.hop_length)
        }
    }

    /// Mean square of every frame.
    fn frame_energies(&self, samples: &[f32]) -> Vec<f64> {
        (0..self.frame_count(samples.len()))
            .map(|i| {
                let start = i * self.hop_length;
                let end = (start + self.frame_length).min(samples.len());
                mean_square(&samples[start..end])
            })
            .collect()
    }
}

impl Default for EnergySplitter {
    fn default() -> Self {
        Self::new(20.0, 2048, 512, 0)
    }
}

impl SilenceDetector for EnergySplitter {
    fn non_silent_intervals(&self, track: &AudioTrack) -> Vec<Interval> {
        let len = track.len();
        let energies = self.frame_energies(track.samples());
        let peak = energies.iter().copied().fold(0.0_f64, f64::max);
        if peak <= AMIN {
            return Vec::new();
        }

        let floor = peak * 10f64.powf(-self.top_db / 10.0);
        let n_frames = energies.len();
        let to_sample = |frame: usize| {
            if frame >= n_frames {
                len
            } else {
                (frame * self.hop_length).min(len)
            }
        };

        let mut intervals = Vec::new();
        let mut run_start: Option<usize> = None;
        for (i, &energy) in energies.iter().enumerate() {
            let audible = energy > floor && energy > AMIN;
            match (audible, run_start) {
                (true, None) => run_start = Some(i),
                (false, Some(a)) => {
                    intervals.push(Interval::new(to_sample(a), to_sample(i)));
                    run_start = None;
                }
                _ => {}
            }
        }
        if let Some(a) = run_start {
            intervals.push(Interval::new(to_sample(a), len));
        }

        let min_samples =
            self.min_interval_ms as u64 * track.sample_rate() as u64 / 1000;
        if min_samples > 0 {
            intervals.retain(|iv| iv.len() as u64 >= min_samples);
        }

        trace!(
            frames = n_frames,
            intervals = intervals.len(),
            "split track into non-silent intervals"
        );
        intervals
    }
}

fn mean_square(samples: &[f32]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
    sum_sq / samples.len() as f64
}
