//! Decoded audio handed from the decoder to the duration estimator.

/// A fully decoded, single-channel track at its native sample rate.
///
/// Owned by whoever decoded it and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioTrack {
    /// Mono f32 samples, nominally in [-1.0, 1.0].
    samples: Vec<f32>,
    /// Sample rate in Hz. Always > 0.
    sample_rate: u32,
}

impl AudioTrack {
    /// Build a track from mono samples.
    ///
    /// Returns `None` when `sample_rate` is zero.
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Option<Self> {
        if sample_rate == 0 {
            return None;
        }
        Some(Self {
            samples,
            sample_rate,
        })
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples in the track.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the track contains no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Total duration of the track in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples_to_secs(self.samples.len())
    }

    /// Convert a sample count at this track's rate into seconds.
    pub fn samples_to_secs(&self, samples: usize) -> f64 {
        samples as f64 / self.sample_rate as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sample_rate_is_rejected() {
        assert!(AudioTrack::new(vec![0.0; 16], 0).is_none());
    }

    #[test]
    fn duration_from_sample_count() {
        let track = AudioTrack::new(vec![0.0; 22_050], 44_100).unwrap();
        assert_eq!(track.duration_secs(), 0.5);
        assert_eq!(track.len(), 22_050);
    }

    #[test]
    fn empty_track_has_zero_duration() {
        let track = AudioTrack::new(Vec::new(), 8_000).unwrap();
        assert!(track.is_empty());
        assert_eq!(track.duration_secs(), 0.0);
    }
}
