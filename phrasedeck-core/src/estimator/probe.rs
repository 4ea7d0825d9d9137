//! `DurationProbe` — file path in, `DurationResult` out, never an error.

use std::path::Path;

use tracing::{info, warn};

use super::{DurationResult, EffectiveDurationEstimator, EstimatorConfig};
use crate::{
    audio::{AudioDecoder, SymphoniaDecoder},
    error::Result,
};

/// Decoder + estimator pair used once per row.
///
/// Decode failures are logged and degraded to `DurationResult::Unavailable`
/// so one bad file never stops a batch.
pub struct DurationProbe {
    decoder: Box<dyn AudioDecoder>,
    estimator: EffectiveDurationEstimator,
}

impl DurationProbe {
    /// Probe backed by `SymphoniaDecoder` and the default splitter settings
    /// taken from `config`.
    ///
    /// # Errors
    /// Returns `DeckError::InvalidConfig` if `config` fails validation.
    pub fn new(config: &EstimatorConfig) -> Result<Self> {
        Ok(Self::with_parts(
            SymphoniaDecoder::new(),
            EffectiveDurationEstimator::new(config)?,
        ))
    }

    pub fn with_parts<D: AudioDecoder + 'static>(
        decoder: D,
        estimator: EffectiveDurationEstimator,
    ) -> Self {
        Self {
            decoder: Box::new(decoder),
            estimator,
        }
    }

    /// Effective duration of the file at `path`.
    pub fn probe(&self, path: &Path) -> DurationResult {
        let track = match self.decoder.decode(path) {
            Ok(track) => track,
            Err(e) => {
                warn!(path = %path.display(), "effective duration unavailable: {e}");
                return DurationResult::Unavailable;
            }
        };

        let result = self.estimator.estimate(&track);
        if let DurationResult::Seconds(secs) = result {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_default();
            info!("effective duration of {name}: {secs}s");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        audio::AudioTrack,
        error::DeckError,
    };
    use std::path::PathBuf;

    struct FixedDecoder(AudioTrack);

    impl AudioDecoder for FixedDecoder {
        fn decode(&self, _path: &Path) -> Result<AudioTrack> {
            Ok(self.0.clone())
        }
    }

    struct FailingDecoder;

    impl AudioDecoder for FailingDecoder {
        fn decode(&self, path: &Path) -> Result<AudioTrack> {
            Err(DeckError::Decode {
                path: path.to_path_buf(),
                reason: "truncated stream".into(),
            })
        }
    }

    #[test]
    fn decoder_failure_is_unavailable() {
        let probe = DurationProbe::with_parts(FailingDecoder, EffectiveDurationEstimator::default());
        assert_eq!(
            probe.probe(&PathBuf::from("clip.mp3")),
            DurationResult::Unavailable
        );
    }

    #[test]
    fn missing_and_unsupported_files_are_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let unsupported = dir.path().join("clip.aac");
        std::fs::write(&unsupported, b"data").unwrap();

        let probe = DurationProbe::new(&EstimatorConfig::default()).unwrap();
        assert_eq!(
            probe.probe(&dir.path().join("missing.mp3")),
            DurationResult::Unavailable
        );
        assert_eq!(probe.probe(&unsupported), DurationResult::Unavailable);
    }

    #[test]
    fn silent_audio_is_zero_not_unavailable() {
        let track = AudioTrack::new(vec![0.0; 8_000], 8_000).unwrap();
        let probe =
            DurationProbe::with_parts(FixedDecoder(track), EffectiveDurationEstimator::default());
        assert_eq!(
            probe.probe(&PathBuf::from("silence.wav")),
            DurationResult::Seconds(0.0)
        );
    }

    #[test]
    fn probing_twice_is_identical() {
        let samples: Vec<f32> = (0..16_000)
            .map(|i| if (4_000..12_000).contains(&i) { 0.4 } else { 0.0 })
            .collect();
        let track = AudioTrack::new(samples, 8_000).unwrap();
        let probe =
            DurationProbe::with_parts(FixedDecoder(track), EffectiveDurationEstimator::default());
        let path = PathBuf::from("clip.wav");
        assert_eq!(probe.probe(&path), probe.probe(&path));
    }
}
