//! Effective-duration estimation: total length minus leading and trailing
//! silence.
//!
//! ```text
//! |<- leading ->|######## audible ... audible ########|<- trailing ->|
//! 0         first.start                          last.end          len
//! ```
//!
//! Interior gaps are *not* subtracted; only the edges are trimmed.

pub mod probe;

pub use probe::DurationProbe;

use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

use crate::{
    audio::AudioTrack,
    error::{DeckError, Result},
    silence::{EnergySplitter, SilenceDetector},
};

/// Decimal places kept in every reported duration.
pub const DURATION_DECIMALS: i32 = 4;

/// Tunables for silence detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct EstimatorConfig {
    /// Decibels below the loudest frame at which audio counts as silence.
    /// Default: 20.0.
    pub top_db: f64,
    /// Analysis frame width in samples. Default: 2048.
    pub frame_length: usize,
    /// Analysis frame stride in samples. Default: 512.
    pub hop_length: usize,
    /// Non-silent spans shorter than this are ignored. Default: 0 (keep all).
    pub min_interval_ms: u32,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            top_db: 20.0,
            frame_length: 2048,
            hop_length: 512,
            min_interval_ms: 0,
        }
    }
}

impl EstimatorConfig {
    /// Reject values the splitter cannot work with.
    ///
    /// # Errors
    /// Returns `DeckError::InvalidConfig` naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if !self.top_db.is_finite() || self.top_db <= 0.0 {
            return Err(DeckError::InvalidConfig(format!(
                "topDb must be a positive number, got {}",
                self.top_db
            )));
        }
        if self.frame_length == 0 {
            return Err(DeckError::InvalidConfig("frameLength must be > 0".into()));
        }
        if self.hop_length == 0 || self.hop_length > self.frame_length {
            return Err(DeckError::InvalidConfig(format!(
                "hopLength must be in 1..={}, got {}",
                self.frame_length, self.hop_length
            )));
        }
        Ok(())
    }
}

/// Outcome of estimating one file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DurationResult {
    /// Effective duration in seconds, rounded to `DURATION_DECIMALS` places.
    Seconds(f64),
    /// The audio could not be read. Never produced for silent audio.
    Unavailable,
}

impl DurationResult {
    pub fn seconds(self) -> Option<f64> {
        match self {
            DurationResult::Seconds(s) => Some(s),
            DurationResult::Unavailable => None,
        }
    }

    pub fn is_available(self) -> bool {
        matches!(self, DurationResult::Seconds(_))
    }
}

/// Serializes as a JSON number, or `""` when unavailable.
impl Serialize for DurationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            DurationResult::Seconds(s) => serializer.serialize_f64(*s),
            DurationResult::Unavailable => serializer.serialize_str(""),
        }
    }
}

/// Computes effective durations from decoded tracks. Holds no per-call state.
pub struct EffectiveDurationEstimator {
    detector: Box<dyn SilenceDetector>,
}

impl EffectiveDurationEstimator {
    /// Build an estimator around the default `EnergySplitter`.
    ///
    /// # Errors
    /// Returns `DeckError::InvalidConfig` if `config` fails validation.
    pub fn new(config: &EstimatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_detector(EnergySplitter::new(
            config.top_db,
            config.frame_length,
            config.hop_length,
            config.min_interval_ms,
        )))
    }

    /// Build an estimator around any detector.
    pub fn with_detector<D: SilenceDetector + 'static>(detector: D) -> Self {
        Self {
            detector: Box::new(detector),
        }
    }

    /// Effective duration of `track` in seconds.
    ///
    /// Always `Seconds`: a fully silent track is `Seconds(0.0)`.
    pub fn estimate(&self, track: &AudioTrack) -> DurationResult {
        let intervals = self.detector.non_silent_intervals(track);
        let (Some(first), Some(last)) = (intervals.first(), intervals.last()) else {
            debug!(samples = track.len(), "no audible interval, treating as silent");
            return DurationResult::Seconds(0.0);
        };

        let total = track.duration_secs();
        let leading = track.samples_to_secs(first.start);
        let trailing = track.samples_to_secs(track.len().saturating_sub(last.end));
        let effective = (total - leading - trailing).clamp(0.0, total);

        debug!(
            total,
            leading,
            trailing,
            intervals = intervals.len(),
            "estimated effective duration"
        );
        DurationResult::Seconds(round_to(effective, DURATION_DECIMALS))
    }
}

impl Default for EffectiveDurationEstimator {
    fn default() -> Self {
        Self::with_detector(EnergySplitter::default())
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
