//! # phrasedeck-core
//!
//! Audio side of the phrasedeck converter: measures how long a clip is once
//! leading and trailing silence are cut off.
//!
//! ## Architecture
//!
//! ```text
//! path → AudioDecoder::decode ──► AudioTrack (mono, native rate)
//!                                      │
//!                        SilenceDetector::non_silent_intervals
//!                                      │
//!                      EffectiveDurationEstimator::estimate
//!                                      │
//!                                DurationResult
//! ```
//!
//! `DurationProbe` wires the two halves together and turns every decode
//! failure into `DurationResult::Unavailable`.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod audio;
pub mod error;
pub mod estimator;
pub mod silence;

// Convenience re-exports for downstream crates
pub use audio::{AudioDecoder, AudioTrack, SymphoniaDecoder, SUPPORTED_EXTENSIONS};
pub use error::{DeckError, ErrorKind};
pub use estimator::{DurationProbe, DurationResult, EffectiveDurationEstimator, EstimatorConfig};
pub use silence::{EnergySplitter, Interval, SilenceDetector};
