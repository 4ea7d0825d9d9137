//! Audio file loading.
//!
//! The `AudioDecoder` trait is the seam between the row pipeline and the
//! codec library: the default `SymphoniaDecoder` handles every supported
//! container, and tests or alternative backends can plug in their own
//! implementation without touching the estimator.

pub mod decoder;
pub mod track;

use std::path::Path;

pub use decoder::SymphoniaDecoder;
pub use track::AudioTrack;

use crate::error::{DeckError, Result};

/// Container extensions accepted by the decoders (compared case-insensitively).
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["mp3", "wav", "flac", "ogg"];

/// Contract for anything that can turn a file path into a mono `AudioTrack`.
pub trait AudioDecoder: Send + Sync {
    /// Decode `path` at its native sample rate, mixed down to one channel.
    ///
    /// # Errors
    /// Every failure is classified as `ErrorKind::UnavailableInput`.
    fn decode(&self, path: &Path) -> Result<AudioTrack>;
}

/// Check that `path` exists and carries a supported extension.
///
/// Returns the lower-cased extension on success.
pub fn check_input(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(DeckError::AudioNotFound {
            path: path.to_path_buf(),
        });
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(DeckError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension,
        });
    }

    Ok(extension)
}

/// Average interleaved frames down to one channel, appending to `out`.
///
/// A trailing partial frame is dropped.
pub fn mix_to_mono(interleaved: &[f32], channels: usize, out: &mut Vec<f32>) {
    if channels <= 1 {
        out.extend_from_slice(interleaved);
        return;
    }

    let frames = interleaved.len() / channels;
    out.reserve(frames);
    for f in 0..frames {
        let base = f * channels;
        let sum: f32 = interleaved[base..base + channels].iter().sum();
        out.push(sum / channels as f32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn mono_passes_through() {
        let mut out = Vec::new();
        mix_to_mono(&[0.1, -0.2, 0.3], 1, &mut out);
        assert_eq!(out, vec![0.1, -0.2, 0.3]);
    }

    #[test]
    fn stereo_is_averaged() {
        let mut out = Vec::new();
        mix_to_mono(&[0.5, 0.5, 1.0, 0.0, -0.4, 0.4], 2, &mut out);
        assert_eq!(out, vec![0.5, 0.5, 0.0]);
    }

    #[test]
    fn partial_frame_is_dropped() {
        let mut out = Vec::new();
        mix_to_mono(&[0.2, 0.4, 0.6], 2, &mut out);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = check_input(&dir.path().join("nope.mp3")).unwrap_err();
        assert!(matches!(err, DeckError::AudioNotFound { .. }));
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.WAV");
        fs::write(&path, b"RIFF").unwrap();
        assert_eq!(check_input(&path).unwrap(), "wav");
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["clip.aac", "clip"] {
            let path = dir.path().join(name);
            fs::write(&path, b"data").unwrap();
            let err = check_input(&path).unwrap_err();
            assert!(
                matches!(err, DeckError::UnsupportedFormat { .. }),
                "{name}: {err}"
            );
        }
    }
}
