use std::path::PathBuf;

use thiserror::Error;

/// All errors produced by phrasedeck-core.
#[derive(Debug, Error)]
pub enum DeckError {
    #[error("audio file not found: {path}")]
    AudioNotFound { path: PathBuf },

    #[error("unsupported audio format '{extension}': {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("no decodable audio track in {path}")]
    NoAudioTrack { path: PathBuf },

    #[error("failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("invalid estimator config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification used by callers to decide between degrading a
/// single row and aborting a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing, unsupported or unreadable audio. Recoverable per file.
    UnavailableInput,
    /// Bad configuration. Fatal before any work starts.
    Configuration,
}

impl DeckError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DeckError::InvalidConfig(_) => ErrorKind::Configuration,
            DeckError::AudioNotFound { .. }
            | DeckError::UnsupportedFormat { .. }
            | DeckError::NoAudioTrack { .. }
            | DeckError::Decode { .. }
            | DeckError::Io(_) => ErrorKind::UnavailableInput,
        }
    }
}

pub type Result<T> = std::result::Result<T, DeckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_failures_are_unavailable_input() {
        let err = DeckError::UnsupportedFormat {
            path: PathBuf::from("clip.aac"),
            extension: "aac".into(),
        };
        assert_eq!(err.kind(), ErrorKind::UnavailableInput);
        assert_eq!(
            err.to_string(),
            "unsupported audio format 'aac': clip.aac"
        );
    }

    #[test]
    fn config_failures_are_configuration() {
        let err = DeckError::InvalidConfig("hop_length must be > 0".into());
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}
