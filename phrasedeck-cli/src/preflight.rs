//! Checks that run before any row is touched. Every failure here is fatal.

use std::path::PathBuf;

use phrasedeck_core::{DeckError, DurationProbe};
use thiserror::Error;
use tracing::debug;

use crate::args::Args;
use crate::settings::{load_settings, AppSettings};

#[derive(Debug, Error)]
pub enum PreflightError {
    #[error("file {0} does not exist")]
    InputMissing(PathBuf),

    #[error("invalid file suffix: {suffix:?}. Please provide a .csv file")]
    InputExtension { suffix: String },

    #[error("directory {0} does not exist")]
    AudioDirMissing(PathBuf),

    #[error("cannot load settings {path}: {reason}")]
    Settings { path: PathBuf, reason: String },

    #[error(transparent)]
    Estimator(#[from] DeckError),
}

/// Everything a conversion run needs, resolved and validated.
pub struct RunPlan {
    pub csv_path: PathBuf,
    pub audio_dir: PathBuf,
    pub output_path: PathBuf,
    pub probe: DurationProbe,
}

pub fn prepare(args: &Args) -> Result<RunPlan, PreflightError> {
    if !args.input.is_file() {
        return Err(PreflightError::InputMissing(args.input.clone()));
    }

    let suffix = args
        .input
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_default();
    if suffix != "csv" {
        return Err(PreflightError::InputExtension { suffix });
    }

    if !args.audio_dir.is_dir() {
        return Err(PreflightError::AudioDirMissing(args.audio_dir.clone()));
    }

    let mut settings = match &args.settings {
        Some(path) => load_settings(path).map_err(|reason| PreflightError::Settings {
            path: path.clone(),
            reason,
        })?,
        None => AppSettings::default(),
    };
    settings.normalize();
    settings.apply_overrides(args.top_db, args.min_interval_ms);
    debug!(?settings, "resolved settings");

    let probe = DurationProbe::new(&settings.estimator)?;
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.with_extension("json"));

    Ok(RunPlan {
        csv_path: args.input.clone(),
        audio_dir: args.audio_dir.clone(),
        output_path,
        probe,
    })
}
