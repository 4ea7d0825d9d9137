use std::path::PathBuf;

use clap::Parser;

/// Convert a phrase CSV into the JSON deck format, measuring each clip's
/// effective audio duration along the way.
#[derive(Parser, Debug)]
#[command(name = "phrasedeck", version)]
pub struct Args {
    /// Path to the .csv file to convert
    pub input: PathBuf,

    /// Directory containing the audio clips
    pub audio_dir: PathBuf,

    /// Where to write the JSON (default: input path with a .json extension)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// JSON settings file with an `estimator` block
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Silence threshold in dB below the loudest frame
    #[arg(long)]
    pub top_db: Option<f64>,

    /// Ignore non-silent spans shorter than this many milliseconds
    #[arg(long)]
    pub min_interval_ms: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_positionals_are_required() {
        assert!(Args::try_parse_from(["phrasedeck", "deck.csv"]).is_err());
        let args = Args::try_parse_from(["phrasedeck", "deck.csv", "audio"]).unwrap();
        assert_eq!(args.input, PathBuf::from("deck.csv"));
        assert_eq!(args.audio_dir, PathBuf::from("audio"));
        assert!(args.output.is_none());
    }

    #[test]
    fn overrides_parse() {
        let args = Args::try_parse_from([
            "phrasedeck",
            "deck.csv",
            "audio",
            "--top-db",
            "30",
            "--min-interval-ms",
            "40",
        ])
        .unwrap();
        assert_eq!(args.top_db, Some(30.0));
        assert_eq!(args.min_interval_ms, Some(40));
    }
}
