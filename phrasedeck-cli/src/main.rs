//! `phrasedeck` — converts a phrase CSV into the JSON deck consumed by the
//! quiz front end, adding each clip's effective audio duration.
//!
//! ```text
//! phrasedeck <input.csv> <audio dir> [--output deck.json] [--settings s.json]
//! ```

mod args;
mod pipeline;
mod preflight;
mod record;
mod row;
mod settings;
mod transform;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use args::Args;

fn main() {
    // ── Tracing ───────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("phrasedeck=info,phrasedeck_core=info")),
        )
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let plan = preflight::prepare(args)?;
    info!(
        input = %plan.csv_path.display(),
        audio_dir = %plan.audio_dir.display(),
        "converting"
    );

    let report = pipeline::convert(&plan.csv_path, &plan.audio_dir, &plan.probe)?;
    pipeline::write_json(&plan.output_path, &report.records)?;

    info!(
        rows = report.rows_read,
        written = report.records.len(),
        skipped = report.skipped_rows.len(),
        "conversion finished"
    );
    if report.durations_unavailable > 0 {
        warn!(
            "{} record(s) have no effective audio duration",
            report.durations_unavailable
        );
    }
    Ok(())
}
