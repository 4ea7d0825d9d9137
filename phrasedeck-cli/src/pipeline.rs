//! Row-processing pipeline: CSV in, JSON deck out.
//!
//! ```text
//! csv rows ─► PhraseRow ─► PhraseRecord ─► DurationProbe ─► Vec<PhraseRecord> ─► json
//!     │ (< 7 cols, blank)                      │ (missing / bad audio)
//!     └─► warn + skip                           └─► warn + ""
//! ```
//!
//! Only I/O on the CSV itself or the output file aborts a run.

use std::fs;
use std::path::Path;

use anyhow::Context;
use csv::StringRecord;
use phrasedeck_core::{DurationProbe, DurationResult};
use tracing::{info, warn};

use crate::record::PhraseRecord;
use crate::row::{MalformedRow, PhraseRow};
use crate::transform::missing_readings;

/// Result of converting one CSV file.
#[derive(Debug, Default)]
pub struct ConversionReport {
    pub records: Vec<PhraseRecord>,
    /// Data rows seen (header excluded), blank lines included.
    pub rows_read: usize,
    /// 1-based numbers of the rows that were skipped.
    pub skipped_rows: Vec<usize>,
    pub durations_unavailable: usize,
}

/// One data line of the input, after the header.
#[derive(Debug)]
enum RawRow {
    Record(StringRecord),
    /// An empty line. The csv reader drops these, so they are recovered
    /// from the text between records.
    Blank,
    Unreadable(csv::Error),
}

/// Split `text` into data rows, numbering blank lines like any other row.
fn read_rows(text: &str) -> Vec<RawRow> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    let mut seen_header = false;
    for result in reader.records() {
        if !seen_header {
            seen_header = true;
            continue;
        }
        match result {
            Ok(record) => {
                if let Some(pos) = record.position() {
                    let blanks = blank_lines_before(text, pos.byte() as usize);
                    rows.extend(std::iter::repeat_with(|| RawRow::Blank).take(blanks));
                }
                rows.push(RawRow::Record(record));
            }
            Err(e) => rows.push(RawRow::Unreadable(e)),
        }
    }

    if seen_header {
        let blanks = blank_lines_before(text, text.len());
        rows.extend(std::iter::repeat_with(|| RawRow::Blank).take(blanks));
    }
    rows
}

const LINE_BREAKS: [char; 2] = ['\r', '\n'];

/// Empty lines between the end of the previous record's content and the
/// first content at or after `offset`.
fn blank_lines_before(text: &str, offset: usize) -> usize {
    let Some(rest) = text.get(offset..) else {
        return 0;
    };
    let start = text.len() - rest.trim_start_matches(LINE_BREAKS).len();
    let head = text[..start].trim_end_matches(LINE_BREAKS);
    if head.is_empty() {
        return 0;
    }
    text[head.len()..start]
        .matches('\n')
        .count()
        .saturating_sub(1)
}

/// Read `csv_path`, build one record per valid row and probe its audio in
/// `audio_dir`.
pub fn convert(
    csv_path: &Path,
    audio_dir: &Path,
    probe: &DurationProbe,
) -> anyhow::Result<ConversionReport> {
    let raw = fs::read_to_string(csv_path)
        .with_context(|| format!("reading {}", csv_path.display()))?;
    let text = raw.strip_prefix('\u{feff}').unwrap_or(&raw);

    Ok(process_rows(read_rows(text), audio_dir, probe))
}

/// Turn data rows into records. Problems with a single row are logged and
/// counted, never returned.
fn process_rows(rows: Vec<RawRow>, audio_dir: &Path, probe: &DurationProbe) -> ConversionReport {
    let mut report = ConversionReport::default();
    for (idx, raw_row) in rows.into_iter().enumerate() {
        let row_number = idx + 1;
        report.rows_read += 1;

        let parsed = match raw_row {
            RawRow::Record(record) => PhraseRow::from_record(&record, row_number),
            RawRow::Blank => Err(MalformedRow {
                row: row_number,
                found: 0,
            }),
            RawRow::Unreadable(e) => {
                warn!("row {row_number} skipped: {e}");
                report.skipped_rows.push(row_number);
                continue;
            }
        };
        let row = match parsed {
            Ok(row) => row,
            Err(e) => {
                warn!("{e}");
                report.skipped_rows.push(row_number);
                continue;
            }
        };

        let missing = missing_readings(&row.base_text, &row.readings);
        if missing > 0 {
            warn!(
                row = row_number,
                "{missing} segment(s) have no reading and are left unannotated"
            );
        }

        let mut entry = PhraseRecord::from_row(row);
        entry.effective_audio_duration = probe_row_audio(probe, audio_dir, &entry.audio);
        if !entry.effective_audio_duration.is_available() {
            report.durations_unavailable += 1;
        }
        report.records.push(entry);
    }

    report
}

fn probe_row_audio(probe: &DurationProbe, audio_dir: &Path, file_name: &str) -> DurationResult {
    let path = audio_dir.join(file_name);
    if !path.exists() {
        warn!("audio file {} missing", path.display());
        return DurationResult::Unavailable;
    }
    probe.probe(&path)
}

/// Write records as two-space indented UTF-8 JSON, non-ASCII kept literal.
pub fn write_json(path: &Path, records: &[PhraseRecord]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    info!("successfully written to {}", path.display());
    Ok(())
}
