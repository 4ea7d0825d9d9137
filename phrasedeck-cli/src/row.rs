//! Typed view of one CSV data row.

use csv::StringRecord;
use thiserror::Error;

/// Rows with fewer columns than this are skipped.
pub const MIN_COLUMNS: usize = 7;

#[derive(Debug, Error, PartialEq, Eq)]
#[error(
    "row {row} skipped: expected {min} or more columns, found {found}",
    min = MIN_COLUMNS
)]
pub struct MalformedRow {
    pub row: usize,
    pub found: usize,
}

/// Column layout: eng, jp, base text, readings, filename source, category,
/// type, optional attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseRow {
    pub eng: String,
    pub jp: String,
    pub base_text: String,
    pub readings: String,
    pub filename_source: String,
    pub category: String,
    pub entry_type: String,
    pub attr: String,
}

impl PhraseRow {
    /// `row` is the 1-based data row number (header excluded), used only
    /// for the error.
    pub fn from_record(record: &StringRecord, row: usize) -> Result<Self, MalformedRow> {
        if record.len() < MIN_COLUMNS {
            return Err(MalformedRow {
                row,
                found: record.len(),
            });
        }
        let col = |i: usize| record.get(i).unwrap_or_default().to_string();
        Ok(Self {
            eng: col(0),
            jp: col(1),
            base_text: col(2),
            readings: col(3),
            filename_source: col(4),
            category: col(5),
            entry_type: col(6),
            attr: col(7),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seven_columns_is_enough() {
        let record = StringRecord::from(vec!["Hi", "やあ", "やあ", "", "Hi", "greeting", "word"]);
        let row = PhraseRow::from_record(&record, 1).unwrap();
        assert_eq!(row.category, "greeting");
        assert_eq!(row.entry_type, "word");
        assert_eq!(row.attr, "");
    }

    #[test]
    fn eighth_column_is_the_attribute() {
        let record = StringRecord::from(vec![
            "Hi", "やあ", "やあ", "", "Hi", "greeting", "word", "Photo by A. Person",
        ]);
        let row = PhraseRow::from_record(&record, 1).unwrap();
        assert_eq!(row.attr, "Photo by A. Person");
    }

    #[test]
    fn short_row_is_malformed() {
        let record = StringRecord::from(vec!["a", "b", "c", "d", "e"]);
        let err = PhraseRow::from_record(&record, 4).unwrap_err();
        assert_eq!(err, MalformedRow { row: 4, found: 5 });
        assert_eq!(
            err.to_string(),
            "row 4 skipped: expected 7 or more columns, found 5"
        );
    }
}
