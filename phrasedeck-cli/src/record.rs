//! Output record shape written to the JSON deck.

use phrasedeck_core::DurationResult;
use serde::Serialize;

use crate::row::PhraseRow;
use crate::transform::{format_jp_text, slugify};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhraseRecord {
    pub eng: String,
    pub jp: String,
    pub jp_formatted: String,
    pub has_furigana: bool,
    pub category: String,
    #[serde(rename = "type")]
    pub entry_type: String,
    pub audio: String,
    pub image: String,
    pub attr: String,
    pub effective_audio_duration: DurationResult,
}

impl PhraseRecord {
    /// Assemble a record. The duration is filled in by the caller once the
    /// audio file named by `audio` has been probed.
    pub fn from_row(row: PhraseRow) -> Self {
        let stem = slugify(&row.filename_source);
        Self {
            jp_formatted: format_jp_text(&row.base_text, &row.readings),
            has_furigana: !row.readings.is_empty(),
            audio: format!("{stem}.mp3"),
            image: format!("{stem}.jpg"),
            eng: row.eng,
            jp: row.jp,
            category: row.category,
            entry_type: row.entry_type,
            attr: row.attr,
            effective_audio_duration: DurationResult::Unavailable,
        }
    }
}
