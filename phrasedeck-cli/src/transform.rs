//! Pure string transforms applied to each CSV row.

/// Separator between segments in the base-text and reading columns.
pub const LIST_DIVIDER: char = ';';

/// Reading placeholder meaning "no annotation for this segment".
pub const EMPTY_PLACEHOLDER: &str = "_";

/// Canonical file stem: trimmed, ASCII punctuation removed, spaces turned
/// into underscores, lower-cased.
pub fn slugify(text: &str) -> String {
    text.trim()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .map(|c| if c == ' ' { '_' } else { c })
        .collect::<String>()
        .to_lowercase()
}

/// Build the ruby-annotated display markup.
///
/// `base` and `readings` are parallel `;`-separated lists. An empty
/// `readings` column returns `base` untouched. A reading of `_`, or a
/// missing reading, leaves that segment bare.
pub fn format_jp_text(base: &str, readings: &str) -> String {
    if readings.is_empty() {
        return base.to_string();
    }

    let mut reading_iter = readings.split(LIST_DIVIDER).map(str::trim);
    let mut out = String::new();
    for segment in base.split(LIST_DIVIDER).map(str::trim) {
        match reading_iter.next() {
            Some(reading) if reading != EMPTY_PLACEHOLDER => {
                out.push_str(r#"<span class="ruby-wrapper">"#);
                out.push_str(segment);
                out.push_str(r#"<span class="furigana">"#);
                out.push_str(reading);
                out.push_str("</span></span>");
            }
            _ => out.push_str(segment),
        }
    }
    out
}

/// Number of base segments that have no reading at all.
pub fn missing_readings(base: &str, readings: &str) -> usize {
    if readings.is_empty() {
        return 0;
    }
    let bases = base.split(LIST_DIVIDER).count();
    let given = readings.split(LIST_DIVIDER).count();
    bases.saturating_sub(given)
}
