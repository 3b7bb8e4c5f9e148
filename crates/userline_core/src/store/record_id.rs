use once_cell::sync::Lazy;
use regex::Regex;

static RECORD_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([a-f0-9-]{36})""#).expect("valid record id regex"));

/// Extracts the identifier embedded in a stored record.
///
/// The identifier is the first quoted 36-character token made of lowercase
/// hex digits and hyphens. Returns `""` when the record has none; callers
/// must treat that as "no identifier", never as a key.
pub fn extract_record_id(record: &str) -> &str {
    RECORD_ID_RE
        .captures(record)
        .and_then(|captures| captures.get(1))
        .map_or("", |id| id.as_str())
}
