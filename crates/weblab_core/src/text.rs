//! Shared text normalization helpers.

/// Trim an optional string and drop empty values.
pub fn normalize_optional_nonempty(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Reduce a display name to a conservative file stem.
///
/// Keeps ASCII alphanumerics, `-` and `_`; runs of anything else collapse to a
/// single `-`. Returns `None` when nothing usable remains.
pub fn file_stem(name: &str) -> Option<String> {
    let mut stem = String::with_capacity(name.len());
    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
            stem.push(ch);
        } else if !stem.ends_with('-') {
            stem.push('-');
        }
    }
    let stem = stem.trim_matches('-');
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}
