/// Normalizes a lookup key for case-insensitive maps.
///
/// Returns `None` for blank input so callers can treat it as a guarded no-op.
pub(crate) fn normalize_key(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}
