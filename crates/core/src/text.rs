//! Small text helpers shared across crates.

/// Return the first `max_chars` characters of `text`.
///
/// Cuts on a `char` boundary, so multi-byte input never panics.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Character count of the trimmed text.
pub fn trimmed_len(text: &str) -> usize {
    text.trim().chars().count()
}
