//! Text normalization applied to every document before extraction.

/// Collapse newlines and whitespace runs into single spaces and trim.
///
/// Readers deliver page- or paragraph-broken text; rules are written
/// against the single-line form.
pub fn normalize_text(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for segment in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}
