//! Field name normalization.

/// Convert a human-entered field name into its canonical storage
/// identifier: lower-cased, `[a-z0-9]` kept, every other character
/// replaced by `_`, runs of `_` collapsed, leading and trailing `_`
/// stripped.
///
/// Pure and idempotent. The result can be empty (all-punctuation
/// input); minimum-length enforcement happens on the display name
/// before normalization, not here.
pub fn uglify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            out.push(ch);
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    out.trim_matches('_').to_string()
}
