// src/core/sanitize.rs

/// Body text trim as the site needs it: `\r` first, then `\n`, then any
/// whitespace. Line endings on the site are a mix of CR, LF and CRLF.
pub fn trim_body(s: &str) -> String {
    s.trim_matches('\r').trim_matches('\n').trim().to_string()
}

/// Remove every occurrence of a template label (e.g. `译文`).
pub fn strip_label(s: &str, label: &str) -> String {
    s.replace(label, "")
}

/// Everything before the first `marker`, or the whole string.
pub fn cut_at(s: &str, marker: char) -> &str {
    match s.find(marker) {
        Some(i) => &s[..i],
        None => s,
    }
}
