// src/format.rs
//! Sentence splitting and the centered stanza layout.

use crate::data::Poetry;

/// Split `body` into sentences, each ending with (and keeping) one of
/// `delimiters`. Text after the last delimiter is dropped.
///
/// With `filter_parentheticals`, everything from `(` to the next `)` is
/// skipped, brackets included. Skipped text never ends a sentence. Nesting is
/// not tracked: a second `(` before the `)` is just more skipped text.
pub fn sentences(body: &str, delimiters: &[char], filter_parentheticals: bool) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = s!();
    let mut in_paren = false;

    for ch in body.chars() {
        if filter_parentheticals {
            if ch == '(' {
                in_paren = true;
                continue;
            }
            if in_paren {
                if ch == ')' {
                    in_paren = false;
                }
                continue;
            }
        }

        current.push(ch);
        if delimiters.contains(&ch) {
            out.push(current.trim().to_string());
            current.clear();
        }
    }
    out
}

/// Title (and author, when resolved) centered over the poem, one sentence
/// per line:
///
/// ```text
///        静夜思
///         李白
///
/// 床前明月光，疑是地上霜。
/// 举头望明月，低头思故乡。
/// ```
///
/// The centering width is the mean sentence length plus `fill_length`.
/// CJK glyphs render wider than the padding spaces, so the right value depends
/// on the font; 7 suits the usual IDE console, 2 works for comma-split lines.
pub fn prettify(
    poetry: &Poetry,
    delimiters: &[char],
    filter_parentheticals: bool,
    fill_length: usize,
) -> String {
    let lines = sentences(poetry.content(), delimiters, filter_parentheticals);
    if lines.is_empty() {
        return s!();
    }

    let total: usize = lines.iter().map(|l| l.chars().count()).sum();
    let width = total / lines.len() + fill_length;

    let mut out = center(poetry.title(), width);
    out.push('\n');
    if let Some(author) = poetry.author().resolved() {
        out.push_str(&center(author.name(), width));
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&lines.join("\n"));

    out.trim_matches('\n').to_string()
}

/// Pad `s` with spaces to `width` chars. Odd margins put the extra space on
/// the left when `width` is odd, on the right otherwise.
pub fn center(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if width <= len {
        return s.to_string();
    }
    let margin = width - len;
    let left = margin / 2 + (margin & width & 1);
    let right = margin - left;

    let mut out = String::with_capacity(s.len() + margin);
    out.extend(std::iter::repeat_n(' ', left));
    out.push_str(s);
    out.extend(std::iter::repeat_n(' ', right));
    out
}
