//! Text normalization used for keyword matching.
//!
//! The normalized copy destroys punctuation, so emails and phone numbers cannot be
//! recovered from it. Contact extraction always runs on the raw text instead.

/// Cleans raw extracted text:
/// 1. newlines become spaces
/// 2. anything other than an ASCII letter, ASCII digit or whitespace becomes a space
/// 3. lower-case
/// 4. whitespace runs collapse to a single space, ends trimmed
pub fn normalize_text(text: &str) -> String {
    let replaced: String = text
        .chars()
        .map(|c| match c {
            '\n' => ' ',
            c if c.is_ascii_alphanumeric() || c.is_whitespace() => c,
            _ => ' ',
        })
        .collect();

    replaced
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Characters that end a line: `\n`, `\r`, vertical tab, form feed, the ASCII file/group/
/// record separators, NEL and the Unicode line/paragraph separators.
pub fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\u{0b}'
            | '\u{0c}'
            | '\u{1c}'
            | '\u{1d}'
            | '\u{1e}'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Splits text into lines on any `is_line_break` character. `\r\n` counts as one break and
/// a trailing break does not produce an empty final line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        lines.push(&text[start..idx]);
        start = idx + c.len_utf8();
        if c == '\r' {
            if let Some(&(next, '\n')) = chars.peek() {
                chars.next();
                start = next + 1;
            }
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }

    lines
}
