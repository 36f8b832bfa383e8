//! iCalendar TEXT escaping (RFC 5545 §3.3.11).
//!
//! Escaping is not idempotent: a second pass doubles every backslash again.
//! Escape exactly once, when a value is written into a content line.

/// Escape free text for a TEXT property value.
///
/// Backslash becomes `\\`, newline becomes the two characters `\n`, comma
/// becomes `\,` and semicolon becomes `\;`. Every other character passes
/// through unchanged.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            ',' => out.push_str("\\,"),
            ';' => out.push_str("\\;"),
            _ => out.push(c),
        }
    }
    out
}

/// Reverse [`escape_text`]. `\N` is accepted as a newline too; an unknown
/// escape or a trailing lone backslash is kept as written.
pub fn unescape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') | Some('N') => out.push('\n'),
            Some(',') => out.push(','),
            Some(';') => out.push(';'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
