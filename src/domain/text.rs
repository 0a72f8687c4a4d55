//! Text normalization helpers shared by the parsers and the console report.

use std::fmt::{Display, Write};

/// Replace every run of whitespace (newlines and NBSP included) with a single
/// space and trim both ends.
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Render `value` as text and keep at most `length` characters.
///
/// An absent value, or one whose `Display` impl reports an error, falls back
/// to `default` (truncated to the same length).
pub fn safe_truncate<T>(value: Option<&T>, length: usize, default: &str) -> String
where
    T: Display + ?Sized,
{
    let Some(value) = value else {
        return truncate_chars(default, length);
    };

    let mut rendered = String::new();
    match write!(rendered, "{value}") {
        Ok(()) => truncate_chars(&rendered, length),
        Err(_) => truncate_chars(default, length),
    }
}

/// `safe_truncate` for the common optional-string case.
pub fn safe_truncate_str(value: Option<&str>, length: usize, default: &str) -> String {
    safe_truncate(value, length, default)
}

/// Keep the first `length` characters of `text`, never splitting a code point.
pub fn truncate_chars(text: &str, length: usize) -> String {
    match text.char_indices().nth(length) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}

/// Treat blank text and the site's placeholders as "no value".
pub fn non_placeholder(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "N/A" || trimmed == "-" {
        None
    } else {
        Some(trimmed)
    }
}
