//! Small utility helpers for URL encoding and display-width handling.
//!
//! The functions in this module are intentionally lightweight. They are used by
//! the catalog client, cover derivation, and UI code.

use std::fmt::Write;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// What: Percent-encode a string for use in URLs according to RFC 3986.
///
/// Inputs:
/// - `input`: String to encode.
///
/// Output:
/// - Returns a percent-encoded string where reserved characters are escaped.
///
/// Details:
/// - Unreserved characters as per RFC 3986 (`A-Z`, `a-z`, `0-9`, `-`, `.`, `_`, `~`) are left as-is.
/// - Space is encoded as `%20` (not `+`).
/// - All other bytes are encoded as two uppercase hexadecimal digits prefixed by `%`.
#[must_use]
pub fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for &b in input.as_bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(b as char);
            }
            b' ' => out.push_str("%20"),
            _ => {
                out.push('%');
                let _ = write!(out, "{b:02X}");
            }
        }
    }
    out
}

/// What: Truncate text to fit a terminal column budget.
///
/// Inputs:
/// - `text`: Text to fit.
/// - `max_width`: Available display columns.
///
/// Output:
/// - `text` unchanged when it fits; otherwise a prefix ending in `…` that fits.
///
/// Details:
/// - Measures display width, so wide (CJK) characters count as two columns.
#[must_use]
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let budget = max_width - 1;
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

/// Join author names for display, or a placeholder when none are known.
#[must_use]
pub fn join_authors(authors: &[String]) -> String {
    if authors.is_empty() {
        "Unknown author".to_string()
    } else {
        authors.join(", ")
    }
}
