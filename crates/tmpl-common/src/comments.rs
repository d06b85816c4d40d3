//! Escaping text for inclusion in generated comments.
//!
//! Documentation and diagnostics are copied into block comments in the output.
//! Line breaks would corrupt line-oriented targets and a `*/` would end the
//! comment early, so both are percent-escaped.

use std::borrow::Cow;

/// Escape `text` so it can sit inside a block comment on a single line.
///
/// Rewrites `\r` to `%0D`, `\n` to `%0A`, and a `*` that is directly followed
/// by `/` to `%2A`. The `/` itself is kept. The lookahead is against the
/// original text, so `**/` becomes `*%2A/`.
pub fn comment_safe(text: &str) -> Cow<'_, str> {
    if !needs_escape(text) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => out.push_str("%0D"),
            '\n' => out.push_str("%0A"),
            '*' if chars.peek() == Some(&'/') => out.push_str("%2A"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

fn needs_escape(text: &str) -> bool {
    text.contains(['\r', '\n']) || text.contains("*/")
}

#[cfg(test)]
#[path = "../tests/comments_tests.rs"]
mod comments_tests;
