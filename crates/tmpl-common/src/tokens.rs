//! Output token classification.
//!
//! The emitter needs to know whether a token is word-like, since two adjacent
//! word tokens need whitespace between them while punctuation does not.

use std::fmt;
use std::sync::Arc;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OutputTokenType {
    /// Keywords and keyword-style operators such as `instanceof`.
    Word,
    Punctuation,
    Name,
    NumericValue,
    QuotedValue,
}

impl OutputTokenType {
    /// Whether a token of this type must be separated from an adjacent
    /// word-like token.
    pub fn is_word_like(self) -> bool {
        matches!(
            self,
            OutputTokenType::Word | OutputTokenType::Name | OutputTokenType::NumericValue
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OutputToken {
    pub text: Arc<str>,
    pub token_type: OutputTokenType,
}

impl OutputToken {
    pub fn new(text: impl Into<Arc<str>>, token_type: OutputTokenType) -> Self {
        OutputToken {
            text: text.into(),
            token_type,
        }
    }

    /// A token for fixed operator or keyword text: a [`OutputTokenType::Word`]
    /// when the text is lexically an identifier, else punctuation.
    pub fn for_fixed_text(text: impl Into<Arc<str>>) -> Self {
        let text = text.into();
        let token_type = if is_identifier(&text) {
            OutputTokenType::Word
        } else {
            OutputTokenType::Punctuation
        };
        OutputToken { text, token_type }
    }
}

impl fmt::Display for OutputToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// True if `text` is a non-empty identifier: a letter or `_`, then letters,
/// digits or `_`.
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

#[cfg(test)]
#[path = "../tests/tokens_tests.rs"]
mod tokens_tests;
