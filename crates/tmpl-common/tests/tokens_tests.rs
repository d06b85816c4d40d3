use super::*;

#[test]
fn test_keyword_operators_are_words() {
    assert_eq!(
        OutputToken::for_fixed_text("instanceof").token_type,
        OutputTokenType::Word
    );
    assert_eq!(OutputToken::for_fixed_text("and").token_type, OutputTokenType::Word);
}

#[test]
fn test_symbolic_operators_are_punctuation() {
    for text in ["+", "&&", "==", "!", "<=", "++"] {
        assert_eq!(
            OutputToken::for_fixed_text(text).token_type,
            OutputTokenType::Punctuation,
            "{text}"
        );
    }
}

#[test]
fn test_identifier_check() {
    assert!(is_identifier("_x1"));
    assert!(is_identifier("typeof"));
    assert!(!is_identifier(""));
    assert!(!is_identifier("1x"));
    assert!(!is_identifier("a-b"));
}

#[test]
fn test_word_like_types() {
    assert!(OutputTokenType::Word.is_word_like());
    assert!(OutputTokenType::Name.is_word_like());
    assert!(!OutputTokenType::Punctuation.is_word_like());
    assert!(!OutputTokenType::QuotedValue.is_word_like());
}
