//! Term extraction for the vectorizer.

use std::sync::Arc;

use regex::Regex;

use super::Tokenizer;
use crate::analysis::token::{Token, TokenStream};
use crate::error::{ChatterboxError, Result};

/// Pattern selecting vectorizer terms: runs of two or more word characters.
pub const TERM_PATTERN: &str = r"\b\w\w+\b";

/// A regex-based tokenizer that extracts every match of a pattern.
#[derive(Clone, Debug)]
pub struct RegexTokenizer {
    /// Every match is one term.
    pattern: Arc<Regex>,
}

impl RegexTokenizer {
    /// Create a new regex tokenizer with the default term pattern.
    ///
    /// The default pattern [`TERM_PATTERN`] skips punctuation and
    /// single-character tokens.
    pub fn new() -> Result<Self> {
        Self::with_pattern(TERM_PATTERN)
    }

    /// Use `pattern` instead of [`TERM_PATTERN`]. An invalid pattern is a
    /// configuration error.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| ChatterboxError::config(format!("Invalid regex pattern: {e}")))?;

        Ok(RegexTokenizer {
            pattern: Arc::new(regex),
        })
    }

    /// The pattern source.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Extract the matched terms without building tokens.
    pub fn terms<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.pattern.find_iter(text).map(|m| m.as_str()).collect()
    }
}

impl Tokenizer for RegexTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = self
            .pattern
            .find_iter(text)
            .enumerate()
            .map(|(position, mat)| {
                Token::with_offsets(mat.as_str(), position, mat.start(), mat.end())
            })
            .collect();

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terms_carry_offsets_into_normalized_text() {
        let tokenizer = RegexTokenizer::new().unwrap();
        let tokens: Vec<Token> = tokenizer.tokenize("see you , ok ?").unwrap().collect();

        let spans: Vec<(&str, usize, usize, usize)> = tokens
            .iter()
            .map(|t| (t.text.as_str(), t.position, t.start_offset, t.end_offset))
            .collect();
        assert_eq!(spans, [("see", 0, 0, 3), ("you", 1, 4, 7), ("ok", 2, 10, 12)]);
    }

    #[test]
    fn test_term_pattern_skips_short_tokens() {
        let tokenizer = RegexTokenizer::new().unwrap();
        assert_eq!(tokenizer.terms("i do n't know !"), ["do", "know"]);
        assert_eq!(tokenizer.terms("pi is 3.14"), ["pi", "is", "14"]);
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(RegexTokenizer::with_pattern("(").is_err());
    }

    #[test]
    fn test_custom_pattern() {
        let tokenizer = RegexTokenizer::with_pattern(r"\w+").unwrap();
        assert_eq!(tokenizer.pattern(), r"\w+");
        assert_eq!(tokenizer.terms("a b"), ["a", "b"]);
        assert_eq!(tokenizer.name(), "regex");
    }
}
