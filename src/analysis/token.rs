//! Token types for text analysis.
//!
//! A [`Token`] is one unit of text produced by a
//! [`Tokenizer`](crate::analysis::tokenizer::Tokenizer). Tokens carry their
//! byte offsets into the text they were cut from so that callers can map a
//! term back to the utterance it came from.
//!
//! # Examples
//!
//! ```
//! use chatterbox::analysis::token::{Token, TokenType};
//!
//! let token = Token::with_offsets("n't", 1, 2, 5).with_token_type(TokenType::Clitic);
//! assert_eq!(token.text, "n't");
//! assert_eq!(token.start_offset, 2);
//! assert_eq!(token.token_type, TokenType::Clitic);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single token cut from an input text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The position of the token in the token stream (0-based)
    pub position: usize,

    /// The byte offset where this token starts in the source text
    pub start_offset: usize,

    /// The byte offset where this token ends in the source text
    pub end_offset: usize,

    /// Content classification of the token
    pub token_type: TokenType,
}

/// Token type classification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenType {
    /// Word characters (letters, possibly mixed with digits)
    #[default]
    Word,
    /// Numeric values such as `42`, `3.14` or `1,000`
    Num,
    /// A clitic split off a word (`n't`, `'s`, `'ll`, ...)
    Clitic,
    /// Punctuation marks and symbols
    Punctuation,
}

impl Token {
    /// Create a new token with the given text and position.
    ///
    /// Offsets span the token text as if it started at byte 0.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        let text = text.into();
        let end_offset = text.len();
        Token {
            text,
            position,
            start_offset: 0,
            end_offset,
            token_type: TokenType::Word,
        }
    }

    /// Create a new token with explicit byte offsets.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset,
            end_offset,
            token_type: TokenType::Word,
        }
    }

    /// Set the token type.
    pub fn with_token_type(mut self, token_type: TokenType) -> Self {
        self.token_type = token_type;
        self
    }

    /// Length of the token text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the token text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A boxed stream of tokens.
pub type TokenStream = Box<dyn Iterator<Item = Token> + Send>;
