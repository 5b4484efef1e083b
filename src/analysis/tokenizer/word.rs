//! Word tokenizer with English clitic splitting.
//!
//! Text is segmented with the Unicode word boundary rules (UAX #29).
//! Whitespace is dropped, every other segment becomes a token, so punctuation
//! and symbols survive as tokens of their own and numbers such as `3.14`
//! stay whole. Words carrying a clitic from the
//! [`TokenizerResource`] are split in two, Treebank style:
//!
//! ```text
//! "i don't know, it's 3.14!"
//!   → i | do | n't | know | , | it | 's | 3.14 | !
//! ```
//!
//! Re-tokenizing the space-joined output yields the same tokens, which keeps
//! normalization idempotent. UAX #29 cuts a leading apostrophe off the letters
//! behind it (`'s` → `'` `s`), so a bare apostrophe followed by a clitic body
//! is merged back into one clitic token.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use chatterbox::analysis::resource::TokenizerResource;
//! use chatterbox::analysis::tokenizer::WordTokenizer;
//!
//! let tokenizer = WordTokenizer::new(Arc::new(TokenizerResource::builtin()));
//! let words: Vec<String> = tokenizer.split("can't stop").into_iter().map(|t| t.text).collect();
//! assert_eq!(words, ["ca", "n't", "stop"]);
//! ```

use std::iter::Peekable;
use std::sync::Arc;

use unicode_segmentation::{UWordBoundIndices, UnicodeSegmentation};

use crate::analysis::resource::TokenizerResource;
use crate::analysis::token::{Token, TokenStream, TokenType};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

const APOSTROPHES: [char; 2] = ['\'', '\u{2019}'];

/// A tokenizer that splits text on Unicode word boundaries and peels English
/// clitics off words.
#[derive(Clone, Debug)]
pub struct WordTokenizer {
    resource: Arc<TokenizerResource>,
}

impl WordTokenizer {
    /// Create a new word tokenizer backed by the given resource.
    pub fn new(resource: Arc<TokenizerResource>) -> Self {
        WordTokenizer { resource }
    }

    /// The resource this tokenizer was built with.
    pub fn resource(&self) -> &TokenizerResource {
        &self.resource
    }

    /// Split `text` into tokens. Never fails.
    pub fn split(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut segments = text.split_word_bound_indices().peekable();

        while let Some((start, segment)) = segments.next() {
            let trimmed = segment.trim();
            if trimmed.is_empty() {
                continue;
            }
            let start = start + (segment.len() - segment.trim_start().len());
            let end = start + trimmed.len();

            if trimmed.chars().any(char::is_alphanumeric) {
                self.push_word(&mut tokens, trimmed, start, end);
            } else if let Some(merged_end) = self.merge_clitic(trimmed, end, &mut segments) {
                let body = &text[end..merged_end];
                let position = tokens.len();
                tokens.push(
                    Token::with_offsets(format!("'{body}"), position, start, merged_end)
                        .with_token_type(TokenType::Clitic),
                );
            } else {
                let position = tokens.len();
                tokens.push(
                    Token::with_offsets(trimmed, position, start, end)
                        .with_token_type(TokenType::Punctuation),
                );
            }
        }

        tokens
    }

    /// If `segment` is a bare apostrophe directly followed by a clitic body,
    /// consume the body and return its end offset.
    fn merge_clitic(
        &self,
        segment: &str,
        end: usize,
        segments: &mut Peekable<UWordBoundIndices<'_>>,
    ) -> Option<usize> {
        let mut chars = segment.chars();
        let is_apostrophe = matches!((chars.next(), chars.next()), (Some(c), None) if APOSTROPHES.contains(&c));
        if !is_apostrophe {
            return None;
        }

        match segments.peek() {
            Some(&(next_start, next)) if next_start == end && self.resource.is_clitic_body(next) => {
                segments.next();
                Some(next_start + next.len())
            }
            _ => None,
        }
    }

    /// Push a word segment, splitting trailing clitics off it.
    fn push_word(&self, tokens: &mut Vec<Token>, word: &str, start: usize, end: usize) {
        let canonical = word.replace(APOSTROPHES[1], "'");
        // Offsets can only be mapped piecewise when the canonical form kept
        // the byte layout of the original.
        let exact = canonical.len() == word.len();

        let mut stem = canonical.as_str();
        let mut clitics = Vec::new();
        while let Some(clitic) = self
            .resource
            .clitics()
            .iter()
            .find(|c| stem.len() > c.len() && stem.ends_with(c.as_str()))
        {
            stem = &stem[..stem.len() - clitic.len()];
            clitics.push(clitic.as_str());
        }

        let stem_end = if exact { start + stem.len() } else { end };
        // A peeled stem can end in a separator that no longer sits between
        // two letters (`ab'` from `ab'n't`). Segment it again so the output
        // matches what a second pass produces.
        let pieces: Vec<(usize, &str)> = stem.split_word_bound_indices().collect();
        if clitics.is_empty() || pieces.len() < 2 {
            let position = tokens.len();
            tokens.push(
                Token::with_offsets(stem, position, start, stem_end)
                    .with_token_type(Self::detect_token_type(stem)),
            );
        } else {
            for (offset, piece) in pieces {
                let (piece_start, piece_end) = if exact {
                    (start + offset, start + offset + piece.len())
                } else {
                    (start, end)
                };
                if piece.chars().any(char::is_alphanumeric) {
                    self.push_word(tokens, piece, piece_start, piece_end);
                } else {
                    let position = tokens.len();
                    tokens.push(
                        Token::with_offsets(piece, position, piece_start, piece_end)
                            .with_token_type(TokenType::Punctuation),
                    );
                }
            }
        }

        let mut offset = stem_end;
        for clitic in clitics.into_iter().rev() {
            let (clitic_start, clitic_end) = if exact {
                (offset, offset + clitic.len())
            } else {
                (start, end)
            };
            offset = clitic_end;
            let position = tokens.len();
            tokens.push(
                Token::with_offsets(clitic, position, clitic_start, clitic_end)
                    .with_token_type(TokenType::Clitic),
            );
        }
    }

    /// Numeric when every character is a digit or a number separator.
    fn detect_token_type(word: &str) -> TokenType {
        let numeric = word.chars().any(char::is_numeric)
            && word
                .chars()
                .all(|c| c.is_numeric() || matches!(c, '.' | ',' | '\''));
        if numeric {
            TokenType::Num
        } else {
            TokenType::Word
        }
    }
}

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        Ok(Box::new(self.split(text).into_iter()))
    }

    fn name(&self) -> &'static str {
        "word"
    }
}
