//! Tokenizers.
//!
//! [`WordTokenizer`] produces the normalized token stream of an utterance and
//! [`RegexTokenizer`] picks vectorizer terms out of normalized text.

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Splits text into tokens.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Short name shown in debug output.
    fn name(&self) -> &'static str;
}

pub mod regex;
pub mod word;

pub use regex::RegexTokenizer;
pub use word::WordTokenizer;
