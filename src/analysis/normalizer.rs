//! Utterance normalization.
//!
//! [`Normalizer::normalize`] turns raw text into the canonical form every
//! other component works on: the text is lower-cased, cut into tokens by the
//! [`WordTokenizer`] and re-joined with single ASCII spaces.
//!
//! ```
//! use chatterbox::analysis::normalizer::Normalizer;
//!
//! let normalizer = Normalizer::new(None).unwrap();
//! assert_eq!(normalizer.normalize("  Hi!  How's it GOING? "), "hi ! how 's it going ?");
//! ```
//!
//! Normalization is total and idempotent: normalizing already normalized
//! text returns it unchanged.

use std::path::Path;
use std::sync::Arc;

use rayon::prelude::*;

use crate::analysis::resource::TokenizerResource;
use crate::analysis::token::Token;
use crate::analysis::tokenizer::WordTokenizer;
use crate::error::Result;

/// Lower-cases, tokenizes and re-joins text.
#[derive(Clone, Debug)]
pub struct Normalizer {
    tokenizer: WordTokenizer,
}

impl Normalizer {
    /// Build a normalizer, resolving the tokenizer resource from
    /// `resource_dir` (or the built-in rules when `None`).
    pub fn new(resource_dir: Option<&Path>) -> Result<Self> {
        let resource = TokenizerResource::resolve(resource_dir)?;
        Ok(Self::with_resource(Arc::new(resource)))
    }

    /// Build a normalizer from an already resolved resource.
    pub fn with_resource(resource: Arc<TokenizerResource>) -> Self {
        Normalizer {
            tokenizer: WordTokenizer::new(resource),
        }
    }

    /// Normalize one text.
    pub fn normalize(&self, text: &str) -> String {
        self.tokens(text)
            .into_iter()
            .map(|token| token.text)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Normalize a batch of texts in parallel, preserving order.
    pub fn normalize_batch<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Vec<String> {
        texts
            .par_iter()
            .map(|text| self.normalize(text.as_ref()))
            .collect()
    }

    /// The tokens of the lower-cased text. Offsets refer to the lower-cased
    /// text.
    pub fn tokens(&self, text: &str) -> Vec<Token> {
        self.tokenizer.split(&text.to_lowercase())
    }
}
