//! Text analysis for Chatterbox.
//!
//! This module turns raw utterances into the canonical token form used for
//! both training and inference: tokenizers, the tokenizer language resource
//! and the [`Normalizer`] built on top of them.

pub mod normalizer;
pub mod resource;
pub mod token;
pub mod tokenizer;

// Re-export commonly used types
pub use normalizer::Normalizer;
pub use resource::TokenizerResource;
pub use token::*;
pub use tokenizer::*;
