//! # Chatterbox
//!
//! A retrieval-style chatbot: given a free-text utterance it returns the
//! best-matching canned answer from a question/answer corpus.
//!
//! ## Pipeline
//!
//! - [`analysis`]: lower-casing and word tokenization with clitic splitting
//! - [`ml`]: TF-IDF vectorization and multinomial naive Bayes
//! - [`responder`]: training, the total `get_response` boundary and evaluation
//! - [`session`] and [`server`]: chat transcripts and a line-oriented TCP service
//!
//! ```
//! use chatterbox::config::ResponderConfig;
//! use chatterbox::corpus::Corpus;
//! use chatterbox::responder::Responder;
//!
//! let corpus = Corpus::from_pairs([("hi", "hello there"), ("bye", "goodbye")]);
//! let responder = Responder::train(&corpus, &ResponderConfig::default()).unwrap();
//! assert_eq!(responder.get_response("Bye!"), "goodbye");
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod ml;
pub mod responder;
pub mod server;
pub mod session;

pub mod prelude {
    pub use crate::config::{AppConfig, ResponderConfig};
    pub use crate::corpus::{Corpus, CorpusEntry};
    pub use crate::error::{ChatterboxError, Result};
    pub use crate::responder::{Responder, initialize};
    pub use crate::session::ChatSession;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
