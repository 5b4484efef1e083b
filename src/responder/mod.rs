//! Question/answer responder built on TF-IDF features and multinomial naive
//! Bayes.
//!
//! # Architecture
//!
//! - [`initialize`]: one-shot start-up step returning a shared [`Responder`]
//! - [`Responder`]: trained model with a total [`Responder::get_response`]
//! - [`evaluate`]: seeded hold-out accuracy for offline measurement
//!
//! # Example
//!
//! ```
//! use chatterbox::config::ResponderConfig;
//! use chatterbox::corpus::Corpus;
//! use chatterbox::responder::Responder;
//!
//! # fn main() -> chatterbox::error::Result<()> {
//! let corpus = Corpus::from_pairs([
//!     ("hi", "hello there"),
//!     ("hi there", "hello there"),
//!     ("bye", "goodbye"),
//!     ("see you", "goodbye"),
//! ]);
//! let responder = Responder::train(&corpus, &ResponderConfig::default())?;
//!
//! assert_eq!(responder.get_response("Hi!"), "hello there");
//! assert_eq!(responder.get_response("BYE"), "goodbye");
//! # Ok(())
//! # }
//! ```

mod evaluation;
mod model;
mod startup;

// Public exports
pub use evaluation::{Evaluation, evaluate, evaluate_with_normalizer};
pub use model::{ModelStats, Responder};
pub use startup::initialize;
