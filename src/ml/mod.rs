//! Machine learning components of the responder.
//!
//! - [`TfIdfVectorizer`]: maps normalized text to unit-length TF-IDF vectors
//! - [`MultinomialNaiveBayes`]: maps those vectors to answer labels
//! - [`SparseVector`]: the feature representation shared by both
//!
//! This layer reports errors through `anyhow`; the variants it raises are
//! [`ChatterboxError`](crate::error::ChatterboxError) values and are recovered
//! as such when converted back at the crate boundary.

pub mod naive_bayes;
pub mod tfidf;
pub mod vector;

pub use naive_bayes::{MultinomialNaiveBayes, NaiveBayesConfig};
pub use tfidf::{TfIdfVectorizer, VectorizerConfig};
pub use vector::SparseVector;
