//! Error types for the Chatterbox library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`ChatterboxError`] enum. Errors fall into two families:
//!
//! - startup errors ([`ChatterboxError::ResourceUnavailable`],
//!   [`ChatterboxError::CorpusLoad`], [`ChatterboxError::TrainingData`],
//!   [`ChatterboxError::Config`]) abort process start;
//! - runtime errors ([`ChatterboxError::Inference`],
//!   [`ChatterboxError::InvalidModel`]) concern a single utterance and are
//!   converted into a fallback reply by
//!   [`Responder::get_response`](crate::responder::Responder::get_response).
//!
//! # Examples
//!
//! ```
//! use chatterbox::error::{ChatterboxError, Result};
//!
//! fn load() -> Result<()> {
//!     Err(ChatterboxError::corpus_load("missing column `Answer`"))
//! }
//!
//! let err = load().unwrap_err();
//! assert_eq!(err.to_string(), "Corpus load error: missing column `Answer`");
//! assert!(err.is_startup());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Chatterbox operations.
#[derive(Error, Debug)]
pub enum ChatterboxError {
    /// I/O errors (file operations, sockets, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The tokenizer language resource could not be resolved.
    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),

    /// The corpus source is missing, unreadable or malformed.
    #[error("Corpus load error: {0}")]
    CorpusLoad(String),

    /// The corpus is readable but cannot be trained on.
    #[error("Training data error: {0}")]
    TrainingData(String),

    /// Prediction failed for a single utterance.
    #[error("Inference error: {0}")]
    Inference(String),

    /// The trained model is internally inconsistent.
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    /// Invalid configuration file or values.
    #[error("Configuration error: {0}")]
    Config(String),

    /// CSV decoding errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbling up from the ML layer
    #[error("{0}")]
    Anyhow(anyhow::Error),
}

impl From<anyhow::Error> for ChatterboxError {
    /// Recovers the original variant when the ML layer wrapped one of ours.
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<ChatterboxError>() {
            Ok(inner) => inner,
            Err(err) => ChatterboxError::Anyhow(err),
        }
    }
}

/// Result type alias for operations that may fail with ChatterboxError.
pub type Result<T> = std::result::Result<T, ChatterboxError>;

impl ChatterboxError {
    /// Create a new resource unavailable error.
    pub fn resource_unavailable<S: Into<String>>(msg: S) -> Self {
        ChatterboxError::ResourceUnavailable(msg.into())
    }

    /// Create a new corpus load error.
    pub fn corpus_load<S: Into<String>>(msg: S) -> Self {
        ChatterboxError::CorpusLoad(msg.into())
    }

    /// Create a new training data error.
    pub fn training_data<S: Into<String>>(msg: S) -> Self {
        ChatterboxError::TrainingData(msg.into())
    }

    /// Create a new inference error.
    pub fn inference<S: Into<String>>(msg: S) -> Self {
        ChatterboxError::Inference(msg.into())
    }

    /// Create a new invalid model error.
    pub fn invalid_model<S: Into<String>>(msg: S) -> Self {
        ChatterboxError::InvalidModel(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        ChatterboxError::Config(msg.into())
    }

    /// Whether this error belongs to the load-time family that must abort
    /// process start.
    pub fn is_startup(&self) -> bool {
        matches!(
            self,
            ChatterboxError::ResourceUnavailable(_)
                | ChatterboxError::CorpusLoad(_)
                | ChatterboxError::TrainingData(_)
                | ChatterboxError::Config(_)
                | ChatterboxError::Csv(_)
        )
    }

    /// Whether this error signals a defect in the model rather than a
    /// problem with one utterance.
    pub fn is_model_defect(&self) -> bool {
        matches!(self, ChatterboxError::InvalidModel(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = ChatterboxError::resource_unavailable("tokenizer.json");
        assert_eq!(error.to_string(), "Resource unavailable: tokenizer.json");

        let error = ChatterboxError::training_data("corpus is empty");
        assert_eq!(error.to_string(), "Training data error: corpus is empty");

        let error = ChatterboxError::inference("non-finite score");
        assert_eq!(error.to_string(), "Inference error: non-finite score");
    }

    #[test]
    fn test_startup_classification() {
        assert!(ChatterboxError::corpus_load("x").is_startup());
        assert!(ChatterboxError::config("x").is_startup());
        assert!(!ChatterboxError::inference("x").is_startup());
        assert!(!ChatterboxError::invalid_model("x").is_startup());
    }

    #[test]
    fn test_anyhow_round_trip_keeps_variant() {
        let wrapped: ChatterboxError =
            anyhow::Error::new(ChatterboxError::invalid_model("feature index 9 out of range")).into();
        assert!(wrapped.is_model_defect());
        assert!(!ChatterboxError::inference("nan").is_model_defect());

        let foreign: ChatterboxError = anyhow::anyhow!("solver diverged").into();
        assert!(matches!(foreign, ChatterboxError::Anyhow(_)));
        assert_eq!(foreign.to_string(), "solver diverged");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = ChatterboxError::from(io_error);

        match error {
            ChatterboxError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
