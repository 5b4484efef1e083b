//! The trained responder: normalizer, TF-IDF vocabulary and naive Bayes
//! classifier behind a read-only inference API.

use std::panic::{self, AssertUnwindSafe};

use log::{debug, error, info, warn};
use serde::Serialize;

use crate::analysis::normalizer::Normalizer;
use crate::config::ResponderConfig;
use crate::corpus::Corpus;
use crate::error::{ChatterboxError, Result};
use crate::ml::{MultinomialNaiveBayes, TfIdfVectorizer};

/// Summary of a trained responder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelStats {
    /// Training examples.
    pub examples: usize,
    /// Distinct answers.
    pub answers: usize,
    /// Answers backed by a single training example.
    pub single_example_answers: usize,
    /// Vocabulary terms.
    pub vocabulary_size: usize,
    /// Smallest and largest n-gram length.
    pub ngram_range: (usize, usize),
    /// Minimum document frequency used for pruning.
    pub min_df: usize,
}

/// A trained question/answer model.
///
/// Built once by [`Responder::train`] and read-only afterwards. The same
/// [`Normalizer`] instance prepares training questions and incoming
/// utterances, so both sides always see identical token streams.
#[derive(Debug)]
pub struct Responder {
    normalizer: Normalizer,
    vectorizer: TfIdfVectorizer,
    classifier: MultinomialNaiveBayes,
    fallback: String,
    examples: usize,
}

impl Responder {
    /// Train on the full corpus with the built-in tokenizer rules.
    pub fn train(corpus: &Corpus, config: &ResponderConfig) -> Result<Self> {
        Self::train_with_normalizer(corpus, Normalizer::new(None)?, config)
    }

    /// Train on the full corpus with the given normalizer.
    pub fn train_with_normalizer(
        corpus: &Corpus,
        normalizer: Normalizer,
        config: &ResponderConfig,
    ) -> Result<Self> {
        config.validate()?;
        if corpus.is_empty() {
            return Err(ChatterboxError::training_data("corpus is empty"));
        }

        let questions: Vec<&str> = corpus.entries().iter().map(|e| e.question.as_str()).collect();
        let labels: Vec<&str> = corpus.entries().iter().map(|e| e.answer.as_str()).collect();
        if labels.iter().any(|label| label.is_empty()) {
            return Err(ChatterboxError::training_data("corpus contains an empty answer"));
        }

        let normalized = normalizer.normalize_batch(&questions);

        let mut vectorizer = TfIdfVectorizer::new(config.vectorizer.clone())?;
        vectorizer.fit(&normalized)?;
        let features = vectorizer.transform_batch(&normalized)?;

        let classifier = MultinomialNaiveBayes::fit(
            &features,
            &labels,
            vectorizer.vocabulary_size(),
            &config.naive_bayes,
        )?;

        let responder = Responder {
            normalizer,
            vectorizer,
            classifier,
            fallback: config.fallback_response.clone(),
            examples: corpus.len(),
        };

        let stats = responder.stats();
        info!(
            "Trained on {} examples: {} answers, {} terms",
            stats.examples, stats.answers, stats.vocabulary_size
        );
        if stats.single_example_answers > 0 {
            info!(
                "{} answers have a single training example and may be predicted unreliably",
                stats.single_example_answers
            );
        }

        Ok(responder)
    }

    /// The best-matching answer for an utterance.
    ///
    /// Unknown words, empty input and punctuation-only input are not errors:
    /// they produce an all-zero vector and the class priors decide.
    pub fn respond(&self, utterance: &str) -> Result<&str> {
        let normalized = self.normalizer.normalize(utterance);
        let features = self.vectorizer.transform(&normalized)?;
        if features.is_zero() {
            debug!("No known terms in {normalized:?}, answering from priors");
        }
        Ok(self.classifier.predict(&features)?)
    }

    /// The best-matching answer, or the fallback reply if prediction fails.
    ///
    /// Never fails and never panics.
    pub fn get_response(&self, text: &str) -> String {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.respond(text).map(str::to_string)
        }));

        match outcome {
            Ok(Ok(answer)) => answer,
            Ok(Err(err)) if err.is_model_defect() => {
                error!("Model defect while answering {text:?}: {err}");
                self.fallback.clone()
            }
            Ok(Err(err)) => {
                warn!("Could not answer {text:?}: {err}");
                self.fallback.clone()
            }
            Err(_) => {
                error!("Panic while answering {text:?}");
                self.fallback.clone()
            }
        }
    }

    /// The normalizer shared by training and inference.
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Known answers in sorted order.
    pub fn labels(&self) -> &[String] {
        self.classifier.classes()
    }

    /// Whether `answer` is one of the known answers.
    pub fn knows(&self, answer: &str) -> bool {
        self.labels()
            .binary_search_by(|label| label.as_str().cmp(answer))
            .is_ok()
    }

    /// Number of vocabulary terms.
    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary_size()
    }

    /// Reply used when an utterance cannot be answered.
    pub fn fallback_response(&self) -> &str {
        &self.fallback
    }

    /// Summary of the trained model.
    pub fn stats(&self) -> ModelStats {
        let config = self.vectorizer.config();
        ModelStats {
            examples: self.examples,
            answers: self.labels().len(),
            single_example_answers: self
                .classifier
                .class_count()
                .iter()
                .filter(|&&count| count == 1)
                .count(),
            vocabulary_size: self.vocabulary_size(),
            ngram_range: config.ngram_range,
            min_df: config.min_df,
        }
    }
}
