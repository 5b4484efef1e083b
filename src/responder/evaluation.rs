//! Offline quality measurement on a seeded hold-out split.

use std::collections::BTreeSet;

use log::info;
use serde::Serialize;

use crate::analysis::normalizer::Normalizer;
use crate::config::ResponderConfig;
use crate::corpus::Corpus;
use crate::error::Result;

use super::model::Responder;

/// Hold-out accuracy of a responder trained on the rest of the corpus.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// Examples used for training.
    pub train_size: usize,
    /// Examples held out.
    pub test_size: usize,
    /// Held-out examples answered with their own answer.
    pub correct: usize,
    /// `correct / test_size`.
    pub accuracy: f64,
    /// Held-out answers that never occur in the training split.
    pub unseen_labels: Vec<String>,
}

/// Split `corpus` with `config.test_size` and `config.seed`, train on the
/// training side and score the held-out side.
pub fn evaluate(corpus: &Corpus, config: &ResponderConfig) -> Result<Evaluation> {
    evaluate_with_normalizer(corpus, Normalizer::new(None)?, config)
}

/// Like [`evaluate`] with an explicit normalizer.
pub fn evaluate_with_normalizer(
    corpus: &Corpus,
    normalizer: Normalizer,
    config: &ResponderConfig,
) -> Result<Evaluation> {
    let (train, test) = corpus.train_test_split(config.test_size, config.seed)?;
    let responder = Responder::train_with_normalizer(&train, normalizer, config)?;

    let mut correct = 0;
    for entry in test.entries() {
        if responder.respond(&entry.question)? == entry.answer {
            correct += 1;
        }
    }

    let known: BTreeSet<&str> = train.labels().into_iter().collect();
    let unseen_labels = test
        .labels()
        .into_iter()
        .filter(|label| !known.contains(label))
        .map(str::to_string)
        .collect();

    let evaluation = Evaluation {
        train_size: train.len(),
        test_size: test.len(),
        correct,
        accuracy: correct as f64 / test.len() as f64,
        unseen_labels,
    };
    info!(
        "Hold-out accuracy {:.3} ({}/{})",
        evaluation.accuracy, evaluation.correct, evaluation.test_size
    );
    Ok(evaluation)
}
