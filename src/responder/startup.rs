//! Process start-up: resource resolution, corpus loading and training.

use std::sync::Arc;
use std::time::Instant;

use log::info;

use crate::analysis::normalizer::Normalizer;
use crate::config::AppConfig;
use crate::corpus::Corpus;
use crate::error::Result;

use super::model::Responder;

/// Build the shared responder for a process.
///
/// Resolves the tokenizer resource, loads the corpus and trains on all of
/// it. Must complete before any utterance is answered; every failure here is
/// a start-up error.
pub fn initialize(config: &AppConfig) -> Result<Arc<Responder>> {
    config.validate()?;
    let start = Instant::now();

    let normalizer = Normalizer::new(config.resource_dir.as_deref())?;
    let corpus = Corpus::from_csv_path(&config.corpus_path)?;
    let responder = Responder::train_with_normalizer(&corpus, normalizer, &config.responder)?;

    info!(
        "Responder ready in {:.1?} ({} examples from {})",
        start.elapsed(),
        corpus.len(),
        config.corpus_path.display()
    );
    Ok(Arc::new(responder))
}
