//! TF-IDF vectorizer for text feature extraction.
//!
//! Terms are the word n-grams of a normalized text: the
//! [`RegexTokenizer`] extracts runs of two or more word characters and
//! contiguous windows of those are joined with a single space. With the
//! default `(1, 2)` range, `"see you soon"` yields the terms `see`, `you`,
//! `soon`, `see you` and `you soon`.
//!
//! Weights use smoothed inverse document frequency
//! `ln((1 + n) / (1 + df)) + 1` on raw term counts, and every vector is scaled
//! to unit Euclidean length.

use std::collections::BTreeSet;
use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use anyhow::Result;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::{RegexTokenizer, Tokenizer};
use crate::error::ChatterboxError;
use crate::ml::vector::SparseVector;

/// Longest n-gram a vectorizer may be configured with.
pub const MAX_NGRAM: usize = 8;

/// Vectorizer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerConfig {
    /// Smallest and largest n-gram length, inclusive.
    pub ngram_range: (usize, usize),
    /// Terms must occur in at least this many documents.
    pub min_df: usize,
    /// Terms occurring in more than this fraction of documents are dropped.
    pub max_df: f64,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            ngram_range: (1, 2),
            min_df: 1,
            max_df: 1.0,
        }
    }
}

impl VectorizerConfig {
    /// Check the settings for consistency.
    pub fn validate(&self) -> crate::error::Result<()> {
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ChatterboxError::config(format!(
                "invalid ngram_range ({min_n}, {max_n})"
            )));
        }
        if max_n > MAX_NGRAM {
            return Err(ChatterboxError::config(format!(
                "ngram_range upper bound {max_n} exceeds {MAX_NGRAM}"
            )));
        }
        if self.min_df == 0 {
            return Err(ChatterboxError::config("min_df must be at least 1"));
        }
        if !(self.max_df > 0.0 && self.max_df <= 1.0) {
            return Err(ChatterboxError::config(format!(
                "max_df must be in (0, 1], got {}",
                self.max_df
            )));
        }
        Ok(())
    }
}

/// TF-IDF vectorizer for text feature extraction.
pub struct TfIdfVectorizer {
    /// Settings used for fitting.
    config: VectorizerConfig,
    /// Vocabulary: term -> index mapping.
    vocabulary: AHashMap<String, usize>,
    /// Terms in index order.
    terms: Vec<String>,
    /// Inverse document frequency for each term.
    idf: Vec<f64>,
    /// Total number of documents seen during training.
    n_documents: usize,
    /// Term extractor.
    tokenizer: Arc<dyn Tokenizer>,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("n_documents", &self.n_documents)
            .field("ngram_range", &self.config.ngram_range)
            .field("tokenizer", &self.tokenizer.name())
            .finish()
    }
}

impl TfIdfVectorizer {
    /// Create an unfitted vectorizer using the default term pattern.
    pub fn new(config: VectorizerConfig) -> Result<Self> {
        let tokenizer: Arc<dyn Tokenizer> = Arc::new(RegexTokenizer::new()?);
        Ok(Self::with_tokenizer(config, tokenizer))
    }

    /// Create an unfitted vectorizer with a custom term extractor.
    pub fn with_tokenizer(config: VectorizerConfig, tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self {
            config,
            vocabulary: AHashMap::new(),
            terms: Vec::new(),
            idf: Vec::new(),
            n_documents: 0,
            tokenizer,
        }
    }

    /// Fit the vectorizer on training documents.
    ///
    /// Fails if pruning by document frequency leaves no terms.
    pub fn fit<S: AsRef<str> + Sync>(&mut self, documents: &[S]) -> Result<()> {
        self.config.validate()?;

        let analyzed: Vec<Vec<String>> = documents
            .par_iter()
            .map(|doc| self.analyze(doc.as_ref()))
            .collect::<Result<_>>()?;

        // Count document frequencies
        let mut document_frequency: AHashMap<&str, usize> = AHashMap::new();
        for terms in &analyzed {
            let unique: AHashSet<&str> = terms.iter().map(String::as_str).collect();
            for term in unique {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let n = documents.len();
        let max_df = self.config.max_df * n as f64;
        let kept: BTreeSet<&str> = document_frequency
            .iter()
            .filter(|&(_, &df)| df >= self.config.min_df && df as f64 <= max_df)
            .map(|(&term, _)| term)
            .collect();

        if kept.is_empty() {
            return Err(ChatterboxError::training_data(format!(
                "no terms remain after pruning {} documents (min_df={}, max_df={})",
                n, self.config.min_df, self.config.max_df
            ))
            .into());
        }

        // Indices follow lexicographic term order
        let terms: Vec<String> = kept.into_iter().map(str::to_string).collect();
        let vocabulary: AHashMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();

        let idf = terms
            .iter()
            .map(|term| {
                let df = document_frequency.get(term.as_str()).copied().unwrap_or(0);
                // IDF = log((N + 1) / (df + 1)) + 1
                ((n as f64 + 1.0) / (df as f64 + 1.0)).ln() + 1.0
            })
            .collect();

        self.n_documents = n;
        self.vocabulary = vocabulary;
        self.terms = terms;
        self.idf = idf;

        Ok(())
    }

    /// Transform a document into a unit-length TF-IDF vector.
    ///
    /// Terms outside the vocabulary are ignored.
    pub fn transform(&self, document: &str) -> Result<SparseVector> {
        let mut counts: AHashMap<usize, f64> = AHashMap::new();
        for term in self.analyze(document)? {
            if let Some(&idx) = self.vocabulary.get(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let weights = counts
            .into_iter()
            .map(|(idx, count)| (idx, count * self.idf[idx]))
            .collect();

        Ok(SparseVector::new(weights).l2_normalized())
    }

    /// Transform many documents in parallel, preserving order.
    pub fn transform_batch<S: AsRef<str> + Sync>(&self, documents: &[S]) -> Result<Vec<SparseVector>> {
        documents
            .par_iter()
            .map(|doc| self.transform(doc.as_ref()))
            .collect()
    }

    /// Extract the n-gram terms of a document.
    pub fn analyze(&self, document: &str) -> Result<Vec<String>> {
        let words: Vec<String> = self.tokenizer.tokenize(document)?.map(|t| t.text).collect();
        let (min_n, max_n) = self.config.ngram_range;

        let mut terms = Vec::new();
        for n in min_n..=max_n.min(words.len()) {
            terms.extend(words.windows(n).map(|window| window.join(" ")));
        }
        Ok(terms)
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Number of documents the vectorizer was fitted on.
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    /// Index of a term, if it is in the vocabulary.
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// IDF weight of a term, if it is in the vocabulary.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.term_index(term).map(|idx| self.idf[idx])
    }

    /// Vocabulary terms in index order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Settings used for fitting.
    pub fn config(&self) -> &VectorizerConfig {
        &self.config
    }
}
