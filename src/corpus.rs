//! Question/answer corpus.
//!
//! A corpus is read from a CSV file whose header names a `Question` and an
//! `Answer` column, one example per row:
//!
//! ```csv
//! Question,Answer
//! hi,hello there
//! "how are you?","I'm fine, thanks"
//! ```
//!
//! Extra columns are ignored. Answers are opaque labels and are compared
//! exactly, so `Goodbye` and `goodbye` are two different answers.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::{ChatterboxError, Result};

/// Name of the question column.
pub const QUESTION_COLUMN: &str = "Question";

/// Name of the answer column.
pub const ANSWER_COLUMN: &str = "Answer";

/// A single training example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusEntry {
    /// Question text.
    #[serde(rename = "Question")]
    pub question: String,
    /// Answer text, used verbatim as the class label.
    #[serde(rename = "Answer")]
    pub answer: String,
}

impl CorpusEntry {
    /// Create a new entry.
    pub fn new<Q: Into<String>, A: Into<String>>(question: Q, answer: A) -> Self {
        CorpusEntry {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// An ordered collection of question/answer pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    entries: Vec<CorpusEntry>,
}

impl Corpus {
    /// Create a corpus from entries.
    pub fn new(entries: Vec<CorpusEntry>) -> Self {
        Corpus { entries }
    }

    /// Create a corpus from `(question, answer)` pairs.
    pub fn from_pairs<Q, A, I>(pairs: I) -> Self
    where
        Q: Into<String>,
        A: Into<String>,
        I: IntoIterator<Item = (Q, A)>,
    {
        Corpus::new(
            pairs
                .into_iter()
                .map(|(question, answer)| CorpusEntry::new(question, answer))
                .collect(),
        )
    }

    /// Load a corpus from a CSV file.
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            ChatterboxError::corpus_load(format!("cannot open {}: {e}", path.display()))
        })?;
        let corpus = Self::from_reader(file)?;
        debug!("Loaded {} examples from {}", corpus.len(), path.display());
        Ok(corpus)
    }

    /// Load a corpus from any CSV source.
    ///
    /// Fails with a corpus load error if the source is empty, malformed or
    /// lacks one of the required columns, and with a training data error if
    /// it holds no rows or a row has a blank answer. Only header names are
    /// trimmed; answers are kept byte for byte.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| ChatterboxError::corpus_load(format!("cannot read CSV header: {e}")))?
            .clone();
        if headers.iter().all(str::is_empty) {
            return Err(ChatterboxError::corpus_load("corpus source is empty"));
        }
        for column in [QUESTION_COLUMN, ANSWER_COLUMN] {
            if !headers.iter().any(|h| h == column) {
                return Err(ChatterboxError::corpus_load(format!(
                    "missing column `{column}`"
                )));
            }
        }

        let mut entries = Vec::new();
        for (index, record) in reader.deserialize::<CorpusEntry>().enumerate() {
            // Header is line 1.
            let line = index + 2;
            let entry = record.map_err(|e| {
                ChatterboxError::corpus_load(format!("malformed row at line {line}: {e}"))
            })?;
            if entry.answer.trim().is_empty() {
                return Err(ChatterboxError::training_data(format!(
                    "empty answer at line {line}"
                )));
            }
            entries.push(entry);
        }

        if entries.is_empty() {
            return Err(ChatterboxError::training_data("corpus has no rows"));
        }

        Ok(Corpus::new(entries))
    }

    /// Number of examples.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the corpus holds no examples.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The examples in corpus order.
    pub fn entries(&self) -> &[CorpusEntry] {
        &self.entries
    }

    /// Distinct answers in sorted order.
    pub fn labels(&self) -> Vec<&str> {
        self.label_support().into_keys().collect()
    }

    /// Number of examples per answer, sorted by answer.
    pub fn label_support(&self) -> BTreeMap<&str, usize> {
        let mut support = BTreeMap::new();
        for entry in &self.entries {
            *support.entry(entry.answer.as_str()).or_insert(0) += 1;
        }
        support
    }

    /// Shuffle with a seeded generator and hold out `ceil(test_size * len)`
    /// examples. Returns `(train, test)`.
    pub fn train_test_split(&self, test_size: f64, seed: u64) -> Result<(Corpus, Corpus)> {
        if !(test_size > 0.0 && test_size < 1.0) {
            return Err(ChatterboxError::config(format!(
                "test_size must be in (0, 1), got {test_size}"
            )));
        }

        let n_test = (test_size * self.len() as f64).ceil() as usize;
        let n_train = self.len().saturating_sub(n_test);
        if n_test == 0 || n_train == 0 {
            return Err(ChatterboxError::training_data(format!(
                "cannot split {} examples with test_size {test_size}",
                self.len()
            )));
        }

        let mut indices: Vec<usize> = (0..self.len()).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        let pick = |range: &[usize]| {
            Corpus::new(range.iter().map(|&i| self.entries[i].clone()).collect())
        };
        let (test, train) = indices.split_at(n_test);
        Ok((pick(train), pick(test)))
    }
}

impl FromIterator<CorpusEntry> for Corpus {
    fn from_iter<I: IntoIterator<Item = CorpusEntry>>(iter: I) -> Self {
        Corpus::new(iter.into_iter().collect())
    }
}
