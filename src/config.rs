//! Configuration for Chatterbox.
//!
//! Every setting has a default, so an empty JSON object is a valid
//! configuration file. Command line flags and environment variables override
//! the file (see [`crate::cli::args`]).
//!
//! # Examples
//!
//! ```
//! use chatterbox::config::AppConfig;
//!
//! let config: AppConfig = serde_json::from_str(r#"{
//!     "corpus_path": "faq.csv",
//!     "responder": { "vectorizer": { "min_df": 2 } },
//!     "server": { "port": 9000 }
//! }"#).unwrap();
//!
//! assert_eq!(config.responder.vectorizer.min_df, 2);
//! assert_eq!(config.responder.vectorizer.ngram_range, (1, 2));
//! assert_eq!(config.server.port, 9000);
//! assert_eq!(config.server.bind, "127.0.0.1");
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ChatterboxError, Result};
use crate::ml::{NaiveBayesConfig, VectorizerConfig};

/// Environment variable holding the listen port.
pub const PORT_ENV: &str = "PORT";

/// Environment variable holding the bind address.
pub const BIND_ENV: &str = "CHATTERBOX_BIND";

/// Environment variable holding the corpus path.
pub const CORPUS_ENV: &str = "CHATTERBOX_CORPUS";

/// Environment variable holding the tokenizer resource directory.
pub const RESOURCE_DIR_ENV: &str = "CHATTERBOX_DATA";

/// Reply used when an utterance cannot be answered.
pub const DEFAULT_FALLBACK_RESPONSE: &str = "I couldn't understand that";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// CSV corpus with `Question` and `Answer` columns.
    pub corpus_path: PathBuf,
    /// Directory holding the tokenizer resource. Built-in rules when unset.
    pub resource_dir: Option<PathBuf>,
    /// Model settings.
    pub responder: ResponderConfig,
    /// Network settings for `serve`.
    pub server: ServerConfig,
    /// Chat transcript settings.
    pub session: SessionConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            corpus_path: PathBuf::from("chatbot_dataset.csv"),
            resource_dir: None,
            responder: ResponderConfig::default(),
            server: ServerConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load and validate a JSON configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ChatterboxError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: AppConfig = serde_json::from_str(&content).map_err(|e| {
            ChatterboxError::config(format!("malformed {}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section for consistency.
    pub fn validate(&self) -> Result<()> {
        self.responder.validate()?;
        if self.session.capacity < 2 {
            return Err(ChatterboxError::config(
                "session capacity must hold at least one exchange (2 turns)",
            ));
        }
        Ok(())
    }
}

/// Settings for training and answering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponderConfig {
    /// TF-IDF settings.
    pub vectorizer: VectorizerConfig,
    /// Classifier settings.
    pub naive_bayes: NaiveBayesConfig,
    /// Reply returned when an utterance cannot be answered.
    pub fallback_response: String,
    /// Fraction of the corpus held out by `evaluate`.
    pub test_size: f64,
    /// Seed of the hold-out shuffle.
    pub seed: u64,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            vectorizer: VectorizerConfig::default(),
            naive_bayes: NaiveBayesConfig::default(),
            fallback_response: DEFAULT_FALLBACK_RESPONSE.to_string(),
            test_size: 0.2,
            seed: 42,
        }
    }
}

impl ResponderConfig {
    /// Check the settings for consistency.
    pub fn validate(&self) -> Result<()> {
        self.vectorizer.validate()?;
        self.naive_bayes.validate()?;
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(ChatterboxError::config(format!(
                "test_size must be in (0, 1), got {}",
                self.test_size
            )));
        }
        Ok(())
    }
}

/// Network settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    pub bind: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 8050,
        }
    }
}

impl ServerConfig {
    /// `bind:port` as a socket address string.
    pub fn address(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

/// Chat transcript settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum number of turns kept per session.
    pub capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { capacity: 200 }
    }
}
