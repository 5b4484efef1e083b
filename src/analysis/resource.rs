//! Tokenizer language resource.
//!
//! The word tokenizer needs a small amount of language data: the list of
//! English clitics that are split off the word they are attached to
//! (`don't` → `do n't`). The data ships compiled into the binary and can be
//! overridden by a `tokenizer.json` file in a resource directory.
//!
//! Resolution happens once at startup:
//!
//! - without a directory the built-in rules are used;
//! - with a directory, a missing `tokenizer.json` is installed there from the
//!   built-in rules (an idempotent one-time setup step) and then loaded, so
//!   operators can edit the installed file.
//!
//! Any failure along the way is a [`ChatterboxError::ResourceUnavailable`].
//!
//! # Examples
//!
//! ```
//! use chatterbox::analysis::resource::TokenizerResource;
//!
//! let resource = TokenizerResource::resolve(None).unwrap();
//! assert!(resource.clitics().iter().any(|c| c == "n't"));
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{ChatterboxError, Result};

/// File name of the resource inside a resource directory.
pub const RESOURCE_FILE_NAME: &str = "tokenizer.json";

/// Current on-disk format version.
pub const RESOURCE_VERSION: u32 = 1;

/// Penn Treebank clitics.
const BUILTIN_CLITICS: &[&str] = &["n't", "'ll", "'re", "'ve", "'s", "'m", "'d"];

/// Language data used by the word tokenizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizerResource {
    /// On-disk format version.
    pub version: u32,
    /// Clitic suffixes, written with an ASCII apostrophe.
    pub clitics: Vec<String>,
}

impl Default for TokenizerResource {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TokenizerResource {
    /// The compiled-in rules.
    pub fn builtin() -> Self {
        let mut resource = TokenizerResource {
            version: RESOURCE_VERSION,
            clitics: BUILTIN_CLITICS.iter().map(|c| c.to_string()).collect(),
        };
        resource.sort_clitics();
        resource
    }

    /// Resolve the resource, installing it into `dir` first if needed.
    pub fn resolve(dir: Option<&Path>) -> Result<Self> {
        let Some(dir) = dir else {
            debug!("Using built-in tokenizer resource");
            return Ok(Self::builtin());
        };

        let path = Self::install(dir)?;
        Self::load(&path)
    }

    /// Write the built-in rules to `dir/tokenizer.json` unless the file exists.
    ///
    /// Returns the path of the resource file. Calling this repeatedly is a
    /// no-op after the first successful call.
    pub fn install(dir: &Path) -> Result<PathBuf> {
        let path = dir.join(RESOURCE_FILE_NAME);
        if path.is_file() {
            debug!("Tokenizer resource already present at {}", path.display());
            return Ok(path);
        }

        fs::create_dir_all(dir).map_err(|e| {
            ChatterboxError::resource_unavailable(format!(
                "cannot create resource directory {}: {e}",
                dir.display()
            ))
        })?;

        let content = serde_json::to_string_pretty(&Self::builtin())?;
        fs::write(&path, content).map_err(|e| {
            ChatterboxError::resource_unavailable(format!(
                "cannot write {}: {e}",
                path.display()
            ))
        })?;

        info!("Installed tokenizer resource at {}", path.display());
        Ok(path)
    }

    /// Load and validate a resource file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ChatterboxError::resource_unavailable(format!("cannot read {}: {e}", path.display()))
        })?;
        let mut resource: TokenizerResource = serde_json::from_str(&content).map_err(|e| {
            ChatterboxError::resource_unavailable(format!("malformed {}: {e}", path.display()))
        })?;

        resource.validate().map_err(|msg| {
            ChatterboxError::resource_unavailable(format!("invalid {}: {msg}", path.display()))
        })?;
        resource.sort_clitics();

        debug!(
            "Loaded tokenizer resource from {} ({} clitics)",
            path.display(),
            resource.clitics.len()
        );
        Ok(resource)
    }

    /// Clitic suffixes, longest first.
    pub fn clitics(&self) -> &[String] {
        &self.clitics
    }

    /// Whether `word` is the part of a clitic that follows its apostrophe
    /// (`s` for `'s`, `ll` for `'ll`).
    pub fn is_clitic_body(&self, word: &str) -> bool {
        self.clitics
            .iter()
            .any(|c| c.strip_prefix('\'') == Some(word))
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if self.version != RESOURCE_VERSION {
            return Err(format!(
                "unsupported version {} (expected {RESOURCE_VERSION})",
                self.version
            ));
        }
        if self.clitics.is_empty() {
            return Err("clitic list is empty".to_string());
        }
        if let Some(bad) = self
            .clitics
            .iter()
            .find(|c| !c.contains('\'') || c.chars().any(char::is_whitespace))
        {
            return Err(format!("clitic `{bad}` must contain an apostrophe and no whitespace"));
        }
        Ok(())
    }

    fn sort_clitics(&mut self) {
        self.clitics
            .sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        self.clitics.dedup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_is_sorted_longest_first() {
        let resource = TokenizerResource::builtin();
        let lengths: Vec<usize> = resource.clitics().iter().map(|c| c.len()).collect();
        assert!(lengths.windows(2).all(|w| w[0] >= w[1]));
        assert!(resource.is_clitic_body("s"));
        assert!(resource.is_clitic_body("ll"));
        assert!(!resource.is_clitic_body("t"));
    }

    #[test]
    fn test_resolve_installs_once() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("nltk_data");

        let first = TokenizerResource::resolve(Some(&dir)).unwrap();
        assert!(dir.join(RESOURCE_FILE_NAME).is_file());

        // A second resolve reads the installed file instead of rewriting it.
        let second = TokenizerResource::resolve(Some(&dir)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_installed_file_is_not_overwritten() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(RESOURCE_FILE_NAME);
        fs::write(&path, r#"{"version": 1, "clitics": ["'s"]}"#).unwrap();

        let resource = TokenizerResource::resolve(Some(temp_dir.path())).unwrap();
        assert_eq!(resource.clitics(), ["'s".to_string()]);
    }

    #[test]
    fn test_malformed_resource_is_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(RESOURCE_FILE_NAME), "not json").unwrap();

        let err = TokenizerResource::resolve(Some(temp_dir.path())).unwrap_err();
        assert!(matches!(err, ChatterboxError::ResourceUnavailable(_)));
    }

    #[test]
    fn test_invalid_clitic_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(RESOURCE_FILE_NAME),
            r#"{"version": 1, "clitics": ["nt"]}"#,
        )
        .unwrap();

        let err = TokenizerResource::resolve(Some(temp_dir.path())).unwrap_err();
        assert!(err.to_string().contains("must contain an apostrophe"));
    }

    #[test]
    fn test_unwritable_directory_is_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("file");
        fs::write(&blocker, "x").unwrap();

        // A regular file where the directory should be.
        let err = TokenizerResource::resolve(Some(&blocker.join("data"))).unwrap_err();
        assert!(matches!(err, ChatterboxError::ResourceUnavailable(_)));
    }
}
