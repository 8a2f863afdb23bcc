//! Corpus configuration, read from `mentions.toml` at the corpus root.

use crate::error::ConfigError;
use crate::extract::MIN_MENTION_LEN;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name looked up in the corpus root by [`CorpusConfig::load`].
pub const CONFIG_FILE_NAME: &str = "mentions.toml";

fn default_extensions() -> Vec<String> {
    vec!["md".to_string()]
}

fn default_min_mention_len() -> usize {
    MIN_MENTION_LEN
}

fn default_true_val() -> bool {
    true
}

/// Which files make up the corpus and how mentions are extracted from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// File extensions (without the dot) treated as pages
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Shortest bold span, in characters, that counts as a mention
    #[serde(default = "default_min_mention_len")]
    pub min_mention_len: usize,
    /// Skip files matched by `.gitignore` and friends
    #[serde(default = "default_true_val")]
    pub respect_gitignore: bool,
    /// Walk hidden files and directories
    #[serde(default)]
    pub include_hidden: bool,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            min_mention_len: MIN_MENTION_LEN,
            respect_gitignore: true,
            include_hidden: false,
        }
    }
}

impl CorpusConfig {
    /// Load `<root>/mentions.toml`, falling back to defaults when the file is
    /// missing or malformed.
    pub fn load(root: &Path) -> Self {
        let path = root.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            return Self::default();
        }
        Self::load_file(&path).unwrap_or_else(|e| {
            log::warn!("{e}; using default corpus config");
            Self::default()
        })
    }

    /// Load a config file strictly, reporting read and parse failures.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Whether `path` has one of the configured page extensions.
    pub fn is_page(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    /// Get a config field value by name.
    pub fn get_field(&self, path: &str) -> Option<String> {
        match path {
            "extensions" => Some(self.extensions.join(",")),
            "min_mention_len" => Some(self.min_mention_len.to_string()),
            "respect_gitignore" => Some(self.respect_gitignore.to_string()),
            "include_hidden" => Some(self.include_hidden.to_string()),
            _ => None,
        }
    }

    /// List all inspectable config field names.
    pub fn list_fields() -> &'static [&'static str] {
        &[
            "extensions",
            "min_mention_len",
            "respect_gitignore",
            "include_hidden",
        ]
    }
}
