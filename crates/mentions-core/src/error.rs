//! Error types for corpus ingestion and configuration loading.
//!
//! The index itself is infallible; only the filesystem-facing layers return
//! these.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure while walking or reading a corpus directory.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("corpus root {} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to read page {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failure while loading a `mentions.toml` file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
