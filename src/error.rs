//! Error types for the endpoint census.
//!
//! Nothing in the extraction engine is fatal: a grammar failure degrades to
//! pattern matching and an unreadable file contributes zero endpoints. These
//! variants exist so each layer can say *why* it degraded.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the census library.
#[derive(Debug, Error)]
pub enum CensusError {
    /// The grammar-based extractor could not produce a clean syntax tree.
    /// Recovered by the dispatcher, which falls back to pattern extraction.
    #[error("failed to parse {file}: {reason}")]
    GrammarParse { file: PathBuf, reason: String },

    /// A candidate source file could not be read.
    #[error("cannot read {path}: {source}")]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file exists but is not valid TOML for `CensusConfig`.
    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CensusError>;
