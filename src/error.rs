//! Error type shared by configuration loading, pattern building, and linting.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VlintError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid source-file extension pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("invalid document pattern '{pattern}': {message}")]
    Glob { pattern: String, message: String },

    #[error("no documents to lint (pass files or set `documents` in vlint.toml)")]
    NoDocuments,
}

pub type Result<T> = std::result::Result<T, VlintError>;
