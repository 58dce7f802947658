//! Error types for the BPE vocabulary library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the vocabulary library.
#[derive(Error, Debug)]
pub enum TokenizerError {
    /// No adjacent symbol pair is left to score
    #[error("Empty vocabulary: no adjacent symbol pair to merge")]
    EmptyVocabulary,

    /// A corpus line could not be decoded as text
    #[error("Malformed input at line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },

    /// Error during training
    #[error("Training error: {0}")]
    Training(String),

    /// Error loading a trained model
    #[error("Load error: {0}")]
    Load(String),

    /// Error saving a trained model
    #[error("Save error: {0}")]
    Save(String),

    /// I/O error with file context
    #[error("I/O error for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid merge rule
    #[error("Invalid merge rule: {0}")]
    InvalidMerge(String),
}

/// Result type alias for vocabulary operations.
pub type Result<T> = std::result::Result<T, TokenizerError>;
