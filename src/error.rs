//! Error types for loading, composing and querying word vectors

use thiserror::Error;

/// Result type alias for wordvec operations
pub type Result<T> = std::result::Result<T, WordVecError>;

/// Error types that can occur while loading a model or evaluating a query
#[derive(Error, Debug)]
pub enum WordVecError {
    #[error("Bad format: {reason}")]
    Format { reason: String },

    #[error("Truncated input: {context}")]
    TruncatedInput { context: String },

    #[error("Word not found: {word}")]
    WordNotFound { word: String },

    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Lexical error at offset {position}: {reason}")]
    Lexical { position: usize, reason: String },

    #[error("Syntax error: {reason}")]
    Syntax { reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl WordVecError {
    pub(crate) fn format(reason: impl Into<String>) -> Self {
        WordVecError::Format {
            reason: reason.into(),
        }
    }

    pub(crate) fn syntax(reason: impl Into<String>) -> Self {
        WordVecError::Syntax {
            reason: reason.into(),
        }
    }
}
