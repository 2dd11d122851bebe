//! Error types for the profiling engine.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for profiling operations.
#[derive(Debug, Error)]
pub enum EdaError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed input that could not be turned into a table.
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Input decoded fine but has no usable shape (no columns, no rows).
    #[error("Schema error: {0}")]
    Schema(String),

    /// Invalid configuration or request parameters.
    #[error("Validation error: {0}")]
    Validation(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification of an [`EdaError`], used by callers that translate
/// failures into exit codes or HTTP statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Parse,
    Schema,
    Validation,
}

impl EdaError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EdaError::Io { .. } => ErrorKind::Io,
            EdaError::Parse { .. } | EdaError::Csv(_) | EdaError::Json(_) => ErrorKind::Parse,
            EdaError::Schema(_) => ErrorKind::Schema,
            EdaError::Validation(_) => ErrorKind::Validation,
        }
    }
}

/// Result type alias for profiling operations.
pub type Result<T> = std::result::Result<T, EdaError>;
