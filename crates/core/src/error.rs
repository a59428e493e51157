//! Error types for Navigator.
//!
//! A single error enum covers every failure category in the workspace:
//! configuration, I/O, generation, corpus/index construction, retrieval,
//! and prompt rendering.

use thiserror::Error;

/// Unified error type for Navigator.
///
/// All fallible functions return `Result<T, AppError>`.
/// Only startup surfaces these to the operator; the query path converts
/// every error into a safe textual response.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generation service errors (hosted or local runner)
    #[error("LLM error: {0}")]
    Llm(String),

    /// Corpus loading, segmentation and index construction errors
    #[error("Knowledge error: {0}")]
    Knowledge(String),

    /// Query-time embedding or search failures
    #[error("Retrieval error: {0}")]
    Retrieval(String),

    /// Prompt system errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
