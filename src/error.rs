//! Error types for corpus loading, extraction and synthesis.
//!
//! Only failures that leave nothing to fall back to are represented here.
//! Generation-backend failures live in [`crate::llms::GenerationError`] and
//! are absorbed by the orchestrator.

use thiserror::Error;

/// Errors surfaced to callers of the loader, extractor and synthesizer.
#[derive(Debug, Error)]
pub enum StyleError {
    /// No corpus file exists for the requested dataset.
    #[error("Dataset not found: {name}")]
    DatasetNotFound { name: String },

    /// The corpus file is not a JSON array or an object with a `posts` array.
    #[error("Dataset '{name}' has an unsupported format: {message}")]
    DatasetFormat { name: String, message: String },

    /// Every post in the corpus was empty after trimming.
    #[error("Corpus contains no usable posts")]
    EmptyCorpus,

    /// The synthesis context was empty after trimming.
    #[error("Context is required and cannot be empty")]
    EmptyContext,

    /// Reading or writing a persisted style profile failed.
    #[error("Profile store error for '{style}': {message}")]
    ProfileStore { style: String, message: String },

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StyleError {
    pub(crate) fn profile_store(style: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::ProfileStore {
            style: style.into(),
            message: err.to_string(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StyleError>;
