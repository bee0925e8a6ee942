//! Core error types for careerfit-core.
//!
//! This module defines the error hierarchy using thiserror. Each concern
//! (assessment flow, catalog definition, storage, configuration) has its own
//! enum, and [`CoreError`] folds them together for callers that don't care
//! which layer failed.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for careerfit-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Assessment flow and scoring errors
    #[error("Assessment error: {0}")]
    Assessment(#[from] AssessmentError),

    /// Catalog definition errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while collecting responses or scoring them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssessmentError {
    /// Scoring was attempted before every question had a response.
    #[error("Incomplete responses: missing answers for {}", missing.join(", "))]
    IncompleteResponseSet { missing: Vec<String> },

    /// A response referenced a question id that is not in the catalog.
    #[error("Unknown question id '{0}'")]
    UnknownQuestion(String),

    /// A response selected an option the question does not offer.
    #[error("Option {index} out of range for question '{question_id}' ({len} options)")]
    OptionOutOfRange {
        question_id: String,
        index: usize,
        len: usize,
    },

    /// The catalog has no question for a category, so its mean is undefined.
    #[error("No questions in category '{0}'")]
    EmptyCategory(String),

    /// The session already finalized.
    #[error("Assessment already submitted")]
    AlreadySubmitted,
}

/// Errors in a catalog definition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Catalog has no questions
    #[error("Catalog has no questions")]
    Empty,

    /// Two questions share an id
    #[error("Duplicate question id '{0}'")]
    DuplicateId(String),

    /// Question offers fewer than two options
    #[error("Question '{id}' has {len} option(s); at least 2 are required")]
    TooFewOptions { id: String, len: usize },

    /// Technical question points at an option that doesn't exist
    #[error("Question '{id}' marks option {correct} correct but has only {len} options")]
    CorrectOptionOutOfRange { id: String, correct: usize, len: usize },

    /// A category has no questions
    #[error("Catalog has no '{0}' questions")]
    MissingCategory(String),

    /// Catalog file could not be parsed
    #[error("Failed to parse catalog: {0}")]
    ParseFailed(String),

    /// Catalog file could not be read
    #[error("Failed to read catalog from {path}: {message}")]
    ReadFailed { path: PathBuf, message: String },
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),

    /// Stored value could not be decoded
    #[error("Stored value under '{key}' is corrupt: {message}")]
    Corrupt { key: String, message: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(inner, _msg) => {
                if inner.code == rusqlite::ErrorCode::DatabaseLocked {
                    StorageError::Locked
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
