//! Error types for tracklet operations.

use crate::domain::IssueId;
use crate::id_generation::IdGenerationError;
use std::io;
use thiserror::Error;

/// The error type for tracklet operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No `.tracklet/` directory was found.
    #[error("Not a tracklet repository (or any parent directory). Run `tracklet init` first")]
    NotInitialized,

    /// The underlying key-value store failed.
    #[error("Storage error: {0}")]
    Storage(#[from] tracklet_kv::Error),

    /// Nothing has been stored under the key yet.
    ///
    /// [`IssueStore::load`](crate::store::IssueStore::load) treats this as an
    /// empty collection.
    #[error("No issues stored under key '{key}'")]
    EmptyStore {
        /// The storage key that was read.
        key: String,
    },

    /// The stored blob could not be decoded as an issue collection.
    #[error("Stored issues under key '{key}' are corrupt: {reason}")]
    CorruptStore {
        /// The storage key that was read.
        key: String,
        /// What was wrong with the blob.
        reason: String,
    },

    /// Issue not found.
    #[error("Issue not found: {0}")]
    IssueNotFound(IssueId),

    /// Two issues in one collection share an ID.
    #[error("Duplicate issue ID: {0}")]
    DuplicateIssueId(IssueId),

    /// A field of a new issue failed validation.
    #[error("Invalid {field}: {reason}")]
    InvalidField {
        /// Name of the offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// Identifier generation failed.
    #[error(transparent)]
    IdGeneration(#[from] IdGenerationError),

    /// Serializing the collection failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Template rendering failed.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),
}

/// A specialized Result type for tracklet operations.
pub type Result<T> = std::result::Result<T, Error>;
