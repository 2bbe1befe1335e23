//! Error types for tracklet-kv operations.

use std::io;
use thiserror::Error;

/// The error type for key-value store operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred while reading or writing a slot.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The key is not usable as a slot name.
    #[error("Invalid key '{key}': {reason}")]
    InvalidKey {
        /// The rejected key.
        key: String,
        /// Why the key was rejected.
        reason: String,
    },
}

/// A specialized Result type for tracklet-kv operations.
pub type Result<T> = std::result::Result<T, Error>;
