//! Error types for Mira
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! The read path assumes its invariants are upheld by the write path, so most
//! of these errors are fatal: see [`Error::is_fatal`]. Positioning misses are
//! never errors; they produce the `end` cursor instead.

use std::io;
use thiserror::Error;

use crate::types::ColumnSpace;

/// Result type alias for Mira operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Mira
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (config files)
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Data corruption detected in the store
    #[error("Data corruption: {0}")]
    Corruption(String),

    /// A secondary entry points at a primary key that does not exist
    #[error("Dangling secondary entry in column space {space}: primary key {key:?} not found")]
    DanglingSecondary {
        /// Secondary column space holding the entry
        space: ColumnSpace,
        /// Primary key bytes the entry referenced
        key: Vec<u8>,
    },

    /// Column space index outside the store's layout
    #[error("Column space {index} out of range (store has {count})")]
    ColumnSpaceOutOfRange {
        /// Requested column space
        index: usize,
        /// Number of column spaces available
        count: usize,
    },

    /// No column space is registered under this index name
    #[error("Unknown index: {0}")]
    UnknownIndex(String),

    /// Operation on a cursor that does not denote an entry
    #[error("Invalid cursor: {0}")]
    InvalidCursor(String),

    /// Configuration rejected during validation or parsing
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Whether this error is an invariant violation.
    ///
    /// Fatal errors mean the view of the store is inconsistent; callers must
    /// not keep iterating after observing one.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::Corruption(_)
                | Error::DanglingSecondary { .. }
                | Error::InvalidCursor(_)
        )
    }
}

impl From<bincode::Error> for Error {
    fn from(e: bincode::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}
