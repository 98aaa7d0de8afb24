//! Error types for densealg-backend

use thiserror::Error;

/// Errors reported by dense storage operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Buffer length does not agree with the requested shape
    #[error("Length mismatch: {len} elements cannot be laid out as {dims:?}")]
    LengthMismatch {
        /// Number of elements supplied
        len: usize,
        /// Requested dimensions
        dims: Vec<usize>,
    },

    /// Operation requires a buffer of a different rank
    #[error("Rank mismatch: expected a rank-{expected} buffer, got rank {actual}")]
    RankMismatch {
        /// Rank the operation needs
        expected: usize,
        /// Rank of the buffer
        actual: usize,
    },

    /// Linear index past the end of the buffer
    #[error("Index out of bounds: {index} for a buffer of {len} elements")]
    IndexOutOfBounds {
        /// Requested linear index
        index: usize,
        /// Buffer length
        len: usize,
    },

    /// The element count of a shape does not fit in `usize`
    #[error("Size overflow: shape {dims:?} has more elements than fit in usize")]
    SizeOverflow {
        /// Requested dimensions
        dims: Vec<usize>,
    },
}

/// Result type for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;
