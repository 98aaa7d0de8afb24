//! Error types for densealg

use crate::element::ElementKind;
use densealg_backend::StorageError;
use std::fmt::Debug;
use thiserror::Error;

/// Errors that can occur while building or combining containers
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContainerError {
    /// Operand shapes are incompatible and cannot be broadcast
    #[error("Shape mismatch in {op}: expected {expected}, got {actual}")]
    ShapeMismatch {
        op: &'static str,
        expected: String,
        actual: String,
    },

    /// Index outside the valid bounds of a container
    #[error("Index {index} is out of range for shape {shape}")]
    IndexOutOfRange { index: String, shape: String },

    /// A requested size cannot be represented
    #[error("Invalid size: {reason}")]
    InvalidSize { reason: String },

    /// Operation is undefined for the element kind
    #[error("Operation {op} is not supported for element kind {kind}")]
    UnsupportedOperation { op: &'static str, kind: ElementKind },

    /// Operation needs at least one element
    #[error("Operation {op} requires a non-empty container")]
    EmptyContainer { op: &'static str },
}

impl ContainerError {
    pub(crate) fn shape_mismatch(
        op: &'static str,
        expected: impl Debug,
        actual: impl Debug,
    ) -> Self {
        Self::ShapeMismatch {
            op,
            expected: format!("{expected:?}"),
            actual: format!("{actual:?}"),
        }
    }

    pub(crate) fn index_out_of_range(index: impl Debug, shape: impl Debug) -> Self {
        Self::IndexOutOfRange {
            index: format!("{index:?}"),
            shape: format!("{shape:?}"),
        }
    }

    pub(crate) fn unsupported(op: &'static str, kind: ElementKind) -> Self {
        Self::UnsupportedOperation { op, kind }
    }
}

impl From<StorageError> for ContainerError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::LengthMismatch { len, dims } => {
                Self::shape_mismatch("storage", dims, len)
            }
            StorageError::RankMismatch { expected, actual } => {
                Self::shape_mismatch("storage rank", expected, actual)
            }
            StorageError::IndexOutOfBounds { index, len } => Self::index_out_of_range(index, len),
            StorageError::SizeOverflow { dims } => Self::InvalidSize {
                reason: format!("{dims:?} has more elements than fit in usize"),
            },
        }
    }
}

/// Result type for container operations
pub type Result<T> = std::result::Result<T, ContainerError>;
