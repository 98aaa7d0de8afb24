//! Dense storage and native kernels for densealg.
//!
//! This crate provides:
//! - [`DenseStorage`]: contiguous row-major storage of rank 1 or 2
//! - [`BackendScalar`]: the four supported element types (f32/f64/Complex32/Complex64)
//! - [`kernels`]: elementwise loops, reductions, index search and faer GEMM
//!
//! This crate re-exports `mdarray` and `num_complex` for downstream use.

pub mod error;
pub mod kernels;
pub mod scalar;
pub mod storage;

pub use error::{Result, StorageError};
pub use scalar::BackendScalar;
pub use storage::{checked_len, dtensor_to_storage, storage_to_dtensor, DenseStorage};

// Re-export underlying crates for downstream use
pub use mdarray;
pub use num_complex;
