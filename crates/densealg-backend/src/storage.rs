//! Dense row-major storage for vectors and matrices.
//!
//! [`DenseStorage`] is the capability set the container layer builds on:
//! allocate, read, write, reshape, transpose and flatten. Buffers are rank 1
//! (vectors) or rank 2 (matrices); the data is always contiguous and
//! row-major, so reshape and flatten never move elements.

use crate::error::{Result, StorageError};
use crate::scalar::BackendScalar;
use mdarray::{DTensor, DynRank, Rank, Shape, Tensor};
use rand::Rng;

/// Dense storage for container elements, wrapping mdarray's Tensor with dynamic rank.
#[derive(Debug, Clone)]
pub struct DenseStorage<T>(Tensor<T, DynRank>);

/// Number of elements described by `dims`, checked for overflow.
pub fn checked_len(dims: &[usize]) -> Result<usize> {
    dims.iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or_else(|| StorageError::SizeOverflow {
            dims: dims.to_vec(),
        })
}

impl<T> DenseStorage<T> {
    /// Create a new DenseStorage from a Vec with explicit shape.
    ///
    /// # Errors
    /// Returns [`StorageError::LengthMismatch`] if the product of `dims`
    /// differs from `vec.len()`.
    pub fn from_vec_with_shape(vec: Vec<T>, dims: &[usize]) -> Result<Self> {
        let expected_len = checked_len(dims)?;
        if vec.len() != expected_len {
            return Err(StorageError::LengthMismatch {
                len: vec.len(),
                dims: dims.to_vec(),
            });
        }
        let tensor = Tensor::from(vec).into_shape(DynRank::from_dims(dims));
        Ok(Self(tensor))
    }

    /// Create a rank-1 storage holding `vec`.
    pub fn from_vec(vec: Vec<T>) -> Self {
        let len = vec.len();
        Self(Tensor::from(vec).into_shape(DynRank::from_dims(&[len])))
    }

    /// Get the shape (dimensions) of the storage.
    pub fn dims(&self) -> Vec<usize> {
        self.0.shape().with_dims(|d| d.to_vec())
    }

    /// Get the rank (number of dimensions).
    pub fn rank(&self) -> usize {
        self.0.rank()
    }

    /// Get underlying data as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.0[..]
    }

    /// Get underlying data as a mutable slice.
    ///
    /// Only meant for buffers that are still being filled; once a buffer is
    /// handed to a container it is never written again.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.0[..]
    }

    /// Convert to Vec, consuming the storage.
    pub fn into_vec(self) -> Vec<T> {
        self.0.into_vec()
    }

    /// Get the total number of elements.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the storage is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over elements in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Reinterpret the same row-major data with new dimensions.
    pub fn reshape(self, dims: &[usize]) -> Result<Self> {
        Self::from_vec_with_shape(self.into_vec(), dims)
    }

    /// Reinterpret the data as a `rows x cols` buffer.
    ///
    /// # Panics
    /// Panics if `rows * cols` differs from the number of elements.
    pub fn into_matrix(self, rows: usize, cols: usize) -> Self {
        assert_eq!(
            rows.checked_mul(cols),
            Some(self.len()),
            "cannot lay out {} elements as {}x{}",
            self.len(),
            rows,
            cols
        );
        Self(self.0.into_shape(DynRank::from_dims(&[rows, cols])))
    }

    /// Rank-1 buffer over the same data.
    pub fn flatten(self) -> Self {
        Self::from_vec(self.into_vec())
    }
}

impl<T: Clone> DenseStorage<T> {
    /// Allocate a rank-1 buffer of `len` copies of `fill`.
    pub fn allocate(len: usize, fill: T) -> Self {
        Self::from_vec(vec![fill; len])
    }

    /// Get element at linear index.
    ///
    /// Returns `None` when `i` is out of bounds.
    pub fn get(&self, i: usize) -> Option<T> {
        self.as_slice().get(i).cloned()
    }

    /// Set element at linear index.
    ///
    /// # Errors
    /// Returns [`StorageError::IndexOutOfBounds`] if `i` is past the end.
    pub fn set(&mut self, i: usize, val: T) -> Result<()> {
        let len = self.len();
        match self.as_mut_slice().get_mut(i) {
            Some(slot) => {
                *slot = val;
                Ok(())
            }
            None => Err(StorageError::IndexOutOfBounds { index: i, len }),
        }
    }

    /// Transpose a rank-2 buffer.
    ///
    /// # Panics
    /// Panics if the buffer is not rank 2.
    pub fn transpose(&self) -> Self {
        assert_eq!(self.rank(), 2, "transpose requires a rank-2 buffer");
        if self.is_empty() {
            let dims = self.dims();
            let shape = DynRank::from_dims(&[dims[1], dims[0]]);
            return Self(Tensor::from(Vec::new()).into_shape(shape));
        }
        Self(self.0.permute(&[1usize, 0][..]).to_tensor())
    }
}

impl<T: BackendScalar> DenseStorage<T> {
    /// Create storage with random values from the standard normal distribution.
    ///
    /// Complex elements draw the real and imaginary channel independently.
    pub fn random_normal<R: Rng + ?Sized>(rng: &mut R, dims: &[usize]) -> Result<Self> {
        let size = checked_len(dims)?;
        let data: Vec<T> = (0..size).map(|_| T::sample_normal(rng)).collect();
        Self::from_vec_with_shape(data, dims)
    }

    /// Create storage with random values uniform on `[0, 1)` per real channel.
    pub fn random_uniform<R: Rng + ?Sized>(rng: &mut R, dims: &[usize]) -> Result<Self> {
        let size = checked_len(dims)?;
        let data: Vec<T> = (0..size).map(|_| T::sample_uniform(rng)).collect();
        Self::from_vec_with_shape(data, dims)
    }
}

/// Convert a rank-2 storage into an mdarray `DTensor<T, 2>`.
///
/// # Errors
/// Returns [`StorageError::RankMismatch`] if the storage is not rank 2.
pub fn storage_to_dtensor<T: Clone>(storage: &DenseStorage<T>) -> Result<DTensor<T, 2>> {
    let dims = storage.dims();
    if dims.len() != 2 {
        return Err(StorageError::RankMismatch {
            expected: 2,
            actual: dims.len(),
        });
    }
    let tensor_1d = mdarray::Tensor::<T, Rank<1>>::from(storage.as_slice().to_vec());
    Ok(tensor_1d.into_shape([dims[0], dims[1]]))
}

/// Copy an mdarray `DTensor<T, 2>` into a rank-2 storage.
pub fn dtensor_to_storage<T: Clone>(tensor: &DTensor<T, 2>) -> DenseStorage<T> {
    let rows = tensor.dim(0);
    let cols = tensor.dim(1);
    let data: Vec<T> = (0..rows)
        .flat_map(|i| (0..cols).map(move |j| tensor[[i, j]].clone()))
        .collect();
    DenseStorage(Tensor::from(data).into_shape(DynRank::from_dims(&[rows, cols])))
}
