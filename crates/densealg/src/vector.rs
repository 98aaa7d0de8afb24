//! Dense vectors.

use crate::container::Container;
use crate::element::{Element, UnaryFn};
use crate::error::{ContainerError, Result};
use densealg_backend::{kernels, DenseStorage};
use rand::Rng;
use std::fmt;

/// A fixed-length, zero-indexed sequence of elements.
///
/// The backing buffer is owned exclusively and never written after
/// construction.
#[derive(Debug, Clone)]
pub struct Vector<E> {
    data: DenseStorage<E>,
}

impl<E: Element> Vector<E> {
    /// Take ownership of `data` as a vector.
    pub fn from_vec(data: Vec<E>) -> Self {
        Self {
            data: DenseStorage::from_vec(data),
        }
    }

    /// Copy `data` into a new vector.
    pub fn from_slice(data: &[E]) -> Self {
        Self::from_vec(data.to_vec())
    }

    pub(crate) fn from_storage(data: DenseStorage<E>) -> Self {
        Self {
            data: data.flatten(),
        }
    }

    pub(crate) fn into_storage(self) -> DenseStorage<E> {
        self.data
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the vector has no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over the elements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.data.iter()
    }

    /// Copy the elements into a `Vec`.
    pub fn to_vec(&self) -> Vec<E> {
        self.as_slice().to_vec()
    }

    /// Consume the vector, returning its elements.
    pub fn into_vec(self) -> Vec<E> {
        self.data.into_vec()
    }

    /// Vector of `n` elements with every real channel uniform on `[0, 1)`.
    pub fn random_uniform<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Result<Self> {
        Ok(Self::from_storage(DenseStorage::random_uniform(rng, &[n])?))
    }

    /// Vector of `n` elements with every real channel standard normal.
    pub fn random_normal<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Result<Self> {
        Ok(Self::from_storage(DenseStorage::random_normal(rng, &[n])?))
    }

    fn check_len(&self, other: &Self, op: &'static str) -> Result<()> {
        if self.len() == other.len() {
            Ok(())
        } else {
            Err(ContainerError::shape_mismatch(op, self.len(), other.len()))
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.len() {
            Ok(())
        } else {
            Err(ContainerError::index_out_of_range(index, self.len()))
        }
    }
}

impl<E: Element> Container for Vector<E> {
    type Elem = E;
    type Index = usize;
    type Shape = usize;
    type Of<F: Element> = Vector<F>;

    fn shape(&self) -> usize {
        self.len()
    }

    fn as_slice(&self) -> &[E] {
        self.data.as_slice()
    }

    fn scalar(e: E) -> Self {
        Self::from_vec(vec![e])
    }

    fn konst(e: E, n: usize) -> Result<Self> {
        Ok(Self::from_storage(DenseStorage::allocate(n, e)))
    }

    fn build(n: usize, f: impl FnMut(usize) -> E) -> Result<Self> {
        Ok(Self::from_vec((0..n).map(f).collect()))
    }

    fn assoc(n: usize, default: E, overrides: &[(usize, E)]) -> Result<Self> {
        let mut staging = DenseStorage::allocate(n, default);
        for &(i, x) in overrides {
            if i >= n {
                return Err(ContainerError::index_out_of_range(i, n));
            }
            staging.set(i, x)?;
        }
        Ok(Self::from_storage(staging))
    }

    fn accum(&self, combine: impl Fn(E, E) -> E, updates: &[(usize, E)]) -> Result<Self> {
        let mut staging = self.data.clone();
        for &(i, x) in updates {
            let old = staging
                .get(i)
                .ok_or_else(|| ContainerError::index_out_of_range(i, self.len()))?;
            staging.set(i, combine(x, old))?;
        }
        Ok(Self::from_storage(staging))
    }

    fn at_index(&self, index: usize) -> Result<E> {
        self.check_index(index)?;
        Ok(self.as_slice()[index])
    }

    fn find(&self, pred: impl Fn(E) -> bool) -> Vec<usize> {
        self.iter()
            .enumerate()
            .filter(|&(_, &x)| pred(x))
            .map(|(i, _)| i)
            .collect()
    }

    fn cmap<F: Element>(&self, f: impl Fn(E) -> F) -> Vector<F> {
        Vector::from_vec(kernels::map(self.as_slice(), f))
    }

    fn zip_with<F: Element>(
        &self,
        other: &Self,
        op: &'static str,
        f: impl Fn(E, E) -> F,
    ) -> Result<Vector<F>> {
        self.check_len(other, op)?;
        Ok(Vector::from_vec(kernels::zip_map(
            self.as_slice(),
            other.as_slice(),
            f,
        )))
    }

    fn scale(&self, e: E) -> Self {
        Self::from_vec(E::scale(e, self.as_slice()))
    }

    fn scale_recip(&self, e: E) -> Self {
        Self::from_vec(E::scale_recip(e, self.as_slice()))
    }

    fn add_constant(&self, e: E) -> Self {
        Self::from_vec(E::add_constant(e, self.as_slice()))
    }

    fn add(&self, other: &Self) -> Result<Self> {
        self.check_len(other, "add")?;
        Ok(Self::from_vec(E::zip_add(self.as_slice(), other.as_slice())))
    }

    fn sub(&self, other: &Self) -> Result<Self> {
        self.check_len(other, "sub")?;
        Ok(Self::from_vec(E::zip_sub(self.as_slice(), other.as_slice())))
    }

    fn mul(&self, other: &Self) -> Result<Self> {
        self.check_len(other, "mul")?;
        Ok(Self::from_vec(E::zip_mul(self.as_slice(), other.as_slice())))
    }

    fn divide(&self, other: &Self) -> Result<Self> {
        self.check_len(other, "divide")?;
        Ok(Self::from_vec(E::zip_div(self.as_slice(), other.as_slice())))
    }

    // An all-NaN vector reports index 0.
    fn min_index(&self) -> Result<usize> {
        if self.is_empty() {
            return Err(ContainerError::EmptyContainer { op: "min_index" });
        }
        Ok(E::min_index(self.as_slice()).unwrap_or(0))
    }

    fn max_index(&self) -> Result<usize> {
        if self.is_empty() {
            return Err(ContainerError::EmptyContainer { op: "max_index" });
        }
        Ok(E::max_index(self.as_slice()).unwrap_or(0))
    }

    fn conj(&self) -> Self {
        Self::from_vec(E::conj_all(self.as_slice()))
    }

    fn step(&self) -> Result<Self> {
        Ok(Self::from_vec(E::step(self.as_slice())?))
    }

    fn arctan2(&self, x: &Self) -> Result<Self> {
        if E::KIND.is_complex() {
            return Err(ContainerError::unsupported("arctan2", E::KIND));
        }
        self.check_len(x, "arctan2")?;
        Ok(Self::from_vec(E::arctan2(self.as_slice(), x.as_slice())?))
    }

    fn map_fn(&self, f: UnaryFn) -> Self {
        Self::from_vec(E::map_fn(f, self.as_slice()))
    }

    fn equal(&self, other: &Self) -> bool {
        E::equal(self.as_slice(), other.as_slice())
    }
}

impl<E: Element> From<Vec<E>> for Vector<E> {
    fn from(data: Vec<E>) -> Self {
        Self::from_vec(data)
    }
}

impl<E: Element> PartialEq for Vector<E> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<E: Element> fmt::Display for Vector<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, x) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{x}")?;
        }
        write!(f, "]")
    }
}
