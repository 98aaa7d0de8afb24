//! The operation set shared by [`Vector`](crate::Vector) and [`Matrix`](crate::Matrix).

use crate::element::{Element, UnaryFn};
use crate::error::Result;
use std::fmt::Debug;

/// Uniform operations over a dense container of one element kind.
///
/// Arithmetic between two containers requires equal shapes and fails with
/// [`ContainerError::ShapeMismatch`](crate::ContainerError::ShapeMismatch)
/// otherwise. Broadcasting is layered on top in [`crate::conform`].
///
/// Every operation returns a new container; nothing is mutated in place.
pub trait Container: Sized + Clone + Debug {
    type Elem: Element;
    /// `usize` for vectors, `(row, col)` for matrices
    type Index: Copy + Debug + PartialEq;
    /// Length for vectors, `(rows, cols)` for matrices
    type Shape: Copy + Debug + PartialEq;
    /// The same container shape over another element kind
    type Of<F: Element>: Container<Elem = F, Index = Self::Index, Shape = Self::Shape>;

    fn shape(&self) -> Self::Shape;

    /// Elements in row-major order.
    fn as_slice(&self) -> &[Self::Elem];

    /// Total number of elements.
    fn size(&self) -> usize {
        self.as_slice().len()
    }

    /// Single-element container.
    fn scalar(e: Self::Elem) -> Self;

    /// Container of the given shape filled with `e`.
    fn konst(e: Self::Elem, shape: Self::Shape) -> Result<Self>;

    /// Container whose element at every index is `f(index)`, generated in
    /// row-major order.
    fn build(shape: Self::Shape, f: impl FnMut(Self::Index) -> Self::Elem) -> Result<Self>;

    /// Container filled with `default`, then each override written in order.
    /// Later entries win on duplicate indices.
    fn assoc(
        shape: Self::Shape,
        default: Self::Elem,
        overrides: &[(Self::Index, Self::Elem)],
    ) -> Result<Self>;

    /// Copy with each update folded in as `combine(value, old)`, in order.
    fn accum(
        &self,
        combine: impl Fn(Self::Elem, Self::Elem) -> Self::Elem,
        updates: &[(Self::Index, Self::Elem)],
    ) -> Result<Self>;

    fn at_index(&self, index: Self::Index) -> Result<Self::Elem>;

    /// Indices of all elements satisfying `pred`, ascending.
    fn find(&self, pred: impl Fn(Self::Elem) -> bool) -> Vec<Self::Index>;

    /// Elementwise map into a possibly different element kind.
    fn cmap<F: Element>(&self, f: impl Fn(Self::Elem) -> F) -> Self::Of<F>;

    /// Pointwise combination of two equally shaped containers.
    fn zip_with<F: Element>(
        &self,
        other: &Self,
        op: &'static str,
        f: impl Fn(Self::Elem, Self::Elem) -> F,
    ) -> Result<Self::Of<F>>;

    fn scale(&self, e: Self::Elem) -> Self;
    /// `e / x` for every element `x`.
    fn scale_recip(&self, e: Self::Elem) -> Self;
    fn add_constant(&self, e: Self::Elem) -> Self;

    fn add(&self, other: &Self) -> Result<Self>;
    fn sub(&self, other: &Self) -> Result<Self>;
    fn mul(&self, other: &Self) -> Result<Self>;
    fn divide(&self, other: &Self) -> Result<Self>;

    fn sum_elements(&self) -> Self::Elem {
        <Self::Elem as Element>::sum_elements(self.as_slice())
    }

    fn prod_elements(&self) -> Self::Elem {
        <Self::Elem as Element>::prod_elements(self.as_slice())
    }

    /// Index of the smallest element (by modulus for complex kinds). Ties go
    /// to the lowest flat index.
    fn min_index(&self) -> Result<Self::Index>;
    fn max_index(&self) -> Result<Self::Index>;

    fn min_element(&self) -> Result<Self::Elem> {
        self.at_index(self.min_index()?)
    }

    fn max_element(&self) -> Result<Self::Elem> {
        self.at_index(self.max_index()?)
    }

    fn conj(&self) -> Self;
    fn step(&self) -> Result<Self>;
    /// Elementwise `atan2(self, x)`.
    fn arctan2(&self, x: &Self) -> Result<Self>;
    fn map_fn(&self, f: UnaryFn) -> Self;

    /// Exact equality: every elementwise difference is zero.
    fn equal(&self, other: &Self) -> bool;
}
