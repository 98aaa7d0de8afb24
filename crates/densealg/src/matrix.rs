//! Dense matrices, lifted onto [`Vector`] through flatten and reshape.
//!
//! A matrix is a `rows x cols` grid stored row-major. Every elementwise
//! operation flattens the operands, runs the vector operation and lays the
//! result back out with the original shape. The flat index `i` corresponds to
//! `(i / cols, i % cols)`.

use crate::container::Container;
use crate::element::{Element, UnaryFn};
use crate::error::{ContainerError, Result};
use crate::vector::Vector;
use densealg_backend::{checked_len, dtensor_to_storage, storage_to_dtensor, DenseStorage};
use mdarray::DTensor;
use rand::Rng;
use std::fmt;

/// A `rows x cols` grid of elements.
#[derive(Debug, Clone)]
pub struct Matrix<E> {
    rows: usize,
    cols: usize,
    data: DenseStorage<E>,
}

impl<E: Element> Matrix<E> {
    /// Lay out `v` as a matrix with `cols` columns.
    ///
    /// `reshape(0, [])` yields a `0 x 0` matrix.
    ///
    /// # Errors
    /// - [`ContainerError::InvalidSize`] if `cols == 0` and `v` is non-empty.
    /// - [`ContainerError::ShapeMismatch`] if `cols` does not divide `len(v)`.
    pub fn reshape(cols: usize, v: Vector<E>) -> Result<Self> {
        let len = v.len();
        if cols == 0 {
            if len == 0 {
                return Ok(Self::from_flat(0, 0, v));
            }
            return Err(ContainerError::InvalidSize {
                reason: format!("cannot reshape {len} elements into zero columns"),
            });
        }
        if len % cols != 0 {
            return Err(ContainerError::shape_mismatch(
                "reshape",
                format!("a multiple of {cols} elements"),
                len,
            ));
        }
        Ok(Self::from_flat(len / cols, cols, v))
    }

    /// Row-major elements as a vector.
    pub fn flatten(&self) -> Vector<E> {
        Vector::from_storage(self.data.clone())
    }

    pub(crate) fn from_flat(rows: usize, cols: usize, v: Vector<E>) -> Self {
        Self {
            rows,
            cols,
            data: v.into_storage().into_matrix(rows, cols),
        }
    }

    fn lift(&self, f: impl FnOnce(Vector<E>) -> Vector<E>) -> Self {
        Self::from_flat(self.rows, self.cols, f(self.flatten()))
    }

    fn try_lift(&self, f: impl FnOnce(Vector<E>) -> Result<Vector<E>>) -> Result<Self> {
        Ok(Self::from_flat(self.rows, self.cols, f(self.flatten())?))
    }

    fn lift2(
        &self,
        other: &Self,
        op: &'static str,
        f: impl FnOnce(&Vector<E>, &Vector<E>) -> Result<Vector<E>>,
    ) -> Result<Self> {
        self.check_shape(other, op)?;
        let out = f(&self.flatten(), &other.flatten())?;
        Ok(Self::from_flat(self.rows, self.cols, out))
    }

    fn check_shape(&self, other: &Self, op: &'static str) -> Result<()> {
        if self.shape() == other.shape() {
            Ok(())
        } else {
            Err(ContainerError::shape_mismatch(op, self.shape(), other.shape()))
        }
    }

    fn check_index(&self, (i, j): (usize, usize)) -> Result<usize> {
        if i < self.rows && j < self.cols {
            Ok(i * self.cols + j)
        } else {
            Err(ContainerError::index_out_of_range((i, j), self.shape()))
        }
    }

    fn unflatten_index(&self, i: usize) -> (usize, usize) {
        (i / self.cols, i % self.cols)
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Build from a list of rows.
    ///
    /// # Errors
    /// Returns [`ContainerError::ShapeMismatch`] if the rows are ragged.
    pub fn from_rows<R: AsRef<[E]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(ContainerError::shape_mismatch("from_rows", cols, row.len()));
            }
            data.extend_from_slice(row);
        }
        Ok(Self::from_flat(rows.len(), cols, Vector::from_vec(data)))
    }

    /// `1 x n` matrix holding `v`.
    pub fn as_row(v: &Vector<E>) -> Self {
        Self::from_flat(1, v.len(), v.clone())
    }

    /// `n x 1` matrix holding `v`.
    pub fn as_column(v: &Vector<E>) -> Self {
        Self::from_flat(v.len(), 1, v.clone())
    }

    /// Transpose.
    pub fn tr(&self) -> Self {
        Self {
            rows: self.cols,
            cols: self.rows,
            data: self.data.transpose(),
        }
    }

    /// Conjugate transpose.
    pub fn ctrans(&self) -> Self {
        self.tr().conj()
    }

    /// `n x n` identity.
    pub fn ident(n: usize) -> Result<Self> {
        Self::build((n, n), |(i, j)| if i == j { E::one() } else { E::zero() })
    }

    /// Square matrix with `v` on the diagonal.
    pub fn diag(v: &Vector<E>) -> Result<Self> {
        let n = v.len();
        let d = v.as_slice();
        Self::build((n, n), |(i, j)| if i == j { d[i] } else { E::zero() })
    }

    /// Main diagonal, of length `min(rows, cols)`.
    pub fn take_diag(&self) -> Vector<E> {
        let d = self.as_slice();
        let n = self.rows.min(self.cols);
        Vector::from_vec((0..n).map(|i| d[i * self.cols + i]).collect())
    }

    /// Copy of row `i`.
    ///
    /// # Errors
    /// Returns [`ContainerError::IndexOutOfRange`] if `i >= rows`.
    pub fn row(&self, i: usize) -> Result<Vector<E>> {
        if i >= self.rows {
            return Err(ContainerError::index_out_of_range(i, self.rows));
        }
        let start = i * self.cols;
        Ok(Vector::from_slice(&self.as_slice()[start..start + self.cols]))
    }

    /// Copy of column `j`.
    ///
    /// # Errors
    /// Returns [`ContainerError::IndexOutOfRange`] if `j >= cols`.
    pub fn column(&self, j: usize) -> Result<Vector<E>> {
        if j >= self.cols {
            return Err(ContainerError::index_out_of_range(j, self.cols));
        }
        let d = self.as_slice();
        Ok(Vector::from_vec(
            (0..self.rows).map(|i| d[i * self.cols + j]).collect(),
        ))
    }

    /// Copy into an mdarray `DTensor`.
    pub fn to_dtensor(&self) -> Result<DTensor<E, 2>> {
        Ok(storage_to_dtensor(&self.data)?)
    }

    /// Copy out of an mdarray `DTensor`.
    pub fn from_dtensor(tensor: &DTensor<E, 2>) -> Self {
        let data = dtensor_to_storage(tensor);
        let (rows, cols) = (tensor.dim(0), tensor.dim(1));
        Self { rows, cols, data }
    }

    /// Matrix with every real channel uniform on `[0, 1)`.
    pub fn random_uniform<R: Rng + ?Sized>(
        rng: &mut R,
        (rows, cols): (usize, usize),
    ) -> Result<Self> {
        let data = DenseStorage::random_uniform(rng, &[rows, cols])?;
        Ok(Self { rows, cols, data })
    }

    /// Matrix with every real channel standard normal.
    pub fn random_normal<R: Rng + ?Sized>(
        rng: &mut R,
        (rows, cols): (usize, usize),
    ) -> Result<Self> {
        let data = DenseStorage::random_normal(rng, &[rows, cols])?;
        Ok(Self { rows, cols, data })
    }
}

fn checked_shape_len((rows, cols): (usize, usize)) -> Result<usize> {
    checked_len(&[rows, cols]).map_err(|_| ContainerError::InvalidSize {
        reason: format!("{rows}x{cols} has more elements than fit in usize"),
    })
}

fn flat_overrides<E: Copy>(
    (rows, cols): (usize, usize),
    entries: &[((usize, usize), E)],
) -> Result<Vec<(usize, E)>> {
    entries
        .iter()
        .map(|&((i, j), x)| {
            if i < rows && j < cols {
                Ok((i * cols + j, x))
            } else {
                Err(ContainerError::index_out_of_range((i, j), (rows, cols)))
            }
        })
        .collect()
}

impl<E: Element> Container for Matrix<E> {
    type Elem = E;
    type Index = (usize, usize);
    type Shape = (usize, usize);
    type Of<F: Element> = Matrix<F>;

    fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn as_slice(&self) -> &[E] {
        self.data.as_slice()
    }

    fn scalar(e: E) -> Self {
        Self::from_flat(1, 1, Vector::scalar(e))
    }

    fn konst(e: E, shape: (usize, usize)) -> Result<Self> {
        let len = checked_shape_len(shape)?;
        Ok(Self::from_flat(shape.0, shape.1, Vector::konst(e, len)?))
    }

    fn build(shape: (usize, usize), mut f: impl FnMut((usize, usize)) -> E) -> Result<Self> {
        let len = checked_shape_len(shape)?;
        let (rows, cols) = shape;
        let mut data = Vec::with_capacity(len);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f((i, j)));
            }
        }
        Ok(Self::from_flat(rows, cols, Vector::from_vec(data)))
    }

    fn assoc(
        shape: (usize, usize),
        default: E,
        overrides: &[((usize, usize), E)],
    ) -> Result<Self> {
        let len = checked_shape_len(shape)?;
        let flat = flat_overrides(shape, overrides)?;
        Ok(Self::from_flat(
            shape.0,
            shape.1,
            Vector::assoc(len, default, &flat)?,
        ))
    }

    fn accum(
        &self,
        combine: impl Fn(E, E) -> E,
        updates: &[((usize, usize), E)],
    ) -> Result<Self> {
        let flat = flat_overrides(self.shape(), updates)?;
        self.try_lift(|v| v.accum(combine, &flat))
    }

    fn at_index(&self, index: (usize, usize)) -> Result<E> {
        let i = self.check_index(index)?;
        Ok(self.as_slice()[i])
    }

    fn find(&self, pred: impl Fn(E) -> bool) -> Vec<(usize, usize)> {
        self.flatten()
            .find(pred)
            .into_iter()
            .map(|i| self.unflatten_index(i))
            .collect()
    }

    fn cmap<F: Element>(&self, f: impl Fn(E) -> F) -> Matrix<F> {
        Matrix::from_flat(self.rows, self.cols, self.flatten().cmap(f))
    }

    fn zip_with<F: Element>(
        &self,
        other: &Self,
        op: &'static str,
        f: impl Fn(E, E) -> F,
    ) -> Result<Matrix<F>> {
        self.check_shape(other, op)?;
        let out = self.flatten().zip_with(&other.flatten(), op, f)?;
        Ok(Matrix::from_flat(self.rows, self.cols, out))
    }

    fn scale(&self, e: E) -> Self {
        self.lift(|v| v.scale(e))
    }

    fn scale_recip(&self, e: E) -> Self {
        self.lift(|v| v.scale_recip(e))
    }

    fn add_constant(&self, e: E) -> Self {
        self.lift(|v| v.add_constant(e))
    }

    fn add(&self, other: &Self) -> Result<Self> {
        self.lift2(other, "add", |a, b| a.add(b))
    }

    fn sub(&self, other: &Self) -> Result<Self> {
        self.lift2(other, "sub", |a, b| a.sub(b))
    }

    fn mul(&self, other: &Self) -> Result<Self> {
        self.lift2(other, "mul", |a, b| a.mul(b))
    }

    fn divide(&self, other: &Self) -> Result<Self> {
        self.lift2(other, "divide", |a, b| a.divide(b))
    }

    fn min_index(&self) -> Result<(usize, usize)> {
        let i = self.flatten().min_index()?;
        Ok(self.unflatten_index(i))
    }

    fn max_index(&self) -> Result<(usize, usize)> {
        let i = self.flatten().max_index()?;
        Ok(self.unflatten_index(i))
    }

    fn conj(&self) -> Self {
        self.lift(|v| v.conj())
    }

    fn step(&self) -> Result<Self> {
        self.try_lift(|v| v.step())
    }

    fn arctan2(&self, x: &Self) -> Result<Self> {
        if E::KIND.is_complex() {
            return Err(ContainerError::unsupported("arctan2", E::KIND));
        }
        self.lift2(x, "arctan2", |a, b| a.arctan2(b))
    }

    fn map_fn(&self, f: UnaryFn) -> Self {
        self.lift(|v| v.map_fn(f))
    }

    // Only the column counts are compared before the flattened comparison.
    fn equal(&self, other: &Self) -> bool {
        self.cols == other.cols && self.flatten().equal(&other.flatten())
    }
}

impl<E: Element> PartialEq for Matrix<E> {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.as_slice() == other.as_slice()
    }
}

impl<E: Element> fmt::Display for Matrix<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "({}x{})", self.rows, self.cols)?;
        for i in 0..self.rows {
            let row = &self.as_slice()[i * self.cols..(i + 1) * self.cols];
            write!(f, "[")?;
            for (j, x) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{x}")?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
