//! Shape conformance and broadcasting.
//!
//! Container arithmetic only accepts equal shapes. This module expands
//! degenerate operands (length-1 vectors, `1x1` matrices, single rows and
//! single columns) to a target shape first, and fails with
//! [`ContainerError::ShapeMismatch`] when an operand cannot be expanded.
//!
//! [`cond`] broadcasts all five operands to a common shape before selecting
//! elementwise; [`zip_conformed`] does the same for a pair of operands.

use crate::container::Container;
use crate::element::Element;
use crate::error::{ContainerError, Result};
use crate::matrix::Matrix;
use crate::vector::Vector;
use tracing::debug;

/// Containers that can be broadcast to a larger shape.
pub trait Conform: Container {
    /// Elementwise maximum of the given shapes.
    fn broadcast_shape(shapes: &[Self::Shape]) -> Self::Shape;

    /// Expand `self` to `target`.
    fn conform_to(&self, target: Self::Shape) -> Result<Self>;

    /// Elementwise select over five equally shaped operands: `l` where
    /// `a < b`, `e` where `a == b`, `t` otherwise.
    fn select(a: &Self, b: &Self, l: &Self, e: &Self, t: &Self) -> Result<Self>;
}

/// Broadcast `v` to length `target`.
///
/// A vector of the target length is returned unchanged and a length-1 vector
/// is repeated; any other length fails with [`ContainerError::ShapeMismatch`].
pub fn conform_vector_to<E: Element>(target: usize, v: &Vector<E>) -> Result<Vector<E>> {
    match v.len() {
        n if n == target => Ok(v.clone()),
        1 => {
            debug!(from = 1, to = target, "broadcasting scalar vector");
            Vector::konst(v.as_slice()[0], target)
        }
        n => {
            debug!(from = n, to = target, "vector does not conform");
            Err(ContainerError::shape_mismatch("conform_vector_to", target, n))
        }
    }
}

/// Broadcast `m` to shape `(rows, cols)`.
///
/// Accepted inputs are the target shape itself, `1x1`, `rows x 1` (the column
/// is repeated) and `1 x cols` (the row is repeated).
pub fn conform_matrix_to<E: Element>(target: (usize, usize), m: &Matrix<E>) -> Result<Matrix<E>> {
    let (rows, cols) = target;
    let shape = m.shape();
    if shape == target {
        return Ok(m.clone());
    }
    let data = m.as_slice();
    match shape {
        (1, 1) => {
            debug!(?shape, ?target, "broadcasting scalar matrix");
            Matrix::konst(data[0], target)
        }
        (r, 1) if r == rows => {
            debug!(?shape, ?target, "broadcasting column");
            Matrix::build(target, |(i, _)| data[i])
        }
        (1, c) if c == cols => {
            debug!(?shape, ?target, "broadcasting row");
            Matrix::build(target, |(_, j)| data[j])
        }
        _ => {
            debug!(?shape, ?target, "matrix does not conform");
            Err(ContainerError::shape_mismatch("conform_matrix_to", target, shape))
        }
    }
}

impl<E: Element> Conform for Vector<E> {
    fn broadcast_shape(shapes: &[usize]) -> usize {
        shapes.iter().copied().max().unwrap_or(0)
    }

    fn conform_to(&self, target: usize) -> Result<Self> {
        conform_vector_to(target, self)
    }

    fn select(a: &Self, b: &Self, l: &Self, e: &Self, t: &Self) -> Result<Self> {
        let n = a.len();
        for other in [b, l, e, t] {
            if other.len() != n {
                return Err(ContainerError::shape_mismatch("cond", n, other.len()));
            }
        }
        let out = E::cond(
            a.as_slice(),
            b.as_slice(),
            l.as_slice(),
            e.as_slice(),
            t.as_slice(),
        )?;
        Ok(Vector::from_vec(out))
    }
}

impl<E: Element> Conform for Matrix<E> {
    fn broadcast_shape(shapes: &[(usize, usize)]) -> (usize, usize) {
        let rows = shapes.iter().map(|s| s.0).max().unwrap_or(0);
        let cols = shapes.iter().map(|s| s.1).max().unwrap_or(0);
        (rows, cols)
    }

    fn conform_to(&self, target: (usize, usize)) -> Result<Self> {
        conform_matrix_to(target, self)
    }

    fn select(a: &Self, b: &Self, l: &Self, e: &Self, t: &Self) -> Result<Self> {
        let shape = a.shape();
        for other in [b, l, e, t] {
            if other.shape() != shape {
                return Err(ContainerError::shape_mismatch("cond", shape, other.shape()));
            }
        }
        let out = Vector::select(
            &a.flatten(),
            &b.flatten(),
            &l.flatten(),
            &e.flatten(),
            &t.flatten(),
        )?;
        Ok(Matrix::from_flat(shape.0, shape.1, out))
    }
}

/// Five-way conditional select with broadcasting.
///
/// All operands are conformed to the largest shape among them, then the
/// result takes `l` where `a < b`, `e` where `a == b` and `t` where `a > b`.
/// Only real element kinds are ordered; complex kinds fail with
/// [`ContainerError::UnsupportedOperation`].
pub fn cond<C: Conform>(a: &C, b: &C, l: &C, e: &C, t: &C) -> Result<C> {
    let kind = <C::Elem as Element>::KIND;
    if kind.is_complex() {
        return Err(ContainerError::unsupported("cond", kind));
    }
    let target = C::broadcast_shape(&[a.shape(), b.shape(), l.shape(), e.shape(), t.shape()]);
    C::select(
        &a.conform_to(target)?,
        &b.conform_to(target)?,
        &l.conform_to(target)?,
        &e.conform_to(target)?,
        &t.conform_to(target)?,
    )
}

/// Apply an equal-shape operation after broadcasting both operands to their
/// common shape.
pub fn zip_conformed<C: Conform>(
    a: &C,
    b: &C,
    op: impl FnOnce(&C, &C) -> Result<C>,
) -> Result<C> {
    let target = C::broadcast_shape(&[a.shape(), b.shape()]);
    op(&a.conform_to(target)?, &b.conform_to(target)?)
}

pub fn add_conformed<C: Conform>(a: &C, b: &C) -> Result<C> {
    zip_conformed(a, b, |x, y| x.add(y))
}

pub fn sub_conformed<C: Conform>(a: &C, b: &C) -> Result<C> {
    zip_conformed(a, b, |x, y| x.sub(y))
}

pub fn mul_conformed<C: Conform>(a: &C, b: &C) -> Result<C> {
    zip_conformed(a, b, |x, y| x.mul(y))
}

pub fn divide_conformed<C: Conform>(a: &C, b: &C) -> Result<C> {
    zip_conformed(a, b, |x, y| x.divide(y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    fn v(xs: &[f64]) -> Vector<f64> {
        Vector::from_slice(xs)
    }

    fn m(rows: &[&[f64]]) -> Matrix<f64> {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_conform_vector() {
        let x = v(&[1.0, 2.0, 3.0]);
        assert_eq!(conform_vector_to(3, &x).unwrap(), x);
        assert_eq!(conform_vector_to(4, &v(&[2.0])).unwrap(), v(&[2.0; 4]));
        assert_eq!(
            conform_vector_to(4, &x).unwrap_err(),
            ContainerError::ShapeMismatch {
                op: "conform_vector_to",
                expected: "4".to_string(),
                actual: "3".to_string()
            }
        );
    }

    #[test]
    fn test_conform_matrix_cases() {
        let target = (2, 3);
        let s = Matrix::scalar(5.0);
        assert_eq!(
            conform_matrix_to(target, &s).unwrap(),
            Matrix::konst(5.0, target).unwrap()
        );

        let col = m(&[&[1.0], &[2.0]]);
        assert_eq!(
            conform_matrix_to(target, &col).unwrap(),
            m(&[&[1.0, 1.0, 1.0], &[2.0, 2.0, 2.0]])
        );

        let row = m(&[&[1.0, 2.0, 3.0]]);
        assert_eq!(
            conform_matrix_to(target, &row).unwrap(),
            m(&[&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]])
        );
    }

    #[test]
    fn test_conform_matrix_reports_shapes() {
        let bad = Matrix::konst(0.0, (3, 3)).unwrap();
        let err = conform_matrix_to((2, 3), &bad).unwrap_err();
        assert_eq!(
            err,
            ContainerError::ShapeMismatch {
                op: "conform_matrix_to",
                expected: "(2, 3)".to_string(),
                actual: "(3, 3)".to_string()
            }
        );
        // a row of the wrong width is not a broadcastable row
        let row = m(&[&[1.0, 2.0]]);
        assert!(conform_matrix_to((2, 3), &row).is_err());
    }

    #[test]
    fn test_cond_vector() {
        let out = cond(
            &v(&[1.0, 2.0, 3.0]),
            &v(&[2.0, 2.0, 2.0]),
            &v(&[-1.0, -1.0, -1.0]),
            &v(&[0.0, 0.0, 0.0]),
            &v(&[1.0, 1.0, 1.0]),
        )
        .unwrap();
        assert_eq!(out, v(&[-1.0, 0.0, 1.0]));
    }

    #[test]
    fn test_cond_vector_broadcasts_scalars() {
        let out = cond(
            &v(&[1.0, 2.0, 3.0]),
            &v(&[2.0]),
            &v(&[-1.0]),
            &v(&[0.0]),
            &v(&[10.0, 20.0, 30.0]),
        )
        .unwrap();
        assert_eq!(out, v(&[-1.0, 0.0, 30.0]));
    }

    #[test]
    fn test_cond_vector_mismatch_and_empty() {
        let err = cond(
            &v(&[1.0, 2.0, 3.0]),
            &v(&[1.0, 2.0]),
            &v(&[0.0]),
            &v(&[0.0]),
            &v(&[0.0]),
        )
        .unwrap_err();
        assert!(matches!(err, ContainerError::ShapeMismatch { .. }));

        let e = v(&[]);
        assert!(cond(&e, &e, &e, &e, &e).unwrap().is_empty());
    }

    #[test]
    fn test_cond_complex_unsupported() {
        let z = Vector::konst(Complex64::new(1.0, 0.0), 2).unwrap();
        assert!(matches!(
            cond(&z, &z, &z, &z, &z),
            Err(ContainerError::UnsupportedOperation { op: "cond", .. })
        ));
    }

    #[test]
    fn test_cond_matrix_broadcasts_rows_and_columns() {
        // a varies down the rows, b across the columns
        let a = m(&[&[1.0], &[2.0], &[3.0]]);
        let b = m(&[&[1.0, 2.0, 3.0]]);
        let lt = Matrix::scalar(-1.0);
        let eq = Matrix::scalar(0.0);
        let gt = Matrix::scalar(1.0);
        let out = cond(&a, &b, &lt, &eq, &gt).unwrap();
        assert_eq!(
            out,
            m(&[&[0.0, -1.0, -1.0], &[1.0, 0.0, -1.0], &[1.0, 1.0, 0.0]])
        );
    }

    #[test]
    fn test_zip_conformed() {
        let a = v(&[1.0, 2.0, 3.0]);
        assert_eq!(add_conformed(&a, &v(&[10.0])).unwrap(), v(&[11.0, 12.0, 13.0]));
        assert_eq!(sub_conformed(&v(&[10.0]), &a).unwrap(), v(&[9.0, 8.0, 7.0]));
        assert_eq!(mul_conformed(&a, &v(&[2.0])).unwrap(), v(&[2.0, 4.0, 6.0]));
        assert_eq!(divide_conformed(&a, &v(&[2.0])).unwrap(), v(&[0.5, 1.0, 1.5]));
        assert!(add_conformed(&a, &v(&[1.0, 2.0])).is_err());

        let col = m(&[&[1.0], &[2.0]]);
        let row = m(&[&[10.0, 20.0]]);
        assert_eq!(
            add_conformed(&col, &row).unwrap(),
            m(&[&[11.0, 21.0], &[12.0, 22.0]])
        );
    }
}
