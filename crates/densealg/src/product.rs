//! Matrix products and norms.
//!
//! Every product reduces to [`multiply`], which dispatches to the faer GEMM
//! kernel of the backend.

use crate::container::Container;
use crate::element::Element;
use crate::error::{ContainerError, Result};
use crate::matrix::Matrix;
use crate::vector::Vector;
use densealg_backend::kernels;
use num_traits::{Float, Zero};
use tracing::trace;

/// Matrix product `a * b`.
///
/// # Errors
/// Returns [`ContainerError::ShapeMismatch`] if `cols(a) != rows(b)`.
pub fn multiply<E: Element>(a: &Matrix<E>, b: &Matrix<E>) -> Result<Matrix<E>> {
    if a.cols() != b.rows() {
        return Err(ContainerError::shape_mismatch(
            "multiply",
            (a.cols(), b.cols()),
            b.shape(),
        ));
    }
    let (m, k, n) = (a.rows(), a.cols(), b.cols());
    let kind = E::KIND;
    trace!(%kind, m, k, n, "multiply");
    let c = kernels::gemm(a.as_slice(), m, k, b.as_slice(), n);
    Ok(Matrix::from_flat(m, n, Vector::from_vec(c)))
}

/// `a * v`, treating `v` as a column.
pub fn matrix_times_vector<E: Element>(a: &Matrix<E>, v: &Vector<E>) -> Result<Vector<E>> {
    Ok(multiply(a, &Matrix::as_column(v))?.flatten())
}

/// `v * a`, treating `v` as a row.
pub fn vector_times_matrix<E: Element>(v: &Vector<E>, a: &Matrix<E>) -> Result<Vector<E>> {
    Ok(multiply(&Matrix::as_row(v), a)?.flatten())
}

/// Outer product `u v^T` of shape `(len(u), len(v))`.
pub fn outer<E: Element>(u: &Vector<E>, v: &Vector<E>) -> Matrix<E> {
    let (m, n) = (u.len(), v.len());
    let c = kernels::gemm(u.as_slice(), m, 1, v.as_slice(), n);
    Matrix::from_flat(m, n, Vector::from_vec(c))
}

/// Kronecker product of shape `(rows(a) * rows(b), cols(a) * cols(b))`.
///
/// Row `i * cols(a) + j` of `outer(flatten(a), flatten(b))` holds the block
/// `a[i, j] * b`; the blocks are laid out in `rows(a)` block rows of
/// `cols(a)` blocks each.
pub fn kronecker<E: Element>(a: &Matrix<E>, b: &Matrix<E>) -> Result<Matrix<E>> {
    let (ra, ca) = a.shape();
    let (rb, cb) = b.shape();
    let overflow = || ContainerError::InvalidSize {
        reason: format!("kronecker of {:?} and {:?} overflows usize", a.shape(), b.shape()),
    };
    let rows = ra.checked_mul(rb).ok_or_else(overflow)?;
    let cols = ca.checked_mul(cb).ok_or_else(overflow)?;

    let blocks = outer(&a.flatten(), &b.flatten());
    let block_data = blocks.as_slice();
    let width = rb * cb;
    Matrix::build((rows, cols), |(r, c)| {
        let (i, k) = (r / rb, r % rb);
        let (j, l) = (c / cb, c % cb);
        block_data[(i * ca + j) * width + k * cb + l]
    })
}

/// Unconjugated inner product.
pub fn dot<E: Element>(u: &Vector<E>, v: &Vector<E>) -> Result<E> {
    check_same_len(u, v, "dot")?;
    Ok(kernels::dot(u.as_slice(), v.as_slice()))
}

/// Inner product conjugating the left operand.
pub fn dot_conj<E: Element>(u: &Vector<E>, v: &Vector<E>) -> Result<E> {
    check_same_len(u, v, "dot_conj")?;
    Ok(kernels::dot_conj(u.as_slice(), v.as_slice()))
}

fn check_same_len<E: Element>(u: &Vector<E>, v: &Vector<E>, op: &'static str) -> Result<()> {
    if u.len() == v.len() {
        Ok(())
    } else {
        Err(ContainerError::shape_mismatch(op, u.len(), v.len()))
    }
}

/// Sum of magnitudes.
pub fn norm1<E: Element>(v: &Vector<E>) -> E::RealOf {
    v.iter()
        .fold(<E::RealOf as Zero>::zero(), |acc, &x| acc + x.magnitude())
}

/// Euclidean norm.
pub fn norm2<E: Element>(v: &Vector<E>) -> E::RealOf {
    let sq = v.iter().fold(<E::RealOf as Zero>::zero(), |acc, &x| {
        let a = x.magnitude();
        acc + a * a
    });
    Float::sqrt(sq)
}

/// Largest magnitude; zero for an empty vector, NaN if any magnitude is NaN.
pub fn norm_inf<E: Element>(v: &Vector<E>) -> E::RealOf {
    v.iter().fold(<E::RealOf as Zero>::zero(), |acc, &x| {
        let m = x.magnitude();
        // once acc is NaN no comparison succeeds, so it stays NaN
        if Float::is_nan(m) || m > acc {
            m
        } else {
            acc
        }
    })
}

/// Sum of `|re| + |im|` over all elements.
pub fn abs_sum<E: Element>(v: &Vector<E>) -> E::RealOf {
    v.iter().fold(<E::RealOf as Zero>::zero(), |acc, &x| {
        acc + Float::abs(x.re()) + Float::abs(x.im())
    })
}

/// Frobenius norm.
pub fn norm_frob<E: Element>(m: &Matrix<E>) -> E::RealOf {
    norm2(&m.flatten())
}

/// Product of a chain of matrices, associated to minimise the number of
/// scalar multiplications.
///
/// # Errors
/// - [`ContainerError::EmptyContainer`] for an empty chain.
/// - [`ContainerError::ShapeMismatch`] if neighbouring dimensions disagree.
pub fn optimise_mult<E: Element>(chain: &[Matrix<E>]) -> Result<Matrix<E>> {
    let Some(first) = chain.first() else {
        return Err(ContainerError::EmptyContainer {
            op: "optimise_mult",
        });
    };
    let n = chain.len();

    // dims[i] x dims[i + 1] is the shape of chain[i]
    let mut dims = Vec::with_capacity(n + 1);
    dims.push(first.rows());
    for (i, m) in chain.iter().enumerate() {
        if m.rows() != dims[i] {
            return Err(ContainerError::shape_mismatch(
                "optimise_mult",
                (dims[i], m.cols()),
                m.shape(),
            ));
        }
        dims.push(m.cols());
    }

    let mut cost = vec![vec![0u128; n]; n];
    let mut split = vec![vec![0usize; n]; n];
    for len in 2..=n {
        for i in 0..=n - len {
            let j = i + len - 1;
            cost[i][j] = u128::MAX;
            for s in i..j {
                let step = (dims[i] as u128)
                    .saturating_mul(dims[s + 1] as u128)
                    .saturating_mul(dims[j + 1] as u128);
                let c = cost[i][s].saturating_add(cost[s + 1][j]).saturating_add(step);
                if c < cost[i][j] {
                    cost[i][j] = c;
                    split[i][j] = s;
                }
            }
        }
    }
    let best = cost[0][n - 1];
    trace!(n, %best, "matrix chain order");

    multiply_chain(chain, &split, 0, n - 1)
}

fn multiply_chain<E: Element>(
    chain: &[Matrix<E>],
    split: &[Vec<usize>],
    i: usize,
    j: usize,
) -> Result<Matrix<E>> {
    if i == j {
        return Ok(chain[i].clone());
    }
    let s = split[i][j];
    let left = multiply_chain(chain, split, i, s)?;
    let right = multiply_chain(chain, split, s + 1, j)?;
    multiply(&left, &right)
}
