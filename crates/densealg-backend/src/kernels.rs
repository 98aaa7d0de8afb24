//! Native slice kernels shared by every element type.
//!
//! These are the loops the container layer lowers its operations onto:
//! elementwise maps, reductions, index search and the faer-backed GEMM used
//! by the product layer. Nothing here knows about shapes beyond the
//! `m`, `k`, `n` triple passed to [`gemm`].

use crate::scalar::BackendScalar;
use faer::linalg::matmul::matmul as faer_matmul;
use faer::{Accum, Par};

/// Apply `f` to every element.
pub fn map<T: Copy, U>(xs: &[T], f: impl Fn(T) -> U) -> Vec<U> {
    xs.iter().map(|&x| f(x)).collect()
}

/// Combine two equally long slices pointwise.
///
/// # Panics
/// Panics if the slices differ in length. Callers check conformance first.
pub fn zip_map<T: Copy, U: Copy, V>(a: &[T], b: &[U], f: impl Fn(T, U) -> V) -> Vec<V> {
    assert_eq!(a.len(), b.len(), "zip_map: length mismatch");
    a.iter().zip(b.iter()).map(|(&x, &y)| f(x, y)).collect()
}

/// Sum of all elements; zero for an empty slice.
pub fn sum<T: BackendScalar>(xs: &[T]) -> T {
    xs.iter().fold(T::zero(), |acc, &x| acc + x)
}

/// Product of all elements; one for an empty slice.
pub fn product<T: BackendScalar>(xs: &[T]) -> T {
    xs.iter().fold(T::one(), |acc, &x| acc * x)
}

/// Unconjugated inner product `sum a[i] * b[i]`.
///
/// # Panics
/// Panics if the slices differ in length.
pub fn dot<T: BackendScalar>(a: &[T], b: &[T]) -> T {
    assert_eq!(a.len(), b.len(), "dot: length mismatch");
    a.iter()
        .zip(b.iter())
        .fold(T::zero(), |acc, (&x, &y)| acc + x * y)
}

/// Hermitian inner product `sum conj(a[i]) * b[i]`.
///
/// # Panics
/// Panics if the slices differ in length.
pub fn dot_conj<T: BackendScalar>(a: &[T], b: &[T]) -> T {
    assert_eq!(a.len(), b.len(), "dot_conj: length mismatch");
    a.iter()
        .zip(b.iter())
        .fold(T::zero(), |acc, (&x, &y)| acc + BackendScalar::conj(x) * y)
}

/// Index of the smallest key. The first occurrence wins ties and NaN keys
/// never win. Returns `None` when the slice is empty or every key is NaN.
pub fn argmin_by<T, K: PartialOrd>(xs: &[T], key: impl Fn(&T) -> K) -> Option<usize> {
    search_by(xs, key, |cand, best| cand < best)
}

/// Index of the largest key. The first occurrence wins ties and NaN keys
/// never win. Returns `None` when the slice is empty or every key is NaN.
pub fn argmax_by<T, K: PartialOrd>(xs: &[T], key: impl Fn(&T) -> K) -> Option<usize> {
    search_by(xs, key, |cand, best| cand > best)
}

fn search_by<T, K: PartialOrd>(
    xs: &[T],
    key: impl Fn(&T) -> K,
    better: impl Fn(&K, &K) -> bool,
) -> Option<usize> {
    let mut best: Option<(usize, K)> = None;
    for (i, x) in xs.iter().enumerate() {
        let k = key(x);
        // unordered against itself means NaN
        if k.partial_cmp(&k).is_none() {
            continue;
        }
        match &best {
            Some((_, b)) if !better(&k, b) => {}
            _ => best = Some((i, k)),
        }
    }
    best.map(|(i, _)| i)
}

/// Row-major GEMM: `C[m, n] = A[m, k] * B[k, n]`.
///
/// `a` holds `m * k` elements and `b` holds `k * n` elements, both row-major.
///
/// # Panics
/// Panics if the slice lengths disagree with the dimensions.
pub fn gemm<T: BackendScalar>(a: &[T], m: usize, k: usize, b: &[T], n: usize) -> Vec<T> {
    assert_eq!(a.len(), m * k, "gemm: lhs has {} elements, expected {}x{}", a.len(), m, k);
    assert_eq!(b.len(), k * n, "gemm: rhs has {} elements, expected {}x{}", b.len(), k, n);
    tracing::trace!(m, k, n, "gemm");

    let mut c = vec![T::zero(); m * n];
    if m == 0 || n == 0 || k == 0 {
        return c;
    }

    // Row-major views: row stride is the column count, column stride is 1.
    let a_mat = unsafe { faer::MatRef::from_raw_parts(a.as_ptr(), m, k, k as isize, 1) };
    let b_mat = unsafe { faer::MatRef::from_raw_parts(b.as_ptr(), k, n, n as isize, 1) };
    let mut c_mat =
        unsafe { faer::MatMut::from_raw_parts_mut(c.as_mut_ptr(), m, n, n as isize, 1) };

    faer_matmul(&mut c_mat, Accum::Replace, a_mat, b_mat, T::one(), Par::Seq);

    c
}
