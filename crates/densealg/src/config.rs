//! Process-wide defaults and tolerance-based comparison.
//!
//! [`Container::equal`] is exact. Callers that need tolerance use
//! [`approx_equal`], whose relative tolerance falls back to a global default
//! that can be changed at runtime.

use crate::container::Container;
use densealg_backend::BackendScalar;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

/// Error for invalid tolerance values.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
#[error("Invalid rtol value: {0}. rtol must be finite and non-negative.")]
pub struct InvalidRtolError(pub f64);

/// An f64 default with atomic access.
struct GlobalDefault {
    value: AtomicU64,
}

impl GlobalDefault {
    const fn new(initial: f64) -> Self {
        Self {
            value: AtomicU64::new(initial.to_bits()),
        }
    }

    fn get(&self) -> f64 {
        f64::from_bits(self.value.load(Ordering::Relaxed))
    }

    fn set(&self, value: f64) -> Result<(), InvalidRtolError> {
        if !value.is_finite() || value < 0.0 {
            return Err(InvalidRtolError(value));
        }
        self.value.store(value.to_bits(), Ordering::Relaxed);
        Ok(())
    }
}

static DEFAULT_APPROX_RTOL: GlobalDefault = GlobalDefault::new(1e-10);

/// Relative tolerance used by [`approx_equal`] when none is given.
pub fn default_approx_rtol() -> f64 {
    DEFAULT_APPROX_RTOL.get()
}

/// Change the relative tolerance used by [`approx_equal`] when none is given.
pub fn set_default_approx_rtol(rtol: f64) -> Result<(), InvalidRtolError> {
    DEFAULT_APPROX_RTOL.set(rtol)
}

/// Tolerances for [`approx_equal`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ApproxOptions {
    /// Relative tolerance; `None` uses [`default_approx_rtol`]
    pub rtol: Option<f64>,
    /// Absolute tolerance
    pub atol: f64,
}

impl ApproxOptions {
    /// Options with an explicit relative tolerance and no absolute tolerance.
    pub fn with_rtol(rtol: f64) -> Self {
        Self {
            rtol: Some(rtol),
            ..Self::default()
        }
    }

    /// Set the absolute tolerance.
    pub fn with_atol(mut self, atol: f64) -> Self {
        self.atol = atol;
        self
    }

    /// The explicit relative tolerance, or `default` if none was set.
    pub fn effective_rtol(&self, default: f64) -> f64 {
        self.rtol.unwrap_or(default)
    }
}

/// Equal shapes and `max|a - b| <= atol + rtol * max(|a|_inf, |b|_inf)`.
///
/// NaN anywhere makes the comparison fail.
pub fn approx_equal<C: Container>(a: &C, b: &C, opts: &ApproxOptions) -> bool {
    if a.shape() != b.shape() {
        return false;
    }
    let rtol = opts.effective_rtol(default_approx_rtol());
    let max_abs = |c: &C| {
        c.as_slice()
            .iter()
            .fold(0.0f64, |acc, &x| acc.max(x.abs_val()))
    };
    let scale = max_abs(a).max(max_abs(b));
    let bound = opts.atol + rtol * scale;
    a.as_slice()
        .iter()
        .zip(b.as_slice())
        .all(|(&x, &y)| (x - y).abs_val() <= bound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Matrix;
    use crate::vector::Vector;
    use num_complex::Complex64;

    #[test]
    fn test_global_default() {
        static TEST_DEFAULT: GlobalDefault = GlobalDefault::new(1e-12);

        assert!((TEST_DEFAULT.get() - 1e-12).abs() < 1e-20);
        TEST_DEFAULT.set(1e-8).unwrap();
        assert!((TEST_DEFAULT.get() - 1e-8).abs() < 1e-20);
    }

    #[test]
    fn test_invalid_values() {
        static TEST_DEFAULT: GlobalDefault = GlobalDefault::new(1e-12);

        assert!(TEST_DEFAULT.set(f64::NAN).is_err());
        assert!(TEST_DEFAULT.set(f64::INFINITY).is_err());
        assert_eq!(TEST_DEFAULT.set(-1.0), Err(InvalidRtolError(-1.0)));
        assert_eq!(TEST_DEFAULT.get(), 1e-12);
        let msg = InvalidRtolError(-1.0).to_string();
        assert!(msg.contains("rtol"));
        assert!(set_default_approx_rtol(-1.0).is_err());
    }

    #[test]
    fn test_approx_equal_vectors() {
        let a = Vector::from_vec(vec![1.0, 2.0, 3.0]);
        let b = Vector::from_vec(vec![1.0, 2.0, 3.0 + 1e-12]);
        assert!(approx_equal(&a, &b, &ApproxOptions::default()));
        assert!(!approx_equal(&a, &b, &ApproxOptions::with_rtol(0.0)));
        assert!(approx_equal(
            &a,
            &b,
            &ApproxOptions::with_rtol(0.0).with_atol(1e-9)
        ));
        let c = Vector::from_vec(vec![1.0, 2.0]);
        assert!(!approx_equal(&a, &c, &ApproxOptions::default()));
    }

    #[test]
    fn test_approx_equal_complex_matrix_and_nan() {
        let a = Matrix::konst(Complex64::new(1.0, 1.0), (2, 2)).unwrap();
        let b = a.add_constant(Complex64::new(0.0, 1e-13));
        assert!(approx_equal(&a, &b, &ApproxOptions::default()));
        assert!(!a.equal(&b));

        let n = Vector::from_vec(vec![f64::NAN]);
        assert!(!approx_equal(&n, &n, &ApproxOptions::default()));
    }

    #[test]
    fn test_effective_rtol() {
        assert_eq!(ApproxOptions::default().effective_rtol(0.25), 0.25);
        assert_eq!(ApproxOptions::with_rtol(1e-3).effective_rtol(0.25), 1e-3);
    }
}
