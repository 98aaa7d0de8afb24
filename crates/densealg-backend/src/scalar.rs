//! Scalar types accepted by dense storage and the native kernels.
//!
//! The backend works with exactly four element types: `f32`, `f64`,
//! `Complex32` and `Complex64`. Everything the kernels need from an element
//! (conjugation, magnitude, sampling, and faer's `ComplexField` for GEMM)
//! is collected in [`BackendScalar`].

use faer_traits::ComplexField;
use num_complex::{Complex32, Complex64};
use num_traits::{Float, One, Zero};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use std::fmt::Debug;

/// Scalar trait for dense storage and kernel operations.
pub trait BackendScalar:
    Clone
    + Copy
    + Debug
    + Default
    + PartialEq
    + Zero
    + One
    + std::ops::Add<Output = Self>
    + std::ops::Sub<Output = Self>
    + std::ops::Mul<Output = Self>
    + std::ops::Div<Output = Self>
    + std::ops::Neg<Output = Self>
    + ComplexField
    + Send
    + Sync
    + 'static
{
    /// Complex conjugate of the value.
    fn conj(self) -> Self;

    /// Square of the absolute value (for complex numbers, |z|^2).
    fn abs_sq(self) -> f64;

    /// Absolute value as f64.
    fn abs_val(self) -> f64 {
        self.abs_sq().sqrt()
    }

    /// Create from f64 value.
    fn from_f64(val: f64) -> Self;

    /// Check if value is NaN.
    fn is_nan(self) -> bool;

    /// Draw a value with every real channel from the standard normal distribution.
    fn sample_normal<R: Rng + ?Sized>(rng: &mut R) -> Self;

    /// Draw a value with every real channel uniform on `[0, 1)`.
    fn sample_uniform<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

impl BackendScalar for f64 {
    #[inline]
    fn conj(self) -> Self {
        self
    }

    #[inline]
    fn abs_sq(self) -> f64 {
        self * self
    }

    #[inline]
    fn abs_val(self) -> f64 {
        Float::abs(self)
    }

    #[inline]
    fn from_f64(val: f64) -> Self {
        val
    }

    #[inline]
    fn is_nan(self) -> bool {
        Float::is_nan(self)
    }

    fn sample_normal<R: Rng + ?Sized>(rng: &mut R) -> Self {
        StandardNormal.sample(rng)
    }

    fn sample_uniform<R: Rng + ?Sized>(rng: &mut R) -> Self {
        rng.random::<f64>()
    }
}

impl BackendScalar for f32 {
    #[inline]
    fn conj(self) -> Self {
        self
    }

    #[inline]
    fn abs_sq(self) -> f64 {
        (self * self) as f64
    }

    #[inline]
    fn abs_val(self) -> f64 {
        Float::abs(self) as f64
    }

    #[inline]
    fn from_f64(val: f64) -> Self {
        val as f32
    }

    #[inline]
    fn is_nan(self) -> bool {
        Float::is_nan(self)
    }

    fn sample_normal<R: Rng + ?Sized>(rng: &mut R) -> Self {
        StandardNormal.sample(rng)
    }

    fn sample_uniform<R: Rng + ?Sized>(rng: &mut R) -> Self {
        rng.random::<f32>()
    }
}

impl BackendScalar for Complex64 {
    #[inline]
    fn conj(self) -> Self {
        Complex64::conj(&self)
    }

    #[inline]
    fn abs_sq(self) -> f64 {
        self.norm_sqr()
    }

    #[inline]
    fn abs_val(self) -> f64 {
        self.norm()
    }

    #[inline]
    fn from_f64(val: f64) -> Self {
        Complex64::new(val, 0.0)
    }

    #[inline]
    fn is_nan(self) -> bool {
        self.re.is_nan() || self.im.is_nan()
    }

    fn sample_normal<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Complex64::new(StandardNormal.sample(rng), StandardNormal.sample(rng))
    }

    fn sample_uniform<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Complex64::new(rng.random::<f64>(), rng.random::<f64>())
    }
}

impl BackendScalar for Complex32 {
    #[inline]
    fn conj(self) -> Self {
        Complex32::conj(&self)
    }

    #[inline]
    fn abs_sq(self) -> f64 {
        self.norm_sqr() as f64
    }

    #[inline]
    fn abs_val(self) -> f64 {
        self.norm() as f64
    }

    #[inline]
    fn from_f64(val: f64) -> Self {
        Complex32::new(val as f32, 0.0)
    }

    #[inline]
    fn is_nan(self) -> bool {
        self.re.is_nan() || self.im.is_nan()
    }

    fn sample_normal<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Complex32::new(StandardNormal.sample(rng), StandardNormal.sample(rng))
    }

    fn sample_uniform<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Complex32::new(rng.random::<f32>(), rng.random::<f32>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_scalar_generic<T: BackendScalar>() {
        let one = T::from_f64(1.0);
        let two = T::from_f64(2.0);

        let sum = one + one;
        assert!((sum.abs_sq() - 4.0).abs() < 1e-6);

        // conj is the identity on the real axis
        let conj_two = two.conj();
        assert!((conj_two.abs_sq() - 4.0).abs() < 1e-6);

        assert!(!one.is_nan());
    }

    #[test]
    fn test_scalar_f64() {
        test_scalar_generic::<f64>();
    }

    #[test]
    fn test_scalar_f32() {
        test_scalar_generic::<f32>();
    }

    #[test]
    fn test_scalar_c64() {
        test_scalar_generic::<Complex64>();

        let z = Complex64::new(3.0, 4.0);
        assert!((z.abs_sq() - 25.0).abs() < 1e-10);
        assert!((z.abs_val() - 5.0).abs() < 1e-10);

        let z_conj = BackendScalar::conj(z);
        assert_eq!(z_conj, Complex64::new(3.0, -4.0));
    }

    #[test]
    fn test_scalar_c32() {
        test_scalar_generic::<Complex32>();
    }

    #[test]
    fn test_sample_uniform_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..100 {
            let x = f64::sample_uniform(&mut rng);
            assert!((0.0..1.0).contains(&x));
            let z = Complex32::sample_uniform(&mut rng);
            assert!((0.0..1.0).contains(&z.re));
            assert!((0.0..1.0).contains(&z.im));
        }
    }

    #[test]
    fn test_sample_normal_is_seeded() {
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);
        assert_eq!(
            Complex64::sample_normal(&mut a),
            Complex64::sample_normal(&mut b)
        );
    }
}
