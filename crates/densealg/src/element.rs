//! Element kinds and their primitive operation tables.
//!
//! The element set is closed: `f32`, `f64`, `Complex32` and `Complex64`.
//! Each kind implements [`Element`], whose associated functions are the
//! per-kind table every container operation is written against. The kind
//! families (real-of, complex-of, single-of, double-of) are associated types,
//! so a request for e.g. the real counterpart of `Complex64` resolves to `f64`
//! at compile time.
//!
//! Ordering-based operations (`step`, `cond`, `arctan2`) exist only for real
//! kinds; the complex tables report [`ContainerError::UnsupportedOperation`].

use crate::error::{ContainerError, Result};
use densealg_backend::{kernels, BackendScalar};
use num_complex::{Complex, Complex32, Complex64};
use num_traits::{Float, Zero};
use std::fmt;

/// Runtime tag of an element kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Single-precision real
    F32,
    /// Double-precision real
    F64,
    /// Single-precision complex
    C32,
    /// Double-precision complex
    C64,
}

impl ElementKind {
    /// All four kinds.
    pub const ALL: [ElementKind; 4] = [Self::F32, Self::F64, Self::C32, Self::C64];

    /// Whether the kind has an imaginary channel.
    pub fn is_complex(self) -> bool {
        matches!(self, Self::C32 | Self::C64)
    }

    /// Real counterpart (itself for real kinds).
    pub fn real(self) -> Self {
        match self {
            Self::C32 => Self::F32,
            Self::C64 => Self::F64,
            k => k,
        }
    }

    /// Complex counterpart (itself for complex kinds).
    pub fn complex(self) -> Self {
        match self {
            Self::F32 => Self::C32,
            Self::F64 => Self::C64,
            k => k,
        }
    }

    /// Single-precision counterpart.
    pub fn single(self) -> Self {
        match self {
            Self::F64 => Self::F32,
            Self::C64 => Self::C32,
            k => k,
        }
    }

    /// Double-precision counterpart.
    pub fn double(self) -> Self {
        match self {
            Self::F32 => Self::F64,
            Self::C32 => Self::C64,
            k => k,
        }
    }

    /// Display name, e.g. `"complex64"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::F32 => "float32",
            Self::F64 => "float64",
            Self::C32 => "complex32",
            Self::C64 => "complex64",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Elementwise transcendental and sign functions accepted by `map_fn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryFn {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Asinh,
    Acosh,
    Atanh,
    Exp,
    /// Natural logarithm
    Ln,
    Sqrt,
    /// Absolute value; `(|z|, 0)` for complex kinds
    Abs,
    /// Sign; `z / |z|` for complex kinds, zero stays zero
    Signum,
    Recip,
    Neg,
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for f32 {}
    impl Sealed for f64 {}
    impl Sealed for super::Complex32 {}
    impl Sealed for super::Complex64 {}
}

/// A supported element kind together with its primitive operation table.
///
/// Slice functions assume equal-length operands; containers check shapes
/// before calling them.
pub trait Element: BackendScalar + fmt::Display + sealed::Sealed {
    /// Real counterpart
    type RealOf: RealElement;
    /// Complex counterpart, sharing this kind's real counterpart
    type ComplexOf: Element<RealOf = Self::RealOf>;
    /// Single-precision counterpart
    type SingleOf: Element;
    /// Double-precision counterpart, sharing this kind's single counterpart
    type DoubleOf: Element<SingleOf = Self::SingleOf>;

    const KIND: ElementKind;

    /// Real part.
    fn re(self) -> Self::RealOf;
    /// Imaginary part (zero for real kinds).
    fn im(self) -> Self::RealOf;
    /// Embed a real value.
    fn from_real(re: Self::RealOf) -> Self;
    fn to_complex(self) -> Self::ComplexOf;
    fn to_single(self) -> Self::SingleOf;
    fn to_double(self) -> Self::DoubleOf;
    /// `|x|`, or the modulus for complex kinds.
    fn magnitude(self) -> Self::RealOf;
    /// Key used for extremal search: the value itself for real kinds, the
    /// real channel of `z * conj(z)` for complex kinds.
    fn order_key(self) -> Self::RealOf;
    fn apply(self, f: UnaryFn) -> Self;

    fn scale(e: Self, v: &[Self]) -> Vec<Self> {
        kernels::map(v, |x| e * x)
    }

    /// `e / v[i]` for every element.
    fn scale_recip(e: Self, v: &[Self]) -> Vec<Self> {
        kernels::map(v, |x| e / x)
    }

    fn add_constant(e: Self, v: &[Self]) -> Vec<Self> {
        kernels::map(v, |x| e + x)
    }

    fn zip_add(v: &[Self], w: &[Self]) -> Vec<Self> {
        kernels::zip_map(v, w, |x, y| x + y)
    }

    fn zip_sub(v: &[Self], w: &[Self]) -> Vec<Self> {
        kernels::zip_map(v, w, |x, y| x - y)
    }

    fn zip_mul(v: &[Self], w: &[Self]) -> Vec<Self> {
        kernels::zip_map(v, w, |x, y| x * y)
    }

    fn zip_div(v: &[Self], w: &[Self]) -> Vec<Self> {
        kernels::zip_map(v, w, |x, y| x / y)
    }

    fn sum_elements(v: &[Self]) -> Self {
        kernels::sum(v)
    }

    fn prod_elements(v: &[Self]) -> Self {
        kernels::product(v)
    }

    fn min_index(v: &[Self]) -> Option<usize> {
        kernels::argmin_by(v, |x| x.order_key())
    }

    fn max_index(v: &[Self]) -> Option<usize> {
        kernels::argmax_by(v, |x| x.order_key())
    }

    fn conj_all(v: &[Self]) -> Vec<Self> {
        kernels::map(v, <Self as BackendScalar>::conj)
    }

    fn map_fn(f: UnaryFn, v: &[Self]) -> Vec<Self> {
        kernels::map(v, |x| x.apply(f))
    }

    /// Same length and every difference exactly zero in magnitude.
    fn equal(u: &[Self], v: &[Self]) -> bool {
        let zero = <Self::RealOf as Zero>::zero();
        u.len() == v.len()
            && u
                .iter()
                .zip(v.iter())
                .all(|(&x, &y)| (x - y).magnitude() == zero)
    }

    /// 1 where `x > 0`, else 0.
    fn step(v: &[Self]) -> Result<Vec<Self>>;

    /// `l` where `a < b`, `e` where `a == b`, `t` otherwise.
    fn cond(a: &[Self], b: &[Self], l: &[Self], e: &[Self], t: &[Self]) -> Result<Vec<Self>>;

    /// Four-quadrant `atan2(y, x)`.
    fn arctan2(y: &[Self], x: &[Self]) -> Result<Vec<Self>>;
}

/// Real element kinds.
pub trait RealElement: Element<RealOf = Self> + Float {
    /// Build the complex counterpart from real and imaginary parts.
    fn into_complex(re: Self, im: Self) -> Self::ComplexOf;
}

fn real_step<R: Float>(x: R) -> R {
    if x > R::zero() {
        R::one()
    } else {
        R::zero()
    }
}

fn real_cond<R: Float>(a: &[R], b: &[R], l: &[R], e: &[R], t: &[R]) -> Vec<R> {
    (0..a.len())
        .map(|i| {
            if a[i] < b[i] {
                l[i]
            } else if a[i] == b[i] {
                e[i]
            } else {
                t[i]
            }
        })
        .collect()
}

fn apply_real<R: Float>(x: R, f: UnaryFn) -> R {
    match f {
        UnaryFn::Sin => x.sin(),
        UnaryFn::Cos => x.cos(),
        UnaryFn::Tan => x.tan(),
        UnaryFn::Asin => x.asin(),
        UnaryFn::Acos => x.acos(),
        UnaryFn::Atan => x.atan(),
        UnaryFn::Sinh => x.sinh(),
        UnaryFn::Cosh => x.cosh(),
        UnaryFn::Tanh => x.tanh(),
        UnaryFn::Asinh => x.asinh(),
        UnaryFn::Acosh => x.acosh(),
        UnaryFn::Atanh => x.atanh(),
        UnaryFn::Exp => x.exp(),
        UnaryFn::Ln => x.ln(),
        UnaryFn::Sqrt => x.sqrt(),
        UnaryFn::Abs => x.abs(),
        UnaryFn::Signum => {
            if x > R::zero() {
                R::one()
            } else if x < R::zero() {
                -R::one()
            } else {
                x
            }
        }
        UnaryFn::Recip => x.recip(),
        UnaryFn::Neg => -x,
    }
}

fn apply_complex<R: Float>(z: Complex<R>, f: UnaryFn) -> Complex<R> {
    match f {
        UnaryFn::Sin => z.sin(),
        UnaryFn::Cos => z.cos(),
        UnaryFn::Tan => z.tan(),
        UnaryFn::Asin => z.asin(),
        UnaryFn::Acos => z.acos(),
        UnaryFn::Atan => z.atan(),
        UnaryFn::Sinh => z.sinh(),
        UnaryFn::Cosh => z.cosh(),
        UnaryFn::Tanh => z.tanh(),
        UnaryFn::Asinh => z.asinh(),
        UnaryFn::Acosh => z.acosh(),
        UnaryFn::Atanh => z.atanh(),
        UnaryFn::Exp => z.exp(),
        UnaryFn::Ln => z.ln(),
        UnaryFn::Sqrt => z.sqrt(),
        UnaryFn::Abs => Complex::new(z.norm(), R::zero()),
        UnaryFn::Signum => {
            let n = z.norm();
            if n == R::zero() {
                Complex::new(R::zero(), R::zero())
            } else {
                z.unscale(n)
            }
        }
        UnaryFn::Recip => z.inv(),
        UnaryFn::Neg => -z,
    }
}

macro_rules! impl_real_element {
    ($t:ty, $complex:ty, $single:ty, $double:ty, $kind:ident) => {
        impl Element for $t {
            type RealOf = $t;
            type ComplexOf = $complex;
            type SingleOf = $single;
            type DoubleOf = $double;

            const KIND: ElementKind = ElementKind::$kind;

            #[inline]
            fn re(self) -> $t {
                self
            }

            #[inline]
            fn im(self) -> $t {
                0.0
            }

            #[inline]
            fn from_real(re: $t) -> Self {
                re
            }

            #[inline]
            fn to_complex(self) -> $complex {
                Complex::new(self, 0.0)
            }

            #[inline]
            fn to_single(self) -> $single {
                self as $single
            }

            #[inline]
            fn to_double(self) -> $double {
                self as $double
            }

            #[inline]
            fn magnitude(self) -> $t {
                self.abs()
            }

            #[inline]
            fn order_key(self) -> $t {
                self
            }

            fn apply(self, f: UnaryFn) -> Self {
                apply_real(self, f)
            }

            fn step(v: &[Self]) -> Result<Vec<Self>> {
                Ok(kernels::map(v, real_step::<$t>))
            }

            fn cond(
                a: &[Self],
                b: &[Self],
                l: &[Self],
                e: &[Self],
                t: &[Self],
            ) -> Result<Vec<Self>> {
                Ok(real_cond(a, b, l, e, t))
            }

            fn arctan2(y: &[Self], x: &[Self]) -> Result<Vec<Self>> {
                Ok(kernels::zip_map(y, x, <$t as Float>::atan2))
            }
        }

        impl RealElement for $t {
            fn into_complex(re: Self, im: Self) -> $complex {
                Complex::new(re, im)
            }
        }
    };
}

macro_rules! impl_complex_element {
    ($t:ty, $real:ty, $single:ty, $sreal:ty, $double:ty, $dreal:ty, $kind:ident) => {
        impl Element for $t {
            type RealOf = $real;
            type ComplexOf = $t;
            type SingleOf = $single;
            type DoubleOf = $double;

            const KIND: ElementKind = ElementKind::$kind;

            #[inline]
            fn re(self) -> $real {
                self.re
            }

            #[inline]
            fn im(self) -> $real {
                self.im
            }

            #[inline]
            fn from_real(re: $real) -> Self {
                Complex::new(re, 0.0)
            }

            #[inline]
            fn to_complex(self) -> $t {
                self
            }

            #[inline]
            fn to_single(self) -> $single {
                Complex::new(self.re as $sreal, self.im as $sreal)
            }

            #[inline]
            fn to_double(self) -> $double {
                Complex::new(self.re as $dreal, self.im as $dreal)
            }

            #[inline]
            fn magnitude(self) -> $real {
                self.norm()
            }

            #[inline]
            fn order_key(self) -> $real {
                (self * self.conj()).re
            }

            fn apply(self, f: UnaryFn) -> Self {
                apply_complex(self, f)
            }

            fn step(_v: &[Self]) -> Result<Vec<Self>> {
                Err(ContainerError::unsupported("step", Self::KIND))
            }

            fn cond(
                _a: &[Self],
                _b: &[Self],
                _l: &[Self],
                _e: &[Self],
                _t: &[Self],
            ) -> Result<Vec<Self>> {
                Err(ContainerError::unsupported("cond", Self::KIND))
            }

            fn arctan2(_y: &[Self], _x: &[Self]) -> Result<Vec<Self>> {
                Err(ContainerError::unsupported("arctan2", Self::KIND))
            }
        }
    };
}

impl_real_element!(f32, Complex32, f32, f64, F32);
impl_real_element!(f64, Complex64, f32, f64, F64);
impl_complex_element!(Complex32, f32, Complex32, f32, Complex64, f64, C32);
impl_complex_element!(Complex64, f64, Complex32, f32, Complex64, f64, C64);

/// Generate `_f32`, `_f64`, `_c32` and `_c64` test variants from a generic test function.
///
/// # Example
///
/// ```ignore
/// fn test_operation_generic<E: Element>() {
///     // test implementation
/// }
///
/// densealg::element_tests!(test_operation, test_operation_generic);
/// // Generates:
/// // #[test] fn test_operation_f32() { test_operation_generic::<f32>(); }
/// // ...
/// // #[test] fn test_operation_c64() { test_operation_generic::<Complex64>(); }
/// ```
#[macro_export]
macro_rules! element_tests {
    ($name:ident, $test_fn:ident) => {
        paste::paste! {
            #[test]
            fn [<$name _f32>]() {
                $test_fn::<f32>();
            }

            #[test]
            fn [<$name _f64>]() {
                $test_fn::<f64>();
            }

            #[test]
            fn [<$name _c32>]() {
                $test_fn::<num_complex::Complex32>();
            }

            #[test]
            fn [<$name _c64>]() {
                $test_fn::<num_complex::Complex64>();
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_kind_families<E: Element>() {
        assert_eq!(<E::RealOf as Element>::KIND, E::KIND.real());
        assert_eq!(<E::ComplexOf as Element>::KIND, E::KIND.complex());
        assert_eq!(<E::SingleOf as Element>::KIND, E::KIND.single());
        assert_eq!(<E::DoubleOf as Element>::KIND, E::KIND.double());
        assert_eq!(E::KIND.complex().real(), E::KIND.real());
        assert_eq!(E::KIND.double().single(), E::KIND.single());
    }

    crate::element_tests!(test_kind_families, check_kind_families);

    fn check_table_arithmetic<E: Element>() {
        let v: Vec<E> = [1.0, 2.0, 4.0].iter().map(|&x| E::from_f64(x)).collect();
        let two = E::from_f64(2.0);
        assert_eq!(E::scale(two, &v), vec![E::from_f64(2.0), E::from_f64(4.0), E::from_f64(8.0)]);
        assert_eq!(
            E::scale_recip(E::from_f64(8.0), &v),
            vec![E::from_f64(8.0), E::from_f64(4.0), E::from_f64(2.0)]
        );
        assert_eq!(E::add_constant(two, &v)[2], E::from_f64(6.0));
        assert_eq!(E::zip_sub(&v, &v), vec![<E as Zero>::zero(); 3]);
        assert_eq!(E::zip_div(&v, &v), vec![<E as num_traits::One>::one(); 3]);
        assert_eq!(E::sum_elements(&v), E::from_f64(7.0));
        assert_eq!(E::prod_elements(&v), E::from_f64(8.0));
        assert_eq!(E::min_index(&v), Some(0));
        assert_eq!(E::max_index(&v), Some(2));
        assert!(E::equal(&v, &v));
        assert!(!E::equal(&v, &v[..2]));
    }

    crate::element_tests!(test_table_arithmetic, check_table_arithmetic);

    #[test]
    fn test_complex_extremal_uses_modulus() {
        let v = [
            Complex64::new(0.0, -3.0),
            Complex64::new(1.0, 1.0),
            Complex64::new(2.0, 0.0),
        ];
        assert_eq!(Complex64::max_index(&v), Some(0));
        assert_eq!(Complex64::min_index(&v), Some(1));
    }

    #[test]
    fn test_ordering_ops_rejected_for_complex() {
        let v = [Complex32::new(1.0, 0.0)];
        assert_eq!(
            Complex32::step(&v),
            Err(ContainerError::unsupported("step", ElementKind::C32))
        );
        assert!(matches!(
            Complex64::cond(&[], &[], &[], &[], &[]),
            Err(ContainerError::UnsupportedOperation { op: "cond", .. })
        ));
        assert!(Complex64::arctan2(&[], &[]).is_err());
    }

    #[test]
    fn test_real_step_and_cond() {
        assert_eq!(f64::step(&[-1.0, 0.0, 2.5]).unwrap(), vec![0.0, 0.0, 1.0]);
        let out = f32::cond(
            &[1.0, 2.0, 3.0],
            &[2.0, 2.0, 2.0],
            &[-1.0, -1.0, -1.0],
            &[0.0, 0.0, 0.0],
            &[1.0, 1.0, 1.0],
        )
        .unwrap();
        assert_eq!(out, vec![-1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_equal_is_exact() {
        assert!(!f64::equal(&[1.0], &[1.0 + 1e-15]));
        assert!(!f64::equal(&[f64::NAN], &[f64::NAN]));
        assert!(Complex64::equal(
            &[Complex64::new(1.0, 2.0)],
            &[Complex64::new(1.0, 2.0)]
        ));
    }

    #[test]
    fn test_signum_and_abs() {
        let out = f64::map_fn(UnaryFn::Signum, &[-2.0, 0.0, 3.0]);
        assert_eq!(out, vec![-1.0, 0.0, 1.0]);
        let z = Complex64::new(3.0, 4.0).apply(UnaryFn::Signum);
        assert!((z.re - 0.6).abs() < 1e-12 && (z.im - 0.8).abs() < 1e-12);
        assert_eq!(
            Complex64::new(3.0, 4.0).apply(UnaryFn::Abs),
            Complex64::new(5.0, 0.0)
        );
        assert_eq!(Complex64::zero().apply(UnaryFn::Signum), Complex64::zero());
    }

    #[test]
    fn test_precision_conversions() {
        assert_eq!(1.5f64.to_single(), 1.5f32);
        assert_eq!(Complex32::new(1.0, -2.0).to_double(), Complex64::new(1.0, -2.0));
        assert_eq!(2.0f32.to_complex(), Complex32::new(2.0, 0.0));
        assert_eq!(Complex64::new(1.0, -2.0).im(), -2.0);
        assert_eq!(f64::into_complex(1.0, 2.0), Complex64::new(1.0, 2.0));
    }
}
