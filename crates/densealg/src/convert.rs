//! Shape-preserving conversions between element kinds.
//!
//! The target kinds follow the families on [`Element`]: e.g. `double` on a
//! `Vector<Complex32>` yields a `Vector<Complex64>`.

use crate::container::Container;
use crate::element::{Element, RealElement};
use crate::error::Result;

type RealOf<C> = <<C as Container>::Elem as Element>::RealOf;
type ComplexOf<C> = <<C as Container>::Elem as Element>::ComplexOf;
type SingleOf<C> = <<C as Container>::Elem as Element>::SingleOf;
type DoubleOf<C> = <<C as Container>::Elem as Element>::DoubleOf;

/// Embed a real container into kind `E` (real or complex).
///
/// ```
/// use densealg::convert::real;
/// use densealg::prelude::*;
/// use num_complex::Complex64;
///
/// let v = Vector::from_vec(vec![1.0, 2.0]);
/// let z: Vector<Complex64> = real::<Complex64, _>(&v);
/// assert_eq!(z.as_slice()[1], Complex64::new(2.0, 0.0));
/// ```
pub fn real<E, C>(c: &C) -> C::Of<E>
where
    E: Element,
    C: Container<Elem = E::RealOf>,
{
    c.cmap(E::from_real)
}

/// Convert to the complex counterpart kind.
pub fn complex<C: Container>(c: &C) -> C::Of<ComplexOf<C>> {
    c.cmap(<C::Elem as Element>::to_complex)
}

/// Convert to single precision.
pub fn single<C: Container>(c: &C) -> C::Of<SingleOf<C>> {
    c.cmap(<C::Elem as Element>::to_single)
}

/// Convert to double precision.
pub fn double<C: Container>(c: &C) -> C::Of<DoubleOf<C>> {
    c.cmap(<C::Elem as Element>::to_double)
}

/// Combine equally shaped real and imaginary parts into a complex container.
///
/// # Errors
/// Returns [`ContainerError::ShapeMismatch`](crate::ContainerError::ShapeMismatch)
/// if the shapes differ.
pub fn to_complex<C>(re: &C, im: &C) -> Result<C::Of<ComplexOf<C>>>
where
    C: Container,
    C::Elem: RealElement,
{
    re.zip_with(im, "to_complex", <C::Elem as RealElement>::into_complex)
}

/// Split into real and imaginary parts.
pub fn from_complex<C: Container>(z: &C) -> (C::Of<RealOf<C>>, C::Of<RealOf<C>>) {
    (
        z.cmap(<C::Elem as Element>::re),
        z.cmap(<C::Elem as Element>::im),
    )
}
