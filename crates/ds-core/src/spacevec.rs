//! Complex space vectors and three-phase transforms.
//!
//! Space vectors use the peak-value (amplitude-invariant) convention: the
//! magnitude of the vector equals the peak of the corresponding balanced
//! three-phase sinusoid. The real axis is aligned with phase a.

use crate::DsError;
use crate::numeric::Real;
use num_complex::Complex;

/// Complex space vector in stationary (stator) coordinates.
///
/// Real part = alpha (or d) component, imaginary part = beta (or q)
/// component. Field arithmetic comes from `num_complex`.
pub type SpaceVector = Complex<Real>;

/// Transform three phase quantities into a space vector.
///
/// Peak-value-scaled Clarke-style transform. Only two of the three phase
/// quantities are independent in the 2-D result; the zero-sequence
/// component is discarded, so the map is lossy for unbalanced input.
pub fn abc_to_space_vector(a: Real, b: Real, c: Real) -> SpaceVector {
    SpaceVector::new(2.0 / 3.0 * a - (b + c) / 3.0, (b - c) / Real::sqrt(3.0))
}

/// Transform a space vector back into three phase quantities.
///
/// Inverse of [`abc_to_space_vector`] for balanced triples (a + b + c = 0);
/// the reconstructed triple always sums to zero.
pub fn space_vector_to_abc(v: SpaceVector) -> (Real, Real, Real) {
    let sqrt3 = Real::sqrt(3.0);
    let a = v.re;
    let b = 0.5 * (-v.re + sqrt3 * v.im);
    let c = 0.5 * (-v.re - sqrt3 * v.im);
    (a, b, c)
}

/// Unit-magnitude rotation operator `e^(j*theta)`.
#[inline]
pub fn rotator(theta: Real) -> SpaceVector {
    SpaceVector::from_polar(1.0, theta)
}

/// Reject space vectors with a non-finite component.
pub fn ensure_finite_vector(v: SpaceVector, what: &'static str) -> Result<SpaceVector, DsError> {
    if v.is_finite() {
        Ok(v)
    } else {
        let value = if v.re.is_finite() { v.im } else { v.re };
        Err(DsError::NonFinite { what, value })
    }
}
