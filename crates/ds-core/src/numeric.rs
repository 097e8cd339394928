use crate::DsError;
use num_complex::Complex;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// Complex counterpart of [`nearly_equal`]: the magnitude of the
/// difference is compared against the larger operand magnitude.
pub fn nearly_equal_vector(a: Complex<Real>, b: Complex<Real>, tol: Tolerances) -> bool {
    let diff = (a - b).norm();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.norm().max(b.norm())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, DsError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(DsError::NonFinite { what, value: v })
    }
}
