//! Shared validation helpers for plant model construction.

use crate::error::{PlantError, PlantResult};
use ds_core::Real;

/// Require a strictly positive, finite configuration value.
pub(crate) fn require_positive(v: Real, what: &'static str) -> PlantResult<Real> {
    if !v.is_finite() {
        return Err(PlantError::NonFinite { what, value: v });
    }
    if v <= 0.0 {
        return Err(PlantError::InvalidArg { what });
    }
    Ok(v)
}
