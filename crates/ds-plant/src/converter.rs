//! Ideal switching converter model.

use crate::common::require_positive;
use crate::error::PlantResult;
use ds_core::{Real, SpaceVector};

/// Voltage-source converter with an ideal, infinitely stiff DC bus.
///
/// The converter is a stateless algebraic map: the AC-side voltage is the
/// normalized switching vector scaled by the bus voltage, and the DC-side
/// current follows from power balance under the peak-value space-vector
/// convention (hence the 1.5 factor).
#[derive(Clone, Copy, Debug)]
pub struct Converter {
    /// DC-bus voltage (V)
    u_dc: Real,
}

impl Converter {
    /// Create a converter with a constant bus voltage.
    ///
    /// # Errors
    /// Returns an error if `u_dc` is non-finite or not positive.
    pub fn new(u_dc: Real) -> PlantResult<Self> {
        let u_dc = require_positive(u_dc, "DC-bus voltage must be positive")?;
        Ok(Self { u_dc })
    }

    /// Configured DC-bus voltage (V).
    pub fn u_dc(&self) -> Real {
        self.u_dc
    }

    /// AC-side voltage vector for a switching state.
    ///
    /// No clamping is applied; keeping `|q|` within the realizable range is
    /// the caller's contract.
    #[inline]
    pub fn ac_voltage(q: SpaceVector, u_dc: Real) -> SpaceVector {
        q * u_dc
    }

    /// DC-side current drawn for a switching state and AC-side current.
    #[inline]
    pub fn dc_current(q: SpaceVector, i_ac: SpaceVector) -> Real {
        1.5 * (q * i_ac.conj()).re
    }

    /// Measured DC-bus voltage (ideal bus: the configured constant).
    pub fn measured_dc_voltage(&self) -> Real {
        self.u_dc
    }
}
