//! Base values computed from nominal machine ratings.
//!
//! Pure arithmetic for per-unit scaling of simulation results. Bases use
//! the peak-value space-vector convention, matching the plant models.

use crate::common::require_positive;
use crate::error::{PlantError, PlantResult};
use ds_core::Real;
use ds_core::units::{Current, Frequency, Voltage};
use uom::si::electric_current::ampere;
use uom::si::electric_potential::volt;
use uom::si::frequency::hertz;

/// Nominal ratings from the machine nameplate.
#[derive(Clone, Copy, Debug)]
pub struct NominalRatings {
    /// Line-to-line RMS voltage
    pub voltage: Voltage,
    /// RMS line current
    pub current: Current,
    /// Supply frequency
    pub frequency: Frequency,
}

/// Peak-valued base quantities.
#[derive(Clone, Copy, Debug)]
pub struct BaseValues {
    /// Voltage base (V), peak phase value
    pub u: Real,
    /// Current base (A), peak value
    pub i: Real,
    /// Angular frequency base (rad/s)
    pub w: Real,
    /// Flux-linkage base (Vs)
    pub psi: Real,
    /// Power base (W)
    pub p: Real,
    /// Impedance base (ohm)
    pub z: Real,
    /// Inductance base (H)
    pub l: Real,
    /// Torque base (Nm)
    pub tau: Real,
}

impl BaseValues {
    /// Compute base values from nominal ratings and the pole-pair count.
    ///
    /// # Errors
    /// Returns an error on non-positive ratings or a zero pole-pair count.
    pub fn from_nominal(ratings: &NominalRatings, n_p: u32) -> PlantResult<Self> {
        if n_p == 0 {
            return Err(PlantError::InvalidArg {
                what: "pole-pair count must be at least 1",
            });
        }
        let u_nom = require_positive(
            ratings.voltage.get::<volt>(),
            "nominal voltage must be positive",
        )?;
        let i_nom = require_positive(
            ratings.current.get::<ampere>(),
            "nominal current must be positive",
        )?;
        let f_nom = require_positive(
            ratings.frequency.get::<hertz>(),
            "nominal frequency must be positive",
        )?;

        let u = Real::sqrt(2.0 / 3.0) * u_nom;
        let i = Real::sqrt(2.0) * i_nom;
        let w = 2.0 * std::f64::consts::PI * f_nom;
        let p = 1.5 * u * i;
        let z = u / i;

        Ok(Self {
            u,
            i,
            w,
            psi: u / w,
            p,
            z,
            l: z / w,
            tau: Real::from(n_p) * p / w,
        })
    }
}
