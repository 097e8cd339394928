//! Induction machine flux-linkage dynamics.
//!
//! The machine is modeled in stationary (stator) coordinates with the two
//! flux linkages as state variables, using the Gamma-equivalent circuit:
//!
//! ```text
//! d(psi_ss)/dt = u_ss - R_s * i_ss
//! d(psi_rs)/dt = -R_r * i_rs + j * n_p * w_M * psi_rs
//! ```
//!
//! Currents follow algebraically from the flux linkages:
//!
//! ```text
//! i_rs = (psi_rs - psi_ss) / L_ell
//! i_ss = psi_ss / L_s - i_rs
//! ```
//!
//! The inverse-Gamma parameterization (the one usually reported on machine
//! datasheets) is supported through [`InductionMachineInvGamma`], which
//! converts the parameters at construction and delegates to an owned
//! Gamma-model machine.

use crate::common::require_positive;
use crate::error::{PlantError, PlantResult};
use ds_core::{Real, SpaceVector, ensure_finite, ensure_finite_vector, space_vector_to_abc};
use serde::{Deserialize, Serialize};

/// Gamma-model electrical parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GammaParameters {
    /// Number of pole pairs
    pub n_p: u32,
    /// Stator resistance (ohm)
    pub r_s: Real,
    /// Rotor resistance (ohm)
    pub r_r: Real,
    /// Leakage inductance (H)
    pub l_ell: Real,
    /// Stator inductance (H)
    pub l_s: Real,
}

impl GammaParameters {
    fn validate(&self) -> PlantResult<()> {
        if self.n_p == 0 {
            return Err(PlantError::InvalidArg {
                what: "pole-pair count must be at least 1",
            });
        }
        require_positive(self.r_s, "stator resistance must be positive")?;
        require_positive(self.r_r, "rotor resistance must be positive")?;
        require_positive(self.l_ell, "leakage inductance must be positive")?;
        require_positive(self.l_s, "stator inductance must be positive")?;
        Ok(())
    }
}

/// Inverse-Gamma-model electrical parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InverseGammaParameters {
    /// Number of pole pairs
    pub n_p: u32,
    /// Stator resistance (ohm)
    pub r_s: Real,
    /// Rotor resistance (ohm)
    pub r_r: Real,
    /// Leakage inductance (H)
    pub l_sgm: Real,
    /// Magnetizing inductance (H)
    pub l_m: Real,
}

impl InverseGammaParameters {
    /// Magnetic coupling factor `gamma = L_M / (L_M + L_sgm)`.
    pub fn coupling_factor(&self) -> Real {
        self.l_m / (self.l_m + self.l_sgm)
    }

    /// Convert to the equivalent Gamma parameterization.
    ///
    /// # Errors
    /// Fails on non-positive or non-finite parameters; `l_m = 0` (coupling
    /// factor zero) is a configuration error.
    pub fn to_gamma(&self) -> PlantResult<GammaParameters> {
        if self.n_p == 0 {
            return Err(PlantError::InvalidArg {
                what: "pole-pair count must be at least 1",
            });
        }
        require_positive(self.r_s, "stator resistance must be positive")?;
        require_positive(self.r_r, "rotor resistance must be positive")?;
        require_positive(self.l_sgm, "leakage inductance must be positive")?;
        require_positive(self.l_m, "magnetizing inductance must be positive")?;

        let gamma = self.coupling_factor();
        Ok(GammaParameters {
            n_p: self.n_p,
            r_s: self.r_s,
            r_r: self.r_r / (gamma * gamma),
            l_ell: self.l_sgm / gamma,
            l_s: self.l_m + self.l_sgm,
        })
    }
}

/// Flux-linkage state (Vs), stationary coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MachineState {
    /// Stator flux linkage
    pub psi_ss: SpaceVector,
    /// Rotor flux linkage
    pub psi_rs: SpaceVector,
}

/// Instantaneous magnetic-model outputs.
#[derive(Clone, Copy, Debug)]
pub struct MagneticState {
    /// Stator current (A)
    pub i_ss: SpaceVector,
    /// Rotor current (A)
    pub i_rs: SpaceVector,
    /// Electromagnetic torque (Nm)
    pub tau_m: Real,
}

/// Flux-linkage derivative plus the instantaneous outputs computed along
/// the way, so the drive composition does not re-evaluate the magnetic
/// model.
#[derive(Clone, Copy, Debug)]
pub struct MachineDerivative {
    pub d_psi_ss: SpaceVector,
    pub d_psi_rs: SpaceVector,
    pub i_ss: SpaceVector,
    pub tau_m: Real,
}

/// Induction machine, Gamma model.
///
/// Owns the continuous flux-linkage state and a separately held measured
/// snapshot (zero-order hold). The derivative function never mutates
/// either; the state advances only through [`set_state`](Self::set_state)
/// by the external integration driver, and the snapshot refreshes only
/// through [`sample`](Self::sample).
#[derive(Clone, Debug)]
pub struct InductionMachine {
    params: GammaParameters,
    state: MachineState,
    measured: MachineState,
}

impl InductionMachine {
    /// Create a machine with zero initial flux.
    ///
    /// # Errors
    /// Returns an error on non-physical parameters.
    pub fn new(params: GammaParameters) -> PlantResult<Self> {
        params.validate()?;
        Ok(Self {
            params,
            state: MachineState::default(),
            measured: MachineState::default(),
        })
    }

    pub fn params(&self) -> &GammaParameters {
        &self.params
    }

    /// Stator and rotor currents for a flux-linkage pair.
    pub fn currents(&self, psi_ss: SpaceVector, psi_rs: SpaceVector) -> (SpaceVector, SpaceVector) {
        let i_rs = (psi_rs - psi_ss) / self.params.l_ell;
        let i_ss = psi_ss / self.params.l_s - i_rs;
        (i_ss, i_rs)
    }

    /// Currents and electromagnetic torque for a flux-linkage pair.
    ///
    /// Torque uses the peak-value convention,
    /// `tau_M = 1.5 * n_p * Im(i_ss * conj(psi_ss))`; positive torque
    /// accelerates the rotor in the direction of positive speed.
    pub fn magnetic(&self, psi_ss: SpaceVector, psi_rs: SpaceVector) -> MagneticState {
        let (i_ss, i_rs) = self.currents(psi_ss, psi_rs);
        let n_p = Real::from(self.params.n_p);
        let tau_m = 1.5 * n_p * (i_ss * psi_ss.conj()).im;
        MagneticState { i_ss, i_rs, tau_m }
    }

    /// Flux-linkage derivative for the applied stator voltage and rotor
    /// speed.
    ///
    /// Pure function of its arguments; does not touch the owned state.
    ///
    /// # Errors
    /// Non-finite flux, voltage, or speed inputs fail loudly rather than
    /// being clamped.
    pub fn derivative(
        &self,
        psi_ss: SpaceVector,
        psi_rs: SpaceVector,
        u_ss: SpaceVector,
        w_m: Real,
    ) -> PlantResult<MachineDerivative> {
        let psi_ss = ensure_finite_vector(psi_ss, "stator flux linkage")?;
        let psi_rs = ensure_finite_vector(psi_rs, "rotor flux linkage")?;
        let u_ss = ensure_finite_vector(u_ss, "stator voltage")?;
        let w_m = ensure_finite(w_m, "rotor speed")?;

        let MagneticState { i_ss, i_rs, tau_m } = self.magnetic(psi_ss, psi_rs);
        let n_p = Real::from(self.params.n_p);

        let d_psi_ss = u_ss - i_ss * self.params.r_s;
        // Rotational EMF term: the rotor quantities are expressed in stator
        // coordinates, hence the j*n_p*w_M rotation.
        let d_psi_rs = -i_rs * self.params.r_r + SpaceVector::new(0.0, n_p * w_m) * psi_rs;

        Ok(MachineDerivative {
            d_psi_ss,
            d_psi_rs,
            i_ss,
            tau_m,
        })
    }

    /// Phase currents at the most recent sampling instant.
    ///
    /// Zero-order-hold sensor semantics: reflects the measured snapshot,
    /// not the continuous state between samples.
    pub fn measured_phase_currents(&self) -> (Real, Real, Real) {
        let (i_ss, _) = self.currents(self.measured.psi_ss, self.measured.psi_rs);
        space_vector_to_abc(i_ss)
    }

    /// Continuous flux-linkage state.
    pub fn state(&self) -> MachineState {
        self.state
    }

    /// Replace the continuous state (called by the integration driver).
    ///
    /// # Errors
    /// Rejects non-finite flux.
    pub fn set_state(&mut self, state: MachineState) -> PlantResult<()> {
        ensure_finite_vector(state.psi_ss, "stator flux linkage")?;
        ensure_finite_vector(state.psi_rs, "rotor flux linkage")?;
        self.state = state;
        Ok(())
    }

    /// Copy the continuous state into the measured snapshot.
    pub fn sample(&mut self) {
        self.measured = self.state;
    }
}

/// Induction machine specified with inverse-Gamma parameters.
///
/// Parameter adapter: converts to Gamma parameters once at construction and
/// delegates every operation to an owned [`InductionMachine`]. Both
/// parameterizations produce identical currents and torque for identical
/// flux states.
#[derive(Clone, Debug)]
pub struct InductionMachineInvGamma {
    params: InverseGammaParameters,
    inner: InductionMachine,
}

impl InductionMachineInvGamma {
    /// Create a machine from inverse-Gamma parameters.
    ///
    /// # Errors
    /// Returns an error on non-physical parameters, including zero
    /// magnetizing inductance.
    pub fn new(params: InverseGammaParameters) -> PlantResult<Self> {
        let inner = InductionMachine::new(params.to_gamma()?)?;
        Ok(Self { params, inner })
    }

    /// The inverse-Gamma parameters supplied at construction.
    pub fn params(&self) -> &InverseGammaParameters {
        &self.params
    }

    /// The derived Gamma parameters actually used by the dynamics.
    pub fn gamma_params(&self) -> &GammaParameters {
        self.inner.params()
    }

    pub fn currents(&self, psi_ss: SpaceVector, psi_rs: SpaceVector) -> (SpaceVector, SpaceVector) {
        self.inner.currents(psi_ss, psi_rs)
    }

    pub fn magnetic(&self, psi_ss: SpaceVector, psi_rs: SpaceVector) -> MagneticState {
        self.inner.magnetic(psi_ss, psi_rs)
    }

    pub fn derivative(
        &self,
        psi_ss: SpaceVector,
        psi_rs: SpaceVector,
        u_ss: SpaceVector,
        w_m: Real,
    ) -> PlantResult<MachineDerivative> {
        self.inner.derivative(psi_ss, psi_rs, u_ss, w_m)
    }

    pub fn measured_phase_currents(&self) -> (Real, Real, Real) {
        self.inner.measured_phase_currents()
    }

    pub fn state(&self) -> MachineState {
        self.inner.state()
    }

    pub fn set_state(&mut self, state: MachineState) -> PlantResult<()> {
        self.inner.set_state(state)
    }

    pub fn sample(&mut self) {
        self.inner.sample();
    }

    /// Consume the adapter and return the underlying Gamma-model machine
    /// (for drive composition).
    pub fn into_machine(self) -> InductionMachine {
        self.inner
    }
}
