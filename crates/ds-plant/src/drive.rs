//! Drive composition: machine + mechanics + converter.
//!
//! Concatenates the electromagnetic and mechanical states into one state
//! vector and exposes a single derivative function for an external
//! integrator. Evaluation is one-way per call:
//!
//! ```text
//! switching command -> Converter -> u_ss -> InductionMachine -> tau_M -> Mechanics
//! ```

use crate::converter::Converter;
use crate::error::PlantResult;
use crate::machine::{InductionMachine, MachineState};
use crate::mechanics::{MechanicalState, Mechanics};
use ds_core::{Real, SpaceVector};

/// Concatenated drive state, fixed order (psi_ss, psi_rs, w_M, theta_M).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DriveState {
    pub psi_ss: SpaceVector,
    pub psi_rs: SpaceVector,
    pub w_m: Real,
    pub theta_m: Real,
}

impl DriveState {
    /// Element-wise sum (state-space vector addition for integrators).
    pub fn add(&self, other: &Self) -> Self {
        Self {
            psi_ss: self.psi_ss + other.psi_ss,
            psi_rs: self.psi_rs + other.psi_rs,
            w_m: self.w_m + other.w_m,
            theta_m: self.theta_m + other.theta_m,
        }
    }

    /// Element-wise scaling by a scalar.
    pub fn scale(&self, k: Real) -> Self {
        Self {
            psi_ss: self.psi_ss * k,
            psi_rs: self.psi_rs * k,
            w_m: self.w_m * k,
            theta_m: self.theta_m * k,
        }
    }

    /// Flatten into the fixed component order.
    pub fn to_array(&self) -> [Real; 6] {
        [
            self.psi_ss.re,
            self.psi_ss.im,
            self.psi_rs.re,
            self.psi_rs.im,
            self.w_m,
            self.theta_m,
        ]
    }

    /// Rebuild from the fixed component order.
    pub fn from_array(x: [Real; 6]) -> Self {
        Self {
            psi_ss: SpaceVector::new(x[0], x[1]),
            psi_rs: SpaceVector::new(x[2], x[3]),
            w_m: x[4],
            theta_m: x[5],
        }
    }

    pub fn is_finite(&self) -> bool {
        self.psi_ss.is_finite()
            && self.psi_rs.is_finite()
            && self.w_m.is_finite()
            && self.theta_m.is_finite()
    }
}

/// Instantaneous drive quantities for recording.
#[derive(Clone, Copy, Debug)]
pub struct DriveOutputs {
    /// Applied stator voltage (V)
    pub u_ss: SpaceVector,
    /// Stator current (A)
    pub i_ss: SpaceVector,
    /// Electromagnetic torque (Nm)
    pub tau_m: Real,
    /// DC-side converter current (A)
    pub i_dc: Real,
}

/// Induction machine drive: converter-fed machine with a mechanical load.
///
/// Owns the three components; the concatenated state is a view over the
/// component states, never a duplicate.
#[derive(Clone, Debug)]
pub struct Drive {
    machine: InductionMachine,
    mechanics: Mechanics,
    converter: Converter,
}

impl Drive {
    pub fn new(machine: InductionMachine, mechanics: Mechanics, converter: Converter) -> Self {
        Self {
            machine,
            mechanics,
            converter,
        }
    }

    pub fn machine(&self) -> &InductionMachine {
        &self.machine
    }

    pub fn mechanics(&self) -> &Mechanics {
        &self.mechanics
    }

    pub fn converter(&self) -> &Converter {
        &self.converter
    }

    /// Combined state derivative for a switching command.
    ///
    /// Pure function of `(t, state, q)`; safe to call repeatedly with
    /// different trial states, as multi-stage integrators do.
    pub fn derivative(&self, t: Real, state: &DriveState, q: SpaceVector) -> PlantResult<DriveState> {
        let u_ss = Converter::ac_voltage(q, self.converter.u_dc());
        let em = self
            .machine
            .derivative(state.psi_ss, state.psi_rs, u_ss, state.w_m)?;
        let mech = self.mechanics.derivative(t, state.w_m, em.tau_m)?;

        Ok(DriveState {
            psi_ss: em.d_psi_ss,
            psi_rs: em.d_psi_rs,
            w_m: mech.d_w_m,
            theta_m: mech.d_theta_m,
        })
    }

    /// Instantaneous electrical quantities for a trial state and switching
    /// command, without advancing anything.
    pub fn outputs(
        &self,
        _t: Real,
        state: &DriveState,
        q: SpaceVector,
    ) -> PlantResult<DriveOutputs> {
        let u_ss = Converter::ac_voltage(q, self.converter.u_dc());
        let em = self
            .machine
            .derivative(state.psi_ss, state.psi_rs, u_ss, state.w_m)?;

        Ok(DriveOutputs {
            u_ss,
            i_ss: em.i_ss,
            tau_m: em.tau_m,
            i_dc: Converter::dc_current(q, em.i_ss),
        })
    }

    /// Concatenated continuous state, assembled from the components.
    pub fn state(&self) -> DriveState {
        let m = self.machine.state();
        let mech = self.mechanics.state();
        DriveState {
            psi_ss: m.psi_ss,
            psi_rs: m.psi_rs,
            w_m: mech.w_m,
            theta_m: mech.theta_m,
        }
    }

    /// Push a concatenated state down into the components.
    ///
    /// # Errors
    /// Rejects non-finite state.
    pub fn set_state(&mut self, state: &DriveState) -> PlantResult<()> {
        self.machine.set_state(MachineState {
            psi_ss: state.psi_ss,
            psi_rs: state.psi_rs,
        })?;
        self.mechanics.set_state(MechanicalState {
            w_m: state.w_m,
            theta_m: state.theta_m,
        })?;
        Ok(())
    }

    /// Refresh every measured snapshot from the continuous state.
    pub fn sample(&mut self) {
        self.machine.sample();
        self.mechanics.sample();
    }

    pub fn measured_phase_currents(&self) -> (Real, Real, Real) {
        self.machine.measured_phase_currents()
    }

    pub fn measured_speed(&self) -> Real {
        self.mechanics.measured_speed()
    }

    pub fn measured_position(&self) -> Real {
        self.mechanics.measured_position()
    }

    pub fn measured_dc_voltage(&self) -> Real {
        self.converter.measured_dc_voltage()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::InverseGammaParameters;

    fn drive_2kw() -> Drive {
        let machine = crate::machine::InductionMachineInvGamma::new(InverseGammaParameters {
            n_p: 2,
            r_s: 3.7,
            r_r: 2.1,
            l_sgm: 0.021,
            l_m: 0.224,
        })
        .unwrap()
        .into_machine();
        let mechanics = Mechanics::new(0.015).unwrap();
        let converter = Converter::new(540.0).unwrap();
        Drive::new(machine, mechanics, converter)
    }

    #[test]
    fn state_array_round_trip() {
        let s = DriveState {
            psi_ss: SpaceVector::new(1.0, 2.0),
            psi_rs: SpaceVector::new(3.0, 4.0),
            w_m: 5.0,
            theta_m: 6.0,
        };
        assert_eq!(DriveState::from_array(s.to_array()), s);
    }

    #[test]
    fn state_arithmetic() {
        let a = DriveState::from_array([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let b = a.scale(2.0);
        assert_eq!(b.to_array(), [2.0, 4.0, 6.0, 8.0, 10.0, 12.0]);
        let c = a.add(&b);
        assert_eq!(c.to_array(), [3.0, 6.0, 9.0, 12.0, 15.0, 18.0]);
    }

    #[test]
    fn first_derivative_from_standstill() {
        // Zero state, q = (1, 0): stator flux derivative is the full bus
        // voltage, everything else stays zero.
        let drive = drive_2kw();
        let q = SpaceVector::new(1.0, 0.0);
        let d = drive.derivative(0.0, &DriveState::default(), q).unwrap();

        assert!(d.is_finite());
        assert_eq!(d.psi_ss, SpaceVector::new(540.0, 0.0));
        assert_eq!(d.psi_rs, SpaceVector::default());
        assert_eq!(d.w_m, 0.0);
        assert_eq!(d.theta_m, 0.0);
    }

    #[test]
    fn derivative_is_pure() {
        let drive = drive_2kw();
        let q = SpaceVector::new(1.0, 0.0);
        let trial = DriveState {
            psi_ss: SpaceVector::new(0.5, 0.1),
            psi_rs: SpaceVector::new(0.4, 0.2),
            w_m: 80.0,
            theta_m: 3.0,
        };
        let _ = drive.derivative(0.1, &trial, q).unwrap();

        // Evaluating a trial state must not move the owned state.
        assert_eq!(drive.state(), DriveState::default());
    }

    #[test]
    fn outputs_power_balance() {
        let drive = drive_2kw();
        let q = SpaceVector::new(0.6, 0.2);
        let state = DriveState {
            psi_ss: SpaceVector::new(0.9, -0.1),
            psi_rs: SpaceVector::new(0.8, 0.0),
            w_m: 100.0,
            theta_m: 0.0,
        };
        let out = drive.outputs(0.0, &state, q).unwrap();

        let p_ac = 1.5 * (out.u_ss * out.i_ss.conj()).re;
        let p_dc = drive.measured_dc_voltage() * out.i_dc;
        assert!((p_ac - p_dc).abs() < 1e-9);
    }

    #[test]
    fn set_state_and_sample_delegate() {
        let mut drive = drive_2kw();
        let s = DriveState {
            psi_ss: SpaceVector::new(0.5, 0.0),
            psi_rs: SpaceVector::new(0.4, 0.0),
            w_m: 100.0,
            theta_m: 1.0,
        };
        drive.set_state(&s).unwrap();
        assert_eq!(drive.state(), s);

        // Measurements lag until the next sampling instant.
        assert_eq!(drive.measured_speed(), 0.0);
        drive.sample();
        assert_eq!(drive.measured_speed(), 100.0);
        assert_eq!(drive.measured_position(), 1.0);
    }
}
