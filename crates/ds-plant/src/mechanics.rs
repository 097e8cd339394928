//! Rigid-body rotational mechanics.

use crate::common::require_positive;
use crate::error::PlantResult;
use ds_core::{Real, ensure_finite};
use std::fmt;
use std::sync::Arc;

/// Load-torque function of one variable (speed or time).
///
/// `Arc` keeps [`Mechanics`] cloneable and sendable for batch simulation.
pub type TorqueFn = Arc<dyn Fn(Real) -> Real + Send + Sync>;

/// Mechanical state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MechanicalState {
    /// Mechanical angular speed (rad/s)
    pub w_m: Real,
    /// Mechanical angular position (rad), unbounded (no modulo wrap)
    pub theta_m: Real,
}

/// Mechanical state derivative.
#[derive(Clone, Copy, Debug)]
pub struct MechanicalDerivative {
    pub d_w_m: Real,
    pub d_theta_m: Real,
}

/// Rotational equation of motion with pluggable load torque:
///
/// ```text
/// J * d(w_M)/dt = tau_M - tau_L_w(w_M) - tau_L_t(t)
/// d(theta_M)/dt = w_M
/// ```
///
/// Like the machine, it owns the continuous state and a separately held
/// measured snapshot; the derivative function mutates neither.
#[derive(Clone)]
pub struct Mechanics {
    /// Moment of inertia (kg*m^2)
    inertia: Real,
    tau_l_w: TorqueFn,
    tau_l_t: TorqueFn,
    state: MechanicalState,
    measured: MechanicalState,
}

impl fmt::Debug for Mechanics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mechanics")
            .field("inertia", &self.inertia)
            .field("state", &self.state)
            .field("measured", &self.measured)
            .finish()
    }
}

impl Mechanics {
    /// Create mechanics at standstill with zero load torque.
    ///
    /// # Errors
    /// Returns an error if the inertia is non-finite or not positive.
    pub fn new(inertia: Real) -> PlantResult<Self> {
        let inertia = require_positive(inertia, "inertia must be positive")?;
        Ok(Self {
            inertia,
            tau_l_w: Arc::new(|_| 0.0),
            tau_l_t: Arc::new(|_| 0.0),
            state: MechanicalState::default(),
            measured: MechanicalState::default(),
        })
    }

    /// Install a speed-dependent load torque `tau_L_w(w_M)`.
    pub fn with_speed_load(mut self, f: impl Fn(Real) -> Real + Send + Sync + 'static) -> Self {
        self.tau_l_w = Arc::new(f);
        self
    }

    /// Install a time-dependent load torque `tau_L_t(t)`.
    pub fn with_time_load(mut self, f: impl Fn(Real) -> Real + Send + Sync + 'static) -> Self {
        self.tau_l_t = Arc::new(f);
        self
    }

    pub fn inertia(&self) -> Real {
        self.inertia
    }

    /// Total load torque at the given time and speed.
    pub fn load_torque(&self, t: Real, w_m: Real) -> Real {
        (self.tau_l_w)(w_m) + (self.tau_l_t)(t)
    }

    /// Mechanical state derivative for the applied electromagnetic torque.
    ///
    /// Pure function of its arguments.
    ///
    /// # Errors
    /// Non-finite inputs fail loudly rather than being clamped.
    pub fn derivative(&self, t: Real, w_m: Real, tau_m: Real) -> PlantResult<MechanicalDerivative> {
        let t = ensure_finite(t, "time")?;
        let w_m = ensure_finite(w_m, "rotor speed")?;
        let tau_m = ensure_finite(tau_m, "electromagnetic torque")?;

        let tau_l = self.load_torque(t, w_m);
        Ok(MechanicalDerivative {
            d_w_m: (tau_m - tau_l) / self.inertia,
            d_theta_m: w_m,
        })
    }

    /// Speed at the most recent sampling instant (zero-order hold).
    pub fn measured_speed(&self) -> Real {
        self.measured.w_m
    }

    /// Position at the most recent sampling instant (zero-order hold).
    pub fn measured_position(&self) -> Real {
        self.measured.theta_m
    }

    /// Continuous mechanical state.
    pub fn state(&self) -> MechanicalState {
        self.state
    }

    /// Replace the continuous state (called by the integration driver).
    ///
    /// # Errors
    /// Rejects non-finite speed or position.
    pub fn set_state(&mut self, state: MechanicalState) -> PlantResult<()> {
        ensure_finite(state.w_m, "rotor speed")?;
        ensure_finite(state.theta_m, "rotor position")?;
        self.state = state;
        Ok(())
    }

    /// Copy the continuous state into the measured snapshot.
    pub fn sample(&mut self) {
        self.measured = self.state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_inertia() {
        assert!(Mechanics::new(0.0).is_err());
        assert!(Mechanics::new(-0.015).is_err());
        assert!(Mechanics::new(Real::NAN).is_err());
    }

    #[test]
    fn acceleration_from_net_torque() {
        let mech = Mechanics::new(0.015).unwrap();
        let d = mech.derivative(0.0, 100.0, 3.0).unwrap();
        assert!((d.d_w_m - 3.0 / 0.015).abs() < 1e-12);
        assert_eq!(d.d_theta_m, 100.0);
    }

    #[test]
    fn equilibrium_when_torques_balance() {
        let mech = Mechanics::new(0.015)
            .unwrap()
            .with_speed_load(|w| 0.02 * w)
            .with_time_load(|t| if t >= 0.5 { 5.0 } else { 0.0 });

        let w_m = 120.0;
        let t = 0.75;
        let tau_m = mech.load_torque(t, w_m);

        let d = mech.derivative(t, w_m, tau_m).unwrap();
        assert_eq!(d.d_w_m, 0.0);
    }

    #[test]
    fn default_load_torque_is_zero() {
        let mech = Mechanics::new(1.0).unwrap();
        assert_eq!(mech.load_torque(123.0, 456.0), 0.0);
    }

    #[test]
    fn measured_values_hold_between_samples() {
        let mut mech = Mechanics::new(0.015).unwrap();
        mech.set_state(MechanicalState {
            w_m: 150.0,
            theta_m: 12.0,
        })
        .unwrap();

        assert_eq!(mech.measured_speed(), 0.0);
        assert_eq!(mech.measured_position(), 0.0);

        mech.sample();
        assert_eq!(mech.measured_speed(), 150.0);
        assert_eq!(mech.measured_position(), 12.0);
    }

    #[test]
    fn derivative_rejects_non_finite_inputs() {
        let mech = Mechanics::new(0.015).unwrap();
        assert!(mech.derivative(Real::NAN, 0.0, 0.0).is_err());
        assert!(mech.derivative(0.0, Real::INFINITY, 0.0).is_err());
        assert!(mech.derivative(0.0, 0.0, Real::NAN).is_err());
    }
}
