//! ContinuousModel trait for pluggable dynamic systems.

use crate::error::SimResult;
use ds_core::SpaceVector;
use ds_plant::{Drive, DriveState};

/// Trait for continuous-time system models with an exogenous input.
///
/// A ContinuousModel must implement:
/// - State type (Clone, for snapshots)
/// - Input type, held constant across integrator stages (zero-order hold)
/// - Initial state
/// - RHS (right-hand side) computation: x_dot = f(t, x, u)
/// - Scalar field arithmetic for integration: add states, scale by scalar
///
/// `rhs` takes `&self` and must be pure: multi-stage integrators call it
/// repeatedly with trial states.
pub trait ContinuousModel {
    /// State type (must be Clone).
    type State: Clone;

    /// Exogenous input, held constant over an integration step.
    type Input;

    /// Return the initial state at t=0.
    fn initial_state(&self) -> Self::State;

    /// Compute state derivative dxdt = f(t, x, u).
    fn rhs(&self, t: f64, x: &Self::State, u: &Self::Input) -> SimResult<Self::State>;

    /// Add two states element-wise: result = a + b.
    fn add(&self, a: &Self::State, b: &Self::State) -> Self::State;

    /// Scale a state by a scalar: result = scale * a.
    fn scale(&self, a: &Self::State, scale: f64) -> Self::State;
}

impl ContinuousModel for Drive {
    type State = DriveState;
    type Input = SpaceVector;

    fn initial_state(&self) -> DriveState {
        self.state()
    }

    fn rhs(&self, t: f64, x: &DriveState, q: &SpaceVector) -> SimResult<DriveState> {
        Ok(self.derivative(t, x, *q)?)
    }

    fn add(&self, a: &DriveState, b: &DriveState) -> DriveState {
        a.add(b)
    }

    fn scale(&self, a: &DriveState, scale: f64) -> DriveState {
        a.scale(scale)
    }
}
