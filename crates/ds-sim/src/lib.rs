//! Transient simulation framework for drive plant models.
//!
//! Provides:
//! - ContinuousModel trait with a held exogenous input
//! - Fixed-step RK4 and forward Euler integrators
//! - Sampling primitives (sample clock, zero-order hold)
//! - Open-loop switching-vector sources
//! - Drive transient runner with zero-order-hold measurement sampling
//! - Parallel batch execution of independent drive cases

pub mod error;
pub mod integrator;
pub mod model;
pub mod runner;
pub mod sampling;
pub mod source;
pub mod sweep;

// Re-exports for public API
pub use error::{SimError, SimResult};
pub use integrator::{ForwardEuler, Integrator, RK4};
pub use model::ContinuousModel;
pub use runner::{DriveRecord, IntegratorType, SimOptions, SimRecord, run_drive, run_model};
pub use sampling::{SampleClock, SamplePeriod, ZeroOrderHold};
pub use source::{ConstantSource, RotatingSource, SwitchingSource};
pub use sweep::{BatchCase, BatchOutcome, run_batch};
