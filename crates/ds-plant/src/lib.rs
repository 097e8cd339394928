//! Continuous-time plant models for AC electric drives.
//!
//! Provides:
//! - Induction machine flux-linkage dynamics (Gamma model) with an
//!   inverse-Gamma parameter adapter
//! - Ideal switching converter (algebraic voltage/current map)
//! - Rigid-body mechanics with pluggable load-torque functions
//! - Drive composition exposing one derivative function for an
//!   external integrator
//! - Base-value computation from nominal ratings

pub mod base;
pub mod converter;
pub mod drive;
pub mod error;
pub mod machine;
pub mod mechanics;

mod common;

// Re-exports for public API
pub use base::{BaseValues, NominalRatings};
pub use converter::Converter;
pub use drive::{Drive, DriveOutputs, DriveState};
pub use error::{PlantError, PlantResult};
pub use machine::{
    GammaParameters, InductionMachine, InductionMachineInvGamma, InverseGammaParameters,
    MachineDerivative, MachineState, MagneticState,
};
pub use mechanics::{MechanicalDerivative, MechanicalState, Mechanics, TorqueFn};
