//! Error types for simulation operations.

use ds_plant::PlantError;
use thiserror::Error;

/// Errors encountered during transient simulation.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error(transparent)]
    Plant(#[from] PlantError),
}

pub type SimResult<T> = Result<T, SimError>;
