//! Error types for plant model operations.

use ds_core::DsError;
use thiserror::Error;

/// Errors that can occur building or evaluating plant models.
#[derive(Error, Debug, Clone)]
pub enum PlantError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}

pub type PlantResult<T> = Result<T, PlantError>;

impl From<DsError> for PlantError {
    fn from(e: DsError) -> Self {
        match e {
            DsError::NonFinite { what, value } => PlantError::NonFinite { what, value },
            DsError::InvalidArg { what } => PlantError::InvalidArg { what },
        }
    }
}
