//! ds-core: stable foundation for drivesim.
//!
//! Contains:
//! - spacevec (complex space vectors + three-phase transforms)
//! - numeric (Real + tolerances + float helpers)
//! - units (uom SI types + constructors)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod spacevec;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{DsError, DsResult};
pub use numeric::*;
pub use spacevec::*;
pub use units::*;
