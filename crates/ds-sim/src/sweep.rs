//! Parallel batch execution of independent drive cases.
//!
//! Each case owns its drive instance and source, so cases share no mutable
//! state; `rayon` runs them embarrassingly parallel.

use crate::error::SimResult;
use crate::runner::{DriveRecord, SimOptions, run_drive};
use crate::source::SwitchingSource;
use ds_plant::Drive;
use rayon::prelude::*;

/// One drive case in a batch run.
pub struct BatchCase<S: SwitchingSource> {
    /// Label carried into the outcome.
    pub name: String,
    pub drive: Drive,
    pub source: S,
}

/// Outcome of one batch case.
pub struct BatchOutcome {
    pub name: String,
    pub result: SimResult<DriveRecord>,
    /// The drive after the run, holding the final state.
    pub drive: Drive,
}

/// Run every case with the same options, in parallel.
///
/// Outcomes are returned in the input order; a failed case does not abort
/// the rest of the batch.
pub fn run_batch<S>(cases: Vec<BatchCase<S>>, opts: &SimOptions) -> Vec<BatchOutcome>
where
    S: SwitchingSource + Send + Sync,
{
    cases
        .into_par_iter()
        .map(|mut case| {
            let result = run_drive(&mut case.drive, &case.source, opts);
            if let Err(e) = &result {
                tracing::warn!(case = %case.name, error = %e, "batch case failed");
            }
            BatchOutcome {
                name: case.name,
                result,
                drive: case.drive,
            }
        })
        .collect()
}
