//! Simulation runner and result recording.

use crate::error::{SimError, SimResult};
use crate::integrator::{ForwardEuler, Integrator, RK4};
use crate::model::ContinuousModel;
use crate::sampling::{SamplePeriod, ZeroOrderHold};
use crate::source::SwitchingSource;
use ds_core::{Real, SpaceVector};
use ds_plant::{Drive, DriveState};

/// Integrator selection for simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntegratorType {
    /// 4th-order Runge-Kutta (default, most accurate, 4 rhs calls per step).
    #[default]
    Rk4,
    /// Forward Euler (1st-order, faster, 1 rhs call per step).
    ForwardEuler,
}

/// Options for simulation runs.
#[derive(Clone, Debug)]
pub struct SimOptions {
    /// Fixed integration time step (seconds)
    pub dt: f64,
    /// Final simulation time (seconds)
    pub t_end: f64,
    /// Measurement/input sampling period (seconds)
    pub sample_dt: f64,
    /// Maximum number of steps (safety limit)
    pub max_steps: usize,
    /// Record every N-th step (decimation)
    pub record_every: usize,
    /// Integrator type (default: RK4)
    pub integrator: IntegratorType,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            dt: 1e-4,
            t_end: 1.0,
            sample_dt: 1e-3,
            max_steps: 1_000_000,
            record_every: 10,
            integrator: IntegratorType::default(),
        }
    }
}

impl SimOptions {
    fn validate(&self) -> SimResult<()> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "dt must be positive",
            });
        }
        if !self.t_end.is_finite() || self.t_end < 0.0 {
            return Err(SimError::InvalidArg {
                what: "t_end must be non-negative",
            });
        }
        if self.max_steps == 0 {
            return Err(SimError::InvalidArg {
                what: "max_steps must be positive",
            });
        }
        if self.record_every == 0 {
            return Err(SimError::InvalidArg {
                what: "record_every must be positive",
            });
        }
        // sample_dt is validated by SamplePeriod where sampling applies.
        Ok(())
    }
}

/// Record of generic model trajectories.
#[derive(Clone, Debug)]
pub struct SimRecord<S> {
    /// Time points (seconds)
    pub t: Vec<f64>,
    /// State snapshots
    pub x: Vec<S>,
}

/// Recorded drive trajectories.
#[derive(Clone, Debug, Default)]
pub struct DriveRecord {
    /// Time points (seconds)
    pub t: Vec<Real>,
    /// State snapshots
    pub state: Vec<DriveState>,
    /// Stator current (A)
    pub i_ss: Vec<SpaceVector>,
    /// Electromagnetic torque (Nm)
    pub tau_m: Vec<Real>,
    /// DC-side converter current (A)
    pub i_dc: Vec<Real>,
}

impl DriveRecord {
    fn push(&mut self, drive: &Drive, t: Real, x: &DriveState, q: SpaceVector) -> SimResult<()> {
        let out = drive.outputs(t, x, q)?;
        self.t.push(t);
        self.state.push(*x);
        self.i_ss.push(out.i_ss);
        self.tau_m.push(out.tau_m);
        self.i_dc.push(out.i_dc);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }
}

fn step_once<M: ContinuousModel>(
    model: &M,
    integrator: IntegratorType,
    t: f64,
    x: &M::State,
    u: &M::Input,
    dt: f64,
) -> SimResult<M::State> {
    match integrator {
        IntegratorType::Rk4 => RK4.step(model, t, x, u, dt),
        IntegratorType::ForwardEuler => ForwardEuler.step(model, t, x, u, dt),
    }
}

/// Run a transient simulation of any continuous model with a fixed input.
pub fn run_model<M: ContinuousModel>(
    model: &M,
    input: &M::Input,
    opts: &SimOptions,
) -> SimResult<SimRecord<M::State>> {
    opts.validate()?;

    let mut t = 0.0;
    let mut x = model.initial_state();

    let mut t_record = vec![t];
    let mut x_record = vec![x.clone()];

    let mut step = 0;
    while t < opts.t_end && step < opts.max_steps {
        x = step_once(model, opts.integrator, t, &x, input, opts.dt)?;
        t += opts.dt;
        step += 1;

        if step % opts.record_every == 0 {
            t_record.push(t);
            x_record.push(x.clone());
        }
    }

    // Always record final state
    if step % opts.record_every != 0 {
        t_record.push(t);
        x_record.push(x);
    }

    Ok(SimRecord {
        t: t_record,
        x: x_record,
    })
}

/// Run a drive transient with zero-order-hold sampling.
///
/// The switching vector from `source` and the drive's measured snapshots
/// refresh once per sampling instant; between instants the input is held
/// and the continuous state integrates with the selected fixed-step
/// integrator. The drive's state is pushed back at every sampling instant
/// and at the end of the run.
pub fn run_drive(
    drive: &mut Drive,
    source: &impl SwitchingSource,
    opts: &SimOptions,
) -> SimResult<DriveRecord> {
    opts.validate()?;
    let period = SamplePeriod::new(opts.sample_dt)?;

    tracing::debug!(
        dt = opts.dt,
        t_end = opts.t_end,
        sample_dt = opts.sample_dt,
        "starting drive transient"
    );

    let mut t = 0.0;
    let mut x = drive.state();
    let mut hold = ZeroOrderHold::new(period, t, source.at(t));

    let mut record = DriveRecord::default();
    record.push(drive, t, &x, hold.get())?;

    let mut step = 0;
    while t < opts.t_end && step < opts.max_steps {
        let q = hold.get();
        x = step_once(drive, opts.integrator, t, &x, &q, opts.dt)?;
        t += opts.dt;
        step += 1;

        // Sampling instant: measurements and the held input refresh
        // together.
        if hold.should_sample(t) {
            drive.set_state(&x)?;
            drive.sample();
            hold.update(t, source.at(t));
        }

        if step % opts.record_every == 0 {
            record.push(drive, t, &x, hold.get())?;
        }
    }

    drive.set_state(&x)?;
    if step % opts.record_every != 0 {
        record.push(drive, t, &x, hold.get())?;
    }

    tracing::debug!(steps = step, points = record.len(), "drive transient done");
    Ok(record)
}
