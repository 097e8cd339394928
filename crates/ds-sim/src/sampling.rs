//! Sampling primitives for zero-order-hold semantics.
//!
//! The continuous plant evolves between sampling instants; measured
//! snapshots and held inputs change only when the sample clock fires.

use crate::error::{SimError, SimResult};

/// Validated sample period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePeriod {
    /// Sample period in seconds.
    pub dt: f64,
}

impl SamplePeriod {
    /// Create a sample period.
    ///
    /// # Errors
    /// Returns an error unless `dt` is finite and positive.
    pub fn new(dt: f64) -> SimResult<Self> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "sample period must be positive",
            });
        }
        Ok(Self { dt })
    }

    /// Get the sample frequency in Hz.
    pub fn frequency(&self) -> f64 {
        1.0 / self.dt
    }
}

/// Sample clock tracks when the next sampling instant occurs.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleClock {
    /// Sample period.
    pub period: SamplePeriod,
    /// Time of next scheduled sample.
    pub next_sample_time: f64,
}

impl SampleClock {
    /// Create a new sample clock.
    pub fn new(period: SamplePeriod, initial_time: f64) -> Self {
        Self {
            period,
            next_sample_time: initial_time + period.dt,
        }
    }

    /// Check if a sample should occur at the given time.
    pub fn should_sample(&self, current_time: f64) -> bool {
        current_time >= self.next_sample_time
    }

    /// Advance to the next sample time.
    ///
    /// Should be called after a sample has been executed.
    pub fn advance(&mut self) {
        self.next_sample_time += self.period.dt;
    }
}

/// Zero-order hold: keeps the last sampled value between samples.
///
/// In a drive transient this holds the switching-vector input fed to the
/// converter; the integrator sees a constant input between sampling
/// instants.
#[derive(Debug, Clone, PartialEq)]
pub struct ZeroOrderHold<T> {
    value: T,
    clock: SampleClock,
}

impl<T: Copy> ZeroOrderHold<T> {
    /// Create a new zero-order hold.
    pub fn new(period: SamplePeriod, initial_time: f64, initial_value: T) -> Self {
        Self {
            value: initial_value,
            clock: SampleClock::new(period, initial_time),
        }
    }

    /// Get the current held value.
    pub fn get(&self) -> T {
        self.value
    }

    /// Whether the hold is due for an update at the given time.
    pub fn should_sample(&self, current_time: f64) -> bool {
        self.clock.should_sample(current_time)
    }

    /// Update the held value (if a sample should occur).
    ///
    /// Returns `true` if the value was updated.
    pub fn update(&mut self, current_time: f64, new_value: T) -> bool {
        if self.clock.should_sample(current_time) {
            self.value = new_value;
            self.clock.advance();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ds_core::SpaceVector;

    #[test]
    fn sample_period_validation() {
        assert!(SamplePeriod::new(0.0).is_err());
        assert!(SamplePeriod::new(f64::NAN).is_err());
        let p = SamplePeriod::new(2.5e-4).unwrap();
        assert!((p.frequency() - 4000.0).abs() < 1e-9);
    }

    #[test]
    fn sample_clock_fires_once_per_period() {
        let period = SamplePeriod::new(2.5e-4).unwrap();
        let mut clock = SampleClock::new(period, 0.0);

        assert!(!clock.should_sample(0.0));
        assert!(!clock.should_sample(1e-4));
        assert!(clock.should_sample(2.5e-4));

        clock.advance();
        assert!(!clock.should_sample(2.5e-4));
        assert!(clock.should_sample(5e-4));
    }

    #[test]
    fn hold_keeps_switching_vector_between_samples() {
        let period = SamplePeriod::new(1e-3).unwrap();
        let q0 = SpaceVector::new(0.6, 0.0);
        let q1 = SpaceVector::new(0.0, 0.6);
        let mut hold = ZeroOrderHold::new(period, 0.0, q0);

        assert_eq!(hold.get(), q0);

        // Before the sampling instant the new vector is ignored.
        assert!(!hold.update(5e-4, q1));
        assert_eq!(hold.get(), q0);

        // At the sampling instant the hold takes the new vector.
        assert!(hold.update(1e-3, q1));
        assert_eq!(hold.get(), q1);
    }
}
