//! Open-loop switching-vector sources.
//!
//! Sources produce the normalized switching vector fed to the converter.
//! They are input signals, not controllers: no feedback enters here.

use ds_core::{Real, SpaceVector, rotator};

/// Switching-vector signal as a function of time.
pub trait SwitchingSource {
    /// Switching vector at time `t`.
    fn at(&self, t: Real) -> SpaceVector;
}

impl<F> SwitchingSource for F
where
    F: Fn(Real) -> SpaceVector,
{
    fn at(&self, t: Real) -> SpaceVector {
        self(t)
    }
}

/// Constant switching vector.
#[derive(Clone, Copy, Debug)]
pub struct ConstantSource {
    pub q: SpaceVector,
}

impl ConstantSource {
    pub fn new(q: SpaceVector) -> Self {
        Self { q }
    }
}

impl SwitchingSource for ConstantSource {
    fn at(&self, _t: Real) -> SpaceVector {
        self.q
    }
}

/// Rotating switching vector `amplitude * e^(j*2*pi*f*t)`.
///
/// Approximates sinusoidal supply; a direct-on-line startup uses this with
/// amplitude near the linear modulation limit.
#[derive(Clone, Copy, Debug)]
pub struct RotatingSource {
    pub amplitude: Real,
    pub frequency_hz: Real,
}

impl RotatingSource {
    pub fn new(amplitude: Real, frequency_hz: Real) -> Self {
        Self {
            amplitude,
            frequency_hz,
        }
    }
}

impl SwitchingSource for RotatingSource {
    fn at(&self, t: Real) -> SpaceVector {
        rotator(2.0 * std::f64::consts::PI * self.frequency_hz * t) * self.amplitude
    }
}
