// ds-core/src/units.rs

use uom::si::f64::{
    AngularVelocity as UomAngularVelocity, ElectricCurrent as UomElectricCurrent,
    ElectricPotential as UomElectricPotential, ElectricalResistance as UomElectricalResistance,
    Frequency as UomFrequency, Inductance as UomInductance, MagneticFlux as UomMagneticFlux,
    MomentOfInertia as UomMomentOfInertia, Power as UomPower, Torque as UomTorque,
};

// Public canonical unit types (SI, f64)
pub type AngularSpeed = UomAngularVelocity;
pub type Current = UomElectricCurrent;
pub type Voltage = UomElectricPotential;
pub type Resistance = UomElectricalResistance;
pub type Frequency = UomFrequency;
pub type Inductance = UomInductance;
pub type Flux = UomMagneticFlux;
pub type Inertia = UomMomentOfInertia;
pub type Power = UomPower;
pub type Torque = UomTorque;

#[inline]
pub fn volt(v: f64) -> Voltage {
    use uom::si::electric_potential::volt;
    Voltage::new::<volt>(v)
}

#[inline]
pub fn amp(v: f64) -> Current {
    use uom::si::electric_current::ampere;
    Current::new::<ampere>(v)
}

#[inline]
pub fn hz(v: f64) -> Frequency {
    use uom::si::frequency::hertz;
    Frequency::new::<hertz>(v)
}

#[inline]
pub fn ohm(v: f64) -> Resistance {
    use uom::si::electrical_resistance::ohm;
    Resistance::new::<ohm>(v)
}

#[inline]
pub fn henry(v: f64) -> Inductance {
    use uom::si::inductance::henry;
    Inductance::new::<henry>(v)
}

#[inline]
pub fn weber(v: f64) -> Flux {
    use uom::si::magnetic_flux::weber;
    Flux::new::<weber>(v)
}

#[inline]
pub fn radps(v: f64) -> AngularSpeed {
    use uom::si::angular_velocity::radian_per_second;
    AngularSpeed::new::<radian_per_second>(v)
}

#[inline]
pub fn newton_meter(v: f64) -> Torque {
    use uom::si::torque::newton_meter;
    Torque::new::<newton_meter>(v)
}

#[inline]
pub fn watt(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}

#[inline]
pub fn kgm2(v: f64) -> Inertia {
    use uom::si::moment_of_inertia::kilogram_square_meter;
    Inertia::new::<kilogram_square_meter>(v)
}
