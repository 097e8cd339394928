//! End-to-end drive transients: direct-on-line startup and
//! zero-order-hold measurement semantics.

use ds_core::SpaceVector;
use ds_plant::{
    Converter, Drive, InductionMachineInvGamma, InverseGammaParameters, Mechanics,
};
use ds_sim::{ConstantSource, RotatingSource, SimOptions, SwitchingSource, run_drive};

fn drive_2kw() -> Drive {
    let machine = InductionMachineInvGamma::new(InverseGammaParameters {
        n_p: 2,
        r_s: 3.7,
        r_r: 2.1,
        l_sgm: 0.021,
        l_m: 0.224,
    })
    .unwrap()
    .into_machine();
    Drive::new(
        machine,
        Mechanics::new(0.015).unwrap(),
        Converter::new(540.0).unwrap(),
    )
}

#[test]
fn dol_startup_accelerates_the_rotor() {
    let mut drive = drive_2kw();
    // 50 Hz rotating vector near the linear modulation limit.
    let source = RotatingSource::new(0.6, 50.0);
    let opts = SimOptions {
        dt: 1e-4,
        t_end: 0.5,
        sample_dt: 2.5e-4,
        ..SimOptions::default()
    };

    let record = run_drive(&mut drive, &source, &opts).unwrap();

    assert!(record.len() > 10);
    for (i, s) in record.state.iter().enumerate() {
        assert!(s.is_finite(), "non-finite state at point {i}");
    }

    // The machine magnetizes and spins up toward synchronous speed
    // (2*pi*50 / n_p = 157 rad/s mechanical) with no load torque.
    let final_state = record.state.last().unwrap();
    assert!(final_state.w_m > 100.0);
    assert!(final_state.w_m < 200.0);
    assert!(final_state.theta_m > 0.0);

    // The drive holds the final integration state.
    assert_eq!(drive.state(), *final_state);
}

#[test]
fn measurements_hold_between_sampling_instants() {
    // Sampling period longer than the run: the measured snapshot must
    // still show the initial state while the continuous state advanced.
    let mut drive = drive_2kw();
    let source = RotatingSource::new(0.6, 50.0);
    let opts = SimOptions {
        dt: 1e-4,
        t_end: 0.2,
        sample_dt: 10.0,
        ..SimOptions::default()
    };

    run_drive(&mut drive, &source, &opts).unwrap();

    assert!(drive.state().w_m > 0.0);
    assert_eq!(drive.measured_speed(), 0.0);
    assert_eq!(drive.measured_position(), 0.0);
    assert_eq!(drive.measured_phase_currents(), (0.0, 0.0, 0.0));

    // With a fast sample clock the snapshot tracks the final state.
    let mut drive = drive_2kw();
    let opts = SimOptions {
        dt: 1e-4,
        t_end: 0.2,
        sample_dt: 1e-4,
        ..SimOptions::default()
    };
    run_drive(&mut drive, &source, &opts).unwrap();

    let state = drive.state();
    assert!((drive.measured_speed() - state.w_m).abs() < 1e-9);
    assert!((drive.measured_position() - state.theta_m).abs() < 1e-9);
}

#[test]
fn euler_and_rk4_agree_at_small_steps() {
    let source = RotatingSource::new(0.6, 50.0);

    let mut rk4_drive = drive_2kw();
    let rk4_opts = SimOptions {
        dt: 1e-4,
        t_end: 0.1,
        sample_dt: 2.5e-4,
        ..SimOptions::default()
    };
    run_drive(&mut rk4_drive, &source, &rk4_opts).unwrap();

    let mut euler_drive = drive_2kw();
    let euler_opts = SimOptions {
        dt: 1e-5,
        t_end: 0.1,
        sample_dt: 2.5e-4,
        integrator: ds_sim::IntegratorType::ForwardEuler,
        ..SimOptions::default()
    };
    run_drive(&mut euler_drive, &source, &euler_opts).unwrap();

    let w_rk4 = rk4_drive.state().w_m;
    let w_euler = euler_drive.state().w_m;
    assert!((w_rk4 - w_euler).abs() < 0.1 * w_rk4.abs().max(10.0));
}

#[test]
fn run_rejects_invalid_options() {
    let mut drive = drive_2kw();
    let source = RotatingSource::new(0.6, 50.0);

    let opts = SimOptions {
        dt: -1.0,
        ..SimOptions::default()
    };
    assert!(run_drive(&mut drive, &source, &opts).is_err());

    let opts = SimOptions {
        sample_dt: 0.0,
        ..SimOptions::default()
    };
    assert!(run_drive(&mut drive, &source, &opts).is_err());
}

#[test]
fn switching_vector_is_held_between_samples() {
    // With the hold period equal to the whole run, a rotating source
    // degenerates to its t=0 value, i.e. a constant vector on the real
    // axis: the imaginary flux component stays driven by rotation only.
    let mut held_drive = drive_2kw();
    let source = RotatingSource::new(0.6, 50.0);
    let opts = SimOptions {
        dt: 1e-4,
        t_end: 0.05,
        sample_dt: 10.0,
        ..SimOptions::default()
    };
    run_drive(&mut held_drive, &source, &opts).unwrap();

    let mut const_drive = drive_2kw();
    let const_source = ConstantSource::new(source.at(0.0));
    run_drive(&mut const_drive, &const_source, &opts).unwrap();

    let a = held_drive.state();
    let b = const_drive.state();
    assert!((a.psi_ss - b.psi_ss).norm() < 1e-9);
    assert!((a.w_m - b.w_m).abs() < 1e-9);
}

#[test]
fn held_input_updates_at_sampling_instants() {
    // With a finite hold period the rotating source is re-sampled every
    // 5 ms, so the trajectory must diverge from the run that keeps the
    // t=0 vector for the whole transient.
    let source = RotatingSource::new(0.6, 50.0);
    let opts = SimOptions {
        dt: 1e-4,
        t_end: 0.05,
        sample_dt: 5e-3,
        ..SimOptions::default()
    };

    let mut sampled_drive = drive_2kw();
    run_drive(&mut sampled_drive, &source, &opts).unwrap();

    let mut frozen_drive = drive_2kw();
    let frozen_source = ConstantSource::new(source.at(0.0));
    run_drive(&mut frozen_drive, &frozen_source, &opts).unwrap();

    let a = sampled_drive.state();
    let b = frozen_drive.state();
    assert!((a.psi_ss - b.psi_ss).norm() > 1e-3);
}
