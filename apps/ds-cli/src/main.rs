use clap::{Parser, Subcommand, ValueEnum};
use ds_core::{space_vector_to_abc, volt, amp, hz};
use ds_plant::{
    BaseValues, Converter, Drive, InductionMachineInvGamma, InverseGammaParameters, Mechanics,
    NominalRatings,
};
use ds_sim::{IntegratorType, RotatingSource, SimOptions, run_drive};
use std::error::Error;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ds-cli")]
#[command(about = "Drivesim CLI - AC drive transient simulation tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum IntegratorArg {
    #[default]
    Rk4,
    Euler,
}

impl From<IntegratorArg> for IntegratorType {
    fn from(a: IntegratorArg) -> Self {
        match a {
            IntegratorArg::Rk4 => IntegratorType::Rk4,
            IntegratorArg::Euler => IntegratorType::ForwardEuler,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run a direct-on-line startup transient
    Run {
        /// Pole-pair count
        #[arg(long, default_value_t = 2)]
        pole_pairs: u32,
        /// Stator resistance (ohm)
        #[arg(long, default_value_t = 3.7)]
        r_s: f64,
        /// Rotor resistance, inverse-Gamma (ohm)
        #[arg(long, default_value_t = 2.1)]
        r_r: f64,
        /// Leakage inductance (H)
        #[arg(long, default_value_t = 0.021)]
        l_sgm: f64,
        /// Magnetizing inductance (H)
        #[arg(long, default_value_t = 0.224)]
        l_m: f64,
        /// Moment of inertia (kg*m^2)
        #[arg(long, default_value_t = 0.015)]
        inertia: f64,
        /// DC-bus voltage (V)
        #[arg(long, default_value_t = 540.0)]
        u_dc: f64,
        /// Supply frequency of the rotating switching vector (Hz)
        #[arg(long, default_value_t = 50.0)]
        freq: f64,
        /// Switching-vector amplitude (normalized)
        #[arg(long, default_value_t = 0.6)]
        amplitude: f64,
        /// Integration time step (s)
        #[arg(long, default_value_t = 1e-4)]
        dt: f64,
        /// End time (s)
        #[arg(long, default_value_t = 1.0)]
        t_end: f64,
        /// Measurement/input sampling period (s)
        #[arg(long, default_value_t = 2.5e-4)]
        sample_dt: f64,
        /// Integrator
        #[arg(long, value_enum, default_value = "rk4")]
        integrator: IntegratorArg,
        /// Print the machine parameters (inverse-Gamma and derived Gamma) as JSON
        #[arg(long)]
        show_params: bool,
        /// Output CSV file path (optional, defaults to summary only)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compute base values from nominal ratings
    Base {
        /// Line-to-line RMS voltage (V)
        #[arg(long, default_value_t = 400.0)]
        voltage: f64,
        /// RMS line current (A)
        #[arg(long, default_value_t = 5.0)]
        current: f64,
        /// Supply frequency (Hz)
        #[arg(long, default_value_t = 50.0)]
        frequency: f64,
        /// Pole-pair count
        #[arg(long, default_value_t = 2)]
        pole_pairs: u32,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            pole_pairs,
            r_s,
            r_r,
            l_sgm,
            l_m,
            inertia,
            u_dc,
            freq,
            amplitude,
            dt,
            t_end,
            sample_dt,
            integrator,
            show_params,
            output,
        } => {
            let params = InverseGammaParameters {
                n_p: pole_pairs,
                r_s,
                r_r,
                l_sgm,
                l_m,
            };
            cmd_run(
                params,
                inertia,
                u_dc,
                freq,
                amplitude,
                SimOptions {
                    dt,
                    t_end,
                    sample_dt,
                    integrator: integrator.into(),
                    ..SimOptions::default()
                },
                show_params,
                output.as_deref(),
            )
        }
        Commands::Base {
            voltage,
            current,
            frequency,
            pole_pairs,
        } => cmd_base(voltage, current, frequency, pole_pairs),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_run(
    params: InverseGammaParameters,
    inertia: f64,
    u_dc: f64,
    freq: f64,
    amplitude: f64,
    opts: SimOptions,
    show_params: bool,
    output: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let machine = InductionMachineInvGamma::new(params)?;

    if show_params {
        println!("Inverse-Gamma parameters:");
        println!("{}", serde_json::to_string_pretty(machine.params())?);
        println!("Derived Gamma parameters:");
        println!("{}", serde_json::to_string_pretty(machine.gamma_params())?);
    }

    let mut drive = Drive::new(
        machine.into_machine(),
        Mechanics::new(inertia)?,
        Converter::new(u_dc)?,
    );
    let source = RotatingSource::new(amplitude, freq);

    println!("Running startup transient:");
    println!(
        "  dt = {:.1e} s, t_end = {:.3} s, sample_dt = {:.1e} s",
        opts.dt, opts.t_end, opts.sample_dt
    );
    println!("  u_dc = {:.0} V, f = {:.1} Hz, |q| = {:.2}", u_dc, freq, amplitude);

    let record = run_drive(&mut drive, &source, &opts)?;

    let final_state = drive.state();
    println!("✓ Simulation completed");
    println!("  Time points: {}", record.len());
    println!("  Final speed:    {:.1} rad/s", final_state.w_m);
    println!("  Final position: {:.1} rad", final_state.theta_m);
    println!(
        "  Final torque:   {:.2} Nm",
        record.tau_m.last().copied().unwrap_or(0.0)
    );
    let (i_a, i_b, i_c) = drive.measured_phase_currents();
    println!(
        "  Sampled phase currents: {:.2} / {:.2} / {:.2} A",
        i_a, i_b, i_c
    );

    if let Some(path) = output {
        // Build CSV
        let mut csv = String::from("time_s,i_a,i_b,i_c,w_m,theta_m,tau_m,i_dc\n");
        for i in 0..record.len() {
            let (i_a, i_b, i_c) = space_vector_to_abc(record.i_ss[i]);
            let s = &record.state[i];
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{}\n",
                record.t[i], i_a, i_b, i_c, s.w_m, s.theta_m, record.tau_m[i], record.i_dc[i]
            ));
        }
        std::fs::write(path, csv)?;
        println!("✓ Exported {} data points to {}", record.len(), path.display());
    }

    Ok(())
}

fn cmd_base(
    voltage: f64,
    current: f64,
    frequency: f64,
    pole_pairs: u32,
) -> Result<(), Box<dyn Error>> {
    let ratings = NominalRatings {
        voltage: volt(voltage),
        current: amp(current),
        frequency: hz(frequency),
    };
    let base = BaseValues::from_nominal(&ratings, pole_pairs)?;

    println!("Base values ({} V, {} A, {} Hz, n_p = {}):", voltage, current, frequency, pole_pairs);
    println!("  Voltage:    {:.2} V", base.u);
    println!("  Current:    {:.2} A", base.i);
    println!("  Frequency:  {:.2} rad/s", base.w);
    println!("  Flux:       {:.4} Vs", base.psi);
    println!("  Power:      {:.1} W", base.p);
    println!("  Impedance:  {:.2} ohm", base.z);
    println!("  Inductance: {:.4} H", base.l);
    println!("  Torque:     {:.2} Nm", base.tau);

    Ok(())
}
