//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the simulate or convert command
//! - prints text or JSON output

use clap::Parser;

use crate::cli::{Command, ConvertArgs, SimulateArgs};
use crate::domain::SimulationConfig;
use crate::error::AppError;
use crate::report::{ConversionInput, format_conversion, format_run_summary};

pub mod pipeline;

/// Entry point for the `fdflim` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Simulate(args) => handle_simulate(args),
        Command::Convert(args) => handle_convert(args),
    }
}

fn handle_simulate(args: SimulateArgs) -> Result<(), AppError> {
    let config = simulation_config_from_args(&args);
    let run = pipeline::run_simulation(&config, args.sample_frequency)?;

    if args.json {
        let json = serde_json::to_string_pretty(&run.summary)
            .map_err(|e| AppError::new(4, format!("Failed to serialize summary: {e}")))?;
        println!("{json}");
    } else {
        println!("{}", format_run_summary(&run.summary));
    }
    Ok(())
}

fn handle_convert(args: ConvertArgs) -> Result<(), AppError> {
    if !(args.frequency.is_finite() && args.frequency > 0.0) {
        return Err(AppError::new(2, "Frequency must be finite and > 0."));
    }
    let input = match (args.tau, args.phi, args.modulation) {
        (Some(tau), _, _) => ConversionInput::Tau(tau),
        (_, Some(phi), _) => ConversionInput::Phi(phi),
        (_, _, Some(m)) => ConversionInput::Mod(m),
        (None, None, None) => return Err(AppError::new(2, "One of --tau, --phi or --mod is required.")),
    };
    println!("{}", format_conversion(input, args.frequency));
    Ok(())
}

pub fn simulation_config_from_args(args: &SimulateArgs) -> SimulationConfig {
    SimulationConfig {
        frequency: args.frequency,
        tau_ref: args.tau_ref,
        tau_sample: args.tau_sample,
        rows: args.rows,
        cols: args.cols,
        n_phase: args.phases,
        dc: args.dc,
        system_phi: args.system_phi,
        system_mod: args.system_mod,
        noise: args.noise,
        seed: args.seed,
        point_reference: args.point_reference,
    }
}
