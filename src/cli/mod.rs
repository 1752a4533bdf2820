//! Command-line parsing for the `fdflim` binary.
//!
//! Argument parsing and command dispatch are kept apart from the numeric code.

use clap::{ArgGroup, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "fdflim", version, about = "Frequency-domain fluorescence lifetime imaging")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Simulate a reference and a sample acquisition, calibrate, and summarize lifetimes.
    Simulate(SimulateArgs),
    /// Convert between lifetime, phase shift and modulation at a given frequency.
    Convert(ConvertArgs),
}

/// Options for a simulated acquisition.
#[derive(Debug, Parser, Clone)]
pub struct SimulateArgs {
    /// Modulation frequency (Hz).
    #[arg(short = 'f', long, default_value_t = 40e6)]
    pub frequency: f64,

    /// Evaluate the sample at this frequency instead of the reference's.
    #[arg(long)]
    pub sample_frequency: Option<f64>,

    /// Known lifetime of the reference dye (s). Default: rhodamine 6G.
    #[arg(long, default_value_t = 3.93e-9)]
    pub tau_ref: f64,

    /// True lifetime of the simulated sample (s).
    #[arg(long, default_value_t = 2.5e-9)]
    pub tau_sample: f64,

    /// Image rows.
    #[arg(long, default_value_t = 32)]
    pub rows: usize,

    /// Image columns.
    #[arg(long, default_value_t = 32)]
    pub cols: usize,

    /// Number of phase steps per period.
    #[arg(short = 'n', long, default_value_t = 12)]
    pub phases: usize,

    /// Mean detected intensity.
    #[arg(long, default_value_t = 1000.0)]
    pub dc: f64,

    /// Phase offset added by the simulated instrument (rad).
    #[arg(long, default_value_t = 0.3, allow_negative_numbers = true)]
    pub system_phi: f64,

    /// Modulation factor applied by the simulated instrument.
    #[arg(long, default_value_t = 0.8)]
    pub system_mod: f64,

    /// Gaussian noise sigma relative to the DC level.
    #[arg(long, default_value_t = 0.0)]
    pub noise: f64,

    /// Random seed for the noise.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Record the reference at a single point instead of a full image.
    #[arg(long)]
    pub point_reference: bool,

    /// Print the summary as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Options for a single conversion.
#[derive(Debug, Parser, Clone)]
#[command(group(ArgGroup::new("input").required(true).args(["tau", "phi", "modulation"])))]
pub struct ConvertArgs {
    /// Modulation frequency (Hz).
    #[arg(short = 'f', long, default_value_t = 40e6)]
    pub frequency: f64,

    /// Lifetime (s) to convert to phase and modulation.
    #[arg(long)]
    pub tau: Option<f64>,

    /// Phase shift (rad) to convert to a lifetime.
    #[arg(long, allow_negative_numbers = true)]
    pub phi: Option<f64>,

    /// Demodulation to convert to a lifetime.
    #[arg(long = "mod")]
    pub modulation: Option<f64>,
}
