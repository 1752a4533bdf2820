//! The reference -> sample pipeline behind `fdflim simulate`.
//!
//! simulate stacks -> calibrate reference -> calibrate sample -> summarize

use crate::calibration::{Reference, Sample};
use crate::data::simulate;
use crate::domain::{DEFAULT_PHASE_AXIS, SimulationConfig};
use crate::error::AppError;
use crate::report::RunSummary;

/// All computed outputs of one simulated run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub reference: Reference,
    pub sample: Sample,
    pub summary: RunSummary,
}

/// Execute the full pipeline for `config`.
///
/// `sample_frequency` overrides the reference frequency for the sample stage.
pub fn run_simulation(
    config: &SimulationConfig,
    sample_frequency: Option<f64>,
) -> Result<RunOutput, AppError> {
    // 1) Synthetic stacks.
    let acquisition = simulate(config)?;
    log::info!(
        "simulated {}x{} image with {} phase steps",
        config.rows,
        config.cols,
        config.n_phase
    );

    // 2) Calibrate against the reference dye.
    let reference = Reference::new(
        &acquisition.reference,
        config.tau_ref,
        config.frequency,
        config.reference_axis(),
    )?;

    // 3) Correct the sample.
    let sample = reference.sample(&acquisition.sample, sample_frequency, DEFAULT_PHASE_AXIS)?;

    // 4) Summaries.
    let summary = RunSummary::new(&reference, config.tau_ref, &sample);
    if summary.tau_phase.n_finite == 0 {
        return Err(AppError::new(4, "No finite phase lifetimes in the sample."));
    }

    Ok(RunOutput {
        reference,
        sample,
        summary,
    })
}
