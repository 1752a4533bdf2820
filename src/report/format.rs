//! Formatted terminal output.
//!
//! Formatting lives here so the numeric code stays free of presentation, and
//! output changes stay local.

use serde::Serialize;

use crate::calibration::{Reference, Sample};
use crate::domain::FrequencyMismatch;
use crate::math::{mod_to_tau, phi_to_tau, tau_to_mod, tau_to_phi};
use crate::report::{MapSummary, summarize};

/// Everything printed for one reference + sample run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub frequency: f64,
    pub reference_frequency: f64,
    pub tau_ref: f64,
    pub reference_shape: Vec<usize>,
    pub sample_shape: Vec<usize>,
    pub frequency_mismatch: Option<FrequencyMismatch>,
    pub systemphi: MapSummary,
    pub systemmod: MapSummary,
    pub phi: MapSummary,
    pub modulation: MapSummary,
    pub tau_phase: MapSummary,
    pub tau_mod: MapSummary,
}

impl RunSummary {
    pub fn new(reference: &Reference, tau_ref: f64, sample: &Sample) -> Self {
        let calibration = reference.calibration();
        Self {
            frequency: sample.frequency(),
            reference_frequency: calibration.frequency,
            tau_ref,
            reference_shape: calibration.systemphi.shape().to_vec(),
            sample_shape: sample.phi().shape().to_vec(),
            frequency_mismatch: sample.frequency_mismatch(),
            systemphi: summarize(&calibration.systemphi),
            systemmod: summarize(&calibration.systemmod),
            phi: summarize(sample.phi()),
            modulation: summarize(sample.modulation()),
            tau_phase: summarize(&sample.lifetime_phase()),
            tau_mod: summarize(&sample.lifetime_mod()),
        }
    }
}

/// Format the full run summary.
pub fn format_run_summary(summary: &RunSummary) -> String {
    let mut out = String::new();

    out.push_str("=== fdflim - frequency-domain lifetime ===\n");
    out.push_str(&format!("Frequency: {:.3} MHz\n", summary.frequency / 1e6));
    out.push_str(&format!(
        "Reference: tau={:.3} ns | calibration shape {:?}\n",
        summary.tau_ref * 1e9,
        summary.reference_shape
    ));
    out.push_str(&format!("Sample: shape {:?}\n", summary.sample_shape));
    if let Some(m) = &summary.frequency_mismatch {
        out.push_str(&format!("WARNING: {m}\n"));
    }

    out.push_str("\nCalibration:\n");
    out.push_str(&format_row("system phi (rad)", &summary.systemphi, 1.0));
    out.push_str(&format_row("system mod", &summary.systemmod, 1.0));

    out.push_str("\nSample:\n");
    out.push_str(&format_row("phi (rad)", &summary.phi, 1.0));
    out.push_str(&format_row("mod", &summary.modulation, 1.0));
    out.push_str(&format_row("tau_phi (ns)", &summary.tau_phase, 1e9));
    out.push_str(&format_row("tau_mod (ns)", &summary.tau_mod, 1e9));

    out
}

fn format_row(label: &str, s: &MapSummary, scale: f64) -> String {
    let cell = |v: Option<f64>| match v {
        Some(v) => format!("{:>10.4}", v * scale),
        None => format!("{:>10}", "-"),
    };
    format!(
        "  {label:<18} mean={} median={} min={} max={} finite={}/{}\n",
        cell(s.mean),
        cell(s.median),
        cell(s.min),
        cell(s.max),
        s.n_finite,
        s.n_pixels
    )
}

/// What to convert in `fdflim convert`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConversionInput {
    Tau(f64),
    Phi(f64),
    Mod(f64),
}

/// Format a single lifetime/phase/modulation conversion at `f` Hz.
pub fn format_conversion(input: ConversionInput, f: f64) -> String {
    let mut out = format!("Frequency: {:.3} MHz\n", f / 1e6);
    match input {
        ConversionInput::Tau(tau) => {
            out.push_str(&format!("tau = {:.4} ns\n", tau * 1e9));
            out.push_str(&format!("phi = {:.6} rad\n", tau_to_phi(tau, f)));
            out.push_str(&format!("mod = {:.6}\n", tau_to_mod(tau, f)));
        }
        ConversionInput::Phi(phi) => {
            out.push_str(&format!("phi = {phi:.6} rad\n"));
            out.push_str(&format!("tau_phi = {:.4} ns\n", phi_to_tau(phi, f) * 1e9));
        }
        ConversionInput::Mod(m) => {
            out.push_str(&format!("mod = {m:.6}\n"));
            out.push_str(&format!("tau_mod = {:.4} ns\n", mod_to_tau(m, f) * 1e9));
        }
    }
    out
}
