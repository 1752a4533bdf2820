//! Shared value types.
//!
//! Everything here is plain data: the arrays produced by harmonic decomposition,
//! the calibration captured from a reference, and the knobs of the synthetic
//! stack generator.

use ndarray::ArrayD;
use serde::Serialize;

/// Phase axis convention for `(row, col, phase)` stacks.
pub const DEFAULT_PHASE_AXIS: usize = 2;

/// Phase shift, demodulation and DC of a stack, reduced along its phase axis.
///
/// All three arrays share the stack's shape with the phase axis removed.
#[derive(Debug, Clone, PartialEq)]
pub struct PhiModDc {
    /// Phase shift in radians, `(-π, π]`.
    pub phi: ArrayD<f64>,
    /// Demodulation ratio (AC amplitude over DC).
    pub modulation: ArrayD<f64>,
    /// Mean intensity over the phase steps.
    pub dc: ArrayD<f64>,
}

impl PhiModDc {
    pub fn shape(&self) -> &[usize] {
        self.phi.shape()
    }
}

/// Instrument calibration derived from a reference of known lifetime.
///
/// `systemphi` is added to measured phases, measured modulations are divided by
/// `systemmod`.
#[derive(Debug, Clone, PartialEq)]
pub struct Calibration {
    pub systemphi: ArrayD<f64>,
    pub systemmod: ArrayD<f64>,
    /// Modulation frequency (Hz) the reference was measured at.
    pub frequency: f64,
}

/// A sample evaluated at a different frequency than its reference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrequencyMismatch {
    pub sample: f64,
    pub reference: f64,
}

impl std::fmt::Display for FrequencyMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "frequency of sample ({} Hz) not equal to frequency of reference ({} Hz)",
            self.sample, self.reference
        )
    }
}

/// Parameters for a synthetic reference + sample acquisition.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Modulation frequency (Hz).
    pub frequency: f64,
    /// Known lifetime of the reference dye (s).
    pub tau_ref: f64,
    /// True lifetime of the simulated sample (s).
    pub tau_sample: f64,
    pub rows: usize,
    pub cols: usize,
    pub n_phase: usize,
    /// Mean detected intensity.
    pub dc: f64,
    /// Phase offset the instrument adds (rad).
    pub system_phi: f64,
    /// Factor the instrument multiplies the modulation by.
    pub system_mod: f64,
    /// Gaussian noise sigma, relative to `dc`.
    pub noise: f64,
    pub seed: u64,
    /// Record the reference at a single point instead of a full image.
    pub point_reference: bool,
}

impl SimulationConfig {
    /// Phase axis of the simulated reference: `(row, col, phase)`, or
    /// `(phase,)` for a point reference.
    pub fn reference_axis(&self) -> usize {
        if self.point_reference { 0 } else { DEFAULT_PHASE_AXIS }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            frequency: 40e6,
            tau_ref: 3.93e-9,
            tau_sample: 2.5e-9,
            rows: 32,
            cols: 32,
            n_phase: 12,
            dc: 1000.0,
            system_phi: 0.3,
            system_mod: 0.8,
            noise: 0.0,
            seed: 42,
            point_reference: false,
        }
    }
}
