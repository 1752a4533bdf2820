//! Synthetic phase stacks for a simulated frequency-domain acquisition.
//!
//! A single-exponential emitter with lifetime `τ` seen through an instrument
//! that adds a phase offset `δ` and scales the modulation by `a` produces, at
//! phase step `θ_k = 2πk/n`:
//!
//! ```text
//! I_k = dc · (1 + a·m(τ) · sin(θ_k + φ(τ) + δ)) + noise
//! ```
//!
//! which `phimoddc` decomposes back to `phi = φ(τ) + δ`, `mod = a·m(τ)`.
//! Noise is Gaussian with sigma `noise · dc`, drawn from a seeded `StdRng` so
//! runs are reproducible.

use ndarray::{Array1, Array3, ArrayD};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::SimulationConfig;
use crate::error::FlimError;
use crate::math::{phase_vector, tau_to_mod, tau_to_phi};

/// Reference and sample stacks of one simulated acquisition.
#[derive(Debug, Clone)]
pub struct SimulatedAcquisition {
    /// `(rows, cols, phase)`, or `(phase,)` for a point reference.
    pub reference: ArrayD<f64>,
    /// `(rows, cols, phase)`.
    pub sample: Array3<f64>,
}

/// Noise-free trace `dc · (1 + m · sin(θ_k + φ))`.
pub fn ideal_trace(dc: f64, modulation: f64, phi: f64, n_phase: usize) -> Array1<f64> {
    phase_vector(n_phase)
        .into_iter()
        .map(|t| dc * (1.0 + modulation * (t + phi).sin()))
        .collect()
}

/// Noise-free `(rows, cols, phase)` stack with the same trace in every pixel.
pub fn ideal_image(
    rows: usize,
    cols: usize,
    dc: f64,
    modulation: f64,
    phi: f64,
    n_phase: usize,
) -> Array3<f64> {
    let trace = ideal_trace(dc, modulation, phi, n_phase);
    Array3::from_shape_fn((rows, cols, n_phase), |(_, _, k)| trace[k])
}

/// Simulate a reference and a sample acquisition according to `config`.
pub fn simulate(config: &SimulationConfig) -> Result<SimulatedAcquisition, FlimError> {
    validate(config)?;

    let f = config.frequency;
    let measured = |tau: f64| {
        (
            tau_to_mod(tau, f) * config.system_mod,
            tau_to_phi(tau, f) + config.system_phi,
        )
    };
    let (ref_mod, ref_phi) = measured(config.tau_ref);
    let (sam_mod, sam_phi) = measured(config.tau_sample);

    let mut reference = if config.point_reference {
        ideal_trace(config.dc, ref_mod, ref_phi, config.n_phase).into_dyn()
    } else {
        ideal_image(config.rows, config.cols, config.dc, ref_mod, ref_phi, config.n_phase).into_dyn()
    };
    let mut sample = ideal_image(config.rows, config.cols, config.dc, sam_mod, sam_phi, config.n_phase);

    if config.noise > 0.0 {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let normal = Normal::new(0.0, config.noise * config.dc).map_err(|_| {
            FlimError::InvalidParameter {
                name: "noise",
                value: config.noise,
            }
        })?;
        reference.mapv_inplace(|v| v + normal.sample(&mut rng));
        sample.mapv_inplace(|v| v + normal.sample(&mut rng));
    }

    log::debug!(
        "simulated reference {:?} (mod={ref_mod:.4}, phi={ref_phi:.4}) and sample {:?} (mod={sam_mod:.4}, phi={sam_phi:.4})",
        reference.shape(),
        sample.shape()
    );

    Ok(SimulatedAcquisition { reference, sample })
}

fn validate(config: &SimulationConfig) -> Result<(), FlimError> {
    let positive = [
        ("frequency", config.frequency),
        ("dc", config.dc),
        ("system_mod", config.system_mod),
    ];
    for (name, value) in positive {
        if !(value.is_finite() && value > 0.0) {
            return Err(FlimError::InvalidParameter { name, value });
        }
    }
    if !(config.noise.is_finite() && config.noise >= 0.0) {
        return Err(FlimError::InvalidParameter {
            name: "noise",
            value: config.noise,
        });
    }
    let counts = [
        ("n_phase", config.n_phase),
        ("rows", config.rows),
        ("cols", config.cols),
    ];
    for (name, value) in counts {
        if value == 0 {
            return Err(FlimError::InvalidParameter {
                name,
                value: value as f64,
            });
        }
    }
    Ok(())
}
