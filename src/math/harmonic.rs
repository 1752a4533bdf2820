//! First-harmonic decomposition of a phase stack.
//!
//! For `n` phase steps `θ_k = 2πk/n` covering one modulation period, each lane
//! along the phase axis is reduced to:
//!
//! ```text
//! fs  = mean(I_k · sin θ_k)
//! fc  = mean(I_k · cos θ_k)
//! dc  = mean(I_k)
//! mod = 2 · sqrt(fs² + fc²) / dc
//! phi = atan2(fc, fs)
//! ```
//!
//! Note the argument order of `atan2`: `fc` first, `fs` second. Calibration
//! relies on this sign convention, so a stack `dc·(1 + m·sin(θ + φ))` decomposes
//! to `phi = φ`.
//!
//! `dc == 0` is not guarded; `mod` becomes NaN/inf and is returned as such.

use std::f64::consts::PI;

use ndarray::{ArrayBase, ArrayD, Axis, Data, Dimension, Zip};

use crate::domain::PhiModDc;
use crate::error::FlimError;
use crate::math::axis::reduced_shape;

/// Equally spaced phase delays `2πk/n`, `k = 0..n`.
pub fn phase_vector(n: usize) -> Vec<f64> {
    (0..n).map(|k| 2.0 * PI * (k as f64 / n as f64)).collect()
}

/// Decompose `stack` into phase shift, modulation and DC along `axis`.
///
/// Fails if `axis` is out of range or the phase axis is empty.
pub fn phimoddc<S, D>(stack: &ArrayBase<S, D>, axis: usize) -> Result<PhiModDc, FlimError>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let out_dim = reduced_shape(stack, axis)?;
    let n_phase = stack.len_of(Axis(axis));
    if n_phase == 0 {
        return Err(FlimError::EmptyPhaseAxis { axis });
    }
    if n_phase < 3 {
        log::warn!("only {n_phase} phase step(s); the first harmonic is undersampled");
    }
    log::debug!(
        "phimoddc: stack {:?}, phase axis {axis}, output {:?}",
        stack.shape(),
        out_dim.slice()
    );

    let theta = phase_vector(n_phase);
    let sin: Vec<f64> = theta.iter().map(|t| t.sin()).collect();
    let cos: Vec<f64> = theta.iter().map(|t| t.cos()).collect();
    let n = n_phase as f64;

    let view = stack.view().into_dyn();
    let mut phi = ArrayD::<f64>::zeros(out_dim.clone());
    let mut modulation = ArrayD::<f64>::zeros(out_dim.clone());
    let mut dc = ArrayD::<f64>::zeros(out_dim);

    Zip::from(view.lanes(Axis(axis)))
        .and(&mut phi)
        .and(&mut modulation)
        .and(&mut dc)
        .par_for_each(|lane, p, m, d| {
            let mut fs = 0.0;
            let mut fc = 0.0;
            let mut sum = 0.0;
            for ((&x, &s), &c) in lane.iter().zip(&sin).zip(&cos) {
                fs += x * s;
                fc += x * c;
                sum += x;
            }
            fs /= n;
            fc /= n;
            let mean = sum / n;

            *m = 2.0 * (fs * fs + fc * fc).sqrt() / mean;
            *p = fc.atan2(fs);
            *d = mean;
        });

    Ok(PhiModDc {
        phi,
        modulation,
        dc,
    })
}
