//! Conversions between phase shift, demodulation and lifetime.
//!
//! For a single-exponential decay at modulation frequency `f` (Hz), with
//! `ω = 2πf`:
//!
//! - `τ_φ = tan(φ) / ω`
//! - `τ_m = sqrt(1/m² − 1) / ω`
//! - `m   = 1 / sqrt((ωτ)² + 1)`
//! - `φ   = atan(ωτ)`
//!
//! These are total over the reals except where undefined; `|m| > 1` yields NaN
//! in `mod_to_tau` rather than an error.

use std::f64::consts::PI;

use ndarray::{Array, ArrayBase, Data, Dimension};

/// Angular frequency `ω = 2πf`.
#[inline]
pub fn omega(f: f64) -> f64 {
    f * 2.0 * PI
}

/// Lifetime (s) from phase shift (rad).
#[inline]
pub fn phi_to_tau(phi: f64, f: f64) -> f64 {
    phi.tan() / omega(f)
}

/// Lifetime (s) from demodulation.
#[inline]
pub fn mod_to_tau(modulation: f64, f: f64) -> f64 {
    (1.0 / (modulation * modulation) - 1.0).sqrt() / omega(f)
}

/// Demodulation expected for lifetime `tau` (s).
#[inline]
pub fn tau_to_mod(tau: f64, f: f64) -> f64 {
    let wt = omega(f) * tau;
    1.0 / (wt * wt + 1.0).sqrt()
}

/// Phase shift (rad) expected for lifetime `tau` (s), in `(−π/2, π/2)`.
#[inline]
pub fn tau_to_phi(tau: f64, f: f64) -> f64 {
    (omega(f) * tau).atan()
}

pub fn phi_to_tau_array<S, D>(phi: &ArrayBase<S, D>, f: f64) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    phi.mapv(|p| phi_to_tau(p, f))
}

pub fn mod_to_tau_array<S, D>(modulation: &ArrayBase<S, D>, f: f64) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    modulation.mapv(|m| mod_to_tau(m, f))
}

pub fn tau_to_mod_array<S, D>(tau: &ArrayBase<S, D>, f: f64) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    tau.mapv(|t| tau_to_mod(t, f))
}

pub fn tau_to_phi_array<S, D>(tau: &ArrayBase<S, D>, f: f64) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    tau.mapv(|t| tau_to_phi(t, f))
}
