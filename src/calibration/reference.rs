//! Instrument calibration from a reference of known lifetime.
//!
//! A dye with known lifetime `τ_ref` should appear at
//! `φ_ref = atan(ωτ_ref)` with modulation `m_ref = 1/sqrt((ωτ_ref)² + 1)`.
//! Whatever the instrument measures instead defines its response:
//!
//! ```text
//! systemphi = φ_ref − φ_measured
//! systemmod = m_measured / m_ref
//! ```
//!
//! so that a sample is corrected with `φ + systemphi` and `m / systemmod`.

use ndarray::{ArrayBase, ArrayD, Data, Dimension};

use crate::calibration::sample::Sample;
use crate::domain::Calibration;
use crate::error::FlimError;
use crate::math::{phimoddc, tau_to_mod, tau_to_phi};

/// Compute `(systemphi, systemmod)` from a reference stack.
///
/// `tau` is not validated; a non-physical lifetime simply yields a
/// non-physical calibration.
pub fn system_phi_mod<S, D>(
    stack: &ArrayBase<S, D>,
    tau: f64,
    f: f64,
    axis: usize,
) -> Result<(ArrayD<f64>, ArrayD<f64>), FlimError>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let ref_mod = tau_to_mod(tau, f);
    let ref_phi = tau_to_phi(tau, f);
    let measured = phimoddc(stack, axis)?;

    let systemphi = measured.phi.mapv(|p| ref_phi - p);
    let systemmod = measured.modulation.mapv(|m| m / ref_mod);
    Ok((systemphi, systemmod))
}

/// Calibration captured from a reference acquisition. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    calibration: Calibration,
}

impl Reference {
    /// Build a reference from `stack`, measured at `f` Hz, of a dye with lifetime `tau` (s).
    pub fn new<S, D>(stack: &ArrayBase<S, D>, tau: f64, f: f64, axis: usize) -> Result<Self, FlimError>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        let (systemphi, systemmod) = system_phi_mod(stack, tau, f, axis)?;
        log::info!(
            "reference calibrated: tau={tau:e}s, f={f:e}Hz, shape {:?}",
            systemphi.shape()
        );
        Ok(Self {
            calibration: Calibration {
                systemphi,
                systemmod,
                frequency: f,
            },
        })
    }

    pub fn frequency(&self) -> f64 {
        self.calibration.frequency
    }

    pub fn systemphi(&self) -> &ArrayD<f64> {
        &self.calibration.systemphi
    }

    pub fn systemmod(&self) -> &ArrayD<f64> {
        &self.calibration.systemmod
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Calibrate a sample stack against this reference.
    ///
    /// See [`Sample::new`].
    pub fn sample<S, D>(
        &self,
        stack: &ArrayBase<S, D>,
        frequency: Option<f64>,
        axis: usize,
    ) -> Result<Sample, FlimError>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        Sample::new(stack, &self.calibration, frequency, axis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ideal_image, ideal_trace};
    use crate::domain::DEFAULT_PHASE_AXIS;

    const F: f64 = 40e6;
    const TAU: f64 = 3.93e-9;

    #[test]
    fn ideal_reference_has_neutral_calibration() {
        let stack = ideal_image(4, 5, 500.0, tau_to_mod(TAU, F), tau_to_phi(TAU, F), 12);
        let reference = Reference::new(&stack, TAU, F, DEFAULT_PHASE_AXIS).unwrap();
        assert_eq!(reference.systemphi().shape(), &[4, 5]);
        assert!(reference.systemphi().iter().all(|p| p.abs() < 1e-9));
        assert!(reference.systemmod().iter().all(|m| (m - 1.0).abs() < 1e-9));
        assert_eq!(reference.frequency(), F);
    }

    #[test]
    fn captures_instrument_offset_and_attenuation() {
        let delta = 0.25;
        let a = 0.7;
        let stack = ideal_trace(
            300.0,
            a * tau_to_mod(TAU, F),
            tau_to_phi(TAU, F) + delta,
            8,
        );
        let (systemphi, systemmod) = system_phi_mod(&stack, TAU, F, 0).unwrap();
        assert_eq!(systemphi.ndim(), 0);
        let sp = systemphi.iter().copied().next().unwrap();
        let sm = systemmod.iter().copied().next().unwrap();
        assert!((sp + delta).abs() < 1e-9, "systemphi {sp}");
        assert!((sm - a).abs() < 1e-9, "systemmod {sm}");
    }

    #[test]
    fn propagates_axis_errors() {
        let stack = ideal_image(2, 2, 1.0, 0.5, 0.0, 4);
        assert_eq!(
            Reference::new(&stack, TAU, F, 5),
            Err(FlimError::InvalidAxis { axis: 5, ndim: 3 })
        );
    }
}
