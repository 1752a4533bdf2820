//! A calibrated sample acquisition and its lifetime / phasor views.

use nalgebra::Point2;
use ndarray::{ArrayBase, ArrayD, Data, Dimension, Zip};

use crate::domain::{Calibration, FrequencyMismatch};
use crate::error::FlimError;
use crate::math::{broadcast_trailing, mod_to_tau_array, phi_to_tau_array, phimoddc};

/// Sample phase and modulation corrected for the instrument response.
///
/// Holds copies of everything it needs; there is no link back to the
/// reference it was calibrated against.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    frequency: f64,
    phi: ArrayD<f64>,
    modulation: ArrayD<f64>,
    dc: ArrayD<f64>,
    mismatch: Option<FrequencyMismatch>,
}

impl Sample {
    /// Decompose `stack` along `axis` and apply `calibration`.
    ///
    /// `frequency` overrides the calibration frequency. If the two differ the
    /// mismatch is logged and recorded, and the override is used.
    ///
    /// If the sample has more non-phase axes than the calibration, trailing
    /// singleton axes are appended to the calibration arrays before
    /// broadcasting (a point reference applies to every pixel).
    pub fn new<S, D>(
        stack: &ArrayBase<S, D>,
        calibration: &Calibration,
        frequency: Option<f64>,
        axis: usize,
    ) -> Result<Self, FlimError>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        let resolved = frequency.unwrap_or(calibration.frequency);
        let mismatch = (resolved != calibration.frequency).then(|| FrequencyMismatch {
            sample: resolved,
            reference: calibration.frequency,
        });
        if let Some(m) = &mismatch {
            log::warn!("{m}");
        }

        let measured = phimoddc(stack, axis)?;
        let shape = measured.shape().to_vec();
        let systemphi = broadcast_trailing(&calibration.systemphi, &shape)?;
        let systemmod = broadcast_trailing(&calibration.systemmod, &shape)?;

        Ok(Self {
            frequency: resolved,
            phi: &measured.phi + &systemphi,
            modulation: &measured.modulation / &systemmod,
            dc: measured.dc,
            mismatch,
        })
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Calibrated phase shift (rad).
    pub fn phi(&self) -> &ArrayD<f64> {
        &self.phi
    }

    /// Calibrated demodulation.
    pub fn modulation(&self) -> &ArrayD<f64> {
        &self.modulation
    }

    pub fn dc(&self) -> &ArrayD<f64> {
        &self.dc
    }

    /// The frequency mismatch against the reference, if there was one.
    pub fn frequency_mismatch(&self) -> Option<FrequencyMismatch> {
        self.mismatch
    }

    /// Per-pixel lifetime (s) from the phase shift.
    pub fn lifetime_phase(&self) -> ArrayD<f64> {
        phi_to_tau_array(&self.phi, self.frequency)
    }

    /// Per-pixel lifetime (s) from the demodulation.
    pub fn lifetime_mod(&self) -> ArrayD<f64> {
        mod_to_tau_array(&self.modulation, self.frequency)
    }

    /// Phasor plot coordinates `(m·cos φ, m·sin φ)`, one per pixel in row-major order.
    pub fn phasor_coords(&self) -> Vec<Point2<f64>> {
        Zip::from(&self.modulation)
            .and(&self.phi)
            .par_map_collect(|&m, &p| Point2::new(m * p.cos(), m * p.sin()))
            .iter()
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::Reference;
    use crate::data::{ideal_image, ideal_trace};
    use crate::math::{tau_to_mod, tau_to_phi};
    use ndarray::{Array3, Array4, arr0};
    use std::f64::consts::PI;

    const F: f64 = 40e6;
    const TAU_REF: f64 = 3.93e-9;

    fn neutral(shape: &[usize]) -> Calibration {
        Calibration {
            systemphi: ArrayD::zeros(shape),
            systemmod: ArrayD::ones(shape),
            frequency: F,
        }
    }

    #[test]
    fn neutral_calibration_leaves_phase_and_modulation_unchanged() {
        let (m0, phi0) = (0.45, 0.9);
        let reference_stack = ideal_image(3, 3, 100.0, tau_to_mod(TAU_REF, F), tau_to_phi(TAU_REF, F), 8);
        let reference = Reference::new(&reference_stack, TAU_REF, F, 2).unwrap();

        let stack = ideal_image(3, 3, 100.0, m0, phi0, 8);
        let sample = reference.sample(&stack, None, 2).unwrap();
        assert!(sample.phi().iter().all(|p| (p - phi0).abs() < 1e-9));
        assert!(sample.modulation().iter().all(|m| (m - m0).abs() < 1e-9));
        assert!(sample.dc().iter().all(|d| (d - 100.0).abs() < 1e-9));
        assert_eq!(sample.frequency_mismatch(), None);
    }

    #[test]
    fn removes_instrument_response() {
        let (delta, a) = (0.4, 0.75);
        let tau_sample = 2.1e-9;
        let reference_stack = ideal_image(
            2,
            2,
            1000.0,
            a * tau_to_mod(TAU_REF, F),
            tau_to_phi(TAU_REF, F) + delta,
            12,
        );
        let sample_stack = ideal_image(
            2,
            2,
            800.0,
            a * tau_to_mod(tau_sample, F),
            tau_to_phi(tau_sample, F) + delta,
            12,
        );
        let reference = Reference::new(&reference_stack, TAU_REF, F, 2).unwrap();
        let sample = reference.sample(&sample_stack, None, 2).unwrap();

        for &t in sample.lifetime_phase().iter() {
            assert!(((t - tau_sample) / tau_sample).abs() < 1e-9, "tau_phi {t}");
        }
        for &t in sample.lifetime_mod().iter() {
            assert!(((t - tau_sample) / tau_sample).abs() < 1e-9, "tau_mod {t}");
        }
    }

    #[test]
    fn point_reference_applies_to_every_pixel() {
        let (delta, a) = (-0.3, 0.6);
        let reference_stack = ideal_trace(
            500.0,
            a * tau_to_mod(TAU_REF, F),
            tau_to_phi(TAU_REF, F) + delta,
            8,
        );
        let reference = Reference::new(&reference_stack, TAU_REF, F, 0).unwrap();
        assert_eq!(reference.systemphi().ndim(), 0);

        let stack = Array3::from_shape_fn((4, 5, 8), |(r, c, k)| {
            let phi = 0.05 * (r + c) as f64 + delta;
            let t = 2.0 * PI * k as f64 / 8.0;
            100.0 * (1.0 + a * 0.5 * (t + phi).sin())
        });
        let sample = reference.sample(&stack, None, 2).unwrap();
        assert_eq!(sample.phi().shape(), &[4, 5]);
        for r in 0..4 {
            for c in 0..5 {
                let expected = 0.05 * (r + c) as f64;
                assert!((sample.phi()[[r, c]] - expected).abs() < 1e-9);
                assert!((sample.modulation()[[r, c]] - 0.5).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn image_reference_broadcasts_over_extra_sample_axes() {
        // Reference (2, 3); sample (2, 3, 4) with phase on axis 3.
        let mut systemphi = ArrayD::<f64>::zeros(&[2, 3][..]);
        systemphi[[1, 2]] = 0.5;
        let calibration = Calibration {
            systemphi,
            systemmod: ArrayD::from_elem(&[2, 3][..], 2.0),
            frequency: F,
        };
        let stack = Array4::from_shape_fn((2, 3, 4, 8), |(_, _, _, k)| {
            let t = 2.0 * PI * k as f64 / 8.0;
            10.0 * (1.0 + 0.8 * (t + 0.1).sin())
        });
        let sample = Sample::new(&stack, &calibration, None, 3).unwrap();
        assert_eq!(sample.phi().shape(), &[2, 3, 4]);
        for z in 0..4 {
            assert!((sample.phi()[[0, 0, z]] - 0.1).abs() < 1e-9);
            assert!((sample.phi()[[1, 2, z]] - 0.6).abs() < 1e-9);
            assert!((sample.modulation()[[0, 1, z]] - 0.4).abs() < 1e-9);
        }
    }

    #[test]
    fn rejects_incompatible_calibration_shape() {
        let calibration = neutral(&[3, 3]);
        let stack = ideal_image(2, 2, 1.0, 0.5, 0.0, 4);
        assert!(matches!(
            Sample::new(&stack, &calibration, None, 2),
            Err(FlimError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn frequency_mismatch_is_reported_not_fatal() {
        let calibration = neutral(&[2, 2]);
        let stack = ideal_image(2, 2, 100.0, 0.5, 0.6, 8);
        let sample = Sample::new(&stack, &calibration, Some(80e6), 2).unwrap();

        assert_eq!(sample.frequency(), 80e6);
        assert_eq!(
            sample.frequency_mismatch(),
            Some(FrequencyMismatch {
                sample: 80e6,
                reference: F,
            })
        );
        let expected = crate::math::phi_to_tau(0.6, 80e6);
        assert!(sample.lifetime_phase().iter().all(|t| ((t - expected) / expected).abs() < 1e-9));
    }

    #[test]
    fn matching_override_is_not_a_mismatch() {
        let calibration = neutral(&[2, 2]);
        let stack = ideal_image(2, 2, 100.0, 0.5, 0.6, 8);
        let sample = Sample::new(&stack, &calibration, Some(F), 2).unwrap();
        assert_eq!(sample.frequency_mismatch(), None);
    }

    #[test]
    fn phasor_coords_follow_row_major_order() {
        let calibration = Calibration {
            systemphi: arr0(0.0).into_dyn(),
            systemmod: arr0(1.0).into_dyn(),
            frequency: F,
        };
        let stack = Array3::from_shape_fn((2, 2, 8), |(r, c, k)| {
            let m = if r == 0 && c == 0 { 0.5 } else { 0.1 * (1 + r * 2 + c) as f64 };
            let phi = if r == 0 && c == 0 { PI / 3.0 } else { 0.0 };
            let t = 2.0 * PI * k as f64 / 8.0;
            100.0 * (1.0 + m * (t + phi).sin())
        });
        let sample = Sample::new(&stack, &calibration, None, 2).unwrap();
        let coords = sample.phasor_coords();
        assert_eq!(coords.len(), 4);
        assert!((coords[0].x - 0.25).abs() < 1e-9);
        assert!((coords[0].y - 0.5 * (PI / 3.0).sin()).abs() < 1e-9);
        assert!((coords[0].y - 0.433_012_701_892_219).abs() < 1e-9);
        for (i, c) in coords.iter().enumerate().skip(1) {
            assert!((c.x - 0.1 * (1 + i) as f64).abs() < 1e-9);
            assert!(c.y.abs() < 1e-9);
        }
    }

    #[test]
    fn degenerate_values_flow_through() {
        let calibration = neutral(&[2]);
        // First pixel is dark (dc = 0), second over-modulated.
        let stack = ndarray::Array2::from_shape_fn((2, 4), |(r, k)| {
            if r == 0 {
                0.0
            } else {
                let t = 2.0 * PI * k as f64 / 4.0;
                1.0 + 1.5 * (t + 0.2).sin()
            }
        });
        let sample = Sample::new(&stack, &calibration, None, 1).unwrap();
        let tau_mod = sample.lifetime_mod();
        assert!(tau_mod[[0]].is_nan());
        assert!(tau_mod[[1]].is_nan());
    }
}
