//! `fdflim` library crate.
//!
//! Frequency-domain fluorescence lifetime imaging: decompose phase stacks into
//! phase shift / modulation / DC, calibrate against a reference of known
//! lifetime, and convert to lifetimes and phasor coordinates.
//!
//! The binary (`fdflim`) is a thin wrapper around this library so that the
//! numeric core is testable without spawning processes.

pub mod app;
pub mod calibration;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod math;
pub mod report;

pub use calibration::{Reference, Sample, system_phi_mod};
pub use domain::{Calibration, DEFAULT_PHASE_AXIS, FrequencyMismatch, PhiModDc};
pub use error::FlimError;
pub use math::{mod_to_tau, omega, phi_to_tau, phimoddc, tau_to_mod, tau_to_phi};
