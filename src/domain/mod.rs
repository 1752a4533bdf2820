//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - decomposition outputs (`PhiModDc`)
//! - the calibration captured from a reference (`Calibration`)
//! - the non-fatal frequency mismatch report (`FrequencyMismatch`)
//! - synthetic acquisition settings (`SimulationConfig`)

pub mod types;

pub use types::*;
