//! Two-stage calibration workflow.
//!
//! - `Reference`: measure a dye of known lifetime, derive the instrument's
//!   systematic phase offset and modulation factor
//! - `Sample`: decompose a sample stack and correct it with that calibration

pub mod reference;
pub mod sample;

pub use reference::*;
pub use sample::*;
