//! Numeric core: axis utilities, harmonic decomposition and lifetime formulas.

pub mod axis;
pub mod harmonic;
pub mod lifetime;

pub use axis::*;
pub use harmonic::*;
pub use lifetime::*;
