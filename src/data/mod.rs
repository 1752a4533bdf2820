//! Input data sources.
//!
//! Real acquisitions come from an external image loader; this module only
//! provides deterministic synthetic stacks for tests and the `simulate` command.

pub mod synthetic;

pub use synthetic::*;
