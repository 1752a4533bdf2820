//! Error types.
//!
//! - `FlimError` is returned by the library (invalid axes, unusable shapes, bad
//!   generator parameters). Numeric degeneracies are *not* errors: they flow
//!   through the arrays as NaN/inf.
//! - `AppError` is what the binary reports, carrying a process exit code.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlimError {
    #[error("Invalid phase axis {axis} for a stack with {ndim} dimension(s).")]
    InvalidAxis { axis: usize, ndim: usize },
    #[error("Phase axis {axis} is empty; at least one phase step is required.")]
    EmptyPhaseAxis { axis: usize },
    #[error("Calibration shape {reference:?} can not be broadcast onto sample shape {sample:?}.")]
    ShapeMismatch {
        reference: Vec<usize>,
        sample: Vec<usize>,
    },
    #[error("Invalid parameter {name}={value}.")]
    InvalidParameter { name: &'static str, value: f64 },
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<FlimError> for AppError {
    fn from(err: FlimError) -> Self {
        AppError::new(2, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flim_error_maps_to_invalid_input_exit_code() {
        let err: AppError = FlimError::InvalidAxis { axis: 3, ndim: 3 }.into();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("axis 3"));
    }
}
