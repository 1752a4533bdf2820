//! Axis bookkeeping for phase stacks.
//!
//! Two shape rules are used everywhere else in the crate:
//!
//! - reduce along the phase axis: output shape = input shape minus that axis
//! - align a calibration array with a sample by appending trailing singleton
//!   axes, then broadcasting with the usual (numpy-style) rules
//!
//! Keeping them here means the shape invariants can be tested on their own.

use ndarray::{ArrayBase, ArrayD, ArrayViewD, Axis, Data, Dimension, IxDyn, RemoveAxis};

use crate::error::FlimError;

/// Validate `axis` against `ndim`.
pub fn check_axis(axis: usize, ndim: usize) -> Result<(), FlimError> {
    if axis >= ndim {
        return Err(FlimError::InvalidAxis { axis, ndim });
    }
    Ok(())
}

/// Shape of `array` once `axis` has been reduced away.
pub fn reduced_shape<S, D>(array: &ArrayBase<S, D>, axis: usize) -> Result<IxDyn, FlimError>
where
    S: Data,
    D: Dimension,
{
    check_axis(axis, array.ndim())?;
    Ok(array.view().into_dyn().raw_dim().remove_axis(Axis(axis)))
}

/// Append singleton axes at the end of `view` until it has `ndim` dimensions.
///
/// A view that already has `ndim` or more dimensions is returned unchanged.
pub fn append_singleton_axes(view: ArrayViewD<'_, f64>, ndim: usize) -> ArrayViewD<'_, f64> {
    let mut view = view;
    while view.ndim() < ndim {
        let last = view.ndim();
        view = view.insert_axis(Axis(last));
    }
    view
}

/// Align `array` to `shape` by appending trailing singleton axes and broadcasting.
///
/// Returns an owned array of exactly `shape`. Fails if `array` has more
/// dimensions than `shape`, or if the aligned shapes are not broadcast compatible.
pub fn broadcast_trailing(array: &ArrayD<f64>, shape: &[usize]) -> Result<ArrayD<f64>, FlimError> {
    let mismatch = || FlimError::ShapeMismatch {
        reference: array.shape().to_vec(),
        sample: shape.to_vec(),
    };
    if array.ndim() > shape.len() {
        return Err(mismatch());
    }
    let aligned = append_singleton_axes(array.view(), shape.len());
    let broadcast = aligned.broadcast(IxDyn(shape)).ok_or_else(mismatch)?;
    Ok(broadcast.to_owned())
}
