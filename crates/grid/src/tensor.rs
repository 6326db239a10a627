//! Channel-axis bookkeeping and the raw 3-D to 4-D layout transform.

use ndarray::{Array3, Array4, Axis};

/// Position of the channel axis in model-facing tensors. The whole
/// pipeline is channel-last; this is a fixed layout constant, not per-call
/// state.
pub const CHANNEL_AXIS: usize = 3;

/// Restricts a `(time, rows, cols)` field to the given sample indices and
/// produces the channel-last tensor `(n, rows, cols, 1)`.
///
/// The transform inserts the singleton channel axis first, `(n, 1, rows,
/// cols)`, then reorders axes exactly once to put the channel last. Caller
/// guarantees every index is within the time axis.
pub fn channel_last(data: &Array3<f32>, indices: &[usize]) -> Array4<f32> {
    let selected = data.select(Axis(0), indices);
    let channel_first = selected.insert_axis(Axis(1));
    let permuted = channel_first.permuted_axes([0, 2, 3, 1]);
    permuted.as_standard_layout().to_owned()
}

/// Drops the singleton channel axis, `(n, rows, cols, 1)` back to the raw
/// `(n, rows, cols)` stack. Used on the decoded prediction side.
pub fn spatial_stack(tensor: &Array4<f32>) -> Array3<f32> {
    debug_assert_eq!(tensor.shape()[CHANNEL_AXIS], 1);
    tensor.index_axis(Axis(CHANNEL_AXIS), 0).to_owned()
}
