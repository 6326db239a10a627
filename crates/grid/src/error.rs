//! Error types for the resac-grid crate.

use crate::variable::{Resolution, Role, Variable};

/// Error type for all fallible operations in the resac-grid crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GridError {
    /// Returned when a stored variable tag maps to no canonical variable.
    #[error("unknown variable tag '{tag}'")]
    UnknownVariable {
        /// The unrecognized raw tag.
        tag: String,
    },

    /// Returned when a sample selection is empty.
    #[error("empty sample selection for {variable} at {resolution}")]
    EmptySelection {
        /// Variable being reshaped.
        variable: Variable,
        /// Resolution of the field.
        resolution: Resolution,
    },

    /// Returned when a sample index falls outside the time axis.
    #[error(
        "sample index {index} out of range for {variable} at {resolution} \
         (time axis has {len} steps)"
    )]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Length of the time axis.
        len: usize,
        /// Variable being reshaped.
        variable: Variable,
        /// Resolution of the field.
        resolution: Resolution,
    },

    /// Returned when sample counts disagree across or between roles.
    #[error(
        "sample count mismatch in {role} role for {variable} at {resolution}: \
         expected {expected}, got {got}"
    )]
    SampleCountMismatch {
        /// Role in which the mismatch was detected.
        role: Role,
        /// Variable that disagrees.
        variable: Variable,
        /// Resolution of the offending tensor.
        resolution: Resolution,
        /// Sample count established by the first tensor.
        expected: usize,
        /// Sample count of the offending tensor.
        got: usize,
    },

    /// Returned when a coordinate array length disagrees with the grid.
    #[error("coordinate '{name}' length mismatch: expected {expected}, got {got}")]
    CoordinateLength {
        /// Coordinate field name.
        name: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// Returned when two fields compared elementwise disagree in shape.
    #[error("cannot compare fields of shape {expected:?} and {got:?}")]
    ShapeMismatch {
        /// Shape of the first field.
        expected: Vec<usize>,
        /// Shape of the second field.
        got: Vec<usize>,
    },

    /// Returned when a calendar subset index exceeds the time axis.
    #[error("time index {index} out of range (axis has {len} steps)")]
    TimeIndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Length of the time axis.
        len: usize,
    },
}
