//! # resac-grid
//!
//! Data model for multi-resolution sea-surface fields: variables,
//! resolution codes, coordinate metadata, and the channel-last tensor
//! reshaping consumed by the convolutional model.
//!
//! A field arrives as a 3-D array `(time, row, col)` for one
//! (variable, resolution) pair. Before reaching the model it is restricted
//! to a sample-index subset, given a singleton channel axis, and reordered
//! to channel-last `(n, rows, cols, 1)`. Sample counts must agree across
//! every variable of a role (input or output) and between the two roles;
//! disagreement aborts the run before any model invocation.

mod coords;
mod error;
mod field;
mod reshape;
mod stats;
mod tensor;
mod variable;

pub use coords::CoordinateMetadata;
pub use error::GridError;
pub use field::VarResoField;
pub use reshape::{TensorEntry, validate_sample_counts};
pub use stats::{FieldStats, nan_rmse};
pub use tensor::{CHANNEL_AXIS, channel_last, spatial_stack};
pub use variable::{Resolution, Role, Variable};
