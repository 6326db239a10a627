//! Role-level sample-count validation over reshaped tensors.

use ndarray::Array4;
use tracing::debug;

use crate::error::GridError;
use crate::variable::{Resolution, Role, Variable};

/// A reshaped channel-last tensor tagged with its variable and resolution.
///
/// Tensors travel as one ordered collection per role; the tag rides along
/// so that codec parameters and error messages can never drift out of
/// alignment with a separate name list.
#[derive(Debug, Clone)]
pub struct TensorEntry {
    variable: Variable,
    resolution: Resolution,
    tensor: Array4<f32>,
}

impl TensorEntry {
    /// Tags a tensor with its (variable, resolution) identity.
    pub fn new(variable: Variable, resolution: Resolution, tensor: Array4<f32>) -> Self {
        Self {
            variable,
            resolution,
            tensor,
        }
    }

    /// The physical variable.
    pub fn variable(&self) -> Variable {
        self.variable
    }

    /// The resolution code.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// The `(n, rows, cols, 1)` tensor.
    pub fn tensor(&self) -> &Array4<f32> {
        &self.tensor
    }

    /// Consumes the entry, returning the tensor.
    pub fn into_tensor(self) -> Array4<f32> {
        self.tensor
    }

    /// Number of samples along the batch axis.
    pub fn n_samples(&self) -> usize {
        self.tensor.shape()[0]
    }
}

/// Checks that every tensor within each role shares one sample count and
/// that the input and output roles agree, returning the common count.
///
/// Runs before any model invocation: a mismatch indicates misaligned
/// source data and aborts the run rather than truncating.
///
/// # Errors
///
/// Returns [`GridError::SampleCountMismatch`] naming the role and the
/// first variable that disagrees.
pub fn validate_sample_counts(
    inputs: &[TensorEntry],
    outputs: &[TensorEntry],
) -> Result<usize, GridError> {
    let n = check_role(Role::Input, inputs, None)?;
    let n = check_role(Role::Output, outputs, Some(n))?;
    debug!(n_samples = n, "sample counts consistent across roles");
    Ok(n)
}

fn check_role(
    role: Role,
    entries: &[TensorEntry],
    expected: Option<usize>,
) -> Result<usize, GridError> {
    let mut expected = expected;
    for entry in entries {
        let got = entry.n_samples();
        match expected {
            None => expected = Some(got),
            Some(n) if n != got => {
                return Err(GridError::SampleCountMismatch {
                    role,
                    variable: entry.variable(),
                    resolution: entry.resolution(),
                    expected: n,
                    got,
                });
            }
            Some(_) => {}
        }
    }
    // Empty roles are caught earlier (EmptySelection); treat as count 0.
    Ok(expected.unwrap_or(0))
}
