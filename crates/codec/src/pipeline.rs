//! Fit-on-train, apply-everywhere encoding over one variable's splits.

use ndarray::Array4;
use tracing::debug;

use resac_grid::{Resolution, Variable};

use crate::codec::{encode_with, fit_and_encode};
use crate::error::CodecError;
use crate::params::{CodecMode, NormParams};

/// One variable's encoded train/validation/test tensors together with the
/// params that encoded them.
///
/// Keeping data and params in one record (rather than parallel lists
/// indexed by position) makes it impossible for a variable's tensors and
/// its normalization to drift out of alignment.
#[derive(Debug, Clone)]
pub struct EncodedVariable {
    variable: Variable,
    resolution: Resolution,
    train: Array4<f32>,
    validation: Array4<f32>,
    test: Array4<f32>,
    params: NormParams,
}

impl EncodedVariable {
    /// The physical variable.
    pub fn variable(&self) -> Variable {
        self.variable
    }

    /// The resolution code.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Encoded training tensor.
    pub fn train(&self) -> &Array4<f32> {
        &self.train
    }

    /// Encoded validation tensor.
    pub fn validation(&self) -> &Array4<f32> {
        &self.validation
    }

    /// Encoded test tensor.
    pub fn test(&self) -> &Array4<f32> {
        &self.test
    }

    /// Mutable access to the test tensor, for test-only noise injection.
    pub fn test_mut(&mut self) -> &mut Array4<f32> {
        &mut self.test
    }

    /// The params fitted on the training subset.
    pub fn params(&self) -> &NormParams {
        &self.params
    }
}

/// Fits the codec on the training tensor and applies the SAME params to
/// the validation and test tensors.
///
/// This is the only place the pipeline is allowed to fit; everything
/// downstream receives the returned record read-only.
///
/// # Errors
///
/// Propagates [`CodecError::NonFiniteRange`] from the fit.
pub fn encode_split(
    variable: Variable,
    resolution: Resolution,
    train: &Array4<f32>,
    validation: &Array4<f32>,
    test: &Array4<f32>,
    mode: CodecMode,
) -> Result<EncodedVariable, CodecError> {
    let (train_enc, params) = fit_and_encode(train, mode, variable, resolution)?;
    let validation_enc = encode_with(validation, variable, resolution, &params)?;
    let test_enc = encode_with(test, variable, resolution, &params)?;
    debug!(
        variable = %variable,
        resolution = %resolution,
        "split encoded with shared params"
    );
    Ok(EncodedVariable {
        variable,
        resolution,
        train: train_enc,
        validation: validation_enc,
        test: test_enc,
        params,
    })
}
