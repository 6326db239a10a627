//! Fitted normalization parameters.

use serde::{Deserialize, Serialize};

use resac_grid::{Resolution, Variable};

use crate::error::CodecError;

/// Which bounded interval the fit maps the observed range onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodecMode {
    /// Affine map of the observed [min, max] onto [0, 1].
    Fit01,
    /// Affine map of the observed [min, max] onto [-1, 1].
    Fit11,
}

impl CodecMode {
    /// Lower bound of the target interval.
    pub(crate) fn lo(&self) -> f32 {
        match self {
            CodecMode::Fit01 => 0.0,
            CodecMode::Fit11 => -1.0,
        }
    }

    /// Width of the target interval.
    pub(crate) fn width(&self) -> f32 {
        match self {
            CodecMode::Fit01 => 1.0,
            CodecMode::Fit11 => 2.0,
        }
    }
}

/// The affine mapping fitted on one variable's training subset.
///
/// Immutable once fitted: refitting produces a new value, never mutates an
/// existing one, so tensors already encoded against a params value stay
/// decodable. Serialized into the model artifact bundle so inference-time
/// recoding matches training-time coding exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormParams {
    variable: Variable,
    resolution: Resolution,
    mode: CodecMode,
    min: f32,
    max: f32,
}

impl NormParams {
    pub(crate) fn new(
        variable: Variable,
        resolution: Resolution,
        mode: CodecMode,
        min: f32,
        max: f32,
    ) -> Self {
        Self {
            variable,
            resolution,
            mode,
            min,
            max,
        }
    }

    /// Variable the params were fitted on.
    pub fn variable(&self) -> Variable {
        self.variable
    }

    /// Resolution the params were fitted on.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Target interval of the fit.
    pub fn mode(&self) -> CodecMode {
        self.mode
    }

    /// Fitted minimum (physical units).
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Fitted maximum (physical units).
    pub fn max(&self) -> f32 {
        self.max
    }

    /// `true` when the fitted range collapsed to a point (min == max).
    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }

    /// Checks that these params belong to the given (variable, resolution).
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::ParamsMismatch`] on disagreement.
    pub fn ensure_matches(
        &self,
        variable: Variable,
        resolution: Resolution,
    ) -> Result<(), CodecError> {
        if self.variable != variable || self.resolution != resolution {
            return Err(CodecError::ParamsMismatch {
                fitted_variable: self.variable,
                fitted_resolution: self.resolution,
                variable,
                resolution,
            });
        }
        Ok(())
    }
}
