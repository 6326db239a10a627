//! Architecture descriptor: the ordered input/output contract.

use serde::{Deserialize, Serialize};

use resac_grid::{Resolution, Variable};

/// One (variable, resolution) slot in the model's ordered contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarSpec {
    /// The physical variable.
    pub variable: Variable,
    /// The resolution code.
    pub resolution: Resolution,
}

impl VarSpec {
    /// Creates a slot.
    pub fn new(variable: Variable, resolution: Resolution) -> Self {
        Self {
            variable,
            resolution,
        }
    }
}

/// One declared output: its identity plus the chain of integer upsampling
/// factors relating it to the model's primary (first) input grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSpec {
    /// The physical variable.
    pub variable: Variable,
    /// The resolution code.
    pub resolution: Resolution,
    /// Upsampling factors from the primary input, e.g. `[3]` for R09→R03
    /// and `[3, 3]` for R09→R01.
    pub factors: Vec<usize>,
}

impl OutputSpec {
    /// Creates an output slot.
    pub fn new(variable: Variable, resolution: Resolution, factors: Vec<usize>) -> Self {
        Self {
            variable,
            resolution,
            factors,
        }
    }
}

/// The architecture descriptor persisted as the first part of a model
/// artifact bundle.
///
/// The variant tag selects the concrete [`Model`](crate::Model)
/// implementation; the ordered input and output lists are the fixed
/// contract every prediction must honor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArchitectureSpec {
    /// Bicubic upsampling of the primary input with one trained affine
    /// correction (gain, bias) per output.
    ScaledBicubic {
        /// Ordered model inputs.
        inputs: Vec<VarSpec>,
        /// Ordered model outputs.
        outputs: Vec<OutputSpec>,
    },
}

impl ArchitectureSpec {
    /// Ordered input slots.
    pub fn inputs(&self) -> &[VarSpec] {
        match self {
            ArchitectureSpec::ScaledBicubic { inputs, .. } => inputs,
        }
    }

    /// Ordered output slots.
    pub fn outputs(&self) -> &[OutputSpec] {
        match self {
            ArchitectureSpec::ScaledBicubic { outputs, .. } => outputs,
        }
    }
}
