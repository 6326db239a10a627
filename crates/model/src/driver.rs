//! Checked prediction: ordered inputs in, decoded physical fields out.

use ndarray::Array4;
use tracing::info;

use resac_codec::decode;
use resac_grid::{Resolution, TensorEntry, Variable};

use crate::artifact::ModelArtifact;
use crate::error::ModelError;
use crate::Model;

/// One predicted output, decoded back to physical units.
#[derive(Debug, Clone)]
pub struct DecodedOutput {
    variable: Variable,
    resolution: Resolution,
    data: Array4<f32>,
}

impl DecodedOutput {
    /// The predicted variable.
    pub fn variable(&self) -> Variable {
        self.variable
    }

    /// The predicted resolution.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// The decoded tensor, shape (n, rows, cols, 1).
    pub fn data(&self) -> &Array4<f32> {
        &self.data
    }

    /// Consumes the output, yielding the decoded tensor.
    pub fn into_data(self) -> Array4<f32> {
        self.data
    }
}

/// Runs a loaded artifact against encoded inputs, enforcing the model's
/// ordered contract before and after the forward pass.
///
/// The input order is part of the trained model's identity. A list that
/// is merely a permutation of the right tensors would predict garbage
/// with no runtime symptom, so the driver rejects it up front.
pub struct PredictionDriver {
    artifact: ModelArtifact,
    model: Box<dyn Model>,
}

impl PredictionDriver {
    /// Builds a driver from a validated artifact.
    pub fn new(artifact: ModelArtifact) -> Result<Self, ModelError> {
        let model = artifact.build_model()?;
        Ok(Self { artifact, model })
    }

    /// The artifact the driver serves.
    pub fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }

    /// Predicts over encoded inputs and decodes every output back to
    /// physical units with the params persisted at training time.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InputCountMismatch`] or
    /// [`ModelError::InputOrderMismatch`] when the supplied entries do
    /// not match the contract, and [`ModelError::OutputCountMismatch`]
    /// when the model misbehaves.
    pub fn predict(&self, inputs: &[TensorEntry]) -> Result<Vec<DecodedOutput>, ModelError> {
        self.check_inputs(inputs)?;

        let tensors: Vec<Array4<f32>> =
            inputs.iter().map(|e| e.tensor().clone()).collect();
        let encoded = self.model.predict(&tensors)?;

        let specs = self.artifact.architecture().outputs();
        if encoded.len() != specs.len() {
            return Err(ModelError::OutputCountMismatch {
                expected: specs.len(),
                got: encoded.len(),
            });
        }

        let mut decoded = Vec::with_capacity(encoded.len());
        for ((tensor, spec), params) in encoded
            .into_iter()
            .zip(specs.iter())
            .zip(self.artifact.output_params().iter())
        {
            let data = decode(&tensor, spec.variable, spec.resolution, params)?;
            decoded.push(DecodedOutput {
                variable: spec.variable,
                resolution: spec.resolution,
                data,
            });
        }
        info!(
            samples = inputs.first().map_or(0, TensorEntry::n_samples),
            outputs = decoded.len(),
            "prediction complete"
        );
        Ok(decoded)
    }

    fn check_inputs(&self, inputs: &[TensorEntry]) -> Result<(), ModelError> {
        let specs = self.artifact.architecture().inputs();
        if inputs.len() != specs.len() {
            return Err(ModelError::InputCountMismatch {
                expected: specs.len(),
                got: inputs.len(),
            });
        }
        for (position, (entry, spec)) in inputs.iter().zip(specs.iter()).enumerate() {
            if entry.variable() != spec.variable || entry.resolution() != spec.resolution {
                return Err(ModelError::InputOrderMismatch {
                    position,
                    expected_variable: spec.variable,
                    expected_resolution: spec.resolution,
                    got_variable: entry.variable(),
                    got_resolution: entry.resolution(),
                });
            }
        }
        Ok(())
    }
}
