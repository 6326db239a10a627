//! The three-part artifact bundle of a trained model.
//!
//! A run directory holds `architecture.json` (the descriptor),
//! `weights.npz` (the trained values) and `norm_params.json` (the fitted
//! normalization parameters for every input and output slot). Loading
//! requires all three files; a partial bundle is rejected so a stale or
//! half-written run directory can never be served from.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use ndarray::Array1;
use ndarray_npy::{NpzReader, NpzWriter};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use resac_codec::NormParams;

use crate::error::ModelError;
use crate::scaled_bicubic::ScaledBicubic;
use crate::spec::ArchitectureSpec;
use crate::Model;

const ARCHITECTURE_FILE: &str = "architecture.json";
const WEIGHTS_FILE: &str = "weights.npz";
const NORM_PARAMS_FILE: &str = "norm_params.json";

/// The normalization half of the bundle: one fitted params value per
/// declared input and output slot, in slot order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct NormParamsBundle {
    pub(crate) inputs: Vec<NormParams>,
    pub(crate) outputs: Vec<NormParams>,
}

/// A complete, validated artifact bundle loaded into memory.
#[derive(Debug, Clone)]
pub struct ModelArtifact {
    architecture: ArchitectureSpec,
    gain: Array1<f32>,
    bias: Array1<f32>,
    input_params: Vec<NormParams>,
    output_params: Vec<NormParams>,
}

impl ModelArtifact {
    /// Assembles an artifact from a trained model's parts.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::ParamsCoverage`] when the params lists do
    /// not line up with the architecture's slots, or
    /// [`ModelError::WeightMismatch`] when the weight vectors do not
    /// have one entry per output.
    pub fn new(
        architecture: ArchitectureSpec,
        model: &ScaledBicubic,
        input_params: Vec<NormParams>,
        output_params: Vec<NormParams>,
    ) -> Result<Self, ModelError> {
        let artifact = Self {
            architecture,
            gain: Array1::from_vec(model.gain().to_vec()),
            bias: Array1::from_vec(model.bias().to_vec()),
            input_params,
            output_params,
        };
        artifact.validate()?;
        Ok(artifact)
    }

    /// The architecture descriptor.
    pub fn architecture(&self) -> &ArchitectureSpec {
        &self.architecture
    }

    /// Fitted normalization params for the input slots, in order.
    pub fn input_params(&self) -> &[NormParams] {
        &self.input_params
    }

    /// Fitted normalization params for the output slots, in order.
    pub fn output_params(&self) -> &[NormParams] {
        &self.output_params
    }

    /// Instantiates the trained model the bundle describes.
    pub fn build_model(&self) -> Result<Box<dyn Model>, ModelError> {
        Ok(Box::new(self.build_trainable()?))
    }

    /// Instantiates the concrete model for further fitting (resumed runs).
    pub fn build_trainable(&self) -> Result<ScaledBicubic, ModelError> {
        match &self.architecture {
            ArchitectureSpec::ScaledBicubic { inputs, outputs } => ScaledBicubic::with_weights(
                inputs.clone(),
                outputs.clone(),
                self.gain.to_vec(),
                self.bias.to_vec(),
            ),
        }
    }

    /// Writes the three bundle files into `dir`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Io`] on filesystem failures and
    /// [`ModelError::Descriptor`] on serialization failures.
    pub fn save(&self, dir: &Path) -> Result<(), ModelError> {
        std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;

        let arch_path = dir.join(ARCHITECTURE_FILE);
        write_json(&arch_path, &self.architecture)?;

        let weights_path = dir.join(WEIGHTS_FILE);
        let file = File::create(&weights_path).map_err(|e| io_err(&weights_path, e))?;
        let mut npz = NpzWriter::new(BufWriter::new(file));
        npz.add_array("gain", &self.gain)
            .map_err(|e| io_err(&weights_path, e))?;
        npz.add_array("bias", &self.bias)
            .map_err(|e| io_err(&weights_path, e))?;
        npz.finish().map_err(|e| io_err(&weights_path, e))?;

        let params_path = dir.join(NORM_PARAMS_FILE);
        let bundle = NormParamsBundle {
            inputs: self.input_params.clone(),
            outputs: self.output_params.clone(),
        };
        write_json(&params_path, &bundle)?;

        info!(dir = %dir.display(), "model artifact saved");
        Ok(())
    }

    /// Reads and validates a bundle from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::ArtifactIncomplete`] when any of the three
    /// files is absent, [`ModelError::ParamsCoverage`] or
    /// [`ModelError::WeightMismatch`] when the parts disagree.
    pub fn load(dir: &Path) -> Result<Self, ModelError> {
        let arch_path = require(dir, ARCHITECTURE_FILE)?;
        let weights_path = require(dir, WEIGHTS_FILE)?;
        let params_path = require(dir, NORM_PARAMS_FILE)?;

        let architecture: ArchitectureSpec = read_json(&arch_path)?;

        let file = File::open(&weights_path).map_err(|e| io_err(&weights_path, e))?;
        let mut npz =
            NpzReader::new(BufReader::new(file)).map_err(|e| io_err(&weights_path, e))?;
        let gain: Array1<f32> = npz
            .by_name("gain")
            .map_err(|e| io_err(&weights_path, e))?;
        let bias: Array1<f32> = npz
            .by_name("bias")
            .map_err(|e| io_err(&weights_path, e))?;

        let bundle: NormParamsBundle = read_json(&params_path)?;

        let artifact = Self {
            architecture,
            gain,
            bias,
            input_params: bundle.inputs,
            output_params: bundle.outputs,
        };
        artifact.validate()?;
        debug!(dir = %dir.display(), "model artifact loaded");
        Ok(artifact)
    }

    /// Checks that the three parts agree with each other.
    fn validate(&self) -> Result<(), ModelError> {
        let n_out = self.architecture.outputs().len();
        if self.gain.len() != n_out || self.bias.len() != n_out {
            return Err(ModelError::WeightMismatch {
                reason: format!(
                    "architecture declares {n_out} outputs but weights hold {} gains and {} biases",
                    self.gain.len(),
                    self.bias.len()
                ),
            });
        }

        check_slot_params(
            "input",
            self.architecture
                .inputs()
                .iter()
                .map(|s| (s.variable, s.resolution)),
            &self.input_params,
        )?;
        check_slot_params(
            "output",
            self.architecture
                .outputs()
                .iter()
                .map(|s| (s.variable, s.resolution)),
            &self.output_params,
        )
    }
}

/// Checks that `params` has one entry per slot, in slot order.
fn check_slot_params(
    role: &str,
    slots: impl ExactSizeIterator<Item = (resac_grid::Variable, resac_grid::Resolution)>,
    params: &[NormParams],
) -> Result<(), ModelError> {
    if slots.len() != params.len() {
        return Err(ModelError::ParamsCoverage {
            reason: format!(
                "{} {role} slots but {} {role} params",
                slots.len(),
                params.len()
            ),
        });
    }
    for (i, ((variable, resolution), p)) in slots.zip(params.iter()).enumerate() {
        if p.variable() != variable || p.resolution() != resolution {
            return Err(ModelError::ParamsCoverage {
                reason: format!(
                    "{role} slot {i} is {variable} at {resolution} but params were fitted on {} at {}",
                    p.variable(),
                    p.resolution()
                ),
            });
        }
    }
    Ok(())
}

fn require(dir: &Path, name: &str) -> Result<PathBuf, ModelError> {
    let path = dir.join(name);
    if !path.is_file() {
        return Err(ModelError::ArtifactIncomplete { path });
    }
    Ok(path)
}

fn io_err(path: &Path, source: impl std::fmt::Display) -> ModelError {
    ModelError::Io {
        path: path.to_path_buf(),
        reason: source.to_string(),
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ModelError> {
    let file = File::create(path).map_err(|e| io_err(path, e))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value).map_err(|e| {
        ModelError::Descriptor {
            reason: format!("{}: {e}", path.display()),
        }
    })
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, ModelError> {
    let file = File::open(path).map_err(|e| io_err(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| ModelError::Descriptor {
        reason: format!("{}: {e}", path.display()),
    })
}
