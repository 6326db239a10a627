//! Shared front half of every subcommand: load, split, reshape, encode.

use anyhow::{Context, Result};
use ndarray::{Array1, Array3, Axis};
use tracing::info;

use resac_codec::{encode_split, EncodedVariable};
use resac_grid::{validate_sample_counts, FieldStats, TensorEntry, VarResoField};
use resac_io::{dataset_root, load_dataset, LoadPlan};
use resac_noise::{inject, NoiseConfig};
use resac_split::SampleSplit;

use crate::config::ResacConfig;
use crate::convert;

/// Everything the subcommands need after the data-preparation stage.
pub struct PreparedData {
    /// The index split the tensors were built from.
    pub split: SampleSplit,
    /// Time-axis values of the test samples, in split order.
    pub test_time: Array1<f64>,
    /// Raw input fields, in plan order.
    pub raw_inputs: Vec<VarResoField>,
    /// Raw output fields, in plan order.
    pub raw_outputs: Vec<VarResoField>,
    /// Encoded input variables, aligned with `raw_inputs`.
    pub inputs: Vec<EncodedVariable>,
    /// Encoded output variables, aligned with `raw_outputs`.
    pub outputs: Vec<EncodedVariable>,
}

/// Runs loader -> splitter -> reshaper -> codec for one configuration.
pub fn prepare(config: &ResacConfig, seed_override: Option<u64>) -> Result<PreparedData> {
    let root = dataset_root()?;
    let input_vars = convert::build_var_list(&config.data.inputs).context("[data] inputs")?;
    let output_vars = convert::build_var_list(&config.data.outputs).context("[data] outputs")?;
    let mode = convert::parse_codec_mode(&config.codec.mode)?;

    let plan = LoadPlan::new(&input_vars, &output_vars, config.data.with_noise);
    let dataset = load_dataset(&root, &plan)
        .with_context(|| format!("failed to load dataset from {}", root.display()))?;

    for field in dataset.inputs().iter().chain(dataset.outputs()) {
        info!(
            variable = %field.variable(),
            resolution = %field.resolution(),
            stats = %FieldStats::of(field.data()),
            "field loaded"
        );
    }

    let n_total = dataset
        .inputs()
        .first()
        .map(VarResoField::n_samples)
        .context("no input fields loaded")?;
    let split_spec = convert::build_split_spec(&config.split, seed_override)?;
    let split = split_spec.split(n_total)?;
    info!(
        total = n_total,
        train = split.train().len(),
        validation = split.validation().len(),
        test = split.test().len(),
        "sample split computed"
    );

    let test_time = dataset.inputs()[0]
        .coords()
        .time_subset(split.test())
        .context("test-split calendar extraction")?;

    // Role-level sample-count check on the training tensors before any
    // encoding happens.
    let train_inputs = tensors_for(dataset.inputs(), split.train())?;
    let train_outputs = tensors_for(dataset.outputs(), split.train())?;
    validate_sample_counts(&train_inputs, &train_outputs)?;

    let mut inputs = Vec::with_capacity(dataset.inputs().len());
    for field in dataset.inputs() {
        inputs.push(encode_field(field, &split, mode)?);
    }
    let mut outputs = Vec::with_capacity(dataset.outputs().len());
    for field in dataset.outputs() {
        outputs.push(encode_field(field, &split, mode)?);
    }

    Ok(PreparedData {
        split,
        test_time,
        raw_inputs: dataset.inputs().to_vec(),
        raw_outputs: dataset.outputs().to_vec(),
        inputs,
        outputs,
    })
}

fn tensors_for(fields: &[VarResoField], indices: &[usize]) -> Result<Vec<TensorEntry>> {
    fields
        .iter()
        .map(|f| {
            let tensor = f.tensor(indices).with_context(|| {
                format!("reshaping {} at {}", f.variable(), f.resolution())
            })?;
            Ok(TensorEntry::new(f.variable(), f.resolution(), tensor))
        })
        .collect()
}

fn encode_field(
    field: &VarResoField,
    split: &SampleSplit,
    mode: resac_codec::CodecMode,
) -> Result<EncodedVariable> {
    let train = field.tensor(split.train())?;
    let validation = field.tensor(split.validation())?;
    let test = field.tensor(split.test())?;
    encode_split(
        field.variable(),
        field.resolution(),
        &train,
        &validation,
        &test,
        mode,
    )
    .with_context(|| {
        format!(
            "encoding {} at {} failed",
            field.variable(),
            field.resolution()
        )
    })
}

/// Selects a sample subset of a raw `(T, H, W)` field, in subset order.
pub fn select_samples(data: &Array3<f32>, indices: &[usize]) -> Array3<f32> {
    data.select(Axis(0), indices)
}

/// Test-split tensors of the encoded inputs, tagged for the driver.
pub fn encoded_test_entries(inputs: &[EncodedVariable]) -> Vec<TensorEntry> {
    inputs
        .iter()
        .map(|e| TensorEntry::new(e.variable(), e.resolution(), e.test().clone()))
        .collect()
}

/// Perturbs the test tensor of every encoded input carrying the noise
/// target variable. The target may be present at several input
/// resolutions; all of them are perturbed. Returns the number of tensors
/// touched so the caller can warn when the target is absent.
pub fn apply_test_noise(inputs: &mut [EncodedVariable], config: &NoiseConfig) -> Result<usize> {
    let mut perturbed = 0;
    for entry in inputs
        .iter_mut()
        .filter(|e| e.variable() == config.target())
    {
        inject(entry.test_mut(), config)?;
        perturbed += 1;
    }
    Ok(perturbed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array4;
    use resac_codec::CodecMode;
    use resac_grid::{Resolution, Variable};

    fn encoded(variable: Variable, resolution: Resolution) -> EncodedVariable {
        let tensor = Array4::from_shape_fn((4, 3, 3, 1), |(n, r, c, _)| (n + r + c) as f32);
        encode_split(variable, resolution, &tensor, &tensor, &tensor, CodecMode::Fit01).unwrap()
    }

    #[test]
    fn noise_hits_every_resolution_of_the_target() {
        let mut inputs = vec![
            encoded(Variable::Ssh, Resolution::new(9)),
            encoded(Variable::Ssh, Resolution::new(27)),
            encoded(Variable::Sst, Resolution::new(9)),
        ];
        let before: Vec<_> = inputs.iter().map(|e| e.test().clone()).collect();
        let config = NoiseConfig::new(Variable::Ssh, 0.05, 7);

        let touched = apply_test_noise(&mut inputs, &config).unwrap();

        assert_eq!(touched, 2);
        assert_ne!(inputs[0].test(), &before[0]);
        assert_ne!(inputs[1].test(), &before[1]);
        assert_eq!(inputs[2].test(), &before[2]);
    }

    #[test]
    fn absent_target_perturbs_nothing() {
        let mut inputs = vec![encoded(Variable::Sst, Resolution::new(9))];
        let before = inputs[0].test().clone();
        let config = NoiseConfig::new(Variable::Ssh, 0.05, 7);

        assert_eq!(apply_test_noise(&mut inputs, &config).unwrap(), 0);
        assert_eq!(inputs[0].test(), &before);
    }
}

