use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, Result};
use ndarray_npy::write_npy;
use serde::Serialize;
use tracing::{info, warn};

use resac_baseline::upsample_stack;
use resac_grid::{nan_rmse, spatial_stack};
use resac_model::{ModelArtifact, PredictionDriver};

use crate::cli::PredictArgs;
use crate::config::ResacConfig;
use crate::convert;
use crate::pipeline::{self, apply_test_noise, encoded_test_entries, select_samples};

/// One line of the prediction comparison report.
#[derive(Debug, Serialize)]
struct OutputReport {
    variable: String,
    resolution: String,
    rmse_model: f64,
    rmse_baseline: f64,
}

/// Run the `predict` subcommand.
pub fn run(args: PredictArgs) -> Result<()> {
    let raw = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config: {}", args.config.display()))?;
    let config: ResacConfig = toml::from_str(&raw)
        .with_context(|| format!("failed to parse config: {}", args.config.display()))?;

    let run_dir = args.run_dir.clone().unwrap_or_else(|| config.run.dir.clone());
    let mut prepared = pipeline::prepare(&config, None)?;

    // Test-only noise on the designated input variable, at every
    // resolution it appears at; train and validation tensors are never
    // touched.
    if config.data.with_noise {
        let noise_config = convert::build_noise_config(&config.noise)?;
        let touched = apply_test_noise(&mut prepared.inputs, &noise_config)?;
        if touched == 0 {
            warn!(
                target = %noise_config.target(),
                "noise target is not among the inputs, skipping injection"
            );
        }
    }

    let artifact_dir = run_dir.join("artifact");
    let artifact = ModelArtifact::load(&artifact_dir).with_context(|| {
        format!(
            "no trained model in {}; run `resac fit` first",
            artifact_dir.display()
        )
    })?;
    let driver = PredictionDriver::new(artifact)?;

    let entries = encoded_test_entries(&prepared.inputs);
    let outputs = driver.predict(&entries)?;

    let out_dir = run_dir.join("outputs");
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;
    write_npy(out_dir.join("test_time.npy"), &prepared.test_time)
        .context("writing test-split calendar")?;

    let primary = &prepared.raw_inputs[0];
    let primary_test = select_samples(primary.data(), prepared.split.test());

    let mut report = Vec::with_capacity(outputs.len());
    for decoded in &outputs {
        let truth = prepared
            .raw_outputs
            .iter()
            .find(|f| {
                f.variable() == decoded.variable() && f.resolution() == decoded.resolution()
            })
            .with_context(|| {
                format!(
                    "no ground truth for {} at {}",
                    decoded.variable(),
                    decoded.resolution()
                )
            })?;
        let truth_test = select_samples(truth.data(), prepared.split.test());
        let predicted = spatial_stack(decoded.data());

        let factors = convert::derive_factors(primary.resolution(), decoded.resolution())?;
        let upsampled = upsample_stack(&primary_test, &factors)?;

        let rmse_model = nan_rmse(&predicted, &truth_test).with_context(|| {
            format!(
                "predicted {} at {} does not match the ground-truth grid",
                decoded.variable(),
                decoded.resolution()
            )
        })?;
        let rmse_baseline = nan_rmse(&upsampled, &truth_test).with_context(|| {
            format!(
                "bicubic baseline for {} at {} does not match the ground-truth grid",
                decoded.variable(),
                decoded.resolution()
            )
        })?;
        info!(
            variable = %decoded.variable(),
            resolution = %decoded.resolution(),
            rmse_model,
            rmse_baseline,
            "prediction scored"
        );

        let name = format!("pred_{}_{}.npy", decoded.variable(), decoded.resolution());
        write_npy(out_dir.join(&name), &predicted)
            .with_context(|| format!("writing {name}"))?;

        report.push(OutputReport {
            variable: decoded.variable().to_string(),
            resolution: decoded.resolution().to_string(),
            rmse_model,
            rmse_baseline,
        });
    }

    let report_path = out_dir.join("report.json");
    let file = File::create(&report_path)
        .with_context(|| format!("creating {}", report_path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &report)
        .with_context(|| format!("writing {}", report_path.display()))?;

    println!(
        "Wrote {} predicted field(s) and report to {}",
        report.len(),
        out_dir.display()
    );
    Ok(())
}
