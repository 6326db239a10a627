use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, Result};
use ndarray::Array4;
use tracing::info;

use resac_model::{ArchitectureSpec, Model, ModelArtifact, OutputSpec, ScaledBicubic, VarSpec};

use crate::cli::FitArgs;
use crate::config::ResacConfig;
use crate::convert::{self, RunMode};
use crate::pipeline;

/// Run the `fit` subcommand.
pub fn run(args: FitArgs) -> Result<()> {
    let raw = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config: {}", args.config.display()))?;
    let config: ResacConfig = toml::from_str(&raw)
        .with_context(|| format!("failed to parse config: {}", args.config.display()))?;

    let run_mode = convert::parse_run_mode(&config.run.mode)?;
    let run_dir = args.run_dir.clone().unwrap_or_else(|| config.run.dir.clone());
    let artifact_dir = run_dir.join("artifact");

    let prepared = pipeline::prepare(&config, args.seed)?;
    let architecture = build_architecture(&config)?;

    let mut model = match run_mode {
        RunMode::Learn => {
            std::fs::create_dir_all(run_dir.join("outputs"))
                .with_context(|| format!("creating run directory {}", run_dir.display()))?;
            info!(dir = %run_dir.display(), "fresh run directory");
            ScaledBicubic::new(
                architecture.inputs().to_vec(),
                architecture.outputs().to_vec(),
            )
        }
        RunMode::Resume | RunMode::Continue => ModelArtifact::load(&artifact_dir)
            .with_context(|| {
                format!(
                    "run mode {:?} needs a complete bundle in {}",
                    run_mode,
                    artifact_dir.display()
                )
            })?
            .build_trainable()?,
    };

    let fit_config = convert::build_fit_config(&config.fit);
    let train_inputs: Vec<Array4<f32>> =
        prepared.inputs.iter().map(|e| e.train().clone()).collect();
    let train_targets: Vec<Array4<f32>> =
        prepared.outputs.iter().map(|e| e.train().clone()).collect();

    let history = model
        .fit(&train_inputs, &train_targets, &fit_config)
        .context("model fitting failed")?;
    info!(
        epochs = fit_config.epochs(),
        final_loss = history.final_loss(),
        "fit complete"
    );

    let input_params = prepared.inputs.iter().map(|e| e.params().clone()).collect();
    let output_params = prepared.outputs.iter().map(|e| e.params().clone()).collect();
    let artifact = ModelArtifact::new(architecture, &model, input_params, output_params)?;
    artifact
        .save(&artifact_dir)
        .with_context(|| format!("saving artifact to {}", artifact_dir.display()))?;

    let history_path = run_dir.join("history.json");
    let file = File::create(&history_path)
        .with_context(|| format!("creating {}", history_path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &history)
        .with_context(|| format!("writing {}", history_path.display()))?;

    println!(
        "Fitted model saved to {} (final loss {:.6})",
        artifact_dir.display(),
        history.final_loss().unwrap_or(f64::NAN)
    );
    Ok(())
}

/// Builds the architecture descriptor from the configured variable lists.
///
/// The factor chain of every output is derived from the primary (first)
/// input's resolution.
pub fn build_architecture(config: &ResacConfig) -> Result<ArchitectureSpec> {
    let input_vars = convert::build_var_list(&config.data.inputs)?;
    let output_vars = convert::build_var_list(&config.data.outputs)?;
    let (_, primary_reso) = input_vars[0];

    let inputs = input_vars
        .iter()
        .map(|&(variable, resolution)| VarSpec::new(variable, resolution))
        .collect();
    let outputs = output_vars
        .iter()
        .map(|&(variable, resolution)| {
            let factors = convert::derive_factors(primary_reso, resolution)?;
            Ok(OutputSpec::new(variable, resolution, factors))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ArchitectureSpec::ScaledBicubic { inputs, outputs })
}
