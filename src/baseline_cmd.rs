use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, Result};
use ndarray_npy::write_npy;
use serde::Serialize;
use tracing::info;

use resac_baseline::upsample_stack;
use resac_grid::{nan_rmse, VarResoField};
use resac_io::{dataset_root, load_dataset, LoadPlan};

use crate::cli::BaselineArgs;
use crate::config::ResacConfig;
use crate::convert;
use crate::pipeline::select_samples;

/// One line of the baseline comparison report.
#[derive(Debug, Serialize)]
struct BaselineReport {
    variable: String,
    resolution: String,
    rmse: f64,
}

/// Run the `baseline` subcommand: bicubic upsampling of the primary input
/// against every configured output, no model involved.
pub fn run(args: BaselineArgs) -> Result<()> {
    let raw = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config: {}", args.config.display()))?;
    let config: ResacConfig = toml::from_str(&raw)
        .with_context(|| format!("failed to parse config: {}", args.config.display()))?;

    let root = dataset_root()?;
    let input_vars = convert::build_var_list(&config.data.inputs).context("[data] inputs")?;
    let output_vars = convert::build_var_list(&config.data.outputs).context("[data] outputs")?;

    let plan = LoadPlan::new(&input_vars, &output_vars, config.data.with_noise);
    let dataset = load_dataset(&root, &plan)
        .with_context(|| format!("failed to load dataset from {}", root.display()))?;

    let primary = &dataset.inputs()[0];
    let split_spec = convert::build_split_spec(&config.split, None)?;
    let split = split_spec.split(primary.n_samples())?;
    let primary_test = select_samples(primary.data(), split.test());

    let out_dir = args
        .output
        .clone()
        .unwrap_or_else(|| config.run.dir.join("baseline"));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut report = Vec::new();
    for truth in dataset.outputs() {
        let factors = convert::derive_factors(primary.resolution(), truth.resolution())?;
        let upsampled = upsample_stack(&primary_test, &factors)?;
        let truth_test = select_samples(truth.data(), split.test());

        let rmse = if compatible(truth, &upsampled.dim()) {
            nan_rmse(&upsampled, &truth_test)?
        } else {
            f64::NAN
        };
        info!(
            variable = %truth.variable(),
            resolution = %truth.resolution(),
            rmse,
            "baseline scored"
        );

        let name = format!("bicubic_{}_{}.npy", truth.variable(), truth.resolution());
        write_npy(out_dir.join(&name), &upsampled)
            .with_context(|| format!("writing {name}"))?;
        report.push(BaselineReport {
            variable: truth.variable().to_string(),
            resolution: truth.resolution().to_string(),
            rmse,
        });
    }

    let report_path = out_dir.join("report.json");
    let file = File::create(&report_path)
        .with_context(|| format!("creating {}", report_path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &report)
        .with_context(|| format!("writing {}", report_path.display()))?;

    println!(
        "Wrote {} baseline field(s) to {}",
        report.len(),
        out_dir.display()
    );
    Ok(())
}

/// The RMSE column only makes sense when the upsampled grid matches the
/// truth grid exactly.
fn compatible(truth: &VarResoField, upsampled_dim: &(usize, usize, usize)) -> bool {
    let (rows, cols) = truth.grid_shape();
    upsampled_dim.1 == rows && upsampled_dim.2 == cols
}
