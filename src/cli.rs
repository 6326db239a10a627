use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// RESAC statistical super-resolution pipeline for sea-surface fields.
#[derive(Parser)]
#[command(
    name = "resac",
    version,
    about = "Statistical super-resolution of sea-surface height fields"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Run the full prediction pipeline against a trained model.
    Predict(PredictArgs),
    /// Fit the model and write the artifact bundle.
    Fit(FitArgs),
    /// Bicubic comparator only, no model involved.
    Baseline(BaselineArgs),
}

/// Arguments for the `predict` subcommand.
#[derive(clap::Args)]
pub struct PredictArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "resac.toml")]
    pub config: PathBuf,

    /// Override the run directory holding the artifact bundle.
    #[arg(short, long)]
    pub run_dir: Option<PathBuf>,
}

/// Arguments for the `fit` subcommand.
#[derive(clap::Args)]
pub struct FitArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "resac.toml")]
    pub config: PathBuf,

    /// Override the run directory from config.
    #[arg(short, long)]
    pub run_dir: Option<PathBuf>,

    /// Override the split seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,
}

/// Arguments for the `baseline` subcommand.
#[derive(clap::Args)]
pub struct BaselineArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "resac.toml")]
    pub config: PathBuf,

    /// Directory for the upsampled output arrays.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
