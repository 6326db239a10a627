use std::path::PathBuf;

use serde::Deserialize;

/// Top-level RESAC configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResacConfig {
    /// Data selection: which fields feed and leave the model.
    pub data: DataToml,

    /// Train/validation/test split settings.
    #[serde(default)]
    pub split: SplitToml,

    /// Normalization settings.
    #[serde(default)]
    pub codec: CodecToml,

    /// Test-split noise settings.
    #[serde(default)]
    pub noise: NoiseToml,

    /// Model fitting settings.
    #[serde(default)]
    pub fit: FitToml,

    /// Run directory and mode.
    #[serde(default)]
    pub run: RunToml,
}

/// One (variable, resolution) selection in the TOML file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VarResoToml {
    /// Stored variable tag (SSH, SST, SSU, SSV).
    pub variable: String,
    /// Resolution code (1, 3, 9).
    pub resolution: u8,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataToml {
    /// Ordered model inputs; the first entry is the primary field the
    /// outputs are upsampled from.
    pub inputs: Vec<VarResoToml>,
    /// Ordered model outputs (ground-truth targets).
    pub outputs: Vec<VarResoToml>,
    /// Read inputs from the satellite-geometry archives and enable
    /// test-split noise.
    #[serde(default)]
    pub with_noise: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SplitToml {
    #[serde(default = "default_train_pct")]
    pub train_pct: f64,
    #[serde(default = "default_val_pct")]
    pub val_pct: f64,
    #[serde(default = "default_test_pct")]
    pub test_pct: f64,
    #[serde(default)]
    pub seed: u64,
}

impl Default for SplitToml {
    fn default() -> Self {
        Self {
            train_pct: default_train_pct(),
            val_pct: default_val_pct(),
            test_pct: default_test_pct(),
            seed: 0,
        }
    }
}

fn default_train_pct() -> f64 {
    65.0
}
fn default_val_pct() -> f64 {
    15.0
}
fn default_test_pct() -> f64 {
    20.0
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodecToml {
    /// Normalization mode: "fit01" or "fit11".
    #[serde(default = "default_codec_mode")]
    pub mode: String,
}

impl Default for CodecToml {
    fn default() -> Self {
        Self {
            mode: default_codec_mode(),
        }
    }
}

fn default_codec_mode() -> String {
    "fit01".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoiseToml {
    /// Gaussian standard deviation; 0 disables injection.
    #[serde(default)]
    pub sigma: f64,
    #[serde(default)]
    pub seed: u64,
    /// Stored tag of the variable to perturb.
    #[serde(default = "default_noise_target")]
    pub target: String,
}

impl Default for NoiseToml {
    fn default() -> Self {
        Self {
            sigma: 0.0,
            seed: 0,
            target: default_noise_target(),
        }
    }
}

fn default_noise_target() -> String {
    "SSH".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FitToml {
    #[serde(default = "default_epochs")]
    pub epochs: usize,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for FitToml {
    fn default() -> Self {
        Self {
            epochs: default_epochs(),
            batch_size: default_batch_size(),
        }
    }
}

fn default_epochs() -> usize {
    1000
}
fn default_batch_size() -> usize {
    29
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunToml {
    /// Run directory holding the artifact bundle and outputs.
    #[serde(default = "default_run_dir")]
    pub dir: PathBuf,
    /// Run mode: "learn", "resume", or "continue".
    #[serde(default = "default_run_mode")]
    pub mode: String,
}

impl Default for RunToml {
    fn default() -> Self {
        Self {
            dir: default_run_dir(),
            mode: default_run_mode(),
        }
    }
}

fn default_run_dir() -> PathBuf {
    PathBuf::from("runs/resac")
}
fn default_run_mode() -> String {
    "learn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_parses_with_defaults() {
        let toml = r#"
            [data]
            inputs = [{ variable = "SSH", resolution = 9 }]
            outputs = [{ variable = "SSH", resolution = 3 }]
        "#;
        let cfg: ResacConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.data.inputs.len(), 1);
        assert!(!cfg.data.with_noise);
        assert_eq!(cfg.split.train_pct, 65.0);
        assert_eq!(cfg.codec.mode, "fit01");
        assert_eq!(cfg.fit.batch_size, 29);
        assert_eq!(cfg.run.mode, "learn");
    }

    #[test]
    fn unknown_field_rejected() {
        let toml = r#"
            [data]
            inputs = []
            outputs = []
            resolution = 9
        "#;
        assert!(toml::from_str::<ResacConfig>(toml).is_err());
    }

    #[test]
    fn full_config_parses() {
        let toml = r#"
            [data]
            inputs = [
                { variable = "SSH", resolution = 9 },
                { variable = "SST", resolution = 3 },
            ]
            outputs = [
                { variable = "SSH", resolution = 3 },
                { variable = "SSU", resolution = 3 },
            ]
            with_noise = true

            [split]
            train_pct = 65.0
            val_pct = 15.0
            test_pct = 20.0
            seed = 42

            [codec]
            mode = "fit11"

            [noise]
            sigma = 0.05
            seed = 7
            target = "SSH"

            [fit]
            epochs = 500
            batch_size = 16

            [run]
            dir = "runs/experiment-3"
            mode = "resume"
        "#;
        let cfg: ResacConfig = toml::from_str(toml).unwrap();
        assert!(cfg.data.with_noise);
        assert_eq!(cfg.split.seed, 42);
        assert_eq!(cfg.codec.mode, "fit11");
        assert_eq!(cfg.noise.sigma, 0.05);
        assert_eq!(cfg.run.mode, "resume");
    }
}
