//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{bail, Context, Result};

use resac_codec::CodecMode;
use resac_grid::{Resolution, Variable};
use resac_model::FitConfig;
use resac_noise::NoiseConfig;
use resac_split::SplitSpec;

use crate::config::{FitToml, NoiseToml, SplitToml, VarResoToml};

/// How a fit run treats the run directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Fresh run: create the directory tree, fit from scratch.
    Learn,
    /// Reload an existing bundle and keep fitting it.
    Resume,
    /// Reload an existing bundle for further prediction passes.
    Continue,
}

/// Parses a run mode name string into the corresponding enum variant.
pub fn parse_run_mode(s: &str) -> Result<RunMode> {
    match s.to_lowercase().as_str() {
        "learn" => Ok(RunMode::Learn),
        "resume" => Ok(RunMode::Resume),
        "continue" => Ok(RunMode::Continue),
        other => bail!("unknown run mode: {other:?} (expected learn, resume, or continue)"),
    }
}

/// Parses a codec mode name string into the corresponding enum variant.
pub fn parse_codec_mode(s: &str) -> Result<CodecMode> {
    match s.to_lowercase().as_str() {
        "fit01" => Ok(CodecMode::Fit01),
        "fit11" => Ok(CodecMode::Fit11),
        other => bail!("unknown codec mode: {other:?} (expected fit01 or fit11)"),
    }
}

/// Parses a stored variable tag into the canonical variable.
pub fn parse_variable(tag: &str) -> Result<Variable> {
    Variable::from_raw_tag(tag).with_context(|| format!("bad variable tag in config: {tag:?}"))
}

/// Converts one TOML selection list into (variable, resolution) pairs.
pub fn build_var_list(entries: &[VarResoToml]) -> Result<Vec<(Variable, Resolution)>> {
    if entries.is_empty() {
        bail!("variable list in config must not be empty");
    }
    entries
        .iter()
        .map(|e| Ok((parse_variable(&e.variable)?, Resolution::new(e.resolution))))
        .collect()
}

/// Builds a validated [`SplitSpec`] from the TOML split configuration.
pub fn build_split_spec(split: &SplitToml, seed_override: Option<u64>) -> Result<SplitSpec> {
    let seed = seed_override.unwrap_or(split.seed);
    let spec = SplitSpec::new(split.train_pct, split.val_pct, split.test_pct, seed);
    spec.validate().context("invalid [split] percentages")?;
    Ok(spec)
}

/// Builds a validated [`NoiseConfig`] from the TOML noise configuration.
pub fn build_noise_config(noise: &NoiseToml) -> Result<NoiseConfig> {
    let target = parse_variable(&noise.target)?;
    let cfg = NoiseConfig::new(target, noise.sigma, noise.seed);
    cfg.validate().context("invalid [noise] settings")?;
    Ok(cfg)
}

/// Builds a [`FitConfig`] from the TOML fit configuration.
pub fn build_fit_config(fit: &FitToml) -> FitConfig {
    FitConfig::new(fit.epochs, fit.batch_size)
}

/// Derives the upsampling factor chain from the primary input resolution
/// to one output resolution.
///
/// The chain is built of x3 passes (R09 -> R03 -> R01), with any
/// non-ternary remainder as one final factor.
pub fn derive_factors(input: Resolution, output: Resolution) -> Result<Vec<usize>> {
    let from = input.factor() as usize;
    let to = output.factor() as usize;
    if to == 0 || from % to != 0 {
        bail!("output resolution {output} does not evenly divide input resolution {input}");
    }
    let mut ratio = from / to;
    let mut factors = Vec::new();
    while ratio % 3 == 0 {
        factors.push(3);
        ratio /= 3;
    }
    if ratio > 1 || factors.is_empty() {
        factors.push(ratio);
    }
    Ok(factors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_modes_parse_case_insensitive() {
        assert_eq!(parse_run_mode("learn").unwrap(), RunMode::Learn);
        assert_eq!(parse_run_mode("RESUME").unwrap(), RunMode::Resume);
        assert_eq!(parse_run_mode("Continue").unwrap(), RunMode::Continue);
        assert!(parse_run_mode("train").is_err());
    }

    #[test]
    fn codec_modes_parse() {
        assert_eq!(parse_codec_mode("fit01").unwrap(), CodecMode::Fit01);
        assert_eq!(parse_codec_mode("FIT11").unwrap(), CodecMode::Fit11);
        assert!(parse_codec_mode("minmax").is_err());
    }

    #[test]
    fn stored_tags_map_to_canonical() {
        assert_eq!(parse_variable("SSU").unwrap(), Variable::U);
        assert!(parse_variable("CHL").is_err());
    }

    #[test]
    fn factor_chains() {
        let r = |c| Resolution::new(c);
        assert_eq!(derive_factors(r(9), r(3)).unwrap(), vec![3]);
        assert_eq!(derive_factors(r(9), r(1)).unwrap(), vec![3, 3]);
        assert_eq!(derive_factors(r(9), r(9)).unwrap(), vec![1]);
        assert_eq!(derive_factors(r(6), r(3)).unwrap(), vec![2]);
        assert!(derive_factors(r(9), r(2)).is_err());
    }

    #[test]
    fn empty_var_list_rejected() {
        assert!(build_var_list(&[]).is_err());
    }
}
