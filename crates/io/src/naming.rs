//! The archive file-name convention.
//!
//! Field files are named `{SOURCE}_{TAG}_R{rr}{s}.npy` and coordinate
//! archives `{SOURCE}_coords_R{rr}{s}.npz`, where `SOURCE` is the data
//! origin, `TAG` the stored variable tag, `rr` the zero-padded resolution
//! code, and a trailing `s` marks satellite geometry.

use std::path::Path;

use resac_grid::{Resolution, Variable};

use crate::error::IoError;

/// Origin of an archive file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// Model-geometry fields from the ocean simulation.
    Natl60,
    /// Satellite-geometry fields; file names carry the trailing `s`.
    Sat,
}

impl Source {
    /// File-name prefix for this source.
    pub fn prefix(&self) -> &'static str {
        match self {
            Source::Natl60 => "NATL60",
            Source::Sat => "SAT",
        }
    }

    /// Geometry suffix appended after the resolution code.
    fn geometry_suffix(&self) -> &'static str {
        match self {
            Source::Natl60 => "",
            Source::Sat => "s",
        }
    }
}

/// Tag under which a variable is stored in archive file names.
///
/// The current components are archived as `SSU`/`SSV` rather than their
/// canonical `U`/`V`.
pub fn storage_tag(variable: Variable) -> &'static str {
    match variable {
        Variable::Ssh => "SSH",
        Variable::Sst => "SST",
        Variable::U => "SSU",
        Variable::V => "SSV",
    }
}

/// File name of one field archive.
pub fn field_file_name(source: Source, variable: Variable, resolution: Resolution) -> String {
    format!(
        "{}_{}_{}{}.npy",
        source.prefix(),
        storage_tag(variable),
        resolution,
        source.geometry_suffix()
    )
}

/// File name of one coordinate archive.
pub fn coords_file_name(source: Source, resolution: Resolution) -> String {
    format!(
        "{}_coords_{}{}.npz",
        source.prefix(),
        resolution,
        source.geometry_suffix()
    )
}

/// Parses a field file name back into its (source, variable, resolution).
///
/// Used when validating an archive directory listing.
///
/// # Errors
///
/// Returns [`IoError::VariableMismatch`] when the middle segment is not a
/// known variable tag, and [`IoError::FileNotFound`] when the name does
/// not follow the convention at all.
pub fn parse_field_file_name(path: &Path) -> Result<(Source, Variable, Resolution), IoError> {
    let malformed = || IoError::FileNotFound {
        path: path.to_path_buf(),
    };
    let stem = path
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.strip_suffix(".npy"))
        .ok_or_else(malformed)?;

    let mut parts = stem.splitn(3, '_');
    let source = match parts.next() {
        Some("NATL60") => Source::Natl60,
        Some("SAT") => Source::Sat,
        _ => return Err(malformed()),
    };
    let tag = parts.next().ok_or_else(malformed)?;
    let reso_part = parts.next().ok_or_else(malformed)?;

    let variable = Variable::from_raw_tag(tag).map_err(|_| IoError::VariableMismatch {
        tag: tag.to_string(),
        path: path.to_path_buf(),
    })?;

    let digits = reso_part
        .strip_prefix('R')
        .map(|r| r.trim_end_matches('s'))
        .filter(|r| !r.is_empty())
        .ok_or_else(malformed)?;
    let code: u8 = digits.parse().map_err(|_| malformed())?;

    Ok((source, variable, Resolution::new(code)))
}
