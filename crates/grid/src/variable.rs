//! Physical variables, resolution codes, and pipeline roles.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// A physical sea-surface quantity observed on a grid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Variable {
    /// Sea-surface height, the primary predicted field.
    Ssh,
    /// Sea-surface temperature, an auxiliary input field.
    Sst,
    /// Zonal surface current component.
    U,
    /// Meridional surface current component.
    V,
}

impl Variable {
    /// Canonical short name used in file names and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Variable::Ssh => "SSH",
            Variable::Sst => "SST",
            Variable::U => "U",
            Variable::V => "V",
        }
    }

    /// Parses a raw stored tag into a canonical variable.
    ///
    /// Source archives tag the current components `SSU`/`SSV`; those map to
    /// the canonical `U`/`V`. Any other tag is a data-integrity failure.
    pub fn from_raw_tag(tag: &str) -> Result<Self, GridError> {
        match tag {
            "SSH" => Ok(Variable::Ssh),
            "SST" => Ok(Variable::Sst),
            "U" | "SSU" => Ok(Variable::U),
            "V" | "SSV" => Ok(Variable::V),
            other => Err(GridError::UnknownVariable {
                tag: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Integer spatial downsampling factor. Lower = finer grid (R01 is finer
/// than R09).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Resolution(u8);

impl Resolution {
    /// Creates a resolution code from its downsampling factor.
    pub fn new(factor: u8) -> Self {
        Resolution(factor)
    }

    /// Returns the downsampling factor.
    pub fn factor(&self) -> u8 {
        self.0
    }

    /// Returns `true` if `self` is a finer grid than `other`.
    pub fn finer_than(&self, other: Resolution) -> bool {
        self.0 < other.0
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{:02}", self.0)
    }
}

/// Whether a field serves as model input or prediction target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Fed into the model.
    Input,
    /// Ground-truth target the model is compared against.
    Output,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Input => f.write_str("input"),
            Role::Output => f.write_str("output"),
        }
    }
}
