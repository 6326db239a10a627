//! Dataset root resolution.

use std::path::PathBuf;

use tracing::debug;

use crate::error::IoError;

/// Environment variable naming the directory that holds the dataset
/// archives.
pub const DATASETS_DIR_VAR: &str = "RESAC_DATASETS_DIR";

/// Resolves the dataset root from [`DATASETS_DIR_VAR`].
///
/// A leading `~` is expanded against `HOME`. The root is never guessed:
/// an unset or empty variable is fatal.
///
/// # Errors
///
/// Returns [`IoError::DatasetDirUnset`] when the variable is unset or
/// empty.
pub fn dataset_root() -> Result<PathBuf, IoError> {
    let raw = std::env::var(DATASETS_DIR_VAR).map_err(|_| IoError::DatasetDirUnset)?;
    if raw.is_empty() {
        return Err(IoError::DatasetDirUnset);
    }
    let root = expand_tilde(&raw, std::env::var("HOME").ok().as_deref());
    debug!(root = %root.display(), "dataset root resolved");
    Ok(root)
}

/// Expands a leading `~` or `~/` against `home`; other paths pass through.
fn expand_tilde(raw: &str, home: Option<&str>) -> PathBuf {
    match home {
        Some(home) if raw == "~" => PathBuf::from(home),
        Some(home) => match raw.strip_prefix("~/") {
            Some(rest) => PathBuf::from(home).join(rest),
            None => PathBuf::from(raw),
        },
        None => PathBuf::from(raw),
    }
}
