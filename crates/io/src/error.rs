//! Error types for resac-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the resac-io crate.
///
/// Covers dataset-root resolution, file-name convention violations, and
/// npy/npz read failures. Every variant names the path (and where known the
/// variable tag or coordinate key) that triggered it.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when the dataset root environment variable is absent.
    #[error(
        "RESAC_DATASETS_DIR is not set; export it to the directory \
         holding the dataset archives before running"
    )]
    DatasetDirUnset,

    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps a failure while reading an npy or npz file.
    #[error("npy error in {}: {reason}", path.display())]
    Npy {
        /// Path to the file being read.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when a stored variable tag maps to no canonical variable.
    #[error("unrecognized variable tag '{tag}' in {}", path.display())]
    VariableMismatch {
        /// The raw tag found in the file name.
        tag: String,
        /// Path to the offending file.
        path: PathBuf,
    },

    /// Returned when a coordinate npz lacks a required key.
    #[error("coordinate '{name}' missing from {}", path.display())]
    MissingCoordinate {
        /// The absent npz key.
        name: &'static str,
        /// Path to the coordinate archive.
        path: PathBuf,
    },

    /// Wrapped error from the grid crate while assembling a field.
    #[error(transparent)]
    Grid(#[from] resac_grid::GridError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_dataset_dir_unset() {
        let msg = IoError::DatasetDirUnset.to_string();
        assert!(msg.contains("RESAC_DATASETS_DIR"));
        assert!(msg.contains("export"));
    }

    #[test]
    fn display_missing_coordinate() {
        let e = IoError::MissingCoordinate {
            name: "latitude_border",
            path: PathBuf::from("/data/NATL60_coords_R09.npz"),
        };
        assert_eq!(
            e.to_string(),
            "coordinate 'latitude_border' missing from /data/NATL60_coords_R09.npz"
        );
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<IoError>();
    }
}
