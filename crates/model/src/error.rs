//! Error types for the resac-model crate.

use std::path::PathBuf;

use resac_grid::{Resolution, Variable};

/// Error type for all fallible operations in the resac-model crate.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Returned when an artifact bundle is missing one of its three parts.
    #[error("incomplete model artifact: missing {}", path.display())]
    ArtifactIncomplete {
        /// The missing file.
        path: PathBuf,
    },

    /// Returned when the number of supplied inputs disagrees with the
    /// model's contract.
    #[error("model expects {expected} input tensors, got {got}")]
    InputCountMismatch {
        /// Inputs declared by the architecture.
        expected: usize,
        /// Inputs supplied.
        got: usize,
    },

    /// Returned when an input at some position is not the (variable,
    /// resolution) the contract fixes for that position.
    #[error(
        "input {position} must be {expected_variable} at {expected_resolution}, \
         got {got_variable} at {got_resolution}"
    )]
    InputOrderMismatch {
        /// Zero-based input position.
        position: usize,
        /// Variable the contract fixes at this position.
        expected_variable: Variable,
        /// Resolution the contract fixes at this position.
        expected_resolution: Resolution,
        /// Variable actually supplied.
        got_variable: Variable,
        /// Resolution actually supplied.
        got_resolution: Resolution,
    },

    /// Returned when the model emits a different number of outputs than
    /// its architecture declares.
    #[error("model produced {got} outputs, architecture declares {expected}")]
    OutputCountMismatch {
        /// Declared output count.
        expected: usize,
        /// Produced output count.
        got: usize,
    },

    /// Returned when persisted normalization params do not cover the
    /// declared variables in order.
    #[error("artifact normalization params do not match architecture: {reason}")]
    ParamsCoverage {
        /// Description of the disagreement.
        reason: String,
    },

    /// Returned when weight arrays disagree with the architecture.
    #[error("weight mismatch: {reason}")]
    WeightMismatch {
        /// Description of the disagreement.
        reason: String,
    },

    /// Wraps filesystem failures while reading or writing a bundle.
    #[error("artifact io error at {}: {reason}", path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Description of the failure.
        reason: String,
    },

    /// Wraps descriptor (de)serialization failures.
    #[error("artifact descriptor error: {reason}")]
    Descriptor {
        /// Description of the failure.
        reason: String,
    },

    /// Wrapped error from the codec crate.
    #[error(transparent)]
    Codec(#[from] resac_codec::CodecError),

    /// Wrapped error from the baseline crate.
    #[error(transparent)]
    Baseline(#[from] resac_baseline::BaselineError),
}
