//! # resac-model
//!
//! The trainable-model abstraction and everything that must travel with a
//! trained model.
//!
//! A model is anything implementing [`Model`]: an ordered-list-in,
//! ordered-list-out predict plus a fit. The input/output ordering is part
//! of the model's fixed contract, established at training time; the
//! [`PredictionDriver`] treats it as a checked invariant because a
//! silently reordered input produces wrong predictions with no runtime
//! error.
//!
//! A trained model persists as a three-part artifact bundle: architecture
//! descriptor, weight values, and the fitted normalization parameters for
//! every input and output variable. The three travel together; loading a
//! partial bundle is rejected rather than silently proceeding.

mod artifact;
mod driver;
mod error;
mod fit;
mod scaled_bicubic;
mod spec;

pub use artifact::ModelArtifact;
pub use driver::{DecodedOutput, PredictionDriver};
pub use error::ModelError;
pub use fit::{FitConfig, FitHistory};
pub use scaled_bicubic::ScaledBicubic;
pub use spec::{ArchitectureSpec, OutputSpec, VarSpec};

use ndarray::Array4;

/// A trainable prediction capability over ordered tensor lists.
///
/// Implementations receive encoded (normalized) tensors in the exact
/// order fixed by their [`ArchitectureSpec`] and return outputs in spec
/// order. Concrete convolutional architectures plug in behind this trait;
/// nothing in the pipeline depends on their internals.
pub trait Model {
    /// Forward pass over one ordered input list.
    fn predict(&self, inputs: &[Array4<f32>]) -> Result<Vec<Array4<f32>>, ModelError>;

    /// Fits the model's weights against encoded targets.
    fn fit(
        &mut self,
        inputs: &[Array4<f32>],
        targets: &[Array4<f32>],
        config: &FitConfig,
    ) -> Result<FitHistory, ModelError>;
}
