//! Training configuration and loss history.

use serde::{Deserialize, Serialize};

/// Options passed to [`Model::fit`](crate::Model::fit).
///
/// Iterative architectures interpret `epochs`/`batch_size` literally;
/// closed-form ones may ignore them.
#[derive(Debug, Clone)]
pub struct FitConfig {
    epochs: usize,
    batch_size: usize,
}

impl FitConfig {
    /// Creates a fit configuration.
    pub fn new(epochs: usize, batch_size: usize) -> Self {
        Self { epochs, batch_size }
    }

    /// Number of training epochs.
    pub fn epochs(&self) -> usize {
        self.epochs
    }

    /// Batch size.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            epochs: 1000,
            batch_size: 29,
        }
    }
}

/// Loss trajectory of one fit, persisted alongside the artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitHistory {
    loss: Vec<f64>,
}

impl FitHistory {
    /// Wraps a recorded loss sequence.
    pub fn new(loss: Vec<f64>) -> Self {
        Self { loss }
    }

    /// The recorded losses, oldest first.
    pub fn loss(&self) -> &[f64] {
        &self.loss
    }

    /// The final loss, if any was recorded.
    pub fn final_loss(&self) -> Option<f64> {
        self.loss.last().copied()
    }
}
