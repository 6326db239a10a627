//! Error types for the resac-noise crate.

/// Error type for all fallible operations in the resac-noise crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NoiseError {
    /// Returned when sigma is NaN or infinite.
    #[error("noise sigma must be finite, got {sigma}")]
    InvalidSigma {
        /// The offending value.
        sigma: f64,
    },

    /// Propagated from field comparisons in resac-grid.
    #[error(transparent)]
    Grid(#[from] resac_grid::GridError),
}
