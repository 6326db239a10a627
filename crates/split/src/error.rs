//! Error types for the resac-split crate.

/// Error type for all fallible operations in the resac-split crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SplitError {
    /// Returned when there are no samples to partition.
    #[error("cannot split zero samples")]
    EmptyData,

    /// Returned when a percentage is negative or not finite.
    #[error("invalid {name} percentage: {value} (must be finite and >= 0)")]
    InvalidPercentage {
        /// Which percentage is invalid.
        name: &'static str,
        /// The offending value.
        value: f64,
    },

    /// Returned when the percentages sum past 100.
    #[error("percentages sum to {sum}, which exceeds 100")]
    PercentageOverflow {
        /// Sum of the three percentages.
        sum: f64,
    },
}
