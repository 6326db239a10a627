//! Error types for the resac-baseline crate.

/// Error type for all fallible operations in the resac-baseline crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BaselineError {
    /// Returned when the upsampling factor is zero.
    #[error("upsampling factor must be >= 1, got {factor}")]
    InvalidFactor {
        /// The offending factor.
        factor: usize,
    },

    /// Returned when the input grid has a zero-length axis.
    #[error("cannot upsample an empty grid ({rows}x{cols})")]
    EmptyGrid {
        /// Input rows.
        rows: usize,
        /// Input columns.
        cols: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_factor() {
        let e = BaselineError::InvalidFactor { factor: 0 };
        assert!(e.to_string().contains('0'));
    }

    #[test]
    fn display_empty_grid() {
        let e = BaselineError::EmptyGrid { rows: 0, cols: 5 };
        assert!(e.to_string().contains("0x5"));
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<BaselineError>();
    }
}
