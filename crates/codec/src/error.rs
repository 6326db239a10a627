//! Error types for the resac-codec crate.

use resac_grid::{Resolution, Variable};

/// Error type for all fallible operations in the resac-codec crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CodecError {
    /// Returned when a fit is attempted over data with no finite values.
    #[error("cannot fit normalization for {variable} at {resolution}: no finite values")]
    NonFiniteRange {
        /// Variable being fitted.
        variable: Variable,
        /// Resolution of the field.
        resolution: Resolution,
    },

    /// Returned when an encode/decode is requested with parameters fitted
    /// for a different (variable, resolution). A programming-contract
    /// violation: the caller's record and its params have drifted apart.
    #[error(
        "normalization params mismatch: params fitted for {fitted_variable} at \
         {fitted_resolution}, requested for {variable} at {resolution}"
    )]
    ParamsMismatch {
        /// Variable the params were fitted on.
        fitted_variable: Variable,
        /// Resolution the params were fitted on.
        fitted_resolution: Resolution,
        /// Variable of the requesting record.
        variable: Variable,
        /// Resolution of the requesting record.
        resolution: Resolution,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_non_finite_range() {
        let e = CodecError::NonFiniteRange {
            variable: Variable::Ssh,
            resolution: Resolution::new(9),
        };
        assert_eq!(
            e.to_string(),
            "cannot fit normalization for SSH at R09: no finite values"
        );
    }

    #[test]
    fn display_params_mismatch() {
        let e = CodecError::ParamsMismatch {
            fitted_variable: Variable::Ssh,
            fitted_resolution: Resolution::new(3),
            variable: Variable::Sst,
            resolution: Resolution::new(3),
        };
        let msg = e.to_string();
        assert!(msg.contains("SSH"));
        assert!(msg.contains("SST"));
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<CodecError>();
    }
}
