//! Noise injection configuration.

use resac_grid::Variable;

use crate::error::NoiseError;

/// Which variable gets perturbed, by how much, and with what seed.
#[derive(Debug, Clone)]
pub struct NoiseConfig {
    target: Variable,
    sigma: f64,
    seed: u64,
}

impl NoiseConfig {
    /// Creates a noise configuration.
    ///
    /// # Arguments
    ///
    /// * `target`: the one input variable to perturb (SSH in the
    ///   reference setup).
    /// * `sigma`: standard deviation of the zero-mean Gaussian, in the
    ///   units of the tensor it perturbs. `<= 0` disables injection.
    /// * `seed`: RNG seed; equal seeds reproduce the noise field
    ///   bit-for-bit.
    pub fn new(target: Variable, sigma: f64, seed: u64) -> Self {
        Self {
            target,
            sigma,
            seed,
        }
    }

    /// The variable to perturb.
    pub fn target(&self) -> Variable {
        self.target
    }

    /// Noise standard deviation.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// RNG seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// `true` when injection is disabled (sigma <= 0).
    pub fn is_disabled(&self) -> bool {
        self.sigma <= 0.0
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), NoiseError> {
        if self.sigma.is_nan() || self.sigma.is_infinite() {
            return Err(NoiseError::InvalidSigma { sigma: self.sigma });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sigma_is_disabled() {
        assert!(NoiseConfig::new(Variable::Ssh, 0.0, 0).is_disabled());
        assert!(NoiseConfig::new(Variable::Ssh, -0.1, 0).is_disabled());
        assert!(!NoiseConfig::new(Variable::Ssh, 0.05, 0).is_disabled());
    }

    #[test]
    fn nan_sigma_rejected() {
        let c = NoiseConfig::new(Variable::Ssh, f64::NAN, 0);
        assert!(matches!(c.validate(), Err(NoiseError::InvalidSigma { .. })));
    }

    #[test]
    fn finite_sigma_validates() {
        assert!(NoiseConfig::new(Variable::Ssh, 0.05, 7).validate().is_ok());
    }
}
