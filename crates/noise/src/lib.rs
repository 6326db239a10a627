//! # resac-noise
//!
//! Seeded Gaussian perturbation of the designated input variable, used for
//! robustness evaluation on the TEST split only.
//!
//! Train and validation tensors are never touched; the orchestrating
//! binary applies [`inject`] exclusively to the test tensor of the
//! configured target variable. With `sigma <= 0` injection is a strict
//! no-op: it returns before any RNG is constructed, so unrelated RNG state
//! elsewhere in the run is unaffected.

mod config;
mod error;
mod inject;

pub use config::NoiseConfig;
pub use error::NoiseError;
pub use inject::{NoiseStats, inject};
