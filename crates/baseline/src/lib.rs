//! # resac-baseline
//!
//! Deterministic bicubic upsampling of low-resolution fields, used as the
//! non-learned reference the model predictions are compared against.
//!
//! The reference setup reaches R01 from R09 with two chained x3 passes,
//! matching the output shapes of the learned predictions so the two can be
//! differenced directly. No trained weights are involved anywhere.

mod bicubic;
mod error;

pub use bicubic::{upsample, upsample_chain, upsample_stack};
pub use error::BaselineError;
