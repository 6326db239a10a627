//! # resac-codec
//!
//! Reversible per-variable normalization between physical units and the
//! bounded interval the model trains in.
//!
//! Three asymmetric operations:
//!
//! 1. **fit_and_encode**: computed ONLY on the training subset; fits the
//!    affine map and returns it as immutable [`NormParams`].
//! 2. **encode_with**: applies previously-fitted params to validation,
//!    test, or live-inference data without refitting. No clamping: values
//!    outside the fitted range map outside the interval so that
//!    distribution shift stays visible downstream.
//! 3. **decode**: the exact inverse, back to physical units.
//!
//! `decode(encode_with(x, p), p) == x` up to f32 rounding is the load-
//! bearing property of the whole pipeline; every comparison against ground
//! truth silently breaks if it does not hold. Params must be persisted
//! with the trained model and reapplied, never recomputed from a different
//! subset.

mod codec;
mod error;
mod params;
mod pipeline;

pub use codec::{decode, encode_with, fit_and_encode};
pub use error::CodecError;
pub use params::{CodecMode, NormParams};
pub use pipeline::{EncodedVariable, encode_split};
