//! The three codec operations: fit-and-encode, encode-with, decode.

use ndarray::{Array, Dimension};
use tracing::debug;

use resac_grid::{Resolution, Variable};

use crate::error::CodecError;
use crate::params::{CodecMode, NormParams};

/// Fits the normalization on `raw` and returns the encoded array together
/// with the fitted params.
///
/// Call this on the TRAINING subset only; validation, test, and inference
/// data must go through [`encode_with`] with the params returned here.
///
/// The fitted [min, max] is taken over the finite values of `raw` (NaN
/// masked pixels are ignored and encode to NaN). A collapsed range
/// (min == max) encodes every element to the target interval's lower
/// bound; [`decode`] then restores the fitted constant, so the round-trip
/// holds on degenerate fields with no division by zero.
///
/// # Errors
///
/// Returns [`CodecError::NonFiniteRange`] when `raw` holds no finite
/// values at all.
pub fn fit_and_encode<D: Dimension>(
    raw: &Array<f32, D>,
    mode: CodecMode,
    variable: Variable,
    resolution: Resolution,
) -> Result<(Array<f32, D>, NormParams), CodecError> {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for &v in raw.iter() {
        if v.is_finite() {
            min = min.min(v);
            max = max.max(v);
        }
    }
    if !min.is_finite() || !max.is_finite() {
        return Err(CodecError::NonFiniteRange {
            variable,
            resolution,
        });
    }

    let params = NormParams::new(variable, resolution, mode, min, max);
    debug!(
        variable = %variable,
        resolution = %resolution,
        min,
        max,
        degenerate = params.is_degenerate(),
        "normalization fitted"
    );
    let encoded = apply(raw, &params);
    Ok((encoded, params))
}

/// Applies previously-fitted params to new data WITHOUT refitting.
///
/// Values outside the fitted [min, max] map outside the target interval;
/// nothing is clamped.
///
/// # Errors
///
/// Returns [`CodecError::ParamsMismatch`] when `params` were fitted for a
/// different (variable, resolution) than the caller claims.
pub fn encode_with<D: Dimension>(
    raw: &Array<f32, D>,
    variable: Variable,
    resolution: Resolution,
    params: &NormParams,
) -> Result<Array<f32, D>, CodecError> {
    params.ensure_matches(variable, resolution)?;
    Ok(apply(raw, params))
}

/// Inverts the fitted mapping, returning physical units.
///
/// # Errors
///
/// Returns [`CodecError::ParamsMismatch`] when `params` were fitted for a
/// different (variable, resolution) than the caller claims.
pub fn decode<D: Dimension>(
    encoded: &Array<f32, D>,
    variable: Variable,
    resolution: Resolution,
    params: &NormParams,
) -> Result<Array<f32, D>, CodecError> {
    params.ensure_matches(variable, resolution)?;
    if params.is_degenerate() {
        let min = params.min();
        return Ok(encoded.mapv(|v| if v.is_nan() { v } else { min }));
    }
    let mode = params.mode();
    let range = params.max() - params.min();
    let min = params.min();
    let lo = mode.lo();
    let width = mode.width();
    Ok(encoded.mapv(|v| (v - lo) / width * range + min))
}

/// Forward affine map shared by fit and encode-with.
fn apply<D: Dimension>(raw: &Array<f32, D>, params: &NormParams) -> Array<f32, D> {
    let mode = params.mode();
    let lo = mode.lo();
    if params.is_degenerate() {
        return raw.mapv(|v| if v.is_nan() { v } else { lo });
    }
    let min = params.min();
    let inv_range = 1.0 / (params.max() - min);
    let width = mode.width();
    raw.mapv(|v| (v - min) * inv_range * width + lo)
}
