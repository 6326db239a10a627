//! Separable bicubic convolution (Keys kernel, a = -0.5).

use ndarray::{Array2, Array3, ArrayView2, Axis};

use crate::error::BaselineError;

/// Keys cubic convolution weight for offset `t`, a = -0.5 (Catmull-Rom).
///
/// The four taps around any sample phase sum to exactly 1, which is what
/// makes constant fields upsample to the same constant.
fn keys_weight(t: f64) -> f64 {
    const A: f64 = -0.5;
    let t = t.abs();
    if t <= 1.0 {
        ((A + 2.0) * t - (A + 3.0)) * t * t + 1.0
    } else if t < 2.0 {
        ((A * t - 5.0 * A) * t + 8.0 * A) * t - 4.0 * A
    } else {
        0.0
    }
}

/// Tap positions and weights along one axis for every output index.
struct AxisTaps {
    /// Per output index: clamped source indices of the four taps.
    taps: Vec<[usize; 4]>,
    /// Per output index: matching kernel weights.
    weights: Vec<[f64; 4]>,
}

/// Precomputes the 4-tap kernel along one axis.
///
/// Output sample `i` maps to source coordinate `(i + 0.5) / factor - 0.5`
/// (half-pixel phase, so grid-cell centers stay aligned). Taps beyond the
/// border clamp to the edge sample.
fn axis_taps(len: usize, factor: usize) -> AxisTaps {
    let n_out = len * factor;
    let mut taps = Vec::with_capacity(n_out);
    let mut weights = Vec::with_capacity(n_out);
    for i in 0..n_out {
        let src = (i as f64 + 0.5) / factor as f64 - 0.5;
        let base = src.floor();
        let frac = src - base;
        let base = base as isize;
        let mut t = [0usize; 4];
        let mut w = [0f64; 4];
        for (k, offset) in (-1isize..=2).enumerate() {
            let idx = (base + offset).clamp(0, len as isize - 1) as usize;
            t[k] = idx;
            w[k] = keys_weight(frac - offset as f64);
        }
        taps.push(t);
        weights.push(w);
    }
    AxisTaps { taps, weights }
}

/// Bicubically upsamples a `(rows, cols)` grid by one integer factor,
/// producing `(rows * factor, cols * factor)`.
///
/// Deterministic; interpolation runs in f64 and is separable (rows, then
/// columns).
///
/// # Errors
///
/// Returns [`BaselineError::InvalidFactor`] for `factor == 0` and
/// [`BaselineError::EmptyGrid`] for an empty input.
pub fn upsample(field: ArrayView2<'_, f32>, factor: usize) -> Result<Array2<f32>, BaselineError> {
    if factor == 0 {
        return Err(BaselineError::InvalidFactor { factor });
    }
    let (rows, cols) = field.dim();
    if rows == 0 || cols == 0 {
        return Err(BaselineError::EmptyGrid { rows, cols });
    }
    if factor == 1 {
        return Ok(field.to_owned());
    }

    let row_taps = axis_taps(rows, factor);
    let col_taps = axis_taps(cols, factor);
    let out_rows = rows * factor;
    let out_cols = cols * factor;

    // Pass 1: interpolate along rows into (out_rows, cols).
    let mut rows_done = Array2::<f64>::zeros((out_rows, cols));
    for oi in 0..out_rows {
        let t = &row_taps.taps[oi];
        let w = &row_taps.weights[oi];
        for c in 0..cols {
            let mut acc = 0.0;
            for k in 0..4 {
                acc += w[k] * f64::from(field[[t[k], c]]);
            }
            rows_done[[oi, c]] = acc;
        }
    }

    // Pass 2: interpolate along columns into (out_rows, out_cols).
    let mut out = Array2::<f32>::zeros((out_rows, out_cols));
    for oj in 0..out_cols {
        let t = &col_taps.taps[oj];
        let w = &col_taps.weights[oj];
        for r in 0..out_rows {
            let mut acc = 0.0;
            for k in 0..4 {
                acc += w[k] * rows_done[[r, t[k]]];
            }
            out[[r, oj]] = acc as f32;
        }
    }
    Ok(out)
}

/// Chains integer upsampling passes, e.g. `&[3, 3]` for x9 via two x3
/// steps as the reference comparison does.
///
/// # Errors
///
/// Propagates the single-pass errors.
pub fn upsample_chain(
    field: ArrayView2<'_, f32>,
    factors: &[usize],
) -> Result<Array2<f32>, BaselineError> {
    let mut current = field.to_owned();
    for &factor in factors {
        current = upsample(current.view(), factor)?;
    }
    Ok(current)
}

/// Upsamples every time step of a `(time, rows, cols)` stack.
///
/// # Errors
///
/// Propagates the single-grid errors.
pub fn upsample_stack(
    stack: &Array3<f32>,
    factors: &[usize],
) -> Result<Array3<f32>, BaselineError> {
    let (n, rows, cols) = stack.dim();
    let total: usize = factors.iter().product();
    if rows == 0 || cols == 0 {
        return Err(BaselineError::EmptyGrid { rows, cols });
    }
    let mut out = Array3::<f32>::zeros((n, rows * total, cols * total));
    for (i, grid) in stack.axis_iter(Axis(0)).enumerate() {
        let up = upsample_chain(grid, factors)?;
        out.index_axis_mut(Axis(0), i).assign(&up);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn kernel_is_partition_of_unity() {
        for &frac in &[0.0, 0.1, 0.25, 0.5, 0.75, 0.99] {
            let sum: f64 = (-1isize..=2).map(|k| keys_weight(frac - k as f64)).sum();
            assert!((sum - 1.0).abs() < 1e-12, "frac {frac}: sum {sum}");
        }
    }

    #[test]
    fn constant_grid_stays_constant_x3() {
        let field = Array2::from_elem((8, 10), 0.37f32);
        let up = upsample(field.view(), 3).unwrap();
        assert_eq!(up.dim(), (24, 30));
        for &v in up.iter() {
            assert!((v - 0.37).abs() < 1e-6, "{v}");
        }
    }

    #[test]
    fn constant_grid_stays_constant_x9_chained() {
        let field = Array2::from_elem((4, 5), -1.2f32);
        let up = upsample_chain(field.view(), &[3, 3]).unwrap();
        assert_eq!(up.dim(), (36, 45));
        for &v in up.iter() {
            assert!((v + 1.2).abs() < 1e-5, "{v}");
        }
    }

    #[test]
    fn factor_one_is_identity() {
        let field = Array2::from_shape_fn((3, 3), |(r, c)| (r * 3 + c) as f32);
        let up = upsample(field.view(), 1).unwrap();
        assert_eq!(up, field);
    }

    #[test]
    fn linear_ramp_preserved_in_interior() {
        // Cubic convolution reproduces degree-1 polynomials exactly away
        // from the clamped border.
        let field = Array2::from_shape_fn((8, 8), |(r, _)| r as f32);
        let up = upsample(field.view(), 3).unwrap();
        // Output row oi maps to src (oi + 0.5)/3 - 0.5.
        for oi in 6..18 {
            let src = (oi as f64 + 0.5) / 3.0 - 0.5;
            let got = f64::from(up[[oi, 12]]);
            assert!((got - src).abs() < 1e-5, "row {oi}: {got} vs {src}");
        }
    }

    #[test]
    fn zero_factor_rejected() {
        let field = Array2::<f32>::zeros((2, 2));
        assert!(matches!(
            upsample(field.view(), 0),
            Err(BaselineError::InvalidFactor { factor: 0 })
        ));
    }

    #[test]
    fn empty_grid_rejected() {
        let field = Array2::<f32>::zeros((0, 4));
        assert!(matches!(
            upsample(field.view(), 3),
            Err(BaselineError::EmptyGrid { .. })
        ));
    }

    #[test]
    fn stack_upsamples_every_step() {
        let stack =
            ndarray::Array3::from_shape_fn((3, 4, 4), |(t, _, _)| t as f32);
        let up = upsample_stack(&stack, &[3, 3]).unwrap();
        assert_eq!(up.dim(), (3, 36, 36));
        for t in 0..3 {
            for &v in up.index_axis(Axis(0), t).iter() {
                assert!((v - t as f32).abs() < 1e-5);
            }
        }
    }
}
