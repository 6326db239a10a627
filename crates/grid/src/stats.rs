//! Basic per-field statistics used for load-time diagnostics.

use std::fmt;

use ndarray::{ArrayBase, Data, Dimension};

use crate::error::GridError;

/// Min/max/mean/std summary of one field, computed in f64.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldStats {
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
}

impl FieldStats {
    /// Computes the summary over any collection of f32 values.
    ///
    /// NaN values are skipped. An all-NaN or empty input yields a summary
    /// of NaNs rather than a panic, since masked coastal pixels are
    /// routine in these fields.
    pub fn of<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a f32>,
    {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut sum_sq = 0.0;
        let mut n = 0usize;
        for &v in values {
            if v.is_nan() {
                continue;
            }
            let v = f64::from(v);
            min = min.min(v);
            max = max.max(v);
            sum += v;
            sum_sq += v * v;
            n += 1;
        }
        if n == 0 {
            return Self {
                min: f64::NAN,
                max: f64::NAN,
                mean: f64::NAN,
                std: f64::NAN,
            };
        }
        let nf = n as f64;
        let mean = sum / nf;
        let var = (sum_sq / nf - mean * mean).max(0.0);
        Self {
            min,
            max,
            mean,
            std: var.sqrt(),
        }
    }
}

impl fmt::Display for FieldStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "min={:.4} max={:.4} mean={:.4} std={:.4}",
            self.min, self.max, self.mean, self.std
        )
    }
}

/// Root-mean-square difference between two arrays of identical shape,
/// skipping element pairs where either side is NaN.
///
/// Returns `Ok(NaN)` when no comparable pair exists. Arrays whose shapes
/// disagree are rejected up front; a flat elementwise walk over unequal
/// grids would pair unrelated pixels.
pub fn nan_rmse<S1, S2, D>(a: &ArrayBase<S1, D>, b: &ArrayBase<S2, D>) -> Result<f64, GridError>
where
    S1: Data<Elem = f32>,
    S2: Data<Elem = f32>,
    D: Dimension,
{
    if a.shape() != b.shape() {
        return Err(GridError::ShapeMismatch {
            expected: a.shape().to_vec(),
            got: b.shape().to_vec(),
        });
    }
    let mut sum_sq = 0.0;
    let mut n = 0usize;
    for (&x, &y) in a.iter().zip(b.iter()) {
        if x.is_nan() || y.is_nan() {
            continue;
        }
        let d = f64::from(x) - f64::from(y);
        sum_sq += d * d;
        n += 1;
    }
    if n == 0 {
        return Ok(f64::NAN);
    }
    Ok((sum_sq / n as f64).sqrt())
}
