//! Bicubic upsampling with a trained per-output affine correction.
//!
//! The simplest member of the architecture family: each output is the
//! primary input upsampled through its factor chain, then corrected by a
//! fitted scalar gain and bias. It exists so the whole artifact/driver
//! path has a concrete, cheaply trainable model; convolutional
//! architectures implement the same [`Model`] trait externally.

use ndarray::{Array4, Axis};
use tracing::debug;

use resac_baseline::upsample_chain;
use resac_grid::CHANNEL_AXIS;

use crate::error::ModelError;
use crate::fit::{FitConfig, FitHistory};
use crate::spec::{OutputSpec, VarSpec};
use crate::Model;

/// Per-output scaled bicubic model over the primary (first) input.
#[derive(Debug, Clone)]
pub struct ScaledBicubic {
    inputs: Vec<VarSpec>,
    outputs: Vec<OutputSpec>,
    gain: Vec<f32>,
    bias: Vec<f32>,
}

impl ScaledBicubic {
    /// Creates an untrained model (gain 1, bias 0 per output).
    pub fn new(inputs: Vec<VarSpec>, outputs: Vec<OutputSpec>) -> Self {
        let n = outputs.len();
        Self {
            inputs,
            outputs,
            gain: vec![1.0; n],
            bias: vec![0.0; n],
        }
    }

    /// Restores a trained model from persisted weights.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::WeightMismatch`] when the weight vectors do
    /// not have one entry per declared output.
    pub fn with_weights(
        inputs: Vec<VarSpec>,
        outputs: Vec<OutputSpec>,
        gain: Vec<f32>,
        bias: Vec<f32>,
    ) -> Result<Self, ModelError> {
        let n = outputs.len();
        if gain.len() != n || bias.len() != n {
            return Err(ModelError::WeightMismatch {
                reason: format!(
                    "expected {n} gain/bias pairs for {n} outputs, got {} gains and {} biases",
                    gain.len(),
                    bias.len()
                ),
            });
        }
        Ok(Self {
            inputs,
            outputs,
            gain,
            bias,
        })
    }

    /// Fitted per-output gains.
    pub fn gain(&self) -> &[f32] {
        &self.gain
    }

    /// Fitted per-output biases.
    pub fn bias(&self) -> &[f32] {
        &self.bias
    }

    /// Upsamples every sample of the primary input through one output's
    /// factor chain, without the affine correction.
    fn raw_output(
        &self,
        primary: &Array4<f32>,
        spec: &OutputSpec,
    ) -> Result<Array4<f32>, ModelError> {
        let (n, rows, cols, _) = primary.dim();
        let total: usize = spec.factors.iter().product();
        let mut out = Array4::<f32>::zeros((n, rows * total, cols * total, 1));
        for i in 0..n {
            let grid = primary
                .index_axis(Axis(0), i)
                .index_axis_move(Axis(CHANNEL_AXIS - 1), 0);
            let up = upsample_chain(grid, &spec.factors)?;
            out.index_axis_mut(Axis(0), i)
                .index_axis_move(Axis(CHANNEL_AXIS - 1), 0)
                .assign(&up);
        }
        Ok(out)
    }

    fn check_input_count(&self, got: usize) -> Result<(), ModelError> {
        if got != self.inputs.len() {
            return Err(ModelError::InputCountMismatch {
                expected: self.inputs.len(),
                got,
            });
        }
        Ok(())
    }
}

impl Model for ScaledBicubic {
    fn predict(&self, inputs: &[Array4<f32>]) -> Result<Vec<Array4<f32>>, ModelError> {
        self.check_input_count(inputs.len())?;
        let primary = &inputs[0];
        let mut outputs = Vec::with_capacity(self.outputs.len());
        for (i, spec) in self.outputs.iter().enumerate() {
            let mut out = self.raw_output(primary, spec)?;
            let (g, b) = (self.gain[i], self.bias[i]);
            out.mapv_inplace(|v| g * v + b);
            outputs.push(out);
        }
        Ok(outputs)
    }

    fn fit(
        &mut self,
        inputs: &[Array4<f32>],
        targets: &[Array4<f32>],
        _config: &FitConfig,
    ) -> Result<FitHistory, ModelError> {
        self.check_input_count(inputs.len())?;
        if targets.len() != self.outputs.len() {
            return Err(ModelError::OutputCountMismatch {
                expected: self.outputs.len(),
                got: targets.len(),
            });
        }

        let primary = &inputs[0];
        let specs = self.outputs.clone();
        let mut loss_before = 0.0;
        let mut loss_after = 0.0;
        for (i, spec) in specs.iter().enumerate() {
            let raw = self.raw_output(primary, spec)?;
            let target = &targets[i];
            if raw.dim() != target.dim() {
                return Err(ModelError::WeightMismatch {
                    reason: format!(
                        "target {i} shape {:?} does not match upsampled input shape {:?}",
                        target.dim(),
                        raw.dim()
                    ),
                });
            }

            loss_before += mse(&raw, target, self.gain[i], self.bias[i]);
            let (g, b) = least_squares_affine(&raw, target);
            self.gain[i] = g;
            self.bias[i] = b;
            loss_after += mse(&raw, target, g, b);
            debug!(output = i, gain = g, bias = b, "affine correction fitted");
        }

        let n = self.outputs.len() as f64;
        Ok(FitHistory::new(vec![loss_before / n, loss_after / n]))
    }
}

/// Closed-form least-squares fit of `target ≈ gain * raw + bias`,
/// ignoring NaN pairs.
fn least_squares_affine(raw: &Array4<f32>, target: &Array4<f32>) -> (f32, f32) {
    let mut n = 0.0f64;
    let mut sum_x = 0.0f64;
    let mut sum_y = 0.0f64;
    let mut sum_xx = 0.0f64;
    let mut sum_xy = 0.0f64;
    for (&x, &y) in raw.iter().zip(target.iter()) {
        if x.is_nan() || y.is_nan() {
            continue;
        }
        let (x, y) = (f64::from(x), f64::from(y));
        n += 1.0;
        sum_x += x;
        sum_y += y;
        sum_xx += x * x;
        sum_xy += x * y;
    }
    if n == 0.0 {
        return (1.0, 0.0);
    }
    let var = sum_xx / n - (sum_x / n) * (sum_x / n);
    if var <= f64::EPSILON {
        // Flat input: nothing to scale, match the target mean.
        return (0.0, (sum_y / n) as f32);
    }
    let cov = sum_xy / n - (sum_x / n) * (sum_y / n);
    let gain = cov / var;
    let bias = sum_y / n - gain * sum_x / n;
    (gain as f32, bias as f32)
}

/// Mean squared error of `gain * raw + bias` against `target`, skipping
/// NaN pairs.
fn mse(raw: &Array4<f32>, target: &Array4<f32>, gain: f32, bias: f32) -> f64 {
    let mut sum = 0.0f64;
    let mut n = 0usize;
    for (&x, &y) in raw.iter().zip(target.iter()) {
        if x.is_nan() || y.is_nan() {
            continue;
        }
        let d = f64::from(gain * x + bias) - f64::from(y);
        sum += d * d;
        n += 1;
    }
    if n == 0 { 0.0 } else { sum / n as f64 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resac_grid::{Resolution, Variable};

    fn specs() -> (Vec<VarSpec>, Vec<OutputSpec>) {
        (
            vec![VarSpec::new(Variable::Ssh, Resolution::new(9))],
            vec![OutputSpec::new(Variable::Ssh, Resolution::new(3), vec![3])],
        )
    }

    #[test]
    fn untrained_predict_is_plain_bicubic() {
        let (inputs, outputs) = specs();
        let model = ScaledBicubic::new(inputs, outputs);
        let x = Array4::from_elem((2, 4, 4, 1), 0.25f32);
        let y = model.predict(&[x]).unwrap();
        assert_eq!(y.len(), 1);
        assert_eq!(y[0].dim(), (2, 12, 12, 1));
        assert!(y[0].iter().all(|&v| (v - 0.25).abs() < 1e-6));
    }

    #[test]
    fn fit_recovers_affine_relation() {
        let (inputs, outputs) = specs();
        let mut model = ScaledBicubic::new(inputs, outputs);
        let x = Array4::from_shape_fn((5, 4, 4, 1), |(n, r, c, _)| {
            0.1 * (n + r + c) as f32
        });
        // Target is exactly 2 * upsample(x) + 0.5
        let raw = model.raw_output(&x, &model.outputs[0]).unwrap();
        let target = raw.mapv(|v| 2.0 * v + 0.5);

        let history = model.fit(&[x], &[target], &FitConfig::default()).unwrap();
        assert!((model.gain()[0] - 2.0).abs() < 1e-4);
        assert!((model.bias()[0] - 0.5).abs() < 1e-4);
        let final_loss = history.final_loss().unwrap();
        assert!(final_loss < 1e-8, "final loss {final_loss}");
    }

    #[test]
    fn wrong_input_count_rejected() {
        let (inputs, outputs) = specs();
        let model = ScaledBicubic::new(inputs, outputs);
        let err = model.predict(&[]).unwrap_err();
        assert!(matches!(
            err,
            ModelError::InputCountMismatch {
                expected: 1,
                got: 0
            }
        ));
    }

    #[test]
    fn weight_length_checked_on_restore() {
        let (inputs, outputs) = specs();
        let err = ScaledBicubic::with_weights(inputs, outputs, vec![1.0, 2.0], vec![0.0])
            .unwrap_err();
        assert!(matches!(err, ModelError::WeightMismatch { .. }));
    }
}
