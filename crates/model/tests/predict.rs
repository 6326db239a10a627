//! End-to-end checked prediction through the driver.

use ndarray::Array4;

use resac_codec::{fit_and_encode, CodecMode};
use resac_grid::{Resolution, TensorEntry, Variable};
use resac_model::{
    ArchitectureSpec, FitConfig, Model, ModelArtifact, ModelError, OutputSpec, PredictionDriver,
    ScaledBicubic, VarSpec,
};

fn reso(code: u8) -> Resolution {
    Resolution::new(code)
}

/// Trains a one-input one-output model on smooth synthetic fields and
/// returns the driver plus the raw test input and matching truth.
fn trained_driver() -> (PredictionDriver, Array4<f32>, Array4<f32>) {
    let raw_in = Array4::from_shape_fn((6, 8, 8, 1), |(n, r, c, _)| {
        0.2 * (n as f32) + 0.04 * (r as f32) + 0.03 * (c as f32)
    });
    // Truth at triple resolution, same ramp sampled three times finer.
    let raw_out = Array4::from_shape_fn((6, 24, 24, 1), |(n, r, c, _)| {
        0.2 * (n as f32) + 0.04 * (r as f32 / 3.0) + 0.03 * (c as f32 / 3.0)
    });

    let (enc_in, params_in) =
        fit_and_encode(&raw_in, CodecMode::Fit01, Variable::Ssh, reso(9)).unwrap();
    let (enc_out, params_out) =
        fit_and_encode(&raw_out, CodecMode::Fit01, Variable::Ssh, reso(3)).unwrap();

    let arch = ArchitectureSpec::ScaledBicubic {
        inputs: vec![VarSpec::new(Variable::Ssh, reso(9))],
        outputs: vec![OutputSpec::new(Variable::Ssh, reso(3), vec![3])],
    };
    let mut model = ScaledBicubic::new(arch.inputs().to_vec(), arch.outputs().to_vec());
    model
        .fit(&[enc_in.clone()], &[enc_out], &FitConfig::default())
        .unwrap();

    let artifact = ModelArtifact::new(arch, &model, vec![params_in], vec![params_out]).unwrap();
    let driver = PredictionDriver::new(artifact).unwrap();
    (driver, enc_in, raw_out)
}

#[test]
fn predicts_physical_fields_close_to_truth() {
    let (driver, enc_in, truth) = trained_driver();
    let inputs = vec![TensorEntry::new(Variable::Ssh, reso(9), enc_in)];

    let outputs = driver.predict(&inputs).unwrap();
    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].variable(), Variable::Ssh);
    assert_eq!(outputs[0].resolution(), reso(3));
    assert_eq!(outputs[0].data().dim(), truth.dim());

    // The decoded field is in physical units; interior of a linear ramp
    // reconstructs closely under bicubic interpolation.
    let got = outputs[0].data();
    let mut max_err = 0.0f32;
    for n in 0..6 {
        for r in 6..18 {
            for c in 6..18 {
                let d = (got[[n, r, c, 0]] - truth[[n, r, c, 0]]).abs();
                max_err = max_err.max(d);
            }
        }
    }
    assert!(max_err < 0.05, "interior error {max_err}");
}

#[test]
fn wrong_input_order_rejected() {
    let (driver, enc_in, _) = trained_driver();
    // Same tensor, mislabeled as SST: position 0 must be SSH at R09.
    let inputs = vec![TensorEntry::new(Variable::Sst, reso(9), enc_in)];

    let err = driver.predict(&inputs).unwrap_err();
    match err {
        ModelError::InputOrderMismatch {
            position,
            expected_variable,
            got_variable,
            ..
        } => {
            assert_eq!(position, 0);
            assert_eq!(expected_variable, Variable::Ssh);
            assert_eq!(got_variable, Variable::Sst);
        }
        other => panic!("expected InputOrderMismatch, got {other}"),
    }
}

#[test]
fn wrong_input_count_rejected() {
    let (driver, enc_in, _) = trained_driver();
    let entry = TensorEntry::new(Variable::Ssh, reso(9), enc_in);
    let inputs = vec![entry.clone(), entry];

    let err = driver.predict(&inputs).unwrap_err();
    assert!(matches!(
        err,
        ModelError::InputCountMismatch {
            expected: 1,
            got: 2
        }
    ));
}
