//! Reading field and coordinate archives into grid records.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ndarray::{Array1, Array3};
use ndarray_npy::{read_npy, NpzReader};
use tracing::{debug, info};

use resac_grid::{CoordinateMetadata, Resolution, VarResoField, Variable};

use crate::error::IoError;
use crate::naming::{coords_file_name, field_file_name, Source};
use crate::plan::LoadPlan;

const COORD_KEYS: [&str; 5] = [
    "time",
    "latitude",
    "longitude",
    "latitude_border",
    "longitude_border",
];

/// Loads one field archive together with its coordinate archive.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] for an absent archive,
/// [`IoError::Npy`] for an unreadable one, and
/// [`IoError::MissingCoordinate`] when the coordinate npz lacks one of
/// its five required keys.
pub fn load_field(
    root: &Path,
    source: Source,
    variable: Variable,
    resolution: Resolution,
) -> Result<VarResoField, IoError> {
    let field_path = root.join(field_file_name(source, variable, resolution));
    if !field_path.is_file() {
        return Err(IoError::FileNotFound { path: field_path });
    }
    let data: Array3<f32> = read_npy(&field_path).map_err(|e| IoError::Npy {
        path: field_path.clone(),
        reason: e.to_string(),
    })?;

    let coords_path = root.join(coords_file_name(source, resolution));
    let coords = load_coords(&coords_path)?;

    debug!(
        %variable,
        %resolution,
        samples = data.shape()[0],
        rows = data.shape()[1],
        cols = data.shape()[2],
        "field loaded"
    );
    Ok(VarResoField::new(variable, resolution, data, coords)?)
}

/// Reads the five coordinate arrays from one npz archive.
fn load_coords(path: &Path) -> Result<CoordinateMetadata, IoError> {
    if !path.is_file() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path).map_err(|e| npy_err(path, e))?;
    let mut npz = NpzReader::new(BufReader::new(file)).map_err(|e| npy_err(path, e))?;

    let names = npz.names().map_err(|e| npy_err(path, e))?;
    let mut arrays = Vec::with_capacity(COORD_KEYS.len());
    for key in COORD_KEYS {
        if !names.iter().any(|n| n == key || n.strip_suffix(".npy") == Some(key)) {
            return Err(IoError::MissingCoordinate {
                name: key,
                path: path.to_path_buf(),
            });
        }
        let values: Array1<f64> = npz.by_name(key).map_err(|e| npy_err(path, e))?;
        arrays.push(values);
    }

    let mut it = arrays.into_iter();
    // Order fixed by COORD_KEYS.
    Ok(CoordinateMetadata::new(
        it.next().unwrap(),
        it.next().unwrap(),
        it.next().unwrap(),
        it.next().unwrap(),
        it.next().unwrap(),
    ))
}

/// Every field one run reads, separated by role and ordered per the plan.
///
/// A field serving both roles appears in both collections.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    inputs: Vec<VarResoField>,
    outputs: Vec<VarResoField>,
}

impl LoadedDataset {
    /// Input fields, in plan order.
    pub fn inputs(&self) -> &[VarResoField] {
        &self.inputs
    }

    /// Output fields, in plan order.
    pub fn outputs(&self) -> &[VarResoField] {
        &self.outputs
    }
}

/// Executes a [`LoadPlan`] against the dataset root.
///
/// Each planned archive is read exactly once; fields tagged with both
/// roles are cloned into both collections.
pub fn load_dataset(root: &Path, plan: &LoadPlan) -> Result<LoadedDataset, IoError> {
    let mut inputs = Vec::new();
    let mut outputs = Vec::new();
    for entry in plan.entries() {
        let field = load_field(root, entry.source(), entry.variable(), entry.resolution())?;
        if entry.is_input() {
            inputs.push(field.clone());
        }
        if entry.is_output() {
            outputs.push(field);
        }
    }
    info!(
        inputs = inputs.len(),
        outputs = outputs.len(),
        root = %root.display(),
        "dataset loaded"
    );
    Ok(LoadedDataset { inputs, outputs })
}

fn npy_err(path: &Path, source: impl std::fmt::Display) -> IoError {
    IoError::Npy {
        path: path.to_path_buf(),
        reason: source.to_string(),
    }
}
