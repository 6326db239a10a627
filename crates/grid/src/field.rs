//! A loaded (variable, resolution) field with its coordinates.

use ndarray::{Array3, Array4};

use crate::coords::CoordinateMetadata;
use crate::error::GridError;
use crate::tensor::channel_last;
use crate::variable::{Resolution, Variable};

/// One variable at one resolution: a `(time, rows, cols)` array plus its
/// coordinate metadata.
///
/// Rows and columns are fixed per (variable, resolution) pair; the time
/// axis is shared across every field entering one training case.
#[derive(Debug, Clone)]
pub struct VarResoField {
    variable: Variable,
    resolution: Resolution,
    data: Array3<f32>,
    coords: CoordinateMetadata,
}

impl VarResoField {
    /// Builds a field, checking that the coordinate time axis matches the
    /// data's time dimension.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::CoordinateLength`] if the time axis length
    /// differs from the number of samples.
    pub fn new(
        variable: Variable,
        resolution: Resolution,
        data: Array3<f32>,
        coords: CoordinateMetadata,
    ) -> Result<Self, GridError> {
        let n = data.shape()[0];
        if coords.time().len() != n {
            return Err(GridError::CoordinateLength {
                name: "time",
                expected: n,
                got: coords.time().len(),
            });
        }
        Ok(Self {
            variable,
            resolution,
            data,
            coords,
        })
    }

    /// The physical variable.
    pub fn variable(&self) -> Variable {
        self.variable
    }

    /// The resolution code.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// The raw `(time, rows, cols)` array.
    pub fn data(&self) -> &Array3<f32> {
        &self.data
    }

    /// Coordinate metadata.
    pub fn coords(&self) -> &CoordinateMetadata {
        &self.coords
    }

    /// Number of time steps.
    pub fn n_samples(&self) -> usize {
        self.data.shape()[0]
    }

    /// Spatial grid shape `(rows, cols)`.
    pub fn grid_shape(&self) -> (usize, usize) {
        let s = self.data.shape();
        (s[1], s[2])
    }

    /// Restricts the field to a sample subset and reshapes it to the
    /// channel-last tensor `(n, rows, cols, 1)`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EmptySelection`] for an empty index list and
    /// [`GridError::IndexOutOfRange`] when an index exceeds the time axis.
    pub fn tensor(&self, indices: &[usize]) -> Result<Array4<f32>, GridError> {
        if indices.is_empty() {
            return Err(GridError::EmptySelection {
                variable: self.variable,
                resolution: self.resolution,
            });
        }
        let len = self.n_samples();
        for &i in indices {
            if i >= len {
                return Err(GridError::IndexOutOfRange {
                    index: i,
                    len,
                    variable: self.variable,
                    resolution: self.resolution,
                });
            }
        }
        Ok(channel_last(&self.data, indices))
    }
}
