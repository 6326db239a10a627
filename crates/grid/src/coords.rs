//! Coordinate metadata attached to a loaded field.

use ndarray::Array1;

use crate::error::GridError;

/// Per-(variable, resolution) coordinate record: time axis, grid-cell
/// center coordinates, and cell borders.
///
/// Read-only provenance for comparison and archiving; the pipeline never
/// mutates it. Time values are fractional days since the first record of
/// the source archive.
#[derive(Debug, Clone)]
pub struct CoordinateMetadata {
    time: Array1<f64>,
    latitude: Array1<f64>,
    longitude: Array1<f64>,
    latitude_border: Array1<f64>,
    longitude_border: Array1<f64>,
}

impl CoordinateMetadata {
    /// Bundles the five coordinate arrays into a metadata record.
    pub fn new(
        time: Array1<f64>,
        latitude: Array1<f64>,
        longitude: Array1<f64>,
        latitude_border: Array1<f64>,
        longitude_border: Array1<f64>,
    ) -> Self {
        Self {
            time,
            latitude,
            longitude,
            latitude_border,
            longitude_border,
        }
    }

    /// Time axis (one value per sample).
    pub fn time(&self) -> &Array1<f64> {
        &self.time
    }

    /// Latitudes of grid-cell centers.
    pub fn latitude(&self) -> &Array1<f64> {
        &self.latitude
    }

    /// Longitudes of grid-cell centers.
    pub fn longitude(&self) -> &Array1<f64> {
        &self.longitude
    }

    /// Latitude borders of the zone.
    pub fn latitude_border(&self) -> &Array1<f64> {
        &self.latitude_border
    }

    /// Longitude borders of the zone.
    pub fn longitude_border(&self) -> &Array1<f64> {
        &self.longitude_border
    }

    /// Extracts the time values for a sample-index subset, in subset order.
    ///
    /// Used to attach a calendar to each train/validation/test split.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::TimeIndexOutOfRange`] if an index falls
    /// outside the time axis.
    pub fn time_subset(&self, indices: &[usize]) -> Result<Array1<f64>, GridError> {
        let n = self.time.len();
        for &i in indices {
            if i >= n {
                return Err(GridError::TimeIndexOutOfRange { index: i, len: n });
            }
        }
        Ok(indices.iter().map(|&i| self.time[i]).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sample() -> CoordinateMetadata {
        CoordinateMetadata::new(
            array![0.0, 1.0, 2.0, 3.0],
            array![26.5, 44.3],
            array![-64.4, -40.9],
            array![26.4, 44.4],
            array![-64.5, -40.8],
        )
    }

    #[test]
    fn time_subset_preserves_order() {
        let c = sample();
        let sub = c.time_subset(&[3, 0, 2]).unwrap();
        assert_eq!(sub, array![3.0, 0.0, 2.0]);
    }

    #[test]
    fn time_subset_out_of_range() {
        let c = sample();
        let err = c.time_subset(&[4]).unwrap_err();
        assert!(matches!(
            err,
            GridError::TimeIndexOutOfRange { index: 4, len: 4 }
        ));
    }
}
