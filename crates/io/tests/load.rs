//! Loading fixture archives from a temporary dataset directory.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use ndarray::{Array1, Array3};
use ndarray_npy::{write_npy, NpzWriter};
use tempfile::tempdir;

use resac_grid::{Resolution, Variable};
use resac_io::{load_dataset, load_field, IoError, LoadPlan, Source};

fn reso(code: u8) -> Resolution {
    Resolution::new(code)
}

fn write_field(dir: &Path, name: &str, n: usize, rows: usize, cols: usize) {
    let data = Array3::from_shape_fn((n, rows, cols), |(t, r, c)| {
        (t * 100 + r * 10 + c) as f32
    });
    write_npy(dir.join(name), &data).unwrap();
}

fn write_coords(dir: &Path, name: &str, n: usize, skip_key: Option<&str>) {
    let file = File::create(dir.join(name)).unwrap();
    let mut npz = NpzWriter::new(BufWriter::new(file));
    let time: Array1<f64> = (0..n).map(|i| i as f64).collect();
    let lat = Array1::from(vec![26.5, 44.3]);
    let lon = Array1::from(vec![-64.4, -40.9]);
    for (key, values) in [
        ("time", &time),
        ("latitude", &lat),
        ("longitude", &lon),
        ("latitude_border", &lat),
        ("longitude_border", &lon),
    ] {
        if Some(key) == skip_key {
            continue;
        }
        npz.add_array(key, values).unwrap();
    }
    npz.finish().unwrap();
}

#[test]
fn loads_field_with_coordinates() {
    let dir = tempdir().unwrap();
    write_field(dir.path(), "NATL60_SSH_R09.npy", 4, 6, 5);
    write_coords(dir.path(), "NATL60_coords_R09.npz", 4, None);

    let field = load_field(dir.path(), Source::Natl60, Variable::Ssh, reso(9)).unwrap();
    assert_eq!(field.variable(), Variable::Ssh);
    assert_eq!(field.n_samples(), 4);
    assert_eq!(field.grid_shape(), (6, 5));
    assert_eq!(field.coords().time().len(), 4);
    assert_eq!(field.data()[[2, 3, 1]], 231.0);
}

#[test]
fn missing_field_file_reported() {
    let dir = tempdir().unwrap();
    let err = load_field(dir.path(), Source::Natl60, Variable::Ssh, reso(9)).unwrap_err();
    match err {
        IoError::FileNotFound { path } => {
            assert!(path.ends_with("NATL60_SSH_R09.npy"));
        }
        other => panic!("expected FileNotFound, got {other}"),
    }
}

#[test]
fn missing_coordinate_key_reported() {
    let dir = tempdir().unwrap();
    write_field(dir.path(), "NATL60_SSH_R09.npy", 4, 6, 5);
    write_coords(dir.path(), "NATL60_coords_R09.npz", 4, Some("latitude_border"));

    let err = load_field(dir.path(), Source::Natl60, Variable::Ssh, reso(9)).unwrap_err();
    match err {
        IoError::MissingCoordinate { name, .. } => assert_eq!(name, "latitude_border"),
        other => panic!("expected MissingCoordinate, got {other}"),
    }
}

#[test]
fn satellite_files_carry_geometry_suffix() {
    let dir = tempdir().unwrap();
    write_field(dir.path(), "SAT_SSH_R09s.npy", 3, 6, 5);
    write_coords(dir.path(), "SAT_coords_R09s.npz", 3, None);

    let field = load_field(dir.path(), Source::Sat, Variable::Ssh, reso(9)).unwrap();
    assert_eq!(field.n_samples(), 3);
}

#[test]
fn plan_loads_shared_pair_into_both_roles() {
    let dir = tempdir().unwrap();
    write_field(dir.path(), "NATL60_SSH_R09.npy", 4, 6, 5);
    write_coords(dir.path(), "NATL60_coords_R09.npz", 4, None);
    write_field(dir.path(), "NATL60_SSH_R03.npy", 4, 18, 15);
    write_coords(dir.path(), "NATL60_coords_R03.npz", 4, None);

    let plan = LoadPlan::new(
        &[(Variable::Ssh, reso(9))],
        &[(Variable::Ssh, reso(9)), (Variable::Ssh, reso(3))],
        false,
    );
    let dataset = load_dataset(dir.path(), &plan).unwrap();
    assert_eq!(dataset.inputs().len(), 1);
    assert_eq!(dataset.outputs().len(), 2);
    assert_eq!(dataset.outputs()[0].resolution(), reso(9));
    assert_eq!(dataset.outputs()[1].resolution(), reso(3));
}

#[test]
fn mismatched_time_axis_rejected() {
    let dir = tempdir().unwrap();
    write_field(dir.path(), "NATL60_SSH_R09.npy", 4, 6, 5);
    // Coordinate archive claims 5 samples, data holds 4.
    write_coords(dir.path(), "NATL60_coords_R09.npz", 5, None);

    let err = load_field(dir.path(), Source::Natl60, Variable::Ssh, reso(9)).unwrap_err();
    assert!(matches!(err, IoError::Grid(_)));
}
