//! # resac-io
//!
//! Reads the npy field archives and npz coordinate archives of the
//! sea-surface dataset into the grid crate's records. The dataset root
//! comes from the `RESAC_DATASETS_DIR` environment variable and is never
//! guessed; file names follow the fixed archive convention.

mod error;
mod load;
mod naming;
mod plan;
mod root;

pub use error::IoError;
pub use load::{load_dataset, load_field, LoadedDataset};
pub use naming::{coords_file_name, field_file_name, parse_field_file_name, storage_tag, Source};
pub use plan::{LoadPlan, PlanEntry};
pub use root::{dataset_root, DATASETS_DIR_VAR};
