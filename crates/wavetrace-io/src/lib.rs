//! File layer for wavetrace.
//!
//! Loads gridded bathymetry and current datasets from JSON, reads and
//! writes run files, and writes traced trajectories as delimited text or
//! JSON.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod dataset;
pub mod error;
pub mod run_file;
pub mod writer;

pub use dataset::{load_bathymetry, load_current, Coords, GriddedDataset, DEPTH_VAR, U_VAR, V_VAR};
pub use error::IoError;
pub use run_file::{ParallelismSpec, RaySpec, RunFile};
pub use writer::{read_bundle_json, save_bundle_json, save_csv, write_bundle_json, write_csv};
