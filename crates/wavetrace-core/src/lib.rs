//! Core types for the wavetrace ray-tracing workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! values every other crate passes around: ray states and their time
//! derivatives, trajectories with their termination tags, domain bounds,
//! and the error types for grids, requests, and individual rays.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bounds;
pub mod error;
pub mod state;
pub mod trajectory;

pub use bounds::Bounds;
pub use error::{GridError, RayError, RequestError, TraceError};
pub use state::{Derivative, RayState};
pub use trajectory::{RayBundle, Termination, Trajectory, TRAJECTORY_COLUMNS};
