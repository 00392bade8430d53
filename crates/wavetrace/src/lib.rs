//! Wavetrace: ray tracing of ocean surface-gravity waves.
//!
//! Rays follow the linear dispersion relation over a depth field and an
//! optional ambient current, refracting as the water shoals and as the
//! current shears. This facade re-exports the sub-crates and adds
//! path-based entry points that load fields from JSON datasets.
//!
//! # Quick start
//!
//! ```rust
//! use wavetrace::prelude::*;
//!
//! // A 2 km by 1 km basin, 50 m deep.
//! let x: Vec<f64> = (0..=20).map(|i| i as f64 * 100.0).collect();
//! let y: Vec<f64> = (0..=10).map(|i| i as f64 * 100.0).collect();
//! let depth = vec![50.0; x.len() * y.len()];
//! let basin = FieldGrid::new(x, y, depth).unwrap();
//!
//! let k = wavenumber_from_period(10.0);
//! let rays = vec![RayState::initial(100.0, 500.0, k, 0.0)];
//! let result = TraceRequest::new(rays, TraceConfig::new(120.0, 1.0), &basin)
//!     .execute()
//!     .unwrap();
//! let traj = &result.trajectories[0];
//! assert_eq!(traj.termination(), Termination::Completed);
//! assert_eq!(traj.len(), 121);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `wavetrace-core` | Ray states, trajectories, bounds, errors |
//! | [`field`] | `wavetrace-field` | Bathymetry and current traits, grids, analytic fields |
//! | [`engine`] | `wavetrace-engine` | Dispersion, ray equations, RK4, batch driver, advisor |
//! | [`io`] | `wavetrace-io` | JSON datasets, run files, trajectory writers |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod entry;

pub use entry::{ray_tracing, run_file, single_ray};

/// Ray states, trajectories, bounds and error types (`wavetrace-core`).
pub use wavetrace_core as types;

/// Depth and current fields (`wavetrace-field`).
///
/// [`field::FieldGrid`] and [`field::CurrentGrid`] back data loaded from
/// files; [`field::ConstantSlope`] and [`field::ShearCurrent`] are handy
/// for idealised runs.
pub use wavetrace_field as field;

/// Dispersion relation, ray equations and integration (`wavetrace-engine`).
pub use wavetrace_engine as engine;

/// Dataset and trajectory files (`wavetrace-io`).
pub use wavetrace_io as io;

/// Common imports for typical wavetrace usage.
pub mod prelude {
    // Core types
    pub use wavetrace_core::{Bounds, RayBundle, RayState, Termination, Trajectory};

    // Errors
    pub use wavetrace_core::{GridError, RequestError, TraceError};
    pub use wavetrace_io::IoError;

    // Fields
    pub use wavetrace_field::{
        Bathymetry, ConstantCurrent, ConstantDepth, ConstantSlope, Current, CurrentGrid,
        FieldGrid, ShearCurrent,
    };

    // Engine
    pub use wavetrace_engine::advisor::{recommended_duration, recommended_step};
    pub use wavetrace_engine::dispersion::{group_speed, wavenumber_from_period};
    pub use wavetrace_engine::{
        BatchDriver, BatchMetrics, BatchResult, CancelToken, Integrator, Parallelism, RaySystem,
        TraceConfig, TraceRequest,
    };

    // Entry points
    pub use crate::entry::{ray_tracing, run_file, single_ray};
}
