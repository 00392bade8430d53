//! Ray equations and integration engine for wavetrace.
//!
//! Computes the paths of surface-gravity-wave rays through varying depth
//! and current:
//!
//! - [`dispersion`]: the linear dispersion relation and its derivatives
//! - [`RaySystem`]: the Hamiltonian ray equations over a pair of fields
//! - [`Integrator`]: fixed-step RK4 for one ray
//! - [`BatchDriver`]: many independent rays, in parallel with rayon
//! - [`advisor`]: step-size and duration advice from grid resolution
//! - [`TraceRequest`]: validated, ready-to-run traces
//!
//! Nothing here installs a logger; events go through the `log` facade.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod advisor;
pub mod batch;
pub mod cancel;
pub mod config;
pub mod dispersion;
pub mod integrator;
pub mod metrics;
pub mod rhs;

pub use batch::{run_many, BatchDriver, BatchResult, Parallelism, RayProgress};
pub use cancel::CancelToken;
pub use config::{initial_states, TraceConfig, TraceRequest};
pub use dispersion::GRAVITY;
pub use integrator::{step_count, Integrator};
pub use metrics::BatchMetrics;
pub use rhs::RaySystem;
