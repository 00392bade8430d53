//! Benchmark scenarios for the wavetrace ray tracer.
//!
//! Provides pre-built [`Scenario`]s for benchmarks and profiling:
//!
//! - [`reference_scenario`]: 201x201 seamount (40K nodes) in a sheared
//!   current, 64 rays
//! - [`stress_scenario`]: 501x501 seamount (250K nodes), 1024 rays

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use wavetrace_core::RayState;
use wavetrace_engine::dispersion::wavenumber_from_period;
use wavetrace_engine::RaySystem;
use wavetrace_field::{CurrentGrid, FieldGrid};
use wavetrace_test_utils::{random_rays, seamount, shear_current, GridSpec};

/// Fields, rays and time parameters for one benchmark run.
pub struct Scenario {
    /// Gridded depth.
    pub bathymetry: FieldGrid,
    /// Gridded current, if any.
    pub current: Option<CurrentGrid>,
    /// Initial states.
    pub rays: Vec<RayState>,
    /// Integration time (s).
    pub duration: f64,
    /// RK4 step (s).
    pub step_size: f64,
}

impl Scenario {
    /// Ray equations over this scenario's fields.
    pub fn system(&self) -> RaySystem<'_> {
        let system = RaySystem::new(&self.bathymetry);
        match &self.current {
            Some(c) => system.with_current(c),
            None => system,
        }
    }
}

/// 2 km square at 10 m spacing: a 150 m seamount in 200 m of water under
/// a weak shear current. Rays carry periods between 6 and 14 s.
pub fn reference_scenario(seed: u64) -> Scenario {
    let spec = GridSpec::square(201, 201, 10.0);
    build(spec, 64, seed)
}

/// Same layout as [`reference_scenario`] on a 5 km square with 1024 rays.
pub fn stress_scenario(seed: u64) -> Scenario {
    let spec = GridSpec::square(501, 501, 10.0);
    build(spec, 1024, seed)
}

fn build(spec: GridSpec, n: usize, seed: u64) -> Scenario {
    let bathymetry = seamount(spec, 200.0, 150.0, spec.width() / 8.0);
    let current = shear_current(spec, 0.1, 1e-4);
    let rays = random_rays(
        seed,
        n,
        spec.bounds(),
        wavenumber_from_period(14.0),
        wavenumber_from_period(6.0),
    );
    Scenario {
        bathymetry,
        current: Some(current),
        rays,
        duration: 300.0,
        step_size: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_scenario_is_deterministic() {
        let a = reference_scenario(7);
        let b = reference_scenario(7);
        assert_eq!(a.rays, b.rays);
        assert_eq!(a.rays.len(), 64);
    }

    #[test]
    fn reference_rays_start_in_water() {
        let s = reference_scenario(1);
        let system = s.system();
        for init in &s.rays {
            assert!(system.derivative(init).is_ok(), "{init:?}");
        }
    }
}
