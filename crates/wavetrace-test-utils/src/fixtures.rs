//! Reusable field and ray fixtures.
//!
//! Grids share one layout type, [`GridSpec`], so a test can build a
//! bathymetry and a current on identical axes:
//!
//! - [`flat_bottom`]: uniform depth
//! - [`linear_beach`]: depth falling linearly toward +x, dry past the shoreline
//! - [`seamount`]: Gaussian bump rising from a flat floor
//! - [`shear_current`]: along-x jet whose speed varies linearly with y
//!
//! Ray fixtures: [`parallel_rays`] (evenly spaced, same wavenumber) and
//! [`random_rays`] (seeded ChaCha8, reproducible across platforms).

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use wavetrace_core::{Bounds, RayState};
use wavetrace_field::{Axis, CurrentGrid, FieldGrid};

/// Regular grid layout starting at the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSpec {
    pub nx: usize,
    pub ny: usize,
    pub dx: f64,
    pub dy: f64,
}

impl GridSpec {
    pub fn new(nx: usize, ny: usize, dx: f64, dy: f64) -> Self {
        Self { nx, ny, dx, dy }
    }

    /// Square cells of `spacing` meters.
    pub fn square(nx: usize, ny: usize, spacing: f64) -> Self {
        Self::new(nx, ny, spacing, spacing)
    }

    pub fn width(&self) -> f64 {
        (self.nx - 1) as f64 * self.dx
    }

    pub fn height(&self) -> f64 {
        (self.ny - 1) as f64 * self.dy
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(0.0, self.width(), 0.0, self.height())
    }

    /// The `(x, y)` axes.
    ///
    /// # Panics
    ///
    /// Panics if there are fewer than two nodes on an axis.
    pub fn axes(&self) -> (Axis, Axis) {
        let x = Axis::uniform("x", 0.0, self.dx, self.nx).expect("fixture x axis");
        let y = Axis::uniform("y", 0.0, self.dy, self.ny).expect("fixture y axis");
        (x, y)
    }

    /// Sample `f(x, y)` on this layout.
    pub fn sample(&self, f: impl Fn(f64, f64) -> f64) -> FieldGrid {
        let (x, y) = self.axes();
        FieldGrid::from_fn(x, y, f)
    }
}

/// Uniform `depth` everywhere.
pub fn flat_bottom(spec: GridSpec, depth: f64) -> FieldGrid {
    spec.sample(|_, _| depth)
}

/// Depth `h0` at `x = 0`, falling by `slope` per meter toward +x.
///
/// The shoreline sits at `x = h0 / slope`; past it the depth is negative.
pub fn linear_beach(spec: GridSpec, h0: f64, slope: f64) -> FieldGrid {
    spec.sample(|x, _| h0 - slope * x)
}

/// Flat floor at `depth` with a Gaussian mount of `height` and e-folding
/// `radius` centred in the grid.
pub fn seamount(spec: GridSpec, depth: f64, height: f64, radius: f64) -> FieldGrid {
    let (cx, cy) = (spec.width() / 2.0, spec.height() / 2.0);
    spec.sample(move |x, y| {
        let r2 = ((x - cx).powi(2) + (y - cy).powi(2)) / (radius * radius);
        depth - height * (-r2).exp()
    })
}

/// Current `u = u0 + shear * y`, `v = 0`.
pub fn shear_current(spec: GridSpec, u0: f64, shear: f64) -> CurrentGrid {
    let u = spec.sample(|_, y| u0 + shear * y);
    let v = spec.sample(|_, _| 0.0);
    CurrentGrid::new(u, v).expect("shared fixture axes")
}

/// `n` rays spaced evenly along `y` in `[y_min, y_max]` at `x = x0`, all with
/// wavenumber `k` heading in `direction` radians.
pub fn parallel_rays(n: usize, x0: f64, y_min: f64, y_max: f64, k: f64, direction: f64) -> Vec<RayState> {
    let dy = if n > 1 { (y_max - y_min) / (n - 1) as f64 } else { 0.0 };
    (0..n)
        .map(|i| RayState::from_polar(x0, y_min + i as f64 * dy, k, direction))
        .collect()
}

/// `n` rays with positions uniform in `region`, wavenumber magnitudes
/// uniform in `[k_min, k_max)`, and directions uniform in `[-π, π)`.
///
/// The same `seed` always gives the same rays.
pub fn random_rays(seed: u64, n: usize, region: Bounds, k_min: f64, k_max: f64) -> Vec<RayState> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let x = rng.random_range(region.x_min..=region.x_max);
            let y = rng.random_range(region.y_min..=region.y_max);
            let k = rng.random_range(k_min..k_max);
            let dir = rng.random_range(-std::f64::consts::PI..std::f64::consts::PI);
            RayState::from_polar(x, y, k, dir)
        })
        .collect()
}
