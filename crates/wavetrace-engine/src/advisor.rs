//! Step-size and duration advice from grid resolution.
//!
//! A ray should not cross more than one grid cell per step, and a trace
//! long enough to cross the domain once is a sensible default. Both use the
//! deep-water group speed, which bounds the group speed at any depth.
//! The advice is never enforced.

use crate::dispersion::deep_water_group_speed;

/// CFL-style step for cells of `dx` by `dy` meters and wavenumber `k0`:
/// `min(dx, dy) / cg_deep(k0)`.
///
/// `None` unless all arguments are positive and finite.
pub fn cfl_step(dx: f64, dy: f64, k0: f64) -> Option<f64> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if !(valid(dx) && valid(dy) && valid(k0)) {
        return None;
    }
    Some(dx.min(dy) / deep_water_group_speed(k0))
}

/// Recommended step size for a grid with the given coordinates: the mean
/// spacing of the finer axis divided by the deep-water group speed.
///
/// `None` if either axis has fewer than two coordinates or `k0` is not
/// positive and finite.
///
/// ```
/// use wavetrace_engine::advisor::recommended_step;
/// use wavetrace_engine::dispersion::deep_water_group_speed;
///
/// let x = [0.0, 100.0, 200.0];
/// let y = [0.0, 50.0, 100.0, 150.0];
/// let dt = recommended_step(&x, &y, 0.04).unwrap();
/// assert!((dt - 50.0 / deep_water_group_speed(0.04)).abs() < 1e-12);
/// ```
pub fn recommended_step(x_coords: &[f64], y_coords: &[f64], k0: f64) -> Option<f64> {
    cfl_step(mean_spacing(x_coords)?, mean_spacing(y_coords)?, k0)
}

/// Recommended duration: time to cross the x extent at the deep-water
/// group speed, rounded to whole seconds.
///
/// `None` if there are fewer than two coordinates or `k0` is not positive
/// and finite.
pub fn recommended_duration(x_coords: &[f64], k0: f64) -> Option<f64> {
    if x_coords.len() < 2 || !(k0.is_finite() && k0 > 0.0) {
        return None;
    }
    let (lo, hi) = x_coords
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &c| (lo.min(c), hi.max(c)));
    let extent = hi - lo;
    extent
        .is_finite()
        .then(|| (extent / deep_water_group_speed(k0)).round())
}

fn mean_spacing(coords: &[f64]) -> Option<f64> {
    match coords {
        [first, .., last] => Some((last - first) / (coords.len() - 1) as f64),
        _ => None,
    }
}
