//! Linear dispersion relation for surface gravity waves.
//!
//! All functions take the wavenumber magnitude `k` (rad/m) and the water
//! depth `h` (m, positive downward). They are defined for `k > 0` and
//! `h > 0`; [`check_domain`] turns anything else into the matching
//! [`RayError`] and the ray equations call it before evaluating them.
//! Outside that domain the formulas return NaN or nonsense.

use std::f64::consts::PI;

use wavetrace_core::RayError;

/// Gravitational acceleration (m/s²).
pub const GRAVITY: f64 = 9.81;

const NEWTON_MAX_ITER: usize = 50;
const NEWTON_REL_TOL: f64 = 1e-12;

/// Reject states the dispersion relation is not defined for.
///
/// # Errors
///
/// [`RayError::Grounded`] if `h <= 0` or `h` is NaN, [`RayError::Diverged`]
/// if `k` is zero or not finite.
pub fn check_domain(k: f64, h: f64, x: f64, y: f64) -> Result<(), RayError> {
    if !(k.is_finite() && k > 0.0) {
        return Err(RayError::Diverged);
    }
    // NaN depth is a land mask.
    if h.is_nan() || h <= 0.0 {
        return Err(RayError::Grounded { x, y, depth: h });
    }
    Ok(())
}

/// Intrinsic angular frequency `ω = sqrt(g k tanh(k h))` (rad/s).
pub fn frequency(k: f64, h: f64) -> f64 {
    (GRAVITY * k * (k * h).tanh()).sqrt()
}

/// Group speed `cg = (ω / 2k) (1 + 2kh / sinh(2kh))` (m/s).
///
/// In deep water `sinh(2kh)` overflows to infinity and the correction term
/// goes to zero, which is the correct limit.
///
/// ```
/// use wavetrace_engine::dispersion::{group_speed, GRAVITY};
///
/// // Shallow water: cg approaches sqrt(g h).
/// let cg = group_speed(1e-4, 10.0);
/// assert!((cg - (GRAVITY * 10.0_f64).sqrt()).abs() < 1e-3);
/// ```
pub fn group_speed(k: f64, h: f64) -> f64 {
    let omega = frequency(k, h);
    let two_kh = 2.0 * k * h;
    (omega / (2.0 * k)) * (1.0 + two_kh / two_kh.sinh())
}

/// Sensitivity of the frequency to depth, `∂ω/∂h = k ω / sinh(2kh)`.
///
/// Positive: a shallower bottom lowers the frequency at fixed `k`, so rays
/// bend toward shallow water.
pub fn frequency_depth_sensitivity(k: f64, h: f64) -> f64 {
    k * frequency(k, h) / (2.0 * k * h).sinh()
}

/// Deep-water wavenumber `(2π/T)² / g` for a wave of period `T` seconds.
pub fn wavenumber_from_period(period: f64) -> f64 {
    let omega = 2.0 * PI / period;
    omega * omega / GRAVITY
}

/// Deep-water period `2π / sqrt(g k)`, the inverse of
/// [`wavenumber_from_period`].
pub fn period_from_wavenumber(k: f64) -> f64 {
    2.0 * PI / (GRAVITY * k).sqrt()
}

/// Deep-water group speed `sqrt(g / k) / 2`.
pub fn deep_water_group_speed(k: f64) -> f64 {
    (GRAVITY / k).sqrt() / 2.0
}

/// Solve `ω = sqrt(g k tanh(k h))` for `k` at finite depth.
///
/// Newton iteration on `g k tanh(kh) - ω²`, started from Eckart's
/// approximation. Returns `None` if `omega` or `depth` is not positive and
/// finite, or if the iteration fails to converge.
pub fn wavenumber_from_frequency(omega: f64, depth: f64) -> Option<f64> {
    if !(omega.is_finite() && omega > 0.0 && depth.is_finite() && depth > 0.0) {
        return None;
    }
    let target = omega * omega;
    let k_deep = target / GRAVITY;
    let mut k = k_deep / (k_deep * depth).tanh().sqrt();
    for _ in 0..NEWTON_MAX_ITER {
        let t = (k * depth).tanh();
        let f = GRAVITY * k * t - target;
        let df = GRAVITY * (t + k * depth * (1.0 - t * t));
        let next = k - f / df;
        if !next.is_finite() || next <= 0.0 {
            return None;
        }
        if (next - k).abs() <= NEWTON_REL_TOL * next {
            return Some(next);
        }
        k = next;
    }
    None
}
