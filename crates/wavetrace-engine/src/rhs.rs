//! Right-hand side of the ray equations.
//!
//! With `ω(k, h)` the intrinsic frequency and `U = (u, v)` the current, a ray
//! follows the Hamiltonian `Ω = ω(|k|, h(x, y)) + k·U(x, y)`:
//!
//! ```text
//! dx/dt  =  ∂Ω/∂kx = cg kx/|k| + u
//! dy/dt  =  ∂Ω/∂ky = cg ky/|k| + v
//! dkx/dt = -∂Ω/∂x  = -∂ω/∂h ∂h/∂x - (kx ∂u/∂x + ky ∂v/∂x)
//! dky/dt = -∂Ω/∂y  = -∂ω/∂h ∂h/∂y - (kx ∂u/∂y + ky ∂v/∂y)
//! ```

use wavetrace_core::{Bounds, Derivative, RayError, RayState};
use wavetrace_field::{Bathymetry, Current, CurrentSample};

use crate::dispersion;

/// The ray equations bound to one environment.
///
/// Borrowed fields are read-only, so one system can be shared by every
/// worker of a batch.
#[derive(Clone, Copy)]
pub struct RaySystem<'a> {
    bathymetry: &'a dyn Bathymetry,
    current: Option<&'a dyn Current>,
}

impl<'a> RaySystem<'a> {
    /// Ray equations over `bathymetry` in still water.
    pub fn new(bathymetry: &'a dyn Bathymetry) -> Self {
        Self {
            bathymetry,
            current: None,
        }
    }

    /// Add an ambient current.
    pub fn with_current(mut self, current: &'a dyn Current) -> Self {
        self.current = Some(current);
        self
    }

    /// Ray equations with an optional current.
    pub fn with_optional_current(mut self, current: Option<&'a dyn Current>) -> Self {
        self.current = current;
        self
    }

    /// The bathymetry.
    pub fn bathymetry(&self) -> &'a dyn Bathymetry {
        self.bathymetry
    }

    /// The current, if any.
    pub fn current(&self) -> Option<&'a dyn Current> {
        self.current
    }

    /// Region where both fields are defined, or `None` if neither is
    /// bounded.
    ///
    /// A bounded bathymetry and current that do not overlap give
    /// [`Bounds::EMPTY`].
    pub fn bounds(&self) -> Option<Bounds> {
        let b = self.bathymetry.bounds();
        let c = self.current.and_then(|c| c.bounds());
        match (b, c) {
            (Some(b), Some(c)) => Some(b.intersect(&c).unwrap_or(Bounds::EMPTY)),
            (b, c) => b.or(c),
        }
    }

    /// Evaluate the time derivative at `state`.
    ///
    /// # Errors
    ///
    /// - [`RayError::Diverged`] if the state is non-finite, the wavenumber
    ///   is zero, or the derivative itself is non-finite.
    /// - [`RayError::OutOfDomain`] if either field is undefined at the
    ///   position.
    /// - [`RayError::Grounded`] if the depth there is not positive.
    pub fn derivative(&self, state: &RayState) -> Result<Derivative, RayError> {
        if !state.is_finite() {
            return Err(RayError::Diverged);
        }
        let (x, y) = (state.x, state.y);
        let bottom = self.bathymetry.depth_and_gradient(x, y)?;
        let flow = match self.current {
            Some(c) => c.current_and_gradient(x, y)?,
            None => CurrentSample::ZERO,
        };

        let k = state.wavenumber();
        let h = bottom.depth;
        dispersion::check_domain(k, h, x, y)?;

        let cg = dispersion::group_speed(k, h);
        let dw_dh = dispersion::frequency_depth_sensitivity(k, h);
        let (kx, ky) = (state.kx, state.ky);

        let d = Derivative {
            dx: cg * kx / k + flow.u,
            dy: cg * ky / k + flow.v,
            dkx: -dw_dh * bottom.ddx - (kx * flow.du_dx + ky * flow.dv_dx),
            dky: -dw_dh * bottom.ddy - (kx * flow.du_dy + ky * flow.dv_dy),
        };
        if d.dx.is_finite() && d.dy.is_finite() && d.dkx.is_finite() && d.dky.is_finite() {
            Ok(d)
        } else {
            Err(RayError::Diverged)
        }
    }
}

impl std::fmt::Debug for RaySystem<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RaySystem")
            .field("bounds", &self.bounds())
            .field("has_current", &self.current.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispersion::{deep_water_group_speed, group_speed};
    use wavetrace_field::{ConstantCurrent, ConstantDepth, ConstantSlope, FieldGrid, ShearCurrent};

    #[test]
    fn uniform_depth_moves_along_k() {
        let depth = ConstantDepth::new(50.0);
        let sys = RaySystem::new(&depth);
        let s = RayState::initial(0.0, 0.0, 0.03, 0.04);
        let d = sys.derivative(&s).unwrap();
        let cg = group_speed(0.05, 50.0);
        assert!((d.dx - cg * 0.6).abs() < 1e-12);
        assert!((d.dy - cg * 0.8).abs() < 1e-12);
        assert_eq!((d.dkx, d.dky), (0.0, 0.0));
    }

    #[test]
    fn current_advects_ray() {
        let depth = ConstantDepth::new(5000.0);
        let flow = ConstantCurrent::new(1.5, -0.5);
        let sys = RaySystem::new(&depth).with_current(&flow);
        let k = 0.04;
        let d = sys.derivative(&RayState::initial(0.0, 0.0, k, 0.0)).unwrap();
        assert!((d.dx - (deep_water_group_speed(k) + 1.5)).abs() < 1e-9);
        assert_eq!(d.dy, -0.5);
    }

    #[test]
    fn slope_refracts_toward_shallow_water() {
        // Shoaling toward +x: dkx/dt > 0 so the crest turns to face the beach.
        let beach = ConstantSlope::default();
        let sys = RaySystem::new(&beach);
        let d = sys.derivative(&RayState::initial(500.0, 0.0, 0.02, 0.02)).unwrap();
        assert!(d.dkx > 0.0);
        assert_eq!(d.dky, 0.0);
    }

    #[test]
    fn shear_changes_wavenumber() {
        let depth = ConstantDepth::new(1000.0);
        let jet = ShearCurrent::builder().du(0.0, 1e-3).build().unwrap();
        let sys = RaySystem::new(&depth).with_current(&jet);
        let d = sys.derivative(&RayState::initial(0.0, 0.0, 0.05, 0.0)).unwrap();
        // dky/dt = -(kx du/dy + ky dv/dy)
        assert!((d.dky + 0.05 * 1e-3).abs() < 1e-15);
        assert_eq!(d.dkx, 0.0);
    }

    #[test]
    fn land_grounds_ray() {
        let beach = ConstantSlope::default();
        let sys = RaySystem::new(&beach);
        let err = sys.derivative(&RayState::initial(1100.0, 0.0, 0.05, 0.0)).unwrap_err();
        assert!(matches!(err, RayError::Grounded { x, .. } if x == 1100.0));
    }

    #[test]
    fn outside_grid_is_out_of_domain() {
        let g = FieldGrid::new(vec![0.0, 100.0], vec![0.0, 100.0], vec![20.0; 4]).unwrap();
        let sys = RaySystem::new(&g);
        assert_eq!(
            sys.derivative(&RayState::initial(-1000.0, 0.0, 0.05, 0.0)),
            Err(RayError::OutOfDomain { x: -1000.0, y: 0.0 })
        );
    }

    #[test]
    fn zero_wavenumber_diverges() {
        let depth = ConstantDepth::new(10.0);
        let sys = RaySystem::new(&depth);
        assert_eq!(
            sys.derivative(&RayState::initial(0.0, 0.0, 0.0, 0.0)),
            Err(RayError::Diverged)
        );
        assert_eq!(
            sys.derivative(&RayState::initial(f64::NAN, 0.0, 0.1, 0.0)),
            Err(RayError::Diverged)
        );
    }

    #[test]
    fn bounds_intersect_fields() {
        let g = FieldGrid::new(vec![0.0, 100.0], vec![0.0, 100.0], vec![20.0; 4]).unwrap();
        let analytic = ConstantDepth::new(20.0);
        assert_eq!(RaySystem::new(&analytic).bounds(), None);
        assert_eq!(RaySystem::new(&g).bounds(), Some(Bounds::new(0.0, 100.0, 0.0, 100.0)));
    }

    #[test]
    fn disjoint_fields_have_empty_bounds() {
        let g = FieldGrid::new(vec![0.0, 100.0], vec![0.0, 100.0], vec![20.0; 4]).unwrap();
        let far = wavetrace_field::CurrentGrid::from_components(
            vec![500.0, 600.0],
            vec![0.0, 100.0],
            vec![0.1; 4],
            vec![0.0; 4],
        )
        .unwrap();
        let bounds = RaySystem::new(&g).with_current(&far).bounds().unwrap();
        assert_eq!(bounds, Bounds::EMPTY);
        assert!(bounds.is_empty());
        assert!(!bounds.contains(50.0, 50.0));
    }
}
