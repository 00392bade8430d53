//! Gridded current: a `(u, v)` pair of scalar grids on shared axes.

use wavetrace_core::{Bounds, GridError, RayError};

use crate::field::{Current, CurrentSample};
use crate::grid::FieldGrid;

/// A current field sampled on a regular grid.
///
/// Both components must use identical coordinate axes, so a single cell
/// lookup serves both.
#[derive(Clone, Debug)]
pub struct CurrentGrid {
    u: FieldGrid,
    v: FieldGrid,
}

impl CurrentGrid {
    /// Pair the two velocity components.
    ///
    /// # Errors
    ///
    /// [`GridError::AxesMismatch`] if the component grids differ in shape
    /// or coordinates.
    pub fn new(u: FieldGrid, v: FieldGrid) -> Result<Self, GridError> {
        if u.shape() != v.shape() {
            return Err(GridError::AxesMismatch {
                reason: format!("u has shape {:?}, v has shape {:?}", u.shape(), v.shape()),
            });
        }
        if u.x() != v.x() {
            return Err(GridError::AxesMismatch {
                reason: "x coordinates of u and v differ".into(),
            });
        }
        if u.y() != v.y() {
            return Err(GridError::AxesMismatch {
                reason: "y coordinates of u and v differ".into(),
            });
        }
        Ok(Self { u, v })
    }

    /// Build both components from shared coordinates and row-major values.
    ///
    /// # Errors
    ///
    /// Any error from [`FieldGrid::new`].
    pub fn from_components(
        x_coords: Vec<f64>,
        y_coords: Vec<f64>,
        u: Vec<f64>,
        v: Vec<f64>,
    ) -> Result<Self, GridError> {
        let u = FieldGrid::new(x_coords.clone(), y_coords.clone(), u)?;
        let v = FieldGrid::new(x_coords, y_coords, v)?;
        Self::new(u, v)
    }

    /// The eastward component.
    pub fn u(&self) -> &FieldGrid {
        &self.u
    }

    /// The northward component.
    pub fn v(&self) -> &FieldGrid {
        &self.v
    }

    /// Closed coordinate extent.
    pub fn bounds(&self) -> Bounds {
        self.u.bounds()
    }

    /// Interpolated velocity `(u, v)` at `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`RayError::OutOfDomain`] outside the closed bounds.
    pub fn velocity_at(&self, x: f64, y: f64) -> Result<(f64, f64), RayError> {
        let cell = self.u.locate(x, y)?;
        Ok((self.u.value_in(&cell), self.v.value_in(&cell)))
    }

    /// Interpolated velocity and velocity gradient at `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`RayError::OutOfDomain`] outside the closed bounds.
    pub fn sample_at(&self, x: f64, y: f64) -> Result<CurrentSample, RayError> {
        let cell = self.u.locate(x, y)?;
        let (du_dx, du_dy) = self.u.gradient_in(&cell);
        let (dv_dx, dv_dy) = self.v.gradient_in(&cell);
        Ok(CurrentSample {
            u: self.u.value_in(&cell),
            v: self.v.value_in(&cell),
            du_dx,
            du_dy,
            dv_dx,
            dv_dy,
        })
    }
}

impl Current for CurrentGrid {
    fn current_and_gradient(&self, x: f64, y: f64) -> Result<CurrentSample, RayError> {
        self.sample_at(x, y)
    }

    fn current(&self, x: f64, y: f64) -> Result<(f64, f64), RayError> {
        self.velocity_at(x, y)
    }

    fn bounds(&self) -> Option<Bounds> {
        Some(CurrentGrid::bounds(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::Axis;
    use crate::compliance;

    fn shear(nx: usize, ny: usize) -> CurrentGrid {
        let x = Axis::uniform("x", 0.0, 10.0, nx).unwrap();
        let y = Axis::uniform("y", 0.0, 10.0, ny).unwrap();
        let u = FieldGrid::from_fn(x.clone(), y.clone(), |_, y| 0.01 * y);
        let v = FieldGrid::from_fn(x, y, |x, _| -0.02 * x);
        CurrentGrid::new(u, v).unwrap()
    }

    #[test]
    fn mismatched_shapes_rejected() {
        let u = FieldGrid::new(vec![0.0, 1.0], vec![0.0, 1.0], vec![0.0; 4]).unwrap();
        let v = FieldGrid::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0], vec![0.0; 6]).unwrap();
        assert!(matches!(
            CurrentGrid::new(u, v),
            Err(GridError::AxesMismatch { .. })
        ));
    }

    #[test]
    fn shifted_axes_rejected() {
        let u = FieldGrid::new(vec![0.0, 1.0], vec![0.0, 1.0], vec![0.0; 4]).unwrap();
        let v = FieldGrid::new(vec![0.5, 1.5], vec![0.0, 1.0], vec![0.0; 4]).unwrap();
        let err = CurrentGrid::new(u, v).unwrap_err();
        assert_eq!(
            err,
            GridError::AxesMismatch {
                reason: "x coordinates of u and v differ".into()
            }
        );
    }

    #[test]
    fn sample_carries_shear() {
        let c = shear(11, 11);
        let s = c.sample_at(45.0, 55.0).unwrap();
        assert!((s.u - 0.55).abs() < 1e-12);
        assert!((s.v + 0.9).abs() < 1e-12);
        assert!(s.du_dx.abs() < 1e-12);
        assert!((s.du_dy - 0.01).abs() < 1e-12);
        assert!((s.dv_dx + 0.02).abs() < 1e-12);
        assert!(s.dv_dy.abs() < 1e-12);
        assert_eq!(c.velocity_at(45.0, 55.0).unwrap(), (s.u, s.v));
    }

    #[test]
    fn out_of_domain() {
        let c = shear(3, 3);
        assert_eq!(
            c.current_and_gradient(25.0, 0.0),
            Err(RayError::OutOfDomain { x: 25.0, y: 0.0 })
        );
        assert_eq!(Current::bounds(&c), Some(Bounds::new(0.0, 20.0, 0.0, 20.0)));
    }

    #[test]
    fn components_pass_grid_compliance() {
        let c = shear(6, 4);
        compliance::assert_exact_at_nodes(c.u());
        compliance::assert_exact_at_nodes(c.v());
        compliance::assert_gradient_matches_slope(c.u());
        compliance::assert_gradient_matches_slope(c.v());
    }
}
