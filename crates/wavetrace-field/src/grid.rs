//! Regularly spaced scalar grid with bilinear interpolation.

use wavetrace_core::{Bounds, GridError, RayError};

use crate::axis::Axis;
use crate::field::{Bathymetry, DepthSample};

/// Position of a point inside a grid cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Cell {
    pub(crate) ix: usize,
    pub(crate) iy: usize,
    pub(crate) tx: f64,
    pub(crate) ty: f64,
}

/// A scalar field sampled on a regular `(y, x)` grid.
///
/// Values are stored row-major: row `j` holds the samples at `y[j]`, so the
/// array shape is `(len(y), len(x))`. Node gradients are computed once at
/// construction with central differences (one-sided on the boundary) and
/// interpolated with the same bilinear weights as the values, so the
/// gradient seen between nodes is consistent with the interpolated field.
///
/// Values may be non-finite (a land mask is commonly NaN); interpolation at
/// a node never mixes in neighbouring values, so finite nodes stay exact.
#[derive(Clone, Debug)]
pub struct FieldGrid {
    x: Axis,
    y: Axis,
    values: Vec<f64>,
    grad_x: Vec<f64>,
    grad_y: Vec<f64>,
}

impl FieldGrid {
    /// Build a grid from coordinate vectors and row-major values.
    ///
    /// # Errors
    ///
    /// Any axis error from [`Axis::new`], or [`GridError::ShapeMismatch`]
    /// if `values.len() != len(y) * len(x)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wavetrace_field::FieldGrid;
    ///
    /// let g = FieldGrid::new(
    ///     vec![0.0, 10.0],
    ///     vec![0.0, 10.0],
    ///     vec![1.0, 2.0, 3.0, 4.0],
    /// )
    /// .unwrap();
    /// assert_eq!(g.value_at(5.0, 5.0).unwrap(), 2.5);
    /// assert_eq!(g.gradient_at(5.0, 5.0).unwrap(), (0.1, 0.2));
    /// ```
    pub fn new(x_coords: Vec<f64>, y_coords: Vec<f64>, values: Vec<f64>) -> Result<Self, GridError> {
        let x = Axis::new("x", x_coords)?;
        let y = Axis::new("y", y_coords)?;
        Self::from_axes(x, y, values)
    }

    /// Build a grid from validated axes and row-major values.
    ///
    /// # Errors
    ///
    /// [`GridError::ShapeMismatch`] if the value count does not match.
    pub fn from_axes(x: Axis, y: Axis, values: Vec<f64>) -> Result<Self, GridError> {
        let (nx, ny) = (x.len(), y.len());
        if values.len() != nx * ny {
            return Err(GridError::ShapeMismatch {
                expected: (ny, nx),
                len: values.len(),
            });
        }
        let (grad_x, grad_y) = node_gradients(&x, &y, &values);
        Ok(Self {
            x,
            y,
            values,
            grad_x,
            grad_y,
        })
    }

    /// Build a grid from one `Vec` per `y` row.
    ///
    /// # Errors
    ///
    /// [`GridError::RaggedRows`] if a row's length differs from `len(x)`,
    /// [`GridError::ShapeMismatch`] if the row count differs from `len(y)`.
    pub fn from_rows(
        x_coords: Vec<f64>,
        y_coords: Vec<f64>,
        rows: Vec<Vec<f64>>,
    ) -> Result<Self, GridError> {
        let x = Axis::new("x", x_coords)?;
        let y = Axis::new("y", y_coords)?;
        if rows.len() != y.len() {
            return Err(GridError::ShapeMismatch {
                expected: (y.len(), x.len()),
                len: rows.iter().map(Vec::len).sum(),
            });
        }
        let mut values = Vec::with_capacity(x.len() * y.len());
        for (row, r) in rows.into_iter().enumerate() {
            if r.len() != x.len() {
                return Err(GridError::RaggedRows {
                    row,
                    expected: x.len(),
                    len: r.len(),
                });
            }
            values.extend(r);
        }
        Self::from_axes(x, y, values)
    }

    /// Sample `f(x, y)` at every node of the given axes.
    pub fn from_fn(x: Axis, y: Axis, f: impl Fn(f64, f64) -> f64) -> Self {
        let values: Vec<f64> = y
            .coords()
            .iter()
            .flat_map(|yv| x.coords().iter().map(|xv| f(*xv, *yv)).collect::<Vec<_>>())
            .collect();
        let (grad_x, grad_y) = node_gradients(&x, &y, &values);
        Self {
            x,
            y,
            values,
            grad_x,
            grad_y,
        }
    }

    /// The x axis.
    pub fn x(&self) -> &Axis {
        &self.x
    }

    /// The y axis.
    pub fn y(&self) -> &Axis {
        &self.y
    }

    /// `(len(y), len(x))`.
    pub fn shape(&self) -> (usize, usize) {
        (self.y.len(), self.x.len())
    }

    /// Row-major node values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value stored at node `(ix, iy)`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn value(&self, ix: usize, iy: usize) -> f64 {
        self.values[self.flat(ix, iy)]
    }

    /// Finite-difference gradient `(∂f/∂x, ∂f/∂y)` at node `(ix, iy)`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn node_gradient(&self, ix: usize, iy: usize) -> (f64, f64) {
        let i = self.flat(ix, iy);
        (self.grad_x[i], self.grad_y[i])
    }

    /// Closed coordinate extent.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x.min(), self.x.max(), self.y.min(), self.y.max())
    }

    /// Bilinearly interpolated value at `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`RayError::OutOfDomain`] outside the closed bounds.
    pub fn value_at(&self, x: f64, y: f64) -> Result<f64, RayError> {
        let cell = self.locate(x, y)?;
        Ok(self.interpolate(&self.values, &cell))
    }

    /// Gradient `(∂f/∂x, ∂f/∂y)` at `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`RayError::OutOfDomain`] outside the closed bounds.
    pub fn gradient_at(&self, x: f64, y: f64) -> Result<(f64, f64), RayError> {
        let cell = self.locate(x, y)?;
        Ok(self.gradient_in(&cell))
    }

    /// Value and gradient at `(x, y)` with a single cell lookup.
    ///
    /// # Errors
    ///
    /// [`RayError::OutOfDomain`] outside the closed bounds.
    pub fn sample_at(&self, x: f64, y: f64) -> Result<(f64, (f64, f64)), RayError> {
        let cell = self.locate(x, y)?;
        Ok((self.interpolate(&self.values, &cell), self.gradient_in(&cell)))
    }

    pub(crate) fn locate(&self, x: f64, y: f64) -> Result<Cell, RayError> {
        match (self.x.locate(x), self.y.locate(y)) {
            (Some((ix, tx)), Some((iy, ty))) => Ok(Cell { ix, iy, tx, ty }),
            _ => Err(RayError::OutOfDomain { x, y }),
        }
    }

    pub(crate) fn value_in(&self, cell: &Cell) -> f64 {
        self.interpolate(&self.values, cell)
    }

    pub(crate) fn gradient_in(&self, cell: &Cell) -> (f64, f64) {
        (
            self.interpolate(&self.grad_x, cell),
            self.interpolate(&self.grad_y, cell),
        )
    }

    fn flat(&self, ix: usize, iy: usize) -> usize {
        assert!(ix < self.x.len() && iy < self.y.len(), "node ({ix}, {iy}) out of range");
        iy * self.x.len() + ix
    }

    /// Bilinear blend of the four nodes around `cell`, as two nested lerps.
    fn interpolate(&self, data: &[f64], cell: &Cell) -> f64 {
        let nx = self.x.len();
        let row0 = cell.iy * nx + cell.ix;
        let lower = lerp(data[row0], data[row0 + 1], cell.tx);
        if cell.ty == 0.0 {
            return lower;
        }
        let row1 = row0 + nx;
        let upper = lerp(data[row1], data[row1 + 1], cell.tx);
        lerp(lower, upper, cell.ty)
    }
}

impl Bathymetry for FieldGrid {
    fn depth_and_gradient(&self, x: f64, y: f64) -> Result<DepthSample, RayError> {
        let (depth, (ddx, ddy)) = self.sample_at(x, y)?;
        Ok(DepthSample { depth, ddx, ddy })
    }

    fn depth(&self, x: f64, y: f64) -> Result<f64, RayError> {
        self.value_at(x, y)
    }

    fn bounds(&self) -> Option<Bounds> {
        Some(FieldGrid::bounds(self))
    }

    fn resolution(&self) -> Option<(f64, f64)> {
        Some((self.x.spacing(), self.y.spacing()))
    }
}

/// Linear interpolation that returns the endpoint itself at `t == 0` and
/// `t == 1`, so a non-finite neighbour cannot leak into a node value.
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    if t == 0.0 {
        a
    } else if t == 1.0 {
        b
    } else {
        (1.0 - t) * a + t * b
    }
}

/// Central differences in the interior, one-sided differences on the
/// boundary, using the actual coordinate distances.
///
/// Next to a missing (NaN) node the difference is taken one-sided toward
/// the finite neighbour, so wet nodes bordering a land mask keep a finite
/// gradient. Only a node with no finite neighbour on an axis gets NaN.
fn node_gradients(x: &Axis, y: &Axis, values: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let (nx, ny) = (x.len(), y.len());
    let xc = x.coords();
    let yc = y.coords();
    let mut gx = vec![0.0; nx * ny];
    let mut gy = vec![0.0; nx * ny];

    for j in 0..ny {
        for i in 0..nx {
            let (il, ir) = (i.saturating_sub(1), (i + 1).min(nx - 1));
            let (jl, jr) = (j.saturating_sub(1), (j + 1).min(ny - 1));
            let idx = j * nx + i;
            gx[idx] = difference(
                [values[j * nx + il], values[idx], values[j * nx + ir]],
                [xc[il], xc[i], xc[ir]],
            );
            gy[idx] = difference(
                [values[jl * nx + i], values[idx], values[jr * nx + i]],
                [yc[jl], yc[j], yc[jr]],
            );
        }
    }
    (gx, gy)
}

/// Derivative at the middle of `(left, centre, right)` samples. At an
/// edge the centre coincides with one side.
fn difference([fl, fc, fr]: [f64; 3], [cl, cc, cr]: [f64; 3]) -> f64 {
    if fl.is_finite() && fr.is_finite() {
        (fr - fl) / (cr - cl)
    } else if fc.is_finite() && fr.is_finite() && cr > cc {
        (fr - fc) / (cr - cc)
    } else if fc.is_finite() && fl.is_finite() && cc > cl {
        (fc - fl) / (cc - cl)
    } else {
        f64::NAN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use proptest::prelude::*;

    fn planar(a: f64, b: f64, c: f64) -> FieldGrid {
        let x = Axis::uniform("x", 0.0, 100.0, 21).unwrap();
        let y = Axis::uniform("y", 0.0, 50.0, 11).unwrap();
        FieldGrid::from_fn(x, y, |x, y| a + b * x + c * y)
    }

    #[test]
    fn shape_mismatch_rejected() {
        let err = FieldGrid::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0], vec![0.0; 5]).unwrap_err();
        assert_eq!(
            err,
            GridError::ShapeMismatch {
                expected: (2, 3),
                len: 5
            }
        );
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = FieldGrid::from_rows(
            vec![0.0, 1.0],
            vec![0.0, 1.0],
            vec![vec![1.0, 2.0], vec![3.0]],
        )
        .unwrap_err();
        assert_eq!(
            err,
            GridError::RaggedRows {
                row: 1,
                expected: 2,
                len: 1
            }
        );
    }

    #[test]
    fn rows_are_indexed_by_y() {
        let g = FieldGrid::from_rows(
            vec![0.0, 1.0, 2.0],
            vec![0.0, 1.0],
            vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]],
        )
        .unwrap();
        assert_eq!(g.shape(), (2, 3));
        assert_eq!(g.value(2, 0), 3.0);
        assert_eq!(g.value(0, 1), 4.0);
        assert_eq!(g.value_at(2.0, 1.0).unwrap(), 6.0);
    }

    #[test]
    fn out_of_domain_reports_position() {
        let g = planar(50.0, 0.0, 0.0);
        assert_eq!(
            g.value_at(-1000.0, 0.0),
            Err(RayError::OutOfDomain { x: -1000.0, y: 0.0 })
        );
        assert!(g.gradient_at(0.0, 500.1).is_err());
        assert!(g.value_at(f64::NAN, 10.0).is_err());
    }

    #[test]
    fn resolution_is_mean_spacing() {
        let g = planar(50.0, 0.0, 0.0);
        assert_eq!(Bathymetry::resolution(&g), Some((100.0, 50.0)));
        assert_eq!(Bathymetry::resolution(&crate::ConstantDepth::new(5.0)), None);
    }

    #[test]
    fn gradient_beside_land_mask_is_one_sided() {
        let x = Axis::uniform("x", 0.0, 10.0, 11).unwrap();
        let y = Axis::uniform("y", 0.0, 10.0, 3).unwrap();
        let g = FieldGrid::from_fn(x, y, |x, _| if x < 45.0 { 30.0 - 0.1 * x } else { f64::NAN });

        let (gx, gy) = g.node_gradient(4, 1);
        assert!((gx + 0.1).abs() < 1e-12, "gx = {gx}");
        assert_eq!(gy, 0.0);
        assert!(g.node_gradient(5, 1).0.is_nan());

        let (gx, gy) = g.gradient_at(35.0, 5.0).unwrap();
        assert!((gx + 0.1).abs() < 1e-12 && gy == 0.0);
        assert!(g.value_at(45.0, 5.0).unwrap().is_nan());
    }

    #[test]
    fn corners_and_edges_are_inside() {
        let g = planar(50.0, 0.0, 0.0);
        assert_eq!(g.value_at(0.0, 0.0).unwrap(), 50.0);
        assert_eq!(g.value_at(2000.0, 500.0).unwrap(), 50.0);
        assert_eq!(g.value_at(2000.0, 250.0).unwrap(), 50.0);
    }

    #[test]
    fn planar_field_gradient_is_exact_everywhere() {
        let g = planar(2000.0, -0.05, 0.02);
        for &(x, y) in &[(0.0, 0.0), (37.5, 12.5), (1999.0, 499.0), (2000.0, 500.0)] {
            let (gx, gy) = g.gradient_at(x, y).unwrap();
            assert!((gx + 0.05).abs() < 1e-12, "gx={gx} at ({x}, {y})");
            assert!((gy - 0.02).abs() < 1e-12, "gy={gy} at ({x}, {y})");
        }
    }

    #[test]
    fn one_sided_difference_on_boundary() {
        // f = x^2 on nodes 0, 1, 2: central at 1 is 2, one-sided at 0 is 1, at 2 is 3.
        let g = FieldGrid::new(
            vec![0.0, 1.0, 2.0],
            vec![0.0, 1.0],
            vec![0.0, 1.0, 4.0, 0.0, 1.0, 4.0],
        )
        .unwrap();
        assert_eq!(g.node_gradient(0, 0), (1.0, 0.0));
        assert_eq!(g.node_gradient(1, 0), (2.0, 0.0));
        assert_eq!(g.node_gradient(2, 1), (3.0, 0.0));
    }

    #[test]
    fn nan_neighbour_does_not_leak_into_node() {
        let g = FieldGrid::new(
            vec![0.0, 1.0],
            vec![0.0, 1.0],
            vec![10.0, f64::NAN, 20.0, 30.0],
        )
        .unwrap();
        assert_eq!(g.value_at(0.0, 0.0).unwrap(), 10.0);
        assert_eq!(g.value_at(0.0, 1.0).unwrap(), 20.0);
        assert!(g.value_at(0.5, 0.0).unwrap().is_nan());
    }

    #[test]
    fn compliance_planar() {
        let g = planar(10.0, 0.3, -0.7);
        compliance::assert_exact_at_nodes(&g);
        compliance::assert_gradient_matches_slope(&g);
        compliance::assert_bathymetry_matches_grid(&g);
    }

    proptest! {
        #[test]
        fn value_at_reproduces_nodes(
            nx in 2usize..12,
            ny in 2usize..12,
            x0 in -5000.0f64..5000.0,
            y0 in -5000.0f64..5000.0,
            dx in 0.5f64..900.0,
            dy in 0.5f64..900.0,
            seed in any::<u64>(),
        ) {
            let x = Axis::uniform("x", x0, dx, nx).unwrap();
            let y = Axis::uniform("y", y0, dy, ny).unwrap();
            let g = FieldGrid::from_fn(x, y, |xv, yv| {
                ((xv * 0.37 + yv * 1.3 + seed as f64 * 1e-9).sin() * 100.0).round()
            });
            for iy in 0..ny {
                for ix in 0..nx {
                    let xv = g.x().coords()[ix];
                    let yv = g.y().coords()[iy];
                    prop_assert_eq!(g.value_at(xv, yv).unwrap(), g.value(ix, iy));
                }
            }
        }

        #[test]
        fn interpolant_is_bounded_by_cell_corners(
            fx in 0.0f64..1.0,
            fy in 0.0f64..1.0,
            a in -50.0f64..50.0,
            b in -50.0f64..50.0,
            c in -50.0f64..50.0,
            d in -50.0f64..50.0,
        ) {
            let g = FieldGrid::new(vec![0.0, 1.0], vec![0.0, 1.0], vec![a, b, c, d]).unwrap();
            let v = g.value_at(fx, fy).unwrap();
            let lo = a.min(b).min(c).min(d);
            let hi = a.max(b).max(c).max(d);
            prop_assert!(v >= lo - 1e-9 && v <= hi + 1e-9);
        }
    }
}
