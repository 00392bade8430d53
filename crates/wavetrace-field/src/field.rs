//! The `Bathymetry` and `Current` traits and their sample types.

use wavetrace_core::{Bounds, RayError};

/// Depth and its spatial gradient at a point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DepthSample {
    /// Water depth, positive downward (m).
    pub depth: f64,
    /// ∂h/∂x.
    pub ddx: f64,
    /// ∂h/∂y.
    pub ddy: f64,
}

/// Current velocity and its spatial gradient at a point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CurrentSample {
    /// Eastward velocity u (m/s).
    pub u: f64,
    /// Northward velocity v (m/s).
    pub v: f64,
    /// ∂u/∂x.
    pub du_dx: f64,
    /// ∂u/∂y.
    pub du_dy: f64,
    /// ∂v/∂x.
    pub dv_dx: f64,
    /// ∂v/∂y.
    pub dv_dy: f64,
}

impl CurrentSample {
    /// Still water: no velocity and no shear.
    pub const ZERO: Self = Self {
        u: 0.0,
        v: 0.0,
        du_dx: 0.0,
        du_dy: 0.0,
        dv_dx: 0.0,
        dv_dy: 0.0,
    };
}

/// Seafloor depth as seen by the ray equations.
///
/// # Thread Safety
///
/// `Sync` is required because the batch driver shares one `&dyn Bathymetry`
/// across all worker threads.
pub trait Bathymetry: Send + Sync {
    /// Depth and depth gradient at `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`RayError::OutOfDomain`] if the point lies outside [`bounds`](Self::bounds).
    fn depth_and_gradient(&self, x: f64, y: f64) -> Result<DepthSample, RayError>;

    /// Depth at `(x, y)`.
    fn depth(&self, x: f64, y: f64) -> Result<f64, RayError> {
        Ok(self.depth_and_gradient(x, y)?.depth)
    }

    /// Coordinate extent, or `None` for fields defined everywhere.
    fn bounds(&self) -> Option<Bounds>;

    /// Mean node spacing `(dx, dy)` of a sampled field.
    ///
    /// `None` for analytic fields, which have no intrinsic resolution.
    fn resolution(&self) -> Option<(f64, f64)> {
        None
    }
}

/// Ambient current as seen by the ray equations.
pub trait Current: Send + Sync {
    /// Velocity and velocity gradient at `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`RayError::OutOfDomain`] if the point lies outside [`bounds`](Self::bounds).
    fn current_and_gradient(&self, x: f64, y: f64) -> Result<CurrentSample, RayError>;

    /// Velocity `(u, v)` at `(x, y)`.
    fn current(&self, x: f64, y: f64) -> Result<(f64, f64), RayError> {
        let s = self.current_and_gradient(x, y)?;
        Ok((s.u, s.v))
    }

    /// Coordinate extent, or `None` for fields defined everywhere.
    fn bounds(&self) -> Option<Bounds>;
}
