//! Analytic depth and current fields.
//!
//! Defined everywhere, so they never report [`RayError::OutOfDomain`]. Used
//! for idealised studies (flat bottom, planar beach, uniform or sheared
//! current) and as exact references when testing gridded fields.

use wavetrace_core::{Bounds, RayError};

use crate::field::{Bathymetry, Current, CurrentSample, DepthSample};

/// Uniform depth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantDepth {
    depth: f64,
}

impl ConstantDepth {
    /// Flat bottom at `depth` meters.
    pub fn new(depth: f64) -> Self {
        Self { depth }
    }
}

impl Bathymetry for ConstantDepth {
    fn depth_and_gradient(&self, _x: f64, _y: f64) -> Result<DepthSample, RayError> {
        Ok(DepthSample {
            depth: self.depth,
            ddx: 0.0,
            ddy: 0.0,
        })
    }

    fn bounds(&self) -> Option<Bounds> {
        None
    }
}

/// Planar bottom: `h = h0 + dhdx (x - x0) + dhdy (y - y0)`.
///
/// Depth goes non-positive past the shoreline, which the ray equations
/// treat as land.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantSlope {
    h0: f64,
    x0: f64,
    y0: f64,
    dhdx: f64,
    dhdy: f64,
}

impl ConstantSlope {
    /// Plane through `(x0, y0, h0)` with the given slopes.
    pub fn new(h0: f64, x0: f64, y0: f64, dhdx: f64, dhdy: f64) -> Self {
        Self {
            h0,
            x0,
            y0,
            dhdx,
            dhdy,
        }
    }
}

impl Default for ConstantSlope {
    /// A beach shoaling toward +x: 50 m at the origin, 1 m shallower every
    /// 20 m.
    fn default() -> Self {
        Self::new(50.0, 0.0, 0.0, -5e-2, 0.0)
    }
}

impl Bathymetry for ConstantSlope {
    fn depth_and_gradient(&self, x: f64, y: f64) -> Result<DepthSample, RayError> {
        Ok(DepthSample {
            depth: self.h0 + self.dhdx * (x - self.x0) + self.dhdy * (y - self.y0),
            ddx: self.dhdx,
            ddy: self.dhdy,
        })
    }

    fn bounds(&self) -> Option<Bounds> {
        None
    }
}

/// Uniform current `(u, v)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ConstantCurrent {
    u: f64,
    v: f64,
}

impl ConstantCurrent {
    /// Current of `(u, v)` m/s everywhere.
    pub fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }

    /// Still water.
    pub fn zero() -> Self {
        Self::default()
    }
}

impl Current for ConstantCurrent {
    fn current_and_gradient(&self, _x: f64, _y: f64) -> Result<CurrentSample, RayError> {
        Ok(CurrentSample {
            u: self.u,
            v: self.v,
            ..CurrentSample::ZERO
        })
    }

    fn bounds(&self) -> Option<Bounds> {
        None
    }
}

/// Current with a constant velocity gradient about a reference point:
///
/// ```text
/// u = u0 + du_dx (x - x0) + du_dy (y - y0)
/// v = v0 + dv_dx (x - x0) + dv_dy (y - y0)
/// ```
///
/// Constructed via the builder pattern: [`ShearCurrent::builder`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShearCurrent {
    x0: f64,
    y0: f64,
    u0: f64,
    v0: f64,
    du_dx: f64,
    du_dy: f64,
    dv_dx: f64,
    dv_dy: f64,
}

/// Builder for [`ShearCurrent`]. Every parameter defaults to zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShearCurrentBuilder {
    origin: (f64, f64),
    velocity: (f64, f64),
    du: (f64, f64),
    dv: (f64, f64),
}

impl ShearCurrent {
    /// Create a new builder for configuring a `ShearCurrent`.
    ///
    /// ```
    /// use wavetrace_field::{Current, ShearCurrent};
    ///
    /// // A jet along x whose speed grows with y.
    /// let jet = ShearCurrent::builder().du(0.0, 1e-3).build().unwrap();
    /// assert_eq!(jet.current(0.0, 500.0).unwrap(), (0.5, 0.0));
    /// ```
    pub fn builder() -> ShearCurrentBuilder {
        ShearCurrentBuilder::default()
    }
}

impl ShearCurrentBuilder {
    /// Reference point `(x0, y0)` where the velocity equals `velocity`.
    pub fn origin(mut self, x0: f64, y0: f64) -> Self {
        self.origin = (x0, y0);
        self
    }

    /// Velocity `(u0, v0)` at the reference point.
    pub fn velocity(mut self, u0: f64, v0: f64) -> Self {
        self.velocity = (u0, v0);
        self
    }

    /// Gradient of u: `(∂u/∂x, ∂u/∂y)`.
    pub fn du(mut self, du_dx: f64, du_dy: f64) -> Self {
        self.du = (du_dx, du_dy);
        self
    }

    /// Gradient of v: `(∂v/∂x, ∂v/∂y)`.
    pub fn dv(mut self, dv_dx: f64, dv_dy: f64) -> Self {
        self.dv = (dv_dx, dv_dy);
        self
    }

    /// Build the current, validating all parameters.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any parameter is NaN or infinite.
    pub fn build(self) -> Result<ShearCurrent, String> {
        let params = [
            ("x0", self.origin.0),
            ("y0", self.origin.1),
            ("u0", self.velocity.0),
            ("v0", self.velocity.1),
            ("du_dx", self.du.0),
            ("du_dy", self.du.1),
            ("dv_dx", self.dv.0),
            ("dv_dy", self.dv.1),
        ];
        if let Some((name, value)) = params.iter().find(|(_, v)| !v.is_finite()) {
            return Err(format!("{name} must be finite, got {value}"));
        }
        Ok(ShearCurrent {
            x0: self.origin.0,
            y0: self.origin.1,
            u0: self.velocity.0,
            v0: self.velocity.1,
            du_dx: self.du.0,
            du_dy: self.du.1,
            dv_dx: self.dv.0,
            dv_dy: self.dv.1,
        })
    }
}

impl Current for ShearCurrent {
    fn current_and_gradient(&self, x: f64, y: f64) -> Result<CurrentSample, RayError> {
        let (rx, ry) = (x - self.x0, y - self.y0);
        Ok(CurrentSample {
            u: self.u0 + self.du_dx * rx + self.du_dy * ry,
            v: self.v0 + self.dv_dx * rx + self.dv_dy * ry,
            du_dx: self.du_dx,
            du_dy: self.du_dy,
            dv_dx: self.dv_dx,
            dv_dy: self.dv_dy,
        })
    }

    fn bounds(&self) -> Option<Bounds> {
        None
    }
}
