//! Ray state and its time derivative.

/// One ray's position and wavenumber at a point in time.
///
/// Position is in meters, wavenumber in radians per meter, time in
/// seconds. States are plain values: the integrator produces new ones
/// rather than mutating recorded ones.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayState {
    /// Time since the start of the trace (s).
    pub time: f64,
    /// Position along x (m).
    pub x: f64,
    /// Position along y (m).
    pub y: f64,
    /// Wavenumber component along x (rad/m).
    pub kx: f64,
    /// Wavenumber component along y (rad/m).
    pub ky: f64,
}

impl RayState {
    /// Create a state at `time`.
    pub fn new(time: f64, x: f64, y: f64, kx: f64, ky: f64) -> Self {
        Self { time, x, y, kx, ky }
    }

    /// Create an initial state at `t = 0`.
    pub fn initial(x: f64, y: f64, kx: f64, ky: f64) -> Self {
        Self::new(0.0, x, y, kx, ky)
    }

    /// Create an initial state from a wavenumber magnitude and a propagation
    /// direction in radians, measured counter-clockwise from +x.
    pub fn from_polar(x: f64, y: f64, k: f64, direction: f64) -> Self {
        Self::initial(x, y, k * direction.cos(), k * direction.sin())
    }

    /// Magnitude of the wavenumber vector.
    pub fn wavenumber(&self) -> f64 {
        self.kx.hypot(self.ky)
    }

    /// Propagation direction `atan2(ky, kx)` in radians.
    pub fn direction(&self) -> f64 {
        self.ky.atan2(self.kx)
    }

    /// Whether every component is finite.
    pub fn is_finite(&self) -> bool {
        self.time.is_finite()
            && self.x.is_finite()
            && self.y.is_finite()
            && self.kx.is_finite()
            && self.ky.is_finite()
    }

    /// The state `self + dt * d`, with time advanced by `dt`.
    pub fn advanced(&self, d: &Derivative, dt: f64) -> Self {
        Self {
            time: self.time + dt,
            x: self.x + dt * d.dx,
            y: self.y + dt * d.dy,
            kx: self.kx + dt * d.dkx,
            ky: self.ky + dt * d.dky,
        }
    }

    /// The row `[time, x, y, kx, ky]`.
    pub fn to_row(&self) -> [f64; 5] {
        [self.time, self.x, self.y, self.kx, self.ky]
    }
}

/// Time derivative of a [`RayState`]'s spatial and wavenumber components.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Derivative {
    /// dx/dt (m/s).
    pub dx: f64,
    /// dy/dt (m/s).
    pub dy: f64,
    /// dkx/dt (rad/m/s).
    pub dkx: f64,
    /// dky/dt (rad/m/s).
    pub dky: f64,
}

impl Derivative {
    /// Create a derivative from its components.
    pub fn new(dx: f64, dy: f64, dkx: f64, dky: f64) -> Self {
        Self { dx, dy, dkx, dky }
    }

    /// The classical RK4 weighted average `(k1 + 2 k2 + 2 k3 + k4) / 6`.
    pub fn rk4_average(k1: &Self, k2: &Self, k3: &Self, k4: &Self) -> Self {
        Self {
            dx: (k1.dx + 2.0 * k2.dx + 2.0 * k3.dx + k4.dx) / 6.0,
            dy: (k1.dy + 2.0 * k2.dy + 2.0 * k3.dy + k4.dy) / 6.0,
            dkx: (k1.dkx + 2.0 * k2.dkx + 2.0 * k3.dkx + k4.dkx) / 6.0,
            dky: (k1.dky + 2.0 * k2.dky + 2.0 * k3.dky + k4.dky) / 6.0,
        }
    }

    /// Speed of the ray over ground, `|(dx, dy)|`.
    pub fn speed(&self) -> f64 {
        self.dx.hypot(self.dy)
    }
}
