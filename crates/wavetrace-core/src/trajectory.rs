//! Trajectories, termination tags, and multi-ray bundles.

use std::fmt;

use crate::error::RayError;
use crate::state::RayState;

/// Column names of a trajectory table, in row order.
pub const TRAJECTORY_COLUMNS: [&str; 5] = ["time", "x", "y", "kx", "ky"];

/// Why a ray's integration stopped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Termination {
    /// Every requested step was taken.
    Completed,
    /// The ray left a gridded field's bounds.
    OutOfDomain {
        /// x of the rejected position.
        x: f64,
        /// y of the rejected position.
        y: f64,
    },
    /// The ray reached non-positive depth.
    Grounded {
        /// x of the grounded position.
        x: f64,
        /// y of the grounded position.
        y: f64,
        /// The depth found there.
        depth: f64,
    },
    /// The state became non-finite or the wavenumber collapsed to zero.
    Diverged,
    /// A cancellation request was observed between steps.
    Cancelled,
}

impl Termination {
    /// Short stable label, used by writers and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::OutOfDomain { .. } => "out_of_domain",
            Self::Grounded { .. } => "grounded",
            Self::Diverged => "diverged",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether the ray stopped before its requested duration.
    pub fn is_truncated(&self) -> bool {
        !matches!(self, Self::Completed)
    }
}

impl From<RayError> for Termination {
    fn from(e: RayError) -> Self {
        match e {
            RayError::OutOfDomain { x, y } => Self::OutOfDomain { x, y },
            RayError::Grounded { x, y, depth } => Self::Grounded { x, y, depth },
            RayError::Diverged => Self::Diverged,
        }
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::OutOfDomain { x, y } => write!(f, "left the domain at ({x}, {y})"),
            Self::Grounded { x, y, depth } => {
                write!(f, "grounded at ({x}, {y}), depth {depth}")
            }
            Self::Diverged => write!(f, "diverged"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Time-ordered states of one ray plus the reason it stopped.
///
/// Built by the integrator; read-only afterwards. Always holds at least the
/// initial state.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    states: Vec<RayState>,
    termination: Termination,
}

impl Trajectory {
    /// Assemble a trajectory from recorded states.
    ///
    /// # Panics
    ///
    /// Panics if `states` is empty; the integrator always records the
    /// initial state.
    pub fn new(states: Vec<RayState>, termination: Termination) -> Self {
        assert!(!states.is_empty(), "trajectory needs at least one state");
        Self {
            states,
            termination,
        }
    }

    /// All recorded states, time-ascending.
    pub fn states(&self) -> &[RayState] {
        &self.states
    }

    /// Number of recorded states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always `false`: a trajectory holds its initial state.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The initial state.
    pub fn first(&self) -> &RayState {
        &self.states[0]
    }

    /// The last recorded state.
    pub fn last(&self) -> &RayState {
        &self.states[self.states.len() - 1]
    }

    /// Why integration stopped.
    pub fn termination(&self) -> Termination {
        self.termination
    }

    /// Whether integration stopped before the requested duration.
    pub fn is_truncated(&self) -> bool {
        self.termination.is_truncated()
    }

    /// Rows `[time, x, y, kx, ky]` in time order.
    pub fn rows(&self) -> Vec<[f64; 5]> {
        self.states.iter().map(RayState::to_row).collect()
    }

    /// Consume the trajectory, returning its states.
    pub fn into_states(self) -> Vec<RayState> {
        self.states
    }
}

/// Trajectories of several rays, in input order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RayBundle {
    rays: Vec<Trajectory>,
}

impl RayBundle {
    /// Wrap trajectories, preserving order.
    pub fn new(rays: Vec<Trajectory>) -> Self {
        Self { rays }
    }

    /// Trajectories in input order.
    pub fn rays(&self) -> &[Trajectory] {
        &self.rays
    }

    /// Number of rays.
    pub fn len(&self) -> usize {
        self.rays.len()
    }

    /// Whether the bundle holds no rays.
    pub fn is_empty(&self) -> bool {
        self.rays.is_empty()
    }

    /// Length of the longest trajectory.
    pub fn max_len(&self) -> usize {
        self.rays.iter().map(Trajectory::len).max().unwrap_or(0)
    }

    /// Stack the trajectories into a dense `(ray, step, column)` table.
    ///
    /// The table is flattened row-major with shape
    /// `(len(), max_len(), 5)`. Steps past a truncated ray's end are NaN.
    pub fn to_table(&self) -> (Vec<f64>, [usize; 3]) {
        let steps = self.max_len();
        let cols = TRAJECTORY_COLUMNS.len();
        let mut table = vec![f64::NAN; self.rays.len() * steps * cols];
        for (r, ray) in self.rays.iter().enumerate() {
            for (s, state) in ray.states().iter().enumerate() {
                let base = (r * steps + s) * cols;
                table[base..base + cols].copy_from_slice(&state.to_row());
            }
        }
        (table, [self.rays.len(), steps, cols])
    }

    /// Consume the bundle, returning the trajectories.
    pub fn into_rays(self) -> Vec<Trajectory> {
        self.rays
    }
}

impl From<Vec<Trajectory>> for RayBundle {
    fn from(rays: Vec<Trajectory>) -> Self {
        Self::new(rays)
    }
}
