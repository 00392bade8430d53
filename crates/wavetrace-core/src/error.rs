//! Error types for the wavetrace workspace.
//!
//! Split by how far a failure reaches:
//!
//! - [`RayError`] ends a single ray. It is recorded as the trajectory's
//!   [`Termination`](crate::Termination) and never aborts a batch.
//! - [`GridError`] and [`RequestError`] describe a malformed call. They are
//!   detected before integration starts and abort the whole request.
//! - [`TraceError`] wraps the two request-level kinds for entry points.

use std::error::Error;
use std::fmt;

use crate::bounds::Bounds;

/// Physical or numerical condition that stops one ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RayError {
    /// The position left the coordinate bounds of a gridded field.
    OutOfDomain {
        /// x coordinate of the rejected position.
        x: f64,
        /// y coordinate of the rejected position.
        y: f64,
    },
    /// The local depth is zero or negative (the ray reached land).
    Grounded {
        /// x coordinate of the grounded position.
        x: f64,
        /// y coordinate of the grounded position.
        y: f64,
        /// The non-positive depth found there.
        depth: f64,
    },
    /// The state is no longer usable: a non-finite component or a zero
    /// wavenumber magnitude.
    Diverged,
}

impl fmt::Display for RayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfDomain { x, y } => write!(f, "position ({x}, {y}) is outside the domain"),
            Self::Grounded { x, y, depth } => {
                write!(f, "ray grounded at ({x}, {y}) with depth {depth}")
            }
            Self::Diverged => write!(f, "ray state diverged"),
        }
    }
}

impl Error for RayError {}

/// A coordinate axis or value array that cannot back a field grid.
#[derive(Clone, Debug, PartialEq)]
pub enum GridError {
    /// An axis needs at least two nodes for interpolation and gradients.
    TooFewNodes {
        /// Axis name (`"x"` or `"y"`).
        axis: &'static str,
        /// Number of nodes supplied.
        len: usize,
    },
    /// A coordinate is NaN or infinite.
    NonFiniteCoordinate {
        /// Axis name.
        axis: &'static str,
        /// Index of the offending coordinate.
        index: usize,
    },
    /// Coordinates are not strictly ascending.
    NotAscending {
        /// Axis name.
        axis: &'static str,
        /// Index of the first coordinate not greater than its predecessor.
        index: usize,
    },
    /// Spacing deviates from the axis mean beyond tolerance.
    NonUniformSpacing {
        /// Axis name.
        axis: &'static str,
        /// Index of the interval `[index, index + 1]` that deviates.
        index: usize,
        /// The deviating spacing.
        spacing: f64,
        /// The mean spacing of the axis.
        expected: f64,
    },
    /// The value array does not have `len(y) * len(x)` elements.
    ShapeMismatch {
        /// Expected `(rows, cols)` = `(len(y), len(x))`.
        expected: (usize, usize),
        /// Number of values supplied.
        len: usize,
    },
    /// A row of a row-major value table has the wrong length.
    RaggedRows {
        /// Index of the offending row.
        row: usize,
        /// Expected row length (`len(x)`).
        expected: usize,
        /// Actual row length.
        len: usize,
    },
    /// The two components of a vector field use different coordinates.
    AxesMismatch {
        /// Description of the mismatch.
        reason: String,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewNodes { axis, len } => {
                write!(f, "axis {axis} has {len} nodes, need at least 2")
            }
            Self::NonFiniteCoordinate { axis, index } => {
                write!(f, "axis {axis} coordinate {index} is not finite")
            }
            Self::NotAscending { axis, index } => {
                write!(f, "axis {axis} is not strictly ascending at index {index}")
            }
            Self::NonUniformSpacing {
                axis,
                index,
                spacing,
                expected,
            } => write!(
                f,
                "axis {axis} spacing {spacing} at interval {index} differs from mean {expected}"
            ),
            Self::ShapeMismatch { expected, len } => write!(
                f,
                "values have {len} elements, expected {} x {} = {}",
                expected.0,
                expected.1,
                expected.0 * expected.1
            ),
            Self::RaggedRows { row, expected, len } => {
                write!(f, "row {row} has {len} values, expected {expected}")
            }
            Self::AxesMismatch { reason } => write!(f, "component axes differ: {reason}"),
        }
    }
}

impl Error for GridError {}

/// A trace request that cannot be run as given.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestError {
    /// Duration is zero, negative, or not finite.
    InvalidDuration {
        /// The rejected duration.
        value: f64,
    },
    /// Step size is zero, negative, or not finite.
    InvalidStepSize {
        /// The rejected step size.
        value: f64,
    },
    /// The step size is larger than the duration.
    StepExceedsDuration {
        /// The step size.
        step_size: f64,
        /// The duration.
        duration: f64,
    },
    /// An initial position lies outside the field bounds.
    InitialPositionOutside {
        /// Index of the ray in the request.
        index: usize,
        /// Initial x.
        x: f64,
        /// Initial y.
        y: f64,
        /// Bounds the position was checked against.
        bounds: Bounds,
    },
    /// An initial wavenumber is zero or not finite.
    InvalidWavenumber {
        /// Index of the ray in the request.
        index: usize,
        /// Initial kx.
        kx: f64,
        /// Initial ky.
        ky: f64,
    },
    /// Parallel input arrays have different lengths.
    LengthMismatch {
        /// Description of the mismatch.
        reason: String,
    },
    /// The request contains no rays.
    NoRays,
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDuration { value } => {
                write!(f, "duration must be finite and > 0, got {value}")
            }
            Self::InvalidStepSize { value } => {
                write!(f, "step_size must be finite and > 0, got {value}")
            }
            Self::StepExceedsDuration {
                step_size,
                duration,
            } => write!(f, "step_size {step_size} exceeds duration {duration}"),
            Self::InitialPositionOutside {
                index,
                x,
                y,
                bounds,
            } => write!(
                f,
                "ray {index}: initial position ({x}, {y}) outside domain {bounds}"
            ),
            Self::InvalidWavenumber { index, kx, ky } => write!(
                f,
                "ray {index}: initial wavenumber ({kx}, {ky}) must be finite and non-zero"
            ),
            Self::LengthMismatch { reason } => write!(f, "input length mismatch: {reason}"),
            Self::NoRays => write!(f, "request contains no rays"),
        }
    }
}

impl Error for RequestError {}

/// Request-level failure returned by entry points before any ray is traced.
#[derive(Clone, Debug, PartialEq)]
pub enum TraceError {
    /// A field grid is malformed.
    Grid(GridError),
    /// The request parameters are invalid.
    Request(RequestError),
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "invalid grid: {e}"),
            Self::Request(e) => write!(f, "invalid request: {e}"),
        }
    }
}

impl Error for TraceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::Request(e) => Some(e),
        }
    }
}

impl From<GridError> for TraceError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<RequestError> for TraceError {
    fn from(e: RequestError) -> Self {
        Self::Request(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_error_display() {
        let e = RayError::Grounded {
            x: 1.0,
            y: 2.0,
            depth: -0.5,
        };
        assert_eq!(e.to_string(), "ray grounded at (1, 2) with depth -0.5");
        let e = RayError::OutOfDomain { x: -1000.0, y: 0.0 };
        assert_eq!(e.to_string(), "position (-1000, 0) is outside the domain");
    }

    #[test]
    fn trace_error_chains_source() {
        let e: TraceError = RequestError::NoRays.into();
        assert!(e.source().is_some());
        assert_eq!(e.to_string(), "invalid request: request contains no rays");

        let e: TraceError = GridError::TooFewNodes { axis: "x", len: 1 }.into();
        assert!(matches!(e, TraceError::Grid(_)));
        assert_eq!(
            e.to_string(),
            "invalid grid: axis x has 1 nodes, need at least 2"
        );
    }

    #[test]
    fn shape_mismatch_reports_product() {
        let e = GridError::ShapeMismatch {
            expected: (3, 4),
            len: 10,
        };
        assert_eq!(e.to_string(), "values have 10 elements, expected 3 x 4 = 12");
    }
}
