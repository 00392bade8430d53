//! Ascending, uniformly spaced coordinate axes.

use wavetrace_core::GridError;

/// Relative tolerance on the deviation of any interval from the mean
/// spacing of its axis.
///
/// Coordinates read from single-precision files carry rounding noise that
/// scales with their magnitude, not with the spacing, so the bound is
/// looser than machine epsilon.
pub const SPACING_TOLERANCE: f64 = 1e-4;

/// A validated coordinate axis.
///
/// Invariants: at least two nodes, all finite, strictly ascending, and every
/// interval within [`SPACING_TOLERANCE`] of the mean spacing.
#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    name: &'static str,
    coords: Vec<f64>,
    spacing: f64,
}

impl Axis {
    /// Validate `coords` as the axis called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::TooFewNodes`], [`GridError::NonFiniteCoordinate`],
    /// [`GridError::NotAscending`] or [`GridError::NonUniformSpacing`].
    ///
    /// # Examples
    ///
    /// ```
    /// use wavetrace_field::Axis;
    ///
    /// let x = Axis::new("x", vec![0.0, 500.0, 1000.0]).unwrap();
    /// assert_eq!(x.spacing(), 500.0);
    /// assert_eq!(x.locate(750.0), Some((1, 0.5)));
    /// assert_eq!(x.locate(1000.5), None);
    /// ```
    pub fn new(name: &'static str, coords: Vec<f64>) -> Result<Self, GridError> {
        if coords.len() < 2 {
            return Err(GridError::TooFewNodes {
                axis: name,
                len: coords.len(),
            });
        }
        if let Some(index) = coords.iter().position(|c| !c.is_finite()) {
            return Err(GridError::NonFiniteCoordinate { axis: name, index });
        }
        if let Some(index) = coords.windows(2).position(|w| w[1] <= w[0]) {
            return Err(GridError::NotAscending {
                axis: name,
                index: index + 1,
            });
        }

        let n = coords.len();
        let spacing = (coords[n - 1] - coords[0]) / (n - 1) as f64;
        for (index, w) in coords.windows(2).enumerate() {
            let d = w[1] - w[0];
            if (d - spacing).abs() > SPACING_TOLERANCE * spacing {
                return Err(GridError::NonUniformSpacing {
                    axis: name,
                    index,
                    spacing: d,
                    expected: spacing,
                });
            }
        }

        Ok(Self {
            name,
            coords,
            spacing,
        })
    }

    /// Build `len` nodes starting at `start`, `spacing` apart.
    ///
    /// # Errors
    ///
    /// Same as [`Axis::new`].
    pub fn uniform(
        name: &'static str,
        start: f64,
        spacing: f64,
        len: usize,
    ) -> Result<Self, GridError> {
        Self::new(name, (0..len).map(|i| start + i as f64 * spacing).collect())
    }

    /// Axis name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Node coordinates.
    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Always `false`: construction requires two nodes.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// First coordinate.
    pub fn min(&self) -> f64 {
        self.coords[0]
    }

    /// Last coordinate.
    pub fn max(&self) -> f64 {
        self.coords[self.coords.len() - 1]
    }

    /// Mean node spacing.
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Find the cell containing `c`.
    ///
    /// Returns `(i, t)` such that `coords[i] <= c <= coords[i + 1]` and
    /// `t = (c - coords[i]) / (coords[i + 1] - coords[i])`. At a node `t` is
    /// exactly 0 (or exactly 1 at the last node). Returns `None` outside
    /// `[min, max]` and for NaN.
    pub fn locate(&self, c: f64) -> Option<(usize, f64)> {
        if !(c >= self.min() && c <= self.max()) {
            return None;
        }
        let n = self.coords.len();
        let guess = ((c - self.min()) / self.spacing).floor() as usize;
        let mut i = guess.min(n - 2);
        // The division above can land one cell off next to a node.
        while i > 0 && c < self.coords[i] {
            i -= 1;
        }
        while i + 2 < n && c >= self.coords[i + 1] {
            i += 1;
        }
        let t = (c - self.coords[i]) / (self.coords[i + 1] - self.coords[i]);
        Some((i, t))
    }
}
