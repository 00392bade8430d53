//! Closed rectangular domain bounds.

use std::fmt;

/// Closed rectangle `[x_min, x_max] × [y_min, y_max]` in meters.
///
/// Gridded fields report their coordinate extent as a `Bounds`; analytic
/// fields have none. A point on the edge is inside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Smallest x coordinate.
    pub x_min: f64,
    /// Largest x coordinate.
    pub x_max: f64,
    /// Smallest y coordinate.
    pub y_min: f64,
    /// Largest y coordinate.
    pub y_max: f64,
}

impl Bounds {
    /// The empty region. It contains no point and intersects nothing.
    pub const EMPTY: Bounds = Bounds {
        x_min: f64::INFINITY,
        x_max: f64::NEG_INFINITY,
        y_min: f64::INFINITY,
        y_max: f64::NEG_INFINITY,
    };

    /// Create bounds from the two coordinate ranges.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Whether `(x, y)` lies inside the closed rectangle.
    ///
    /// NaN coordinates are never inside.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }

    /// Whether the rectangle contains no point at all.
    pub fn is_empty(&self) -> bool {
        !(self.x_min <= self.x_max && self.y_min <= self.y_max)
    }

    /// Extent along x.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Extent along y.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Intersection of two bounds, or `None` if they do not overlap.
    pub fn intersect(&self, other: &Bounds) -> Option<Bounds> {
        let b = Bounds {
            x_min: self.x_min.max(other.x_min),
            x_max: self.x_max.min(other.x_max),
            y_min: self.y_min.max(other.y_min),
            y_max: self.y_max.min(other.y_max),
        };
        (!b.is_empty()).then_some(b)
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}] x [{}, {}]",
            self.x_min, self.x_max, self.y_min, self.y_max
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_closed() {
        let b = Bounds::new(0.0, 2000.0, 0.0, 1000.0);
        assert!(b.contains(0.0, 0.0));
        assert!(b.contains(2000.0, 1000.0));
        assert!(b.contains(1000.0, 500.0));
        assert!(!b.contains(-1000.0, 0.0));
        assert!(!b.contains(0.0, 1000.5));
    }

    #[test]
    fn nan_is_outside() {
        let b = Bounds::new(0.0, 1.0, 0.0, 1.0);
        assert!(!b.contains(f64::NAN, 0.5));
        assert!(!b.contains(0.5, f64::NAN));
    }

    #[test]
    fn intersect_overlapping_and_disjoint() {
        let a = Bounds::new(0.0, 10.0, 0.0, 10.0);
        let b = Bounds::new(5.0, 20.0, -5.0, 5.0);
        assert_eq!(a.intersect(&b), Some(Bounds::new(5.0, 10.0, 0.0, 5.0)));

        let c = Bounds::new(11.0, 12.0, 0.0, 1.0);
        assert_eq!(a.intersect(&c), None);
    }

    #[test]
    fn empty_contains_nothing() {
        assert!(Bounds::EMPTY.is_empty());
        assert!(!Bounds::EMPTY.contains(0.0, 0.0));
        assert!(!Bounds::new(0.0, 1.0, 0.0, 1.0).is_empty());
        assert!(!Bounds::new(3.0, 3.0, 0.0, 0.0).is_empty());
        let a = Bounds::new(0.0, 10.0, 0.0, 10.0);
        assert_eq!(a.intersect(&Bounds::EMPTY), None);
    }

    #[test]
    fn width_and_height() {
        let b = Bounds::new(-100.0, 300.0, 10.0, 60.0);
        assert_eq!(b.width(), 400.0);
        assert_eq!(b.height(), 50.0);
    }
}
