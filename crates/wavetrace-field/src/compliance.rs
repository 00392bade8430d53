//! Field grid compliance test helpers.
//!
//! These functions verify that a grid satisfies the interpolation contract
//! the ray equations rely on. Reused by the scalar and vector grid test
//! modules.

use crate::field::Bathymetry;
use crate::grid::FieldGrid;

/// Assert that `value_at` returns the stored value at every node.
pub fn assert_exact_at_nodes(grid: &FieldGrid) {
    for (iy, yv) in grid.y().coords().iter().enumerate() {
        for (ix, xv) in grid.x().coords().iter().enumerate() {
            let v = grid.value_at(*xv, *yv).unwrap();
            assert_eq!(
                v,
                grid.value(ix, iy),
                "value_at({xv}, {yv}) differs from node ({ix}, {iy})"
            );
        }
    }
}

/// Assert that the interpolated gradient at each cell centre matches the
/// slope of the interpolated values across that cell.
///
/// Exact for planar fields, which is what the callers use.
pub fn assert_gradient_matches_slope(grid: &FieldGrid) {
    let xc = grid.x().coords();
    let yc = grid.y().coords();
    for j in 0..yc.len() - 1 {
        for i in 0..xc.len() - 1 {
            let xm = 0.5 * (xc[i] + xc[i + 1]);
            let ym = 0.5 * (yc[j] + yc[j + 1]);
            let sx = (grid.value_at(xc[i + 1], ym).unwrap() - grid.value_at(xc[i], ym).unwrap())
                / (xc[i + 1] - xc[i]);
            let sy = (grid.value_at(xm, yc[j + 1]).unwrap() - grid.value_at(xm, yc[j]).unwrap())
                / (yc[j + 1] - yc[j]);
            let (gx, gy) = grid.gradient_at(xm, ym).unwrap();
            assert!(
                (gx - sx).abs() <= 1e-9 * (1.0 + sx.abs()),
                "cell ({i}, {j}): gradient x {gx} vs slope {sx}"
            );
            assert!(
                (gy - sy).abs() <= 1e-9 * (1.0 + sy.abs()),
                "cell ({i}, {j}): gradient y {gy} vs slope {sy}"
            );
        }
    }
}

/// Assert that the [`Bathymetry`] view of a grid agrees with its inherent
/// methods.
pub fn assert_bathymetry_matches_grid(grid: &FieldGrid) {
    let b = grid.bounds();
    assert_eq!(Bathymetry::bounds(grid), Some(b));
    let points = [
        (b.x_min, b.y_min),
        (b.x_max, b.y_max),
        (0.5 * (b.x_min + b.x_max), 0.25 * b.y_min + 0.75 * b.y_max),
    ];
    for (x, y) in points {
        let s = grid.depth_and_gradient(x, y).unwrap();
        assert_eq!(s.depth, grid.value_at(x, y).unwrap());
        assert_eq!((s.ddx, s.ddy), grid.gradient_at(x, y).unwrap());
        assert_eq!(Bathymetry::depth(grid, x, y).unwrap(), s.depth);
    }
    assert!(grid
        .depth_and_gradient(b.x_min - 1.0, b.y_min)
        .is_err());
}
