//! Depth and current fields for wavetrace.
//!
//! This crate defines the [`Bathymetry`] and [`Current`] traits through which
//! the ray equations query the environment, along with the gridded backends
//! loaded from data and a handful of analytic fields for idealised studies.
//!
//! # Backends
//!
//! - [`FieldGrid`]: regularly spaced scalar grid with bilinear interpolation
//!   and finite-difference gradients (implements [`Bathymetry`])
//! - [`CurrentGrid`]: a `(u, v)` pair of grids on shared axes (implements
//!   [`Current`])
//! - [`ConstantDepth`], [`ConstantSlope`]: unbounded analytic bathymetry
//! - [`ConstantCurrent`], [`ShearCurrent`]: unbounded analytic currents
//!
//! # Depth convention
//!
//! Depth is positive downward: open water has `h > 0`, land has `h <= 0`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod analytic;
pub mod axis;
pub mod current;
pub mod field;
pub mod grid;

#[cfg(test)]
pub(crate) mod compliance;

pub use analytic::{ConstantCurrent, ConstantDepth, ConstantSlope, ShearCurrent, ShearCurrentBuilder};
pub use axis::{Axis, SPACING_TOLERANCE};
pub use current::CurrentGrid;
pub use field::{Bathymetry, Current, CurrentSample, DepthSample};
pub use grid::FieldGrid;
