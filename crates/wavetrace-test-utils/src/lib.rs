//! Test fixtures for wavetrace development.
//!
//! Provides the standard idealised environments (flat bottom, planar beach,
//! seamount, sheared current) as gridded fields, and deterministic ray
//! fans for batch and property tests.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    flat_bottom, linear_beach, parallel_rays, random_rays, seamount, shear_current, GridSpec,
};
