//! Wavetrace demo: a fan of swell rays refracting onto a sloping beach.
//!
//! Demonstrates:
//!   1. Building a bathymetry grid and saving it as a JSON dataset
//!   2. Asking the advisor for a step size and duration
//!   3. Tracing a fan of rays in parallel from the saved file
//!   4. Writing one trajectory as CSV and the bundle as JSON
//!
//! Run with:
//!   RUST_LOG=info cargo run -p wavetrace --example beach

use std::error::Error;
use std::f64::consts::PI;

use wavetrace::io::{save_bundle_json, save_csv, GriddedDataset, DEPTH_VAR};
use wavetrace::prelude::*;

// ─── Beach parameters ───────────────────────────────────────────

const NX: usize = 201;
const NY: usize = 101;
const SPACING: f64 = 10.0;
const OFFSHORE_DEPTH: f64 = 30.0;
const SLOPE: f64 = 0.02;
const PERIOD: f64 = 8.0;
const RAYS: usize = 9;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let x: Vec<f64> = (0..NX).map(|i| i as f64 * SPACING).collect();
    let y: Vec<f64> = (0..NY).map(|j| j as f64 * SPACING).collect();
    let beach = FieldGrid::from_rows(
        x.clone(),
        y.clone(),
        y.iter()
            .map(|_| x.iter().map(|xi| OFFSHORE_DEPTH - SLOPE * xi).collect())
            .collect(),
    )?;

    let dir = std::env::temp_dir().join("wavetrace-beach-demo");
    std::fs::create_dir_all(&dir)?;
    let depth_path = dir.join("beach.json");
    GriddedDataset::from_grid(DEPTH_VAR, &beach).save(&depth_path)?;

    let k = wavenumber_from_period(PERIOD);
    let step = recommended_step(&x, &y, k).ok_or("no step advice for this grid")?;
    let duration = recommended_duration(&x, k).ok_or("no duration advice for this grid")?;
    println!("T = {PERIOD} s, k = {k:.4} rad/m, step {step:.2} s, duration {duration} s");

    // Rays leave x = 20 m heading between -40 and +40 degrees.
    let (mut x0, mut y0, mut kx0, mut ky0) = (vec![], vec![], vec![], vec![]);
    for i in 0..RAYS {
        let theta = (-40.0 + 80.0 * i as f64 / (RAYS - 1) as f64) * PI / 180.0;
        x0.push(20.0);
        y0.push(500.0);
        kx0.push(k * theta.cos());
        ky0.push(k * theta.sin());
    }
    let bundle = ray_tracing(&x0, &y0, &kx0, &ky0, duration, step, &depth_path, None)?;

    for (i, traj) in bundle.rays().iter().enumerate() {
        let last = traj.last();
        println!(
            "ray {i}: {:>4} samples, heading {:>6.1} deg at ({:.0}, {:.0}), {}",
            traj.len(),
            last.direction().to_degrees(),
            last.x,
            last.y,
            traj.termination()
        );
    }

    save_csv(&bundle.rays()[RAYS / 2], &dir.join("centre_ray.csv"), ",")?;
    save_bundle_json(&bundle, &dir.join("fan.json"))?;
    println!("wrote results to {}", dir.display());
    Ok(())
}
