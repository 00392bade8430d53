//! Path-based entry points over datasets written to a temp directory.

use std::fs;
use std::path::{Path, PathBuf};

use wavetrace::io::{read_bundle_json, GriddedDataset, DEPTH_VAR};
use wavetrace::prelude::*;
use wavetrace_test_utils::{flat_bottom, linear_beach, shear_current, GridSpec};

// ── Helpers ─────────────────────────────────────────────────────

/// 0-2000 m by 0-1000 m, 50 m deep.
fn basin() -> GridSpec {
    GridSpec::new(21, 11, 100.0, 100.0)
}

fn write_depth(dir: &Path, name: &str, grid: &FieldGrid) -> PathBuf {
    let path = dir.join(name);
    GriddedDataset::from_grid(DEPTH_VAR, grid).save(&path).unwrap();
    path
}

// ── single_ray ──────────────────────────────────────────────────

#[test]
fn launch_outside_domain_is_one_state() {
    let dir = tempfile::tempdir().unwrap();
    let depth = write_depth(dir.path(), "basin.json", &flat_bottom(basin(), 50.0));
    let traj = single_ray(-1000.0, 0.0, 0.01, 0.0, 100.0, 1.0, &depth, None).unwrap();
    assert_eq!(traj.len(), 1);
    assert_eq!(traj.first(), &RayState::initial(-1000.0, 0.0, 0.01, 0.0));
    assert_eq!(traj.termination(), Termination::OutOfDomain { x: -1000.0, y: 0.0 });
}

#[test]
fn still_water_ray_runs_to_completion() {
    let dir = tempfile::tempdir().unwrap();
    let depth = write_depth(dir.path(), "basin.json", &flat_bottom(basin(), 50.0));
    let k = wavenumber_from_period(10.0);
    let traj = single_ray(100.0, 500.0, k, 0.0, 100.0, 1.0, &depth, None).unwrap();
    assert_eq!(traj.termination(), Termination::Completed);
    assert_eq!(traj.len(), 101);
    let expect = 100.0 + group_speed(k, 50.0) * 100.0;
    assert!((traj.last().x - expect).abs() < 1e-6);
    assert_eq!(traj.last().y, 500.0);
}

#[test]
fn current_file_bends_the_ray() {
    let dir = tempfile::tempdir().unwrap();
    let spec = GridSpec::square(41, 41, 50.0);
    let depth = write_depth(dir.path(), "deep.json", &flat_bottom(spec, 500.0));
    let flow = dir.path().join("flow.json");
    GriddedDataset::from_current(&shear_current(spec, 0.0, 2e-3))
        .save(&flow)
        .unwrap();

    let k = wavenumber_from_period(10.0);
    let still = single_ray(100.0, 1000.0, k, 0.0, 100.0, 1.0, &depth, None).unwrap();
    let sheared = single_ray(100.0, 1000.0, k, 0.0, 100.0, 1.0, &depth, Some(flow.as_path())).unwrap();
    assert_eq!(still.last().ky, 0.0);
    assert!(sheared.last().ky < 0.0);
}

#[test]
fn bad_step_rejected_before_loading() {
    let err = single_ray(0.0, 0.0, 0.05, 0.0, 10.0, 20.0, Path::new("/does/not/exist"), None)
        .unwrap_err();
    assert!(matches!(
        err,
        IoError::Request(RequestError::StepExceedsDuration { .. })
    ));
}

#[test]
fn missing_bathymetry_file_is_path_error() {
    let err = single_ray(0.0, 0.0, 0.05, 0.0, 10.0, 1.0, Path::new("/does/not/exist.json"), None)
        .unwrap_err();
    assert!(matches!(err, IoError::Path { .. }));
}

// ── ray_tracing ─────────────────────────────────────────────────

#[test]
fn ray_tracing_keeps_input_order_and_fates() {
    let dir = tempfile::tempdir().unwrap();
    let spec = GridSpec::new(121, 41, 10.0, 25.0);
    let depth = write_depth(dir.path(), "beach.json", &linear_beach(spec, 50.0, 0.05));

    let bundle = ray_tracing(
        &[50.0, 900.0, 50.0],
        &[500.0, 500.0, 300.0],
        &[0.05, 0.05, -0.05],
        &[0.0, 0.0, 0.0],
        60.0,
        0.5,
        &depth,
        None,
    )
    .unwrap();
    assert_eq!(bundle.len(), 3);
    assert_eq!(bundle.rays()[0].termination(), Termination::Completed);
    assert!(matches!(bundle.rays()[1].termination(), Termination::Grounded { .. }));
    assert!(matches!(bundle.rays()[2].termination(), Termination::OutOfDomain { .. }));
    assert_eq!(bundle.max_len(), 121);
}

#[test]
fn identical_inputs_give_identical_trajectories() {
    let dir = tempfile::tempdir().unwrap();
    let depth = write_depth(dir.path(), "basin.json", &flat_bottom(basin(), 50.0));
    let bundle = ray_tracing(
        &[200.0, 200.0],
        &[400.0, 400.0],
        &[0.03, 0.03],
        &[0.01, 0.01],
        60.0,
        1.0,
        &depth,
        None,
    )
    .unwrap();
    assert_eq!(bundle.rays()[0], bundle.rays()[1]);
}

#[test]
fn mismatched_lengths_rejected() {
    let err = ray_tracing(
        &[0.0, 1.0],
        &[0.0],
        &[0.05, 0.05],
        &[0.0, 0.0],
        10.0,
        1.0,
        Path::new("unused.json"),
        None,
    )
    .unwrap_err();
    match err {
        IoError::Request(RequestError::LengthMismatch { reason }) => {
            assert_eq!(reason, "x0 has 2 values, y0 has 1");
        }
        other => panic!("expected LengthMismatch, got {other:?}"),
    }
}

#[test]
fn empty_arrays_rejected() {
    let err = ray_tracing(&[], &[], &[], &[], 10.0, 1.0, Path::new("unused.json"), None)
        .unwrap_err();
    assert!(matches!(err, IoError::Request(RequestError::NoRays)));
}

// ── run_file ────────────────────────────────────────────────────

#[test]
fn run_file_writes_output() {
    let dir = tempfile::tempdir().unwrap();
    write_depth(dir.path(), "basin.json", &flat_bottom(basin(), 50.0));
    let run = dir.path().join("run.json");
    fs::write(
        &run,
        r#"{
            "bathymetry": "basin.json",
            "duration": 30.0,
            "step_size": 1.0,
            "rays": [
                { "x": 100.0, "y": 200.0, "kx": 0.04, "ky": 0.0 },
                { "x": 100.0, "y": 800.0, "period": 10.0, "direction": 0.0 }
            ],
            "output": "rays.json"
        }"#,
    )
    .unwrap();

    let result = run_file(&run).unwrap();
    assert_eq!(result.metrics.completed, 2);
    let written = read_bundle_json(fs::File::open(dir.path().join("rays.json")).unwrap()).unwrap();
    assert_eq!(written.rays(), result.trajectories.as_slice());
}

#[test]
fn run_file_rejects_launch_outside_domain() {
    let dir = tempfile::tempdir().unwrap();
    write_depth(dir.path(), "basin.json", &flat_bottom(basin(), 50.0));
    let run = dir.path().join("run.json");
    fs::write(
        &run,
        r#"{
            "bathymetry": "basin.json",
            "duration": 30.0,
            "step_size": 1.0,
            "rays": [{ "x": -1000.0, "y": 0.0, "kx": 0.01, "ky": 0.0 }]
        }"#,
    )
    .unwrap();
    assert!(matches!(
        run_file(&run),
        Err(IoError::Request(RequestError::InitialPositionOutside { index: 0, .. }))
    ));
}
