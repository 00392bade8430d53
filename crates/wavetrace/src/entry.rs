//! Path-based entry points: load fields from disk, trace, return results.

use std::path::Path;

use log::info;
use wavetrace_core::{RayBundle, RayState, RequestError, Trajectory};
use wavetrace_engine::{initial_states, BatchDriver, BatchResult, RaySystem, TraceConfig, TraceRequest};
use wavetrace_field::{Current, CurrentGrid, FieldGrid};
use wavetrace_io::{load_bathymetry, load_current, save_bundle_json, IoError, RunFile};

fn load_fields(
    bathymetry_path: &Path,
    current_path: Option<&Path>,
) -> Result<(FieldGrid, Option<CurrentGrid>), IoError> {
    let bathymetry = load_bathymetry(bathymetry_path)?;
    let current = current_path.map(load_current).transpose()?;
    Ok((bathymetry, current))
}

/// Trace every state over the loaded fields.
///
/// Only the time parameters are validated up front. A ray launched outside
/// the fields comes back as a single state tagged `OutOfDomain`.
fn trace_paths(
    states: &[RayState],
    duration: f64,
    step_size: f64,
    bathymetry_path: &Path,
    current_path: Option<&Path>,
) -> Result<BatchResult, IoError> {
    TraceConfig::new(duration, step_size).validate()?;
    let (bathymetry, current) = load_fields(bathymetry_path, current_path)?;
    let system = RaySystem::new(&bathymetry)
        .with_optional_current(current.as_ref().map(|c| c as &dyn Current));
    Ok(BatchDriver::new(system).run_many(states, duration, step_size))
}

/// Trace one ray from `(x0, y0)` with wavenumber `(kx0, ky0)`.
///
/// The bathymetry file must hold a `depth` variable; the optional current
/// file `u` and `v`. Without a current the water is still.
///
/// # Errors
///
/// - [`IoError::Request`] for an invalid duration or step size.
/// - [`IoError::Path`], [`IoError::Json`], [`IoError::MissingVariable`] or
///   [`IoError::Grid`] if a field file cannot be loaded.
#[allow(clippy::too_many_arguments)]
pub fn single_ray(
    x0: f64,
    y0: f64,
    kx0: f64,
    ky0: f64,
    duration: f64,
    step_size: f64,
    bathymetry_path: &Path,
    current_path: Option<&Path>,
) -> Result<Trajectory, IoError> {
    let initial = RayState::initial(x0, y0, kx0, ky0);
    let mut result = trace_paths(&[initial], duration, step_size, bathymetry_path, current_path)?;
    result.trajectories.pop().ok_or(IoError::Request(RequestError::NoRays))
}

/// Trace one ray per index of the four parallel arrays.
///
/// Trajectories come back in input order and may differ in length; see
/// [`RayBundle::to_table`] for a padded table.
///
/// # Errors
///
/// As for [`single_ray`], plus [`RequestError::LengthMismatch`] when the
/// arrays differ in length and [`RequestError::NoRays`] when they are empty.
#[allow(clippy::too_many_arguments)]
pub fn ray_tracing(
    x0: &[f64],
    y0: &[f64],
    kx0: &[f64],
    ky0: &[f64],
    duration: f64,
    step_size: f64,
    bathymetry_path: &Path,
    current_path: Option<&Path>,
) -> Result<RayBundle, IoError> {
    let states = initial_states(x0, y0, kx0, ky0)?;
    if states.is_empty() {
        return Err(RequestError::NoRays.into());
    }
    let result = trace_paths(&states, duration, step_size, bathymetry_path, current_path)?;
    Ok(result.into_bundle())
}

/// Execute a run file.
///
/// The request is validated in full, so a ray starting outside the fields
/// is an error here. When the run file names an `output`, the bundle is
/// written there as JSON.
///
/// # Errors
///
/// Any load error, any [`RequestError`] from
/// [`TraceRequest::validate`], or a failure to write the output.
pub fn run_file(path: &Path) -> Result<BatchResult, IoError> {
    let run = RunFile::open(path)?;
    let (bathymetry, current) = load_fields(&run.bathymetry, run.current.as_deref())?;
    let result = TraceRequest::new(run.initial_states(), run.config(), &bathymetry)
        .with_optional_current(current.as_ref().map(|c| c as &dyn Current))
        .execute()?;

    if let Some(out) = &run.output {
        let bundle = RayBundle::new(result.trajectories.clone());
        save_bundle_json(&bundle, out)?;
        info!("wrote {} trajectories to {}", bundle.len(), out.display());
    }
    Ok(result)
}
