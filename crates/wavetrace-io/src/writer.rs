//! Trajectory writers: delimited text for one ray, JSON for a bundle.

use std::io::{BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use wavetrace_core::{RayBundle, RayState, Termination, Trajectory, TRAJECTORY_COLUMNS};

use crate::error::{create_file, IoError};

/// Write one trajectory as delimited text.
///
/// The header is the column names `time, x, y, kx, ky` joined by
/// `delimiter`; each following line is one state.
///
/// ```
/// use wavetrace_core::{RayState, Termination, Trajectory};
/// use wavetrace_io::write_csv;
///
/// let t = Trajectory::new(vec![RayState::initial(0.0, 1.5, 0.25, 0.0)], Termination::Completed);
/// let mut out = Vec::new();
/// write_csv(&t, &mut out, ",").unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "time,x,y,kx,ky\n0,0,1.5,0.25,0\n");
/// ```
///
/// # Errors
///
/// [`IoError::Io`] from the writer.
pub fn write_csv<W: Write>(trajectory: &Trajectory, mut writer: W, delimiter: &str) -> Result<(), IoError> {
    writeln!(writer, "{}", TRAJECTORY_COLUMNS.join(delimiter))?;
    for row in trajectory.rows() {
        let line: Vec<String> = row.iter().map(f64::to_string).collect();
        writeln!(writer, "{}", line.join(delimiter))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write one trajectory to a delimited text file.
///
/// # Errors
///
/// [`IoError::Path`] if the file cannot be created, [`IoError::Io`] if it
/// cannot be written.
pub fn save_csv(trajectory: &Trajectory, path: &Path, delimiter: &str) -> Result<(), IoError> {
    write_csv(trajectory, BufWriter::new(create_file(path)?), delimiter)
}

// ── JSON bundle ────────────────────────────────────────────────────

/// Serialized termination: a `kind` tag plus the position where relevant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum TerminationRecord {
    Completed,
    OutOfDomain { x: f64, y: f64 },
    Grounded { x: f64, y: f64, depth: Option<f64> },
    Diverged,
    Cancelled,
}

impl From<Termination> for TerminationRecord {
    fn from(t: Termination) -> Self {
        match t {
            Termination::Completed => Self::Completed,
            Termination::OutOfDomain { x, y } => Self::OutOfDomain { x, y },
            // A NaN depth (land mask) has no JSON number.
            Termination::Grounded { x, y, depth } => Self::Grounded {
                x,
                y,
                depth: depth.is_finite().then_some(depth),
            },
            Termination::Diverged => Self::Diverged,
            Termination::Cancelled => Self::Cancelled,
        }
    }
}

impl From<TerminationRecord> for Termination {
    fn from(t: TerminationRecord) -> Self {
        match t {
            TerminationRecord::Completed => Self::Completed,
            TerminationRecord::OutOfDomain { x, y } => Self::OutOfDomain { x, y },
            TerminationRecord::Grounded { x, y, depth } => Self::Grounded {
                x,
                y,
                depth: depth.unwrap_or(f64::NAN),
            },
            TerminationRecord::Diverged => Self::Diverged,
            TerminationRecord::Cancelled => Self::Cancelled,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct RayRecord {
    termination: TerminationRecord,
    states: Vec<[f64; 5]>,
}

#[derive(Debug, Serialize, Deserialize)]
struct BundleRecord {
    columns: Vec<String>,
    rays: Vec<RayRecord>,
}

/// Write a bundle as JSON: the column names, then per ray its termination
/// and its `[time, x, y, kx, ky]` rows.
///
/// # Errors
///
/// [`IoError::Json`] or [`IoError::Io`] from the writer.
pub fn write_bundle_json<W: Write>(bundle: &RayBundle, mut writer: W) -> Result<(), IoError> {
    let record = BundleRecord {
        columns: TRAJECTORY_COLUMNS.iter().map(|c| c.to_string()).collect(),
        rays: bundle
            .rays()
            .iter()
            .map(|t| RayRecord {
                termination: t.termination().into(),
                states: t.rows(),
            })
            .collect(),
    };
    serde_json::to_writer(&mut writer, &record)?;
    writer.flush()?;
    Ok(())
}

/// Write a bundle to a JSON file.
///
/// # Errors
///
/// [`IoError::Path`] if the file cannot be created, otherwise as for
/// [`write_bundle_json`].
pub fn save_bundle_json(bundle: &RayBundle, path: &Path) -> Result<(), IoError> {
    write_bundle_json(bundle, BufWriter::new(create_file(path)?))
}

/// Read a bundle written by [`write_bundle_json`].
///
/// # Errors
///
/// [`IoError::Json`] on malformed input, including a ray with no states.
pub fn read_bundle_json<R: Read>(reader: R) -> Result<RayBundle, IoError> {
    let record: BundleRecord = serde_json::from_reader(reader)?;
    let mut rays = Vec::with_capacity(record.rays.len());
    for (i, ray) in record.rays.into_iter().enumerate() {
        if ray.states.is_empty() {
            return Err(IoError::Json(serde::de::Error::custom(format!(
                "ray {i} has no states"
            ))));
        }
        let states = ray
            .states
            .iter()
            .map(|&[time, x, y, kx, ky]| RayState::new(time, x, y, kx, ky))
            .collect();
        rays.push(Trajectory::new(states, ray.termination.into()));
    }
    Ok(RayBundle::new(rays))
}
