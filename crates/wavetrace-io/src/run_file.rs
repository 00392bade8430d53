//! JSON run files: everything needed to repeat a trace.
//!
//! ```json
//! {
//!   "bathymetry": "beach.json",
//!   "current": null,
//!   "duration": 600.0,
//!   "step_size": 1.0,
//!   "parallelism": { "threads": 4 },
//!   "rays": [
//!     { "x": 0.0, "y": 500.0, "kx": 0.04, "ky": 0.0 },
//!     { "x": 0.0, "y": 900.0, "period": 10.0, "direction": 0.3 }
//!   ],
//!   "output": "rays.json"
//! }
//! ```
//!
//! Relative paths are resolved against the directory holding the run file.
//! A ray is given either by its wavenumber components or by a wave period
//! (deep-water dispersion) and a direction in radians.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use wavetrace_core::RayState;
use wavetrace_engine::dispersion::wavenumber_from_period;
use wavetrace_engine::{Parallelism, TraceConfig};

use crate::error::{create_file, IoError};

/// Serialized [`Parallelism`]: `"auto"`, `"sequential"` or
/// `{"threads": n}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParallelismSpec {
    /// [`Parallelism::Auto`].
    #[default]
    Auto,
    /// [`Parallelism::Sequential`].
    Sequential,
    /// [`Parallelism::Threads`].
    Threads(usize),
}

impl From<ParallelismSpec> for Parallelism {
    fn from(p: ParallelismSpec) -> Self {
        match p {
            ParallelismSpec::Auto => Self::Auto,
            ParallelismSpec::Sequential => Self::Sequential,
            ParallelismSpec::Threads(n) => Self::Threads(n),
        }
    }
}

impl From<Parallelism> for ParallelismSpec {
    fn from(p: Parallelism) -> Self {
        match p {
            Parallelism::Auto => Self::Auto,
            Parallelism::Sequential => Self::Sequential,
            Parallelism::Threads(n) => Self::Threads(n),
        }
    }
}

/// Initial condition of one ray.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RaySpec {
    /// Explicit wavenumber components (rad/m).
    Wavenumber {
        /// Start x (m).
        x: f64,
        /// Start y (m).
        y: f64,
        /// Wavenumber along x.
        kx: f64,
        /// Wavenumber along y.
        ky: f64,
    },
    /// Deep-water wave of `period` seconds heading `direction` radians
    /// counter-clockwise from +x.
    Period {
        /// Start x (m).
        x: f64,
        /// Start y (m).
        y: f64,
        /// Wave period (s).
        period: f64,
        /// Heading (rad).
        direction: f64,
    },
}

impl RaySpec {
    /// The initial state at `t = 0`.
    pub fn to_state(&self) -> RayState {
        match *self {
            Self::Wavenumber { x, y, kx, ky } => RayState::initial(x, y, kx, ky),
            Self::Period {
                x,
                y,
                period,
                direction,
            } => RayState::from_polar(x, y, wavenumber_from_period(period), direction),
        }
    }
}

impl From<RayState> for RaySpec {
    fn from(s: RayState) -> Self {
        Self::Wavenumber {
            x: s.x,
            y: s.y,
            kx: s.kx,
            ky: s.ky,
        }
    }
}

/// A complete trace description.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunFile {
    /// Bathymetry dataset (must hold a `depth` variable).
    pub bathymetry: PathBuf,
    /// Optional current dataset (must hold `u` and `v`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<PathBuf>,
    /// Integration time (s).
    pub duration: f64,
    /// RK4 step (s).
    pub step_size: f64,
    /// How rays are spread over threads.
    #[serde(default)]
    pub parallelism: ParallelismSpec,
    /// Initial conditions.
    pub rays: Vec<RaySpec>,
    /// Where to write the trajectories as JSON, if anywhere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl RunFile {
    /// Read a run file and resolve its relative paths against the file's
    /// directory.
    ///
    /// # Errors
    ///
    /// [`IoError::Path`] if the file cannot be opened, [`IoError::Json`] if
    /// it does not describe a run.
    pub fn open(path: &Path) -> Result<Self, IoError> {
        let file = File::open(path).map_err(|source| IoError::Path {
            path: path.to_path_buf(),
            source,
        })?;
        let mut run: Self = serde_json::from_reader(BufReader::new(file))?;
        if let Some(dir) = path.parent() {
            run.resolve_paths(dir);
        }
        Ok(run)
    }

    /// Make every relative path absolute with respect to `dir`.
    pub fn resolve_paths(&mut self, dir: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = dir.join(&*p);
            }
        };
        resolve(&mut self.bathymetry);
        if let Some(p) = self.current.as_mut() {
            resolve(p);
        }
        if let Some(p) = self.output.as_mut() {
            resolve(p);
        }
    }

    /// Write the run file as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// [`IoError::Path`] if the file cannot be created, [`IoError::Io`] or
    /// [`IoError::Json`] while writing.
    pub fn save(&self, path: &Path) -> Result<(), IoError> {
        let mut w = BufWriter::new(create_file(path)?);
        serde_json::to_writer_pretty(&mut w, self)?;
        w.flush()?;
        Ok(())
    }

    /// The time parameters as a [`TraceConfig`].
    pub fn config(&self) -> TraceConfig {
        TraceConfig::new(self.duration, self.step_size).with_parallelism(self.parallelism.into())
    }

    /// Initial states in file order.
    pub fn initial_states(&self) -> Vec<RayState> {
        self.rays.iter().map(RaySpec::to_state).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RUN: &str = r#"{
        "bathymetry": "beach.json",
        "duration": 600.0,
        "step_size": 2.0,
        "parallelism": { "threads": 4 },
        "rays": [
            { "x": 0.0, "y": 500.0, "kx": 0.04, "ky": 0.0 },
            { "x": 0.0, "y": 900.0, "period": 10.0, "direction": 0.0 }
        ]
    }"#;

    #[test]
    fn parses_both_ray_forms() {
        let run: RunFile = serde_json::from_str(RUN).unwrap();
        assert_eq!(run.current, None);
        assert_eq!(run.output, None);
        let states = run.initial_states();
        assert_eq!(states[0], RayState::initial(0.0, 500.0, 0.04, 0.0));
        assert!((states[1].kx - wavenumber_from_period(10.0)).abs() < 1e-15);
        assert_eq!(states[1].ky, 0.0);
    }

    #[test]
    fn config_carries_parallelism() {
        let run: RunFile = serde_json::from_str(RUN).unwrap();
        let c = run.config();
        assert_eq!((c.duration, c.step_size), (600.0, 2.0));
        assert_eq!(c.parallelism, Parallelism::Threads(4));
    }

    #[test]
    fn parallelism_defaults_to_auto() {
        let json = r#"{"bathymetry": "b.json", "duration": 1.0, "step_size": 1.0, "rays": []}"#;
        let run: RunFile = serde_json::from_str(json).unwrap();
        assert_eq!(run.parallelism, ParallelismSpec::Auto);
        let seq: ParallelismSpec = serde_json::from_str(r#""sequential""#).unwrap();
        assert_eq!(Parallelism::from(seq), Parallelism::Sequential);
    }

    #[test]
    fn relative_paths_resolve_against_dir() {
        let mut run: RunFile = serde_json::from_str(RUN).unwrap();
        run.output = Some(PathBuf::from("/abs/out.json"));
        run.resolve_paths(Path::new("/data/runs"));
        assert_eq!(run.bathymetry, PathBuf::from("/data/runs/beach.json"));
        assert_eq!(run.output, Some(PathBuf::from("/abs/out.json")));
    }
}
