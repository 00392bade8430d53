//! Error type for the file layer.

use std::error::Error;
use std::fmt;
use std::io;
use std::fs::File;
use std::path::{Path, PathBuf};

use wavetrace_core::{GridError, RequestError, TraceError};

/// Errors from loading datasets and run files or writing trajectories.
#[derive(Debug)]
pub enum IoError {
    /// An I/O error occurred during read or write.
    Io(io::Error),
    /// A file is not valid JSON for the expected layout.
    Json(serde_json::Error),
    /// A dataset lacks a required variable.
    MissingVariable {
        /// The variable that was looked up.
        name: String,
        /// Variables the dataset does contain, in file order.
        available: Vec<String>,
    },
    /// A dataset's coordinates or values cannot form a grid.
    Grid(GridError),
    /// A run file describes an invalid trace.
    Request(RequestError),
    /// A file could not be opened or created.
    Path {
        /// The offending path.
        path: PathBuf,
        /// The underlying failure.
        source: io::Error,
    },
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Json(e) => write!(f, "JSON error: {e}"),
            Self::MissingVariable { name, available } => write!(
                f,
                "variable '{name}' not found (available: {})",
                available.join(", ")
            ),
            Self::Grid(e) => write!(f, "invalid grid: {e}"),
            Self::Request(e) => write!(f, "invalid request: {e}"),
            Self::Path { path, source } => write!(f, "{}: {source}", path.display()),
        }
    }
}

impl Error for IoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Grid(e) => Some(e),
            Self::Request(e) => Some(e),
            Self::Path { source, .. } => Some(source),
            Self::MissingVariable { .. } => None,
        }
    }
}

/// Create `path` for writing, naming it in the error on failure.
pub(crate) fn create_file(path: &Path) -> Result<File, IoError> {
    File::create(path).map_err(|source| IoError::Path {
        path: path.to_path_buf(),
        source,
    })
}

impl From<io::Error> for IoError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<GridError> for IoError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<RequestError> for IoError {
    fn from(e: RequestError) -> Self {
        Self::Request(e)
    }
}

impl From<TraceError> for IoError {
    fn from(e: TraceError) -> Self {
        match e {
            TraceError::Grid(e) => Self::Grid(e),
            TraceError::Request(e) => Self::Request(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_variable_lists_available() {
        let e = IoError::MissingVariable {
            name: "depth".into(),
            available: vec!["u".into(), "v".into()],
        };
        assert_eq!(e.to_string(), "variable 'depth' not found (available: u, v)");
        assert!(e.source().is_none());
    }

    #[test]
    fn trace_error_unwraps_into_matching_variant() {
        let e: IoError = TraceError::Request(RequestError::NoRays).into();
        assert!(matches!(e, IoError::Request(RequestError::NoRays)));
        assert!(e.source().is_some());
    }

    #[test]
    fn path_error_names_file() {
        let e = IoError::Path {
            path: PathBuf::from("missing.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(e.to_string(), "missing.json: no such file");
    }
}
