//! JSON gridded datasets.
//!
//! A dataset holds shared `x`/`y` coordinates and any number of named 2-D
//! variables, each a list of rows indexed by `y`:
//!
//! ```json
//! {
//!   "coords": { "x": [0.0, 100.0, 200.0], "y": [0.0, 100.0] },
//!   "data_vars": {
//!     "depth": [[50.0, 40.0, 30.0], [50.0, 40.0, null]]
//!   }
//! }
//! ```
//!
//! `null` marks a missing value (typically land) and loads as NaN, which
//! the ray equations treat as dry. Variable order is preserved on save.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use indexmap::IndexMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use wavetrace_field::{CurrentGrid, FieldGrid};

use crate::error::{create_file, IoError};

/// Variable name of the bathymetry in a depth dataset.
pub const DEPTH_VAR: &str = "depth";
/// Variable name of the eastward current component.
pub const U_VAR: &str = "u";
/// Variable name of the northward current component.
pub const V_VAR: &str = "v";

/// Shared coordinate vectors.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Coords {
    /// Ascending x coordinates (m).
    pub x: Vec<f64>,
    /// Ascending y coordinates (m).
    pub y: Vec<f64>,
}

/// On-disk form of a set of gridded variables.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GriddedDataset {
    /// The grid axes.
    pub coords: Coords,
    /// Named variables; each is one row per `y` coordinate.
    pub data_vars: IndexMap<String, Vec<Vec<Option<f64>>>>,
}

impl GriddedDataset {
    /// Empty dataset on the given axes.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            coords: Coords { x, y },
            data_vars: IndexMap::new(),
        }
    }

    /// Dataset holding one grid as variable `name`.
    pub fn from_grid(name: &str, grid: &FieldGrid) -> Self {
        let mut ds = Self::new(grid.x().coords().to_vec(), grid.y().coords().to_vec());
        ds.insert(name, grid);
        ds
    }

    /// Dataset holding both components of a current as `u` and `v`.
    pub fn from_current(current: &CurrentGrid) -> Self {
        let mut ds = Self::from_grid(U_VAR, current.u());
        ds.insert(V_VAR, current.v());
        ds
    }

    /// Store `grid`'s values as variable `name`, replacing any previous one.
    ///
    /// The grid's axes are not checked against [`coords`](Self::coords);
    /// a mismatch surfaces when the variable is loaded.
    pub fn insert(&mut self, name: &str, grid: &FieldGrid) {
        let nx = grid.x().len();
        let rows = grid
            .values()
            .chunks(nx)
            .map(|row| row.iter().map(|v| v.is_finite().then_some(*v)).collect())
            .collect();
        self.data_vars.insert(name.to_string(), rows);
    }

    /// Variable names in file order.
    pub fn variable_names(&self) -> Vec<String> {
        self.data_vars.keys().cloned().collect()
    }

    /// Build the grid for variable `name`.
    ///
    /// # Errors
    ///
    /// [`IoError::MissingVariable`] if there is no such variable, or
    /// [`IoError::Grid`] if the coordinates or row shapes are invalid.
    pub fn grid(&self, name: &str) -> Result<FieldGrid, IoError> {
        let rows = self
            .data_vars
            .get(name)
            .ok_or_else(|| IoError::MissingVariable {
                name: name.to_string(),
                available: self.variable_names(),
            })?;
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|v| v.unwrap_or(f64::NAN)).collect())
            .collect();
        let grid = FieldGrid::from_rows(self.coords.x.clone(), self.coords.y.clone(), rows)?;
        debug!("loaded variable '{name}' with shape {:?}", grid.shape());
        Ok(grid)
    }

    /// Build the bathymetry from the `depth` variable.
    ///
    /// # Errors
    ///
    /// As for [`grid`](Self::grid).
    pub fn bathymetry(&self) -> Result<FieldGrid, IoError> {
        self.grid(DEPTH_VAR)
    }

    /// Build the current from the `u` and `v` variables.
    ///
    /// # Errors
    ///
    /// As for [`grid`](Self::grid).
    pub fn current(&self) -> Result<CurrentGrid, IoError> {
        Ok(CurrentGrid::new(self.grid(U_VAR)?, self.grid(V_VAR)?)?)
    }

    /// Parse a dataset from JSON.
    ///
    /// # Errors
    ///
    /// [`IoError::Json`] on malformed input.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, IoError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Read a dataset from a JSON file.
    ///
    /// # Errors
    ///
    /// [`IoError::Path`] if the file cannot be opened, [`IoError::Json`]
    /// if it is malformed.
    pub fn open(path: &Path) -> Result<Self, IoError> {
        let file = File::open(path).map_err(|source| IoError::Path {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Write the dataset as JSON.
    ///
    /// # Errors
    ///
    /// [`IoError::Json`] or [`IoError::Io`] from the writer.
    pub fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), IoError> {
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Write the dataset to a JSON file, replacing it if it exists.
    ///
    /// # Errors
    ///
    /// [`IoError::Path`] if the file cannot be created, otherwise as for
    /// [`to_writer`](Self::to_writer).
    pub fn save(&self, path: &Path) -> Result<(), IoError> {
        self.to_writer(BufWriter::new(create_file(path)?))
    }
}

/// Load a bathymetry grid from the `depth` variable of a JSON dataset.
///
/// # Errors
///
/// Any error from [`GriddedDataset::open`] or
/// [`GriddedDataset::bathymetry`].
pub fn load_bathymetry(path: &Path) -> Result<FieldGrid, IoError> {
    let grid = GriddedDataset::open(path)?.bathymetry()?;
    info!(
        "bathymetry {} ({} x {} nodes, {})",
        path.display(),
        grid.x().len(),
        grid.y().len(),
        grid.bounds()
    );
    Ok(grid)
}

/// Load a current from the `u` and `v` variables of a JSON dataset.
///
/// # Errors
///
/// Any error from [`GriddedDataset::open`] or
/// [`GriddedDataset::current`].
pub fn load_current(path: &Path) -> Result<CurrentGrid, IoError> {
    let current = GriddedDataset::open(path)?.current()?;
    info!("current {} ({})", path.display(), current.bounds());
    Ok(current)
}
