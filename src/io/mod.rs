//! Ingestion of gridded ocean databases.
//!
//! The grid core consumes `(axes, samples)` pairs; this module produces
//! them from NetCDF files when the `netcdf` feature is enabled. Readers
//! follow the loader contract: axes are delivered in file-dimension
//! order, the sample tensor is row-major with axis 0 slowest, and the
//! returned grid is frozen before the file handle is released. Errors
//! from the underlying library propagate unchanged inside
//! [`IngestError`].

#[cfg(feature = "netcdf")]
mod netcdf_grid;

#[cfg(feature = "netcdf")]
pub use netcdf_grid::{read_bathymetry, read_profile};

use thiserror::Error;

use crate::grid::GridError;

/// Candidate variable names for the latitude coordinate.
pub const LATITUDE_NAMES: &[&str] = &["lat", "latitude", "y"];

/// Candidate variable names for the longitude coordinate.
pub const LONGITUDE_NAMES: &[&str] = &["lon", "longitude", "x"];

/// Candidate variable names for the depth coordinate (positive down).
pub const DEPTH_NAMES: &[&str] = &["depth", "z", "lev"];

/// Candidate variable names for gridded bottom height.
pub const BATHYMETRY_NAMES: &[&str] = &["z", "elevation", "height", "topo", "Band1"];

/// Candidate variable names for gridded water temperature.
pub const TEMPERATURE_NAMES: &[&str] = &["t_an", "temperature", "temp", "water_temp"];

/// Candidate variable names for gridded salinity.
pub const SALINITY_NAMES: &[&str] = &["s_an", "salinity", "salt"];

/// Geographic extraction window in decimal degrees.
#[derive(Clone, Copy, Debug)]
pub struct GeoBounds {
    /// Southern latitude limit
    pub south: f64,
    /// Northern latitude limit
    pub north: f64,
    /// Western longitude limit
    pub west: f64,
    /// Eastern longitude limit
    pub east: f64,
}

impl GeoBounds {
    /// Create a window from its latitude and longitude limits.
    pub fn new(south: f64, north: f64, west: f64, east: f64) -> Self {
        Self {
            south,
            north,
            west,
            east,
        }
    }
}

/// Error raised while reading an external database into a grid.
#[derive(Debug, Error)]
pub enum IngestError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// NetCDF library error
    #[cfg(feature = "netcdf")]
    #[error("NetCDF error: {0}")]
    NetCDF(#[from] netcdf::Error),

    /// No variable with a recognized name
    #[error("missing variable: {0}")]
    MissingVariable(String),

    /// The file's contents cannot back a grid
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// The extracted axes and samples do not form a valid grid
    #[error(transparent)]
    Grid(#[from] GridError),
}
