//! Gridded ocean fields and their interpolators.
//!
//! An N-dimensional [`DataGrid`] owns its axes and a flat sample buffer,
//! frozen at construction and shared between threads through `Arc`. The
//! grid's own recursive interpolator is the correctness reference; the
//! 2-D [`BathyGrid`] wrapper trades memory for speed by precomputing
//! finite-difference derivative tables and evaluating a closed-form
//! bicubic polynomial instead of recursing. Both paths must agree inside
//! the domain, and the test suites hold them to that.
//!
//! [`mackenzie`] derives a sound-speed grid from temperature and salinity
//! grids so that measured water-column databases plug into the same
//! machinery as analytic profiles.

mod bathy_grid;
mod data_grid;
pub mod mackenzie;

pub use bathy_grid::BathyGrid;
pub use data_grid::{DataGrid, EdgeLimit, InterpType};

use thiserror::Error;

use crate::types::AxisError;

/// Error raised while assembling a grid or shaping a batch query.
///
/// Construction is the only phase that can fail; once a grid is built its
/// queries are total functions.
#[derive(Debug, Error)]
pub enum GridError {
    /// Axis description was not a valid monotonic sequence
    #[error(transparent)]
    Axis(#[from] AxisError),

    /// Interpolation needs at least one full interval per axis
    #[error("axis {axis} has {size} samples; interpolation needs at least 2")]
    AxisTooShort {
        /// Which axis is too short
        axis: usize,
        /// Number of samples it carries
        size: usize,
    },

    /// Sample buffer does not match the axis extents
    #[error("sample buffer holds {actual} values but the axes imply {expected}")]
    DataSizeMismatch {
        /// Product of the axis sizes
        expected: usize,
        /// Length of the supplied buffer
        actual: usize,
    },

    /// The fast 2-D wrapper dispatches on a single interpolation kind
    #[error("fast 2-D interpolation requires the same interpolation kind on both axes")]
    MixedInterpTypes,

    /// Batch buffers must share one shape
    #[error("batch buffer shapes disagree: {expected_rows}x{expected_cols} vs {rows}x{cols}")]
    ShapeMismatch {
        /// Rows of the coordinate buffers
        expected_rows: usize,
        /// Columns of the coordinate buffers
        expected_cols: usize,
        /// Rows of the offending buffer
        rows: usize,
        /// Columns of the offending buffer
        cols: usize,
    },
}
