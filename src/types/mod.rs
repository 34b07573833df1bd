//! Fundamental data types: geodetic positions and monotonic axis sequences.
//!
//! Everything above this module samples the ocean at a [`Geodetic`]
//! position and walks gridded fields along [`Axis`] sequences. Frequency
//! bands are axes too, so the same `find_index` machinery serves both
//! spatial grids and spectral queries.

mod axis;
mod geodetic;

pub use axis::{Axis, AxisError};
pub use geodetic::Geodetic;
