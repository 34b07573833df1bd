//! # uwa-rs
//!
//! Environmental sampling core for underwater-acoustics modeling.
//!
//! Given a geospatial query (latitude, longitude, depth) and a frequency
//! band, this crate answers the questions a ray-tracing propagation
//! engine asks of the ocean: sound speed and its gradient, absorption,
//! surface and bottom geometry, reflection loss, scattering strength,
//! and ambient noise.
//!
//! The crate provides:
//! - Monotonic axis sequences with O(1)/O(log n) interval lookup
//! - An immutable N-dimensional data grid with a recursive reference
//!   interpolator (nearest / linear / piecewise cubic Hermite)
//! - A fast non-recursive 2-D bathymetry interpolator built on
//!   precomputed derivative tables and an inverse bicubic matrix
//! - Composable ocean models: profiles, boundaries, volume layers, and
//!   the reflection / scattering / attenuation / ambient-noise leaves
//! - A process-wide registry that publishes immutable ocean snapshots to
//!   concurrent propagation workers
//!
//! Everything below the registry is immutable after construction and
//! shared through `Arc`; queries are pure functions that need no
//! synchronization.

pub mod grid;
pub mod io;
pub mod ocean;
pub mod types;

// Re-export main types for convenience

// fundamental types
pub use types::{Axis, AxisError, Geodetic};

// gridded fields
pub use grid::{BathyGrid, DataGrid, EdgeLimit, GridError, InterpType};

// ocean components
pub use ocean::{
    AmbientConstant, AmbientModel, AmbientWenz, AttenuationConstant, AttenuationModel,
    AttenuationThorp, BottomType, BoundaryFlat, BoundaryGrid, BoundaryModel, BoundarySlope,
    OceanError, OceanModel, ProfileCatenary, ProfileGrid, ProfileLinear, ProfileModel,
    ProfileMunk, ProfileN2, RainRate, ReflectLossBeckmann, ReflectLossConstant, ReflectLossEckart,
    ReflectLossModel, ReflectLossRayleigh, ScatteringChapman, ScatteringConstant,
    ScatteringLambert, ScatteringModel, VolumeFlat, VolumeModel,
};

// ingestion
pub use io::{GeoBounds, IngestError};
#[cfg(feature = "netcdf")]
pub use io::{read_bathymetry, read_profile};
