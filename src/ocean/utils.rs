//! Canned ocean builders.
//!
//! Assembles complete oceans from a few parameters and publishes them
//! through the [`super::shared`] registry: an analytic isovelocity ocean
//! for regression tests, and a simple but realistic ocean from gridded
//! bathymetry and water-column databases.

use std::sync::Arc;

use thiserror::Error;

use super::attenuation::AttenuationConstant;
use super::boundary::BoundaryFlat;
use super::model::OceanModel;
use super::profile::ProfileLinear;
use super::reflect_loss::ReflectLossConstant;
use super::scattering::ScatteringConstant;
use super::shared;
use super::OceanError;
use crate::grid::GridError;

/// Error raised while assembling a canned ocean.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A model rejected its parameters
    #[error(transparent)]
    Config(#[from] OceanError),

    /// A grid could not be assembled
    #[error(transparent)]
    Grid(#[from] GridError),

    /// A database could not be read
    #[cfg(feature = "netcdf")]
    #[error(transparent)]
    Ingest(#[from] crate::io::IngestError),
}

/// Create and publish an isovelocity ocean with no absorption and a flat
/// bottom.
///
/// The surface is a pressure-release reflector, the bottom loses
/// `bottom_loss` dB per bounce, both scatter at -30 dB, and the water is
/// 1500 m/s everywhere. `depth` is positive down in meters.
pub fn make_iso(depth: f64, bottom_loss: f64) {
    let surface = BoundaryFlat::new(0.0)
        .with_reflect_loss(Arc::new(ReflectLossConstant::with_phase(
            0.0,
            std::f64::consts::PI,
        )))
        .with_scattering(Arc::new(ScatteringConstant::new(-30.0)));

    let bottom = BoundaryFlat::new(-depth)
        .with_reflect_loss(Arc::new(ReflectLossConstant::new(bottom_loss)))
        .with_scattering(Arc::new(ScatteringConstant::new(-30.0)));

    let profile =
        ProfileLinear::new(1500.0).with_attenuation(Arc::new(AttenuationConstant::default()));

    let ocean = OceanModel::new(Arc::new(surface), Arc::new(bottom), Arc::new(profile));
    shared::update(Arc::new(ocean));
}

/// Create and publish a simple but realistic ocean from gridded
/// databases.
///
/// The surface combines Eckart reflection loss and Chapman-Harris
/// scattering for the given wind speed. The bottom comes from a
/// bathymetry database with Rayleigh reflection for the given province
/// and Lambert scattering. The profile derives sound speed from
/// temperature and salinity fields via Mackenzie's formula.
#[cfg(feature = "netcdf")]
pub fn make_basic(
    bathymetry: &std::path::Path,
    temperature: &std::path::Path,
    salinity: &std::path::Path,
    bounds: &crate::io::GeoBounds,
    wind_speed: f64,
    bottom_type: super::reflect_loss::BottomType,
) -> Result<(), BuildError> {
    use super::boundary::BoundaryGrid;
    use super::profile::ProfileGrid;
    use super::reflect_loss::{ReflectLossEckart, ReflectLossRayleigh};
    use super::scattering::{ScatteringChapman, ScatteringLambert};
    use crate::grid::{mackenzie, BathyGrid};
    use crate::io;

    // wind-driven surface
    let surface = BoundaryFlat::new(0.0)
        .with_reflect_loss(Arc::new(ReflectLossEckart::new(wind_speed)?))
        .with_scattering(Arc::new(ScatteringChapman::new(wind_speed)?));

    // bathymetry database bottom
    let grid = Arc::new(io::read_bathymetry(bathymetry, bounds)?);
    let bottom = BoundaryGrid::new(Arc::new(BathyGrid::new(grid)?))
        .with_reflect_loss(Arc::new(ReflectLossRayleigh::new(bottom_type)))
        .with_scattering(Arc::new(ScatteringLambert::new()));

    // sound speed from temperature and salinity
    let temp = io::read_profile(temperature, io::TEMPERATURE_NAMES, bounds, None)?;
    let salt = io::read_profile(salinity, io::SALINITY_NAMES, bounds, None)?;
    let ssp = Arc::new(mackenzie::sound_speed_grid(&temp, &salt)?);
    let profile = ProfileGrid::new(ssp);

    let ocean = OceanModel::new(Arc::new(surface), Arc::new(bottom), Arc::new(profile));
    shared::update(Arc::new(ocean));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocean::REGISTRY_TEST_LOCK;
    use crate::types::{Axis, Geodetic};

    const TOL: f64 = 1e-10;

    #[test]
    fn test_make_iso_publishes_expected_ocean() {
        let _guard = REGISTRY_TEST_LOCK.lock().unwrap();
        shared::reset();

        make_iso(100.0, 3.0);
        let ocean = shared::current().expect("make_iso publishes");

        let pos = Geodetic::new(10.0, 20.0, -50.0);
        assert!((ocean.sound_speed(&pos, None) - 1500.0).abs() < TOL);
        assert!((ocean.bottom_height(&pos, None) + 100.0).abs() < TOL);
        assert!(ocean.surface_height(&pos, None).abs() < TOL);

        let freq = Axis::linear(1000.0, 0.0, 1).unwrap();
        assert!(ocean.attenuation(&pos, &freq)[0].abs() < TOL);
        let loss = ocean.bottom().reflect_loss(&pos, &freq, 0.5, None);
        assert!((loss[0] - 3.0).abs() < TOL);

        shared::reset();
    }
}
