//! Ocean boundary models: the surface and the bottom.
//!
//! A boundary answers three questions: where is it, how much energy does
//! a specular bounce lose, and how strongly does it scatter. Geometry
//! comes from the variant itself; the loss and scattering answers are
//! delegated to a [`ReflectLossModel`] and a [`ScatteringModel`] injected
//! at construction, so a fully configured boundary is immutable and can
//! be shared across every worker thread.
//!
//! Height is reported as altitude (z positive up, zero at mean sea
//! level): a flat bottom 100 m down is `BoundaryFlat::new(-100.0)`. The
//! optional height gradient is `(∂z/∂lat, ∂z/∂lon)` in meters per degree.

use std::sync::Arc;

use super::reflect_loss::{ReflectLossConstant, ReflectLossModel};
use super::scattering::{ScatteringConstant, ScatteringModel};
use crate::grid::BathyGrid;
use crate::types::{Axis, Geodetic};

/// Default scattering strength for boundaries built without an explicit
/// delegate (dB).
const DEFAULT_SCATTERING: f64 = -30.0;

/// Geometry, reflection loss, and scattering of an ocean boundary.
///
/// Implementations hold no mutable state and may be shared freely across
/// threads.
pub trait BoundaryModel: Send + Sync {
    /// Boundary altitude in meters at a horizontal position, optionally
    /// with the height gradient in meters per degree of latitude and
    /// longitude.
    fn height(&self, position: &Geodetic, gradient: Option<&mut [f64; 2]>) -> f64;

    /// Reflection amplitude loss in dB at each frequency, from the
    /// boundary's reflection-loss delegate.
    fn reflect_loss(
        &self,
        position: &Geodetic,
        frequencies: &Axis,
        angle: f64,
        phase: Option<&mut [f64]>,
    ) -> Vec<f64>;

    /// Scattering strength in dB at each frequency, from the boundary's
    /// scattering delegate.
    #[allow(clippy::too_many_arguments)]
    fn scattering(
        &self,
        position: &Geodetic,
        frequencies: &Axis,
        de_incident: f64,
        de_scattered: f64,
        az_incident: f64,
        az_scattered: f64,
    ) -> Vec<f64>;
}

/// A horizontal boundary at a fixed altitude.
pub struct BoundaryFlat {
    altitude: f64,
    reflect_loss: Arc<dyn ReflectLossModel>,
    scattering: Arc<dyn ScatteringModel>,
}

impl BoundaryFlat {
    /// A flat boundary with a perfect reflector and the default
    /// scattering strength.
    pub fn new(altitude: f64) -> Self {
        Self {
            altitude,
            reflect_loss: Arc::new(ReflectLossConstant::new(0.0)),
            scattering: Arc::new(ScatteringConstant::new(DEFAULT_SCATTERING)),
        }
    }

    /// Replace the reflection-loss delegate.
    pub fn with_reflect_loss(mut self, model: Arc<dyn ReflectLossModel>) -> Self {
        self.reflect_loss = model;
        self
    }

    /// Replace the scattering delegate.
    pub fn with_scattering(mut self, model: Arc<dyn ScatteringModel>) -> Self {
        self.scattering = model;
        self
    }
}

impl BoundaryModel for BoundaryFlat {
    fn height(&self, _position: &Geodetic, gradient: Option<&mut [f64; 2]>) -> f64 {
        if let Some(out) = gradient {
            *out = [0.0, 0.0];
        }
        self.altitude
    }

    fn reflect_loss(
        &self,
        position: &Geodetic,
        frequencies: &Axis,
        angle: f64,
        phase: Option<&mut [f64]>,
    ) -> Vec<f64> {
        self.reflect_loss
            .reflect_loss(position, frequencies, angle, phase)
    }

    fn scattering(
        &self,
        position: &Geodetic,
        frequencies: &Axis,
        de_incident: f64,
        de_scattered: f64,
        az_incident: f64,
        az_scattered: f64,
    ) -> Vec<f64> {
        self.scattering.scattering(
            position,
            frequencies,
            de_incident,
            de_scattered,
            az_incident,
            az_scattered,
        )
    }
}

/// A planar sloped boundary through a reference point.
///
/// `z(lat, lon) = z0 + g_lat (lat - lat0) + g_lon (lon - lon0)` with the
/// gradients in meters per degree.
pub struct BoundarySlope {
    reference: Geodetic,
    grad_lat: f64,
    grad_lon: f64,
    reflect_loss: Arc<dyn ReflectLossModel>,
    scattering: Arc<dyn ScatteringModel>,
}

impl BoundarySlope {
    /// A sloped boundary through `reference` with the given height
    /// gradients, a perfect reflector, and the default scattering
    /// strength.
    pub fn new(reference: Geodetic, grad_lat: f64, grad_lon: f64) -> Self {
        Self {
            reference,
            grad_lat,
            grad_lon,
            reflect_loss: Arc::new(ReflectLossConstant::new(0.0)),
            scattering: Arc::new(ScatteringConstant::new(DEFAULT_SCATTERING)),
        }
    }

    /// Replace the reflection-loss delegate.
    pub fn with_reflect_loss(mut self, model: Arc<dyn ReflectLossModel>) -> Self {
        self.reflect_loss = model;
        self
    }

    /// Replace the scattering delegate.
    pub fn with_scattering(mut self, model: Arc<dyn ScatteringModel>) -> Self {
        self.scattering = model;
        self
    }
}

impl BoundaryModel for BoundarySlope {
    fn height(&self, position: &Geodetic, gradient: Option<&mut [f64; 2]>) -> f64 {
        if let Some(out) = gradient {
            *out = [self.grad_lat, self.grad_lon];
        }
        self.reference.altitude
            + self.grad_lat * (position.latitude - self.reference.latitude)
            + self.grad_lon * (position.longitude - self.reference.longitude)
    }

    fn reflect_loss(
        &self,
        position: &Geodetic,
        frequencies: &Axis,
        angle: f64,
        phase: Option<&mut [f64]>,
    ) -> Vec<f64> {
        self.reflect_loss
            .reflect_loss(position, frequencies, angle, phase)
    }

    fn scattering(
        &self,
        position: &Geodetic,
        frequencies: &Axis,
        de_incident: f64,
        de_scattered: f64,
        az_incident: f64,
        az_scattered: f64,
    ) -> Vec<f64> {
        self.scattering.scattering(
            position,
            frequencies,
            de_incident,
            de_scattered,
            az_incident,
            az_scattered,
        )
    }
}

/// A bottom whose depth comes from a gridded bathymetry database.
///
/// Height queries go through the fast 2-D interpolator; the grid axes are
/// `(latitude, longitude)` in degrees and the samples are altitudes in
/// meters (negative below sea level).
pub struct BoundaryGrid {
    bathymetry: Arc<BathyGrid>,
    reflect_loss: Arc<dyn ReflectLossModel>,
    scattering: Arc<dyn ScatteringModel>,
}

impl BoundaryGrid {
    /// A gridded boundary with a perfect reflector and the default
    /// scattering strength.
    pub fn new(bathymetry: Arc<BathyGrid>) -> Self {
        Self {
            bathymetry,
            reflect_loss: Arc::new(ReflectLossConstant::new(0.0)),
            scattering: Arc::new(ScatteringConstant::new(DEFAULT_SCATTERING)),
        }
    }

    /// Replace the reflection-loss delegate.
    pub fn with_reflect_loss(mut self, model: Arc<dyn ReflectLossModel>) -> Self {
        self.reflect_loss = model;
        self
    }

    /// Replace the scattering delegate.
    pub fn with_scattering(mut self, model: Arc<dyn ScatteringModel>) -> Self {
        self.scattering = model;
        self
    }
}

impl BoundaryModel for BoundaryGrid {
    fn height(&self, position: &Geodetic, gradient: Option<&mut [f64; 2]>) -> f64 {
        let location = [position.latitude, position.longitude];
        match gradient {
            Some(out) => self.bathymetry.interpolate(&location, Some(out)),
            None => self.bathymetry.interpolate(&location, None),
        }
    }

    fn reflect_loss(
        &self,
        position: &Geodetic,
        frequencies: &Axis,
        angle: f64,
        phase: Option<&mut [f64]>,
    ) -> Vec<f64> {
        self.reflect_loss
            .reflect_loss(position, frequencies, angle, phase)
    }

    fn scattering(
        &self,
        position: &Geodetic,
        frequencies: &Axis,
        de_incident: f64,
        de_scattered: f64,
        az_incident: f64,
        az_scattered: f64,
    ) -> Vec<f64> {
        self.scattering.scattering(
            position,
            frequencies,
            de_incident,
            de_scattered,
            az_incident,
            az_scattered,
        )
    }
}
