//! The composed ocean model.
//!
//! An [`OceanModel`] bundles the surface, bottom, profile, any volume
//! scattering layers, and an optional ambient noise model into one
//! immutable aggregate. It adds no physics of its own; queries forward to
//! the components. Its value is the sharing contract: every field is a
//! const-shared handle, so once an ocean is built and wrapped in an `Arc`
//! it can be published to any number of propagation workers and never
//! changes under them.

use std::sync::Arc;

use super::ambient::AmbientModel;
use super::boundary::BoundaryModel;
use super::profile::ProfileModel;
use super::volume::VolumeModel;
use crate::types::{Axis, Geodetic};

/// Immutable aggregate of the ocean environment.
///
/// Build with [`OceanModel::new`] and the `with_*` methods, then wrap in
/// an `Arc` and publish through [`super::shared`]. The component handles
/// may be aliased by other oceans; the aggregate graph is immutable and
/// acyclic.
pub struct OceanModel {
    surface: Arc<dyn BoundaryModel>,
    bottom: Arc<dyn BoundaryModel>,
    profile: Arc<dyn ProfileModel>,
    volumes: Vec<Arc<dyn VolumeModel>>,
    ambient: Option<Arc<dyn AmbientModel>>,
}

impl OceanModel {
    /// Compose an ocean from its surface, bottom, and profile.
    pub fn new(
        surface: Arc<dyn BoundaryModel>,
        bottom: Arc<dyn BoundaryModel>,
        profile: Arc<dyn ProfileModel>,
    ) -> Self {
        Self {
            surface,
            bottom,
            profile,
            volumes: Vec::new(),
            ambient: None,
        }
    }

    /// Add a volume scattering layer.
    pub fn with_volume(mut self, volume: Arc<dyn VolumeModel>) -> Self {
        self.volumes.push(volume);
        self
    }

    /// Set the ambient noise model.
    pub fn with_ambient(mut self, ambient: Arc<dyn AmbientModel>) -> Self {
        self.ambient = Some(ambient);
        self
    }

    /// The surface boundary.
    #[inline]
    pub fn surface(&self) -> &Arc<dyn BoundaryModel> {
        &self.surface
    }

    /// The bottom boundary.
    #[inline]
    pub fn bottom(&self) -> &Arc<dyn BoundaryModel> {
        &self.bottom
    }

    /// The sound-speed profile.
    #[inline]
    pub fn profile(&self) -> &Arc<dyn ProfileModel> {
        &self.profile
    }

    /// The volume scattering layers, outermost first.
    #[inline]
    pub fn volumes(&self) -> &[Arc<dyn VolumeModel>] {
        &self.volumes
    }

    /// The ambient noise model, if any.
    #[inline]
    pub fn ambient(&self) -> Option<&Arc<dyn AmbientModel>> {
        self.ambient.as_ref()
    }

    /// Sound speed at a position; forwards to the profile.
    pub fn sound_speed(&self, position: &Geodetic, derivative: Option<&mut f64>) -> f64 {
        self.profile.sound_speed(position, derivative)
    }

    /// Absorption in dB/km per frequency; forwards to the profile.
    pub fn attenuation(&self, position: &Geodetic, frequencies: &Axis) -> Vec<f64> {
        self.profile.attenuation(position, frequencies)
    }

    /// Surface altitude at a position; forwards to the surface boundary.
    pub fn surface_height(&self, position: &Geodetic, gradient: Option<&mut [f64; 2]>) -> f64 {
        self.surface.height(position, gradient)
    }

    /// Bottom altitude at a position; forwards to the bottom boundary.
    pub fn bottom_height(&self, position: &Geodetic, gradient: Option<&mut [f64; 2]>) -> f64 {
        self.bottom.height(position, gradient)
    }
}
