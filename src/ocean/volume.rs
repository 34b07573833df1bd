//! Volume scattering layers.
//!
//! Biologics concentrate in layers that scatter sound back toward the
//! receiver; reverberation models treat each as a horizontal slab with a
//! center depth, a thickness, and a scattering strength. The scattering
//! answer is delegated to a [`ScatteringModel`] injected at construction.

use std::sync::Arc;

use super::scattering::{ScatteringConstant, ScatteringModel};
use crate::types::{Axis, Geodetic};

/// A scattering layer in the ocean volume.
///
/// Implementations hold no mutable state and may be shared freely across
/// threads.
pub trait VolumeModel: Send + Sync {
    /// Center altitude (m) and thickness (m) of the layer at a
    /// horizontal position.
    fn depth(&self, position: &Geodetic) -> (f64, f64);

    /// Scattering strength in dB at each frequency, from the layer's
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

/// A horizontal scattering layer at a fixed altitude.
pub struct VolumeFlat {
    altitude: f64,
    thickness: f64,
    scattering: Arc<dyn ScatteringModel>,
}

impl VolumeFlat {
    /// A layer centered at `altitude` (m, negative below the surface)
    /// with the given `thickness` (m) and a -30 dB scattering strength.
    pub fn new(altitude: f64, thickness: f64) -> Self {
        Self {
            altitude,
            thickness,
            scattering: Arc::new(ScatteringConstant::new(-30.0)),
        }
    }

    /// Replace the scattering delegate.
    pub fn with_scattering(mut self, model: Arc<dyn ScatteringModel>) -> Self {
        self.scattering = model;
        self
    }
}

impl VolumeModel for VolumeFlat {
    fn depth(&self, _position: &Geodetic) -> (f64, f64) {
        (self.altitude, self.thickness)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_layer_geometry() {
        let layer = VolumeFlat::new(-600.0, 150.0);
        let (altitude, thickness) = layer.depth(&Geodetic::surface(10.0, 10.0));
        assert_eq!(altitude, -600.0);
        assert_eq!(thickness, 150.0);
    }

    #[test]
    fn test_flat_layer_scattering_delegate() {
        let layer = VolumeFlat::new(-600.0, 150.0)
            .with_scattering(Arc::new(ScatteringConstant::new(-45.0)));
        let freq = Axis::linear(2000.0, 0.0, 1).unwrap();
        let ss = layer.scattering(&Geodetic::surface(0.0, 0.0), &freq, 0.4, 0.4, 0.0, 0.0);
        assert!((ss[0] + 45.0).abs() < 1e-12);
    }
}
