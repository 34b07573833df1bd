//! Sound-speed profile models.
//!
//! A profile answers two questions at any point in the water column: how
//! fast does sound travel, and how strongly is it absorbed. The speed
//! query optionally returns the vertical gradient `∂c/∂z` (z positive
//! up), which is what bends rays. Absorption is delegated to an
//! [`AttenuationModel`] injected at construction; Thorp is the default.
//!
//! The analytic profiles are the canonical test oceans of the
//! propagation literature; [`ProfileGrid`] samples a measured 3-D field
//! through the generic grid interpolator.
//!
//! # References
//!
//! - W.H. Munk, "Sound channel in an exponentially stratified ocean with
//!   applications to SOFAR", J. Acoust. Soc. Am. 55(2), 1974.
//! - F.B. Jensen et al., *Computational Ocean Acoustics*, 2nd ed., ch. 1.

use std::sync::Arc;

use super::attenuation::{AttenuationModel, AttenuationThorp};
use crate::grid::DataGrid;
use crate::types::{Axis, Geodetic};

/// Sound speed and absorption of the water column.
///
/// Implementations hold no mutable state and may be shared freely across
/// threads.
pub trait ProfileModel: Send + Sync {
    /// Sound speed in m/s at a position, optionally with the vertical
    /// gradient `∂c/∂z` in 1/s (z positive up).
    fn sound_speed(&self, position: &Geodetic, derivative: Option<&mut f64>) -> f64;

    /// Absorption coefficient in dB/km at each frequency, from the
    /// profile's attenuation delegate.
    fn attenuation(&self, position: &Geodetic, frequencies: &Axis) -> Vec<f64>;
}

/// Constant sound speed, optionally with a constant depth gradient.
///
/// `c(d) = c0 + g·d` with `d` the depth in meters (positive down).
pub struct ProfileLinear {
    speed: f64,
    gradient: f64,
    attenuation: Arc<dyn AttenuationModel>,
}

impl ProfileLinear {
    /// Isovelocity water at `speed` m/s.
    pub fn new(speed: f64) -> Self {
        Self {
            speed,
            gradient: 0.0,
            attenuation: Arc::new(AttenuationThorp),
        }
    }

    /// Linear profile with a depth gradient in 1/s (positive means speed
    /// grows with depth).
    pub fn with_gradient(speed: f64, gradient: f64) -> Self {
        Self {
            speed,
            gradient,
            attenuation: Arc::new(AttenuationThorp),
        }
    }

    /// Replace the attenuation delegate.
    pub fn with_attenuation(mut self, attenuation: Arc<dyn AttenuationModel>) -> Self {
        self.attenuation = attenuation;
        self
    }
}

impl ProfileModel for ProfileLinear {
    fn sound_speed(&self, position: &Geodetic, derivative: Option<&mut f64>) -> f64 {
        if let Some(out) = derivative {
            *out = -self.gradient;
        }
        self.speed + self.gradient * position.depth()
    }

    fn attenuation(&self, position: &Geodetic, frequencies: &Axis) -> Vec<f64> {
        self.attenuation.attenuation(position, frequencies)
    }
}

/// Munk's idealized deep sound channel.
///
/// With `η = 2 (d - d1) / b`:
///
/// ```text
/// c(d) = c1 [1 + ε (η - 1 + e^(-η))]
/// ```
///
/// The defaults `d1 = 1300 m`, `b = 1300 m`, `c1 = 1500 m/s`,
/// `ε = 7.37e-3` put the channel axis at 1300 m.
pub struct ProfileMunk {
    axis_depth: f64,
    scale: f64,
    axis_speed: f64,
    epsilon: f64,
    attenuation: Arc<dyn AttenuationModel>,
}

impl Default for ProfileMunk {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileMunk {
    /// The canonical Munk profile.
    pub fn new() -> Self {
        Self::with_params(1300.0, 1300.0, 1500.0, 7.37e-3)
    }

    /// A Munk profile with explicit axis depth, scale length, axis speed,
    /// and perturbation strength.
    pub fn with_params(axis_depth: f64, scale: f64, axis_speed: f64, epsilon: f64) -> Self {
        Self {
            axis_depth,
            scale,
            axis_speed,
            epsilon,
            attenuation: Arc::new(AttenuationThorp),
        }
    }

    /// Replace the attenuation delegate.
    pub fn with_attenuation(mut self, attenuation: Arc<dyn AttenuationModel>) -> Self {
        self.attenuation = attenuation;
        self
    }
}

impl ProfileModel for ProfileMunk {
    fn sound_speed(&self, position: &Geodetic, derivative: Option<&mut f64>) -> f64 {
        let eta = 2.0 * (position.depth() - self.axis_depth) / self.scale;
        let speed = self.axis_speed * (1.0 + self.epsilon * (eta - 1.0 + (-eta).exp()));
        if let Some(out) = derivative {
            // ∂c/∂z = -∂c/∂d
            let dc_dd = self.axis_speed * self.epsilon * (1.0 - (-eta).exp()) * 2.0 / self.scale;
            *out = -dc_dd;
        }
        speed
    }

    fn attenuation(&self, position: &Geodetic, frequencies: &Axis) -> Vec<f64> {
        self.attenuation.attenuation(position, frequencies)
    }
}

/// N²-linear profile: linear squared index of refraction.
///
/// `c(d) = c0 / sqrt(1 + 2 g0 d / c0)`, the classic profile with exactly
/// circular ray paths.
pub struct ProfileN2 {
    surface_speed: f64,
    gradient: f64,
    attenuation: Arc<dyn AttenuationModel>,
}

impl ProfileN2 {
    /// Create from the surface speed (m/s) and surface gradient (1/s).
    pub fn new(surface_speed: f64, gradient: f64) -> Self {
        Self {
            surface_speed,
            gradient,
            attenuation: Arc::new(AttenuationThorp),
        }
    }

    /// Replace the attenuation delegate.
    pub fn with_attenuation(mut self, attenuation: Arc<dyn AttenuationModel>) -> Self {
        self.attenuation = attenuation;
        self
    }
}

impl ProfileModel for ProfileN2 {
    fn sound_speed(&self, position: &Geodetic, derivative: Option<&mut f64>) -> f64 {
        let ratio = 1.0 + 2.0 * self.gradient * position.depth() / self.surface_speed;
        let speed = self.surface_speed / ratio.sqrt();
        if let Some(out) = derivative {
            let dc_dd = -self.gradient * ratio.powf(-1.5);
            *out = -dc_dd;
        }
        speed
    }

    fn attenuation(&self, position: &Geodetic, frequencies: &Axis) -> Vec<f64> {
        self.attenuation.attenuation(position, frequencies)
    }
}

/// Catenary profile: `c(d) = c1 cosh((d - d1) / b)`.
///
/// An idealized sound channel whose rays are cycloids; the channel axis
/// sits at depth `d1`.
pub struct ProfileCatenary {
    axis_speed: f64,
    scale: f64,
    axis_depth: f64,
    attenuation: Arc<dyn AttenuationModel>,
}

impl ProfileCatenary {
    /// Create from the axis speed (m/s), scale length (m), and axis
    /// depth (m).
    pub fn new(axis_speed: f64, scale: f64, axis_depth: f64) -> Self {
        Self {
            axis_speed,
            scale,
            axis_depth,
            attenuation: Arc::new(AttenuationThorp),
        }
    }

    /// Replace the attenuation delegate.
    pub fn with_attenuation(mut self, attenuation: Arc<dyn AttenuationModel>) -> Self {
        self.attenuation = attenuation;
        self
    }
}

impl ProfileModel for ProfileCatenary {
    fn sound_speed(&self, position: &Geodetic, derivative: Option<&mut f64>) -> f64 {
        let arg = (position.depth() - self.axis_depth) / self.scale;
        let speed = self.axis_speed * arg.cosh();
        if let Some(out) = derivative {
            let dc_dd = self.axis_speed * arg.sinh() / self.scale;
            *out = -dc_dd;
        }
        speed
    }

    fn attenuation(&self, position: &Geodetic, frequencies: &Axis) -> Vec<f64> {
        self.attenuation.attenuation(position, frequencies)
    }
}

/// Sound speed sampled from a 3-D `(altitude, latitude, longitude)` grid.
///
/// The grid is usually the output of [`crate::grid::mackenzie`] over
/// measured temperature and salinity fields.
pub struct ProfileGrid {
    grid: Arc<DataGrid<3>>,
    attenuation: Arc<dyn AttenuationModel>,
}

impl ProfileGrid {
    /// Wrap a sound-speed grid with Thorp absorption.
    pub fn new(grid: Arc<DataGrid<3>>) -> Self {
        Self {
            grid,
            attenuation: Arc::new(AttenuationThorp),
        }
    }

    /// Replace the attenuation delegate.
    pub fn with_attenuation(mut self, attenuation: Arc<dyn AttenuationModel>) -> Self {
        self.attenuation = attenuation;
        self
    }
}

impl ProfileModel for ProfileGrid {
    fn sound_speed(&self, position: &Geodetic, derivative: Option<&mut f64>) -> f64 {
        let location = [position.altitude, position.latitude, position.longitude];
        match derivative {
            Some(out) => {
                let mut grad = [0.0; 3];
                let speed = self.grid.interpolate(&location, Some(&mut grad));
                *out = grad[0];
                speed
            }
            None => self.grid.interpolate(&location, None),
        }
    }

    fn attenuation(&self, position: &Geodetic, frequencies: &Axis) -> Vec<f64> {
        self.attenuation.attenuation(position, frequencies)
    }
}
