//! Boundary and volume scattering-strength models.
//!
//! Reflection loss describes the specular part of a boundary interaction;
//! scattering strength describes the diffuse part that reverberation is
//! made of. Models report strength in dB (typically negative) per
//! frequency, as a function of the incident and scattered grazing angles
//! and azimuths.
//!
//! # References
//!
//! - R.P. Chapman, J.H. Harris, "Surface backscattering strengths
//!   measured with explosive sound sources", J. Acoust. Soc. Am. 34(10),
//!   1962.
//! - K.V. Mackenzie, "Bottom reverberation for 530- and 1030-cps sound in
//!   deep water", J. Acoust. Soc. Am. 33(11), 1961.

use super::OceanError;
use crate::types::{Axis, Geodetic};

/// Conversion from m/s to knots for the empirical wind curves.
const MS_TO_KNOTS: f64 = 1.943_844_5;

/// Frequency- and angle-dependent scattering strength.
///
/// Implementations hold no mutable state and may be shared freely across
/// threads.
pub trait ScatteringModel: Send + Sync {
    /// Scattering strength in dB at each frequency.
    ///
    /// Grazing angles are in radians from the horizontal; azimuths in
    /// radians. Monostatic backscatter passes the same angles for the
    /// incident and scattered directions.
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

/// Angle- and frequency-independent scattering strength.
#[derive(Clone, Copy, Debug)]
pub struct ScatteringConstant {
    strength: f64,
}

impl ScatteringConstant {
    /// Create a constant scattering strength in dB.
    pub fn new(strength: f64) -> Self {
        Self { strength }
    }
}

impl ScatteringModel for ScatteringConstant {
    fn scattering(
        &self,
        _position: &Geodetic,
        frequencies: &Axis,
        _de_incident: f64,
        _de_scattered: f64,
        _az_incident: f64,
        _az_scattered: f64,
    ) -> Vec<f64> {
        vec![self.strength; frequencies.size()]
    }
}

/// Chapman-Harris empirical sea-surface scattering strength.
///
/// With `θ` the grazing angle in degrees, `U` the wind speed in knots,
/// and `f` the frequency in Hz:
///
/// ```text
/// β = 107 (U f^(1/3))^(-0.58)
/// SS = 3.3 β log₁₀(θ/30) - 42.4 log₁₀ β + 2.6    dB
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ScatteringChapman {
    wind_knots: f64,
}

impl ScatteringChapman {
    /// Create the model for a wind speed in m/s.
    pub fn new(wind_speed: f64) -> Result<Self, OceanError> {
        if wind_speed < 0.0 {
            return Err(OceanError::NegativeWindSpeed { value: wind_speed });
        }
        Ok(Self {
            wind_knots: wind_speed * MS_TO_KNOTS,
        })
    }
}

impl ScatteringModel for ScatteringChapman {
    fn scattering(
        &self,
        _position: &Geodetic,
        frequencies: &Axis,
        de_incident: f64,
        _de_scattered: f64,
        _az_incident: f64,
        _az_scattered: f64,
    ) -> Vec<f64> {
        // keep the logarithms finite at vanishing angle and calm wind
        let theta = de_incident.abs().to_degrees().max(1e-3);
        let wind = self.wind_knots.max(1e-3);
        frequencies
            .iter()
            .map(|f| {
                let beta = 107.0 * (wind * f.powf(1.0 / 3.0)).powf(-0.58);
                3.3 * beta * (theta / 30.0).log10() - 42.4 * beta.log10() + 2.6
            })
            .collect()
    }
}

/// Lambert's law bottom scattering strength.
///
/// `SS = μ + 10 log₁₀(sin θ₁ sin θ₂)` with Mackenzie's deep-water
/// coefficient `μ = -27 dB` as the default.
#[derive(Clone, Copy, Debug)]
pub struct ScatteringLambert {
    coefficient: f64,
}

impl Default for ScatteringLambert {
    fn default() -> Self {
        Self::new()
    }
}

impl ScatteringLambert {
    /// Create the model with Mackenzie's -27 dB coefficient.
    pub fn new() -> Self {
        Self { coefficient: -27.0 }
    }

    /// Create the model with an explicit coefficient in dB.
    pub fn with_coefficient(coefficient: f64) -> Self {
        Self { coefficient }
    }
}

impl ScatteringModel for ScatteringLambert {
    fn scattering(
        &self,
        _position: &Geodetic,
        frequencies: &Axis,
        de_incident: f64,
        de_scattered: f64,
        _az_incident: f64,
        _az_scattered: f64,
    ) -> Vec<f64> {
        let product = de_incident.sin().abs() * de_scattered.sin().abs();
        let strength = self.coefficient + 10.0 * product.max(1e-30).log10();
        vec![strength; frequencies.size()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    const TOL: f64 = 1e-10;

    fn origin() -> Geodetic {
        Geodetic::surface(0.0, 0.0)
    }

    fn freq() -> Axis {
        Axis::from_data(vec![500.0, 2000.0]).unwrap()
    }

    #[test]
    fn test_constant_strength() {
        let model = ScatteringConstant::new(-30.0);
        let ss = model.scattering(&origin(), &freq(), 0.3, 0.3, 0.0, 0.0);
        assert_eq!(ss.len(), 2);
        assert!(ss.iter().all(|&s| (s + 30.0).abs() < TOL));
    }

    #[test]
    fn test_chapman_wind_and_angle_trends() {
        let light = ScatteringChapman::new(5.0).unwrap();
        let strong = ScatteringChapman::new(15.0).unwrap();
        let angle = 20f64.to_radians();
        let a = light.scattering(&origin(), &freq(), angle, angle, 0.0, 0.0);
        let b = strong.scattering(&origin(), &freq(), angle, angle, 0.0, 0.0);
        // more wind scatters more
        for i in 0..2 {
            assert!(b[i] > a[i], "wind trend at {i}: {} vs {}", b[i], a[i]);
        }
        // steeper grazing scatters more
        let steep = light.scattering(&origin(), &freq(), 0.8, 0.8, 0.0, 0.0);
        for i in 0..2 {
            assert!(steep[i] > a[i]);
        }
        // deep-water values sit tens of dB down
        assert!(a[0] < -20.0 && a[0] > -90.0, "SS = {}", a[0]);
    }

    #[test]
    fn test_chapman_rejects_negative_wind() {
        assert!(ScatteringChapman::new(-3.0).is_err());
    }

    #[test]
    fn test_lambert_normal_incidence_equals_coefficient() {
        let model = ScatteringLambert::new();
        let ss = model.scattering(&origin(), &freq(), FRAC_PI_2, FRAC_PI_2, 0.0, 0.0);
        assert!((ss[0] + 27.0).abs() < TOL);
    }

    #[test]
    fn test_lambert_angle_dependence() {
        let model = ScatteringLambert::with_coefficient(-20.0);
        let angle = 30f64.to_radians();
        let ss = model.scattering(&origin(), &freq(), angle, angle, 0.0, 0.0);
        // 10 log10(sin^2 30) = -6.02 dB
        assert!((ss[0] - (-20.0 - 6.0206)).abs() < 1e-3, "SS = {}", ss[0]);
    }
}
