//! Boundary reflection-loss models.
//!
//! Each interaction with the surface or bottom multiplies a ray's
//! amplitude by a reflection coefficient. Models report the loss in dB
//! (positive means energy lost) per frequency, with an optional phase
//! change in radians, as a function of the grazing angle measured from
//! the horizontal.
//!
//! # References
//!
//! - C. Eckart, "The scattering of sound from the sea surface",
//!   J. Acoust. Soc. Am. 25(3), 1953.
//! - P. Beckmann, A. Spizzichino, *The Scattering of Electromagnetic
//!   Waves from Rough Surfaces*, 1963.
//! - C. Cox, W. Munk, "Measurement of the roughness of the sea surface
//!   from photographs of the sun's glitter", J. Opt. Soc. Am. 44, 1954.
//! - F.B. Jensen et al., *Computational Ocean Acoustics*, 2nd ed.,
//!   table 1.3 (geoacoustic bottom provinces).

use num_complex::Complex64;

use super::{wave_height, OceanError};
use crate::types::{Axis, Geodetic};

/// Nominal sound speed in sea water used by the roughness models (m/s).
const WATER_SOUND_SPEED: f64 = 1500.0;

/// Converts attenuation in dB per wavelength into the imaginary part of
/// the refraction index: `ln(10) / (40 π)`.
const DB_PER_WAVELENGTH: f64 = 0.018_325_465_075_241_32;

/// Frequency- and angle-dependent boundary reflection loss.
///
/// Implementations hold no mutable state and may be shared freely across
/// threads.
pub trait ReflectLossModel: Send + Sync {
    /// Reflection amplitude loss in dB at each frequency.
    ///
    /// `angle` is the grazing angle in radians. When `phase` is supplied
    /// it must be as long as the frequency axis and is filled with the
    /// phase change in radians.
    fn reflect_loss(
        &self,
        position: &Geodetic,
        frequencies: &Axis,
        angle: f64,
        phase: Option<&mut [f64]>,
    ) -> Vec<f64>;
}

/// Angle- and frequency-independent reflection loss.
#[derive(Clone, Copy, Debug)]
pub struct ReflectLossConstant {
    amplitude: f64,
    phase: f64,
}

impl ReflectLossConstant {
    /// Loss of `amplitude` dB per bounce with no phase change.
    pub fn new(amplitude: f64) -> Self {
        Self {
            amplitude,
            phase: 0.0,
        }
    }

    /// Loss of `amplitude` dB per bounce with a fixed phase change.
    ///
    /// The pressure-release sea surface is `with_phase(0.0, PI)`.
    pub fn with_phase(amplitude: f64, phase: f64) -> Self {
        Self { amplitude, phase }
    }
}

impl ReflectLossModel for ReflectLossConstant {
    fn reflect_loss(
        &self,
        _position: &Geodetic,
        frequencies: &Axis,
        _angle: f64,
        phase: Option<&mut [f64]>,
    ) -> Vec<f64> {
        if let Some(out) = phase {
            out.fill(self.phase);
        }
        vec![self.amplitude; frequencies.size()]
    }
}

/// Eckart's coherent rough-surface reflection loss.
///
/// For a Gaussian surface of rms elevation `σ`, the coherent reflection
/// amplitude is `exp(-2 (k σ sin θ)²)`, so the loss in dB is
/// `17.372 (k σ sin θ)²`. The rms elevation comes from the
/// Pierson-Moskowitz fully developed sea at the given wind speed.
#[derive(Clone, Copy, Debug)]
pub struct ReflectLossEckart {
    sigma: f64,
}

impl ReflectLossEckart {
    /// Create the model for a wind speed in m/s.
    pub fn new(wind_speed: f64) -> Result<Self, OceanError> {
        if wind_speed < 0.0 {
            return Err(OceanError::NegativeWindSpeed { value: wind_speed });
        }
        Ok(Self {
            sigma: wave_height::rms(wind_speed),
        })
    }
}

impl ReflectLossModel for ReflectLossEckart {
    fn reflect_loss(
        &self,
        _position: &Geodetic,
        frequencies: &Axis,
        angle: f64,
        phase: Option<&mut [f64]>,
    ) -> Vec<f64> {
        if let Some(out) = phase {
            out.fill(std::f64::consts::PI);
        }
        let sin_a = angle.sin();
        frequencies
            .iter()
            .map(|f| {
                let k = 2.0 * std::f64::consts::PI * f / WATER_SOUND_SPEED;
                let chi = k * self.sigma * sin_a;
                20.0 * std::f64::consts::LOG10_E * 2.0 * chi * chi
            })
            .collect()
    }
}

/// Beckmann-Spizzichino rough-surface reflection loss.
///
/// Eckart's coherent loss grows without bound as the Rayleigh roughness
/// parameter `γ = 2 k σ sin θ` becomes large, but a rough surface still
/// forwards energy incoherently along the specular direction. Following
/// Beckmann and Spizzichino's treatment of Gaussian surfaces, the
/// forward-reflected intensity is modeled as the coherent term plus an
/// incoherent floor limited by the Cox-Munk mean-square surface slope
/// `s² = 0.003 + 5.12e-3 U`:
///
/// ```text
/// R² = exp(-γ²) + (1 - exp(-γ²)) / (1 + γ s²)
/// loss = -10 log₁₀ R²
/// ```
///
/// which reduces to Eckart's result for small roughness and saturates at
/// high frequency and wind speed instead of diverging.
#[derive(Clone, Copy, Debug)]
pub struct ReflectLossBeckmann {
    sigma: f64,
    slope_sq: f64,
}

impl ReflectLossBeckmann {
    /// Create the model for a wind speed in m/s.
    pub fn new(wind_speed: f64) -> Result<Self, OceanError> {
        if wind_speed < 0.0 {
            return Err(OceanError::NegativeWindSpeed { value: wind_speed });
        }
        Ok(Self {
            sigma: wave_height::rms(wind_speed),
            slope_sq: 0.003 + 5.12e-3 * wind_speed,
        })
    }
}

impl ReflectLossModel for ReflectLossBeckmann {
    fn reflect_loss(
        &self,
        _position: &Geodetic,
        frequencies: &Axis,
        angle: f64,
        phase: Option<&mut [f64]>,
    ) -> Vec<f64> {
        if let Some(out) = phase {
            out.fill(std::f64::consts::PI);
        }
        let sin_a = angle.sin();
        frequencies
            .iter()
            .map(|f| {
                let k = 2.0 * std::f64::consts::PI * f / WATER_SOUND_SPEED;
                let gamma = 2.0 * k * self.sigma * sin_a;
                let coherent = (-gamma * gamma).exp();
                let incoherent = (1.0 - coherent) / (1.0 + gamma * self.slope_sq);
                -10.0 * (coherent + incoherent).log10()
            })
            .collect()
    }
}

/// Geoacoustic bottom provinces with canonical sediment parameters.
///
/// Ratios are relative to sea water; attenuation is in dB per wavelength
/// in the sediment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BottomType {
    /// Very fine cohesive sediment
    Clay,
    /// Fine-grained sediment
    Silt,
    /// Medium-grained sediment
    Sand,
    /// Coarse-grained sediment
    Gravel,
    /// Glacial till
    Moraine,
    /// Soft carbonate rock
    Chalk,
    /// Hard carbonate rock
    Limestone,
    /// Volcanic rock
    Basalt,
}

impl BottomType {
    /// `(density ratio, compressional speed ratio, attenuation dB/λ)`.
    fn geoacoustic(self) -> (f64, f64, f64) {
        match self {
            BottomType::Clay => (1.5, 1.00, 0.2),
            BottomType::Silt => (1.7, 1.05, 1.0),
            BottomType::Sand => (1.9, 1.10, 0.8),
            BottomType::Gravel => (2.0, 1.20, 0.6),
            BottomType::Moraine => (2.1, 1.30, 0.4),
            BottomType::Chalk => (2.2, 1.60, 0.2),
            BottomType::Limestone => (2.4, 2.00, 0.1),
            BottomType::Basalt => (2.7, 3.50, 0.1),
        }
    }
}

/// Rayleigh reflection from a fluid sediment half-space.
///
/// The bottom is a lossy fluid characterized by its density and sound
/// speed relative to the water column. Sediment absorption enters as a
/// complex sound speed, which makes the reflection coefficient finite at
/// all angles; the loss is independent of frequency because the
/// absorption is specified per wavelength.
#[derive(Clone, Copy, Debug)]
pub struct ReflectLossRayleigh {
    density_ratio: f64,
    speed_ratio: f64,
    attenuation: f64,
}

impl ReflectLossRayleigh {
    /// Create the model for a canonical bottom province.
    pub fn new(bottom_type: BottomType) -> Self {
        let (density_ratio, speed_ratio, attenuation) = bottom_type.geoacoustic();
        Self {
            density_ratio,
            speed_ratio,
            attenuation,
        }
    }

    /// Create the model from explicit sediment parameters.
    ///
    /// `density_ratio` and `speed_ratio` are relative to sea water;
    /// `attenuation` is in dB per wavelength in the sediment.
    pub fn from_params(
        density_ratio: f64,
        speed_ratio: f64,
        attenuation: f64,
    ) -> Result<Self, OceanError> {
        if density_ratio <= 0.0 {
            return Err(OceanError::NonPositiveParameter {
                name: "density ratio",
                value: density_ratio,
            });
        }
        if speed_ratio <= 0.0 {
            return Err(OceanError::NonPositiveParameter {
                name: "speed ratio",
                value: speed_ratio,
            });
        }
        if attenuation < 0.0 {
            return Err(OceanError::NegativeParameter {
                name: "sediment attenuation",
                value: attenuation,
            });
        }
        Ok(Self {
            density_ratio,
            speed_ratio,
            attenuation,
        })
    }

    /// Complex reflection coefficient at a grazing angle.
    fn coefficient(&self, angle: f64) -> Complex64 {
        // complex sediment speed folds in the absorption per wavelength
        let delta = self.attenuation * DB_PER_WAVELENGTH;
        let speed = Complex64::new(self.speed_ratio, 0.0) / Complex64::new(1.0, delta);

        // Snell's law for grazing angles: cos θ₂ = (c₂/c₁) cos θ₁
        let cos2 = speed * angle.cos();
        let sin2 = (Complex64::new(1.0, 0.0) - cos2 * cos2).sqrt();

        // impedance ratio of sediment to water along the ray
        let z_ratio = self.density_ratio * speed * angle.sin() / sin2;
        (z_ratio - 1.0) / (z_ratio + 1.0)
    }
}

impl ReflectLossModel for ReflectLossRayleigh {
    fn reflect_loss(
        &self,
        _position: &Geodetic,
        frequencies: &Axis,
        angle: f64,
        phase: Option<&mut [f64]>,
    ) -> Vec<f64> {
        let r = self.coefficient(angle);
        if let Some(out) = phase {
            out.fill(r.arg());
        }
        let loss = -20.0 * r.norm().log10();
        vec![loss; frequencies.size()]
    }
}
