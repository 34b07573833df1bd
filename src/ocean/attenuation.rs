//! Sea-water absorption models.
//!
//! Absorption converts acoustic energy to heat through viscosity and the
//! relaxation of boric acid and magnesium sulfate. Models report the
//! absorption coefficient in dB/km per frequency; integrating it along a
//! ray path is the propagation engine's job.
//!
//! # References
//!
//! - W.H. Thorp, "Analytic description of the low-frequency attenuation
//!   coefficient", J. Acoust. Soc. Am. 42(1), 1967.
//! - F.B. Jensen et al., *Computational Ocean Acoustics*, 2nd ed.,
//!   eq. (1.34).

use super::OceanError;
use crate::types::{Axis, Geodetic};

/// Frequency-dependent sea-water absorption.
///
/// Implementations hold no mutable state and may be shared freely across
/// threads.
pub trait AttenuationModel: Send + Sync {
    /// Absorption coefficient in dB/km at each frequency.
    fn attenuation(&self, position: &Geodetic, frequencies: &Axis) -> Vec<f64>;
}

/// Frequency-independent absorption at a fixed coefficient.
#[derive(Clone, Copy, Debug)]
pub struct AttenuationConstant {
    coefficient: f64,
}

/// Zero absorption, the lossless test ocean.
impl Default for AttenuationConstant {
    fn default() -> Self {
        Self { coefficient: 0.0 }
    }
}

impl AttenuationConstant {
    /// Create a constant absorption model from a coefficient in dB/km.
    pub fn new(coefficient: f64) -> Result<Self, OceanError> {
        if coefficient < 0.0 {
            return Err(OceanError::NegativeParameter {
                name: "attenuation coefficient",
                value: coefficient,
            });
        }
        Ok(Self { coefficient })
    }
}

impl AttenuationModel for AttenuationConstant {
    fn attenuation(&self, _position: &Geodetic, frequencies: &Axis) -> Vec<f64> {
        vec![self.coefficient; frequencies.size()]
    }
}

/// Thorp's empirical absorption coefficient.
///
/// With `f` in kHz:
///
/// ```text
/// α = 3.3e-3 + 0.11 f²/(1 + f²) + 44 f²/(4100 + f²) + 3.0e-4 f²   dB/km
/// ```
///
/// The two rational terms are the boric-acid and magnesium-sulfate
/// relaxations; the quadratic tail is viscous absorption.
#[derive(Clone, Copy, Debug, Default)]
pub struct AttenuationThorp;

impl AttenuationModel for AttenuationThorp {
    fn attenuation(&self, _position: &Geodetic, frequencies: &Axis) -> Vec<f64> {
        frequencies
            .iter()
            .map(|f| {
                let f2 = (f * 1e-3) * (f * 1e-3);
                3.3e-3 + 0.11 * f2 / (1.0 + f2) + 44.0 * f2 / (4100.0 + f2) + 3.0e-4 * f2
            })
            .collect()
    }
}
