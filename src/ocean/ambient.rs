//! Ambient noise models.
//!
//! The background against which a sonar detects: turbulence at the very
//! low end, distant shipping through the hundreds of Hz, wind-driven
//! surface agitation through the tens of kHz, thermal noise above, and
//! rain on top when it falls. Models report spectral level in
//! dB re 1 µPa²/Hz per frequency.
//!
//! # References
//!
//! - G.M. Wenz, "Acoustic ambient noise in the ocean: spectra and
//!   sources", J. Acoust. Soc. Am. 34(12), 1962.
//! - R. Coates, "An empirical formula for computing the Beaufort scale
//!   from ambient noise levels" and the simplified Wenz curves therein.

use super::OceanError;
use crate::types::{Axis, Geodetic};

/// Ambient noise spectral level as a function of frequency.
///
/// Implementations hold no mutable state and may be shared freely across
/// threads.
pub trait AmbientModel: Send + Sync {
    /// Noise spectral level in dB re 1 µPa²/Hz at each frequency.
    fn ambient(&self, position: &Geodetic, frequencies: &Axis) -> Vec<f64>;
}

/// Frequency-independent noise floor.
#[derive(Clone, Copy, Debug)]
pub struct AmbientConstant {
    level: f64,
}

impl AmbientConstant {
    /// Create a flat spectrum at `level` dB re 1 µPa²/Hz.
    pub fn new(level: f64) -> Self {
        Self { level }
    }
}

impl AmbientModel for AmbientConstant {
    fn ambient(&self, _position: &Geodetic, frequencies: &Axis) -> Vec<f64> {
        vec![self.level; frequencies.size()]
    }
}

/// Rainfall intensity classes for the Wenz rain component.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RainRate {
    /// No precipitation
    #[default]
    Dry,
    /// Drizzle to light rain
    Light,
    /// Steady rain
    Moderate,
    /// Downpour
    Heavy,
}

impl RainRate {
    /// Plateau spectral level of the rain component, or `None` when dry.
    fn plateau(self) -> Option<f64> {
        match self {
            RainRate::Dry => None,
            RainRate::Light => Some(55.0),
            RainRate::Moderate => Some(62.0),
            RainRate::Heavy => Some(70.0),
        }
    }
}

/// Simplified Wenz ambient noise curves.
///
/// Sums four incoherent components, each in dB with `f` in kHz:
///
/// ```text
/// turbulence: 17 - 30 log₁₀ f
/// shipping:   40 + 20 (s - 0.5) + 26 log₁₀ f - 60 log₁₀(f + 0.03)
/// wind:       50 + 7.5 √U + 20 log₁₀ f - 40 log₁₀(f + 0.4)
/// thermal:    -15 + 20 log₁₀ f
/// ```
///
/// with shipping activity `s ∈ [0, 1]` and wind speed `U` in m/s. Rain
/// adds a schematic spectrum that plateaus between 1 and 10 kHz and rolls
/// off at 20 dB/decade on both sides.
#[derive(Clone, Copy, Debug)]
pub struct AmbientWenz {
    wind_speed: f64,
    shipping: f64,
    rain: RainRate,
}

impl AmbientWenz {
    /// Create the model for a wind speed in m/s, a normalized shipping
    /// activity in `[0, 1]`, and a rain rate.
    pub fn new(wind_speed: f64, shipping: f64, rain: RainRate) -> Result<Self, OceanError> {
        if wind_speed < 0.0 {
            return Err(OceanError::NegativeWindSpeed { value: wind_speed });
        }
        if !(0.0..=1.0).contains(&shipping) {
            return Err(OceanError::ShippingOutOfRange { value: shipping });
        }
        Ok(Self {
            wind_speed,
            shipping,
            rain,
        })
    }
}

impl AmbientModel for AmbientWenz {
    fn ambient(&self, _position: &Geodetic, frequencies: &Axis) -> Vec<f64> {
        frequencies
            .iter()
            .map(|f| {
                let f_khz = (f * 1e-3).max(1e-6);
                let log_f = f_khz.log10();

                let turbulence = 17.0 - 30.0 * log_f;
                let shipping = 40.0 + 20.0 * (self.shipping - 0.5) + 26.0 * log_f
                    - 60.0 * (f_khz + 0.03).log10();
                let wind = 50.0 + 7.5 * self.wind_speed.sqrt() + 20.0 * log_f
                    - 40.0 * (f_khz + 0.4).log10();
                let thermal = -15.0 + 20.0 * log_f;

                let mut power = 10f64.powf(turbulence / 10.0)
                    + 10f64.powf(shipping / 10.0)
                    + 10f64.powf(wind / 10.0)
                    + 10f64.powf(thermal / 10.0);

                if let Some(plateau) = self.rain.plateau() {
                    let rain = if f_khz < 1.0 {
                        plateau + 20.0 * log_f
                    } else if f_khz <= 10.0 {
                        plateau
                    } else {
                        plateau - 20.0 * (f_khz / 10.0).log10()
                    };
                    power += 10f64.powf(rain / 10.0);
                }

                10.0 * power.log10()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    fn origin() -> Geodetic {
        Geodetic::surface(0.0, 0.0)
    }

    #[test]
    fn test_constant_spectrum() {
        let model = AmbientConstant::new(65.0);
        let freq = Axis::log(10.0, 10.0, 4).unwrap();
        let levels = model.ambient(&origin(), &freq);
        assert!(levels.iter().all(|&l| (l - 65.0).abs() < TOL));
    }

    #[test]
    fn test_wenz_parameter_validation() {
        assert!(AmbientWenz::new(-1.0, 0.5, RainRate::Dry).is_err());
        assert!(AmbientWenz::new(10.0, 1.5, RainRate::Dry).is_err());
        assert!(AmbientWenz::new(10.0, 0.5, RainRate::Dry).is_ok());
    }

    #[test]
    fn test_wenz_shipping_dominates_low_frequency() {
        let freq = Axis::linear(100.0, 0.0, 1).unwrap();
        let quiet = AmbientWenz::new(5.0, 0.1, RainRate::Dry).unwrap();
        let busy = AmbientWenz::new(5.0, 0.9, RainRate::Dry).unwrap();
        let a = quiet.ambient(&origin(), &freq)[0];
        let b = busy.ambient(&origin(), &freq)[0];
        assert!(b > a + 5.0, "busy {b} vs quiet {a}");
        // but shipping barely matters at 20 kHz
        let freq_hi = Axis::linear(20_000.0, 0.0, 1).unwrap();
        let a_hi = quiet.ambient(&origin(), &freq_hi)[0];
        let b_hi = busy.ambient(&origin(), &freq_hi)[0];
        assert!((b_hi - a_hi).abs() < 1.0);
    }

    #[test]
    fn test_wenz_wind_raises_mid_band() {
        let freq = Axis::linear(1000.0, 0.0, 1).unwrap();
        let calm = AmbientWenz::new(1.0, 0.5, RainRate::Dry).unwrap();
        let gale = AmbientWenz::new(20.0, 0.5, RainRate::Dry).unwrap();
        let a = calm.ambient(&origin(), &freq)[0];
        let b = gale.ambient(&origin(), &freq)[0];
        assert!(b > a + 10.0, "gale {b} vs calm {a}");
        // plausible deep-water levels
        assert!(a > 40.0 && a < 80.0, "level = {a}");
    }

    #[test]
    fn test_wenz_rain_adds_noise_in_band() {
        let freq = Axis::linear(5000.0, 0.0, 1).unwrap();
        let dry = AmbientWenz::new(5.0, 0.5, RainRate::Dry).unwrap();
        let light = AmbientWenz::new(5.0, 0.5, RainRate::Light).unwrap();
        let heavy = AmbientWenz::new(5.0, 0.5, RainRate::Heavy).unwrap();
        let a = dry.ambient(&origin(), &freq)[0];
        let b = light.ambient(&origin(), &freq)[0];
        let c = heavy.ambient(&origin(), &freq)[0];
        assert!(b > a, "light rain {b} vs dry {a}");
        assert!(c > b, "heavy rain {c} vs light {b}");
    }

    #[test]
    fn test_wenz_thermal_floor_rises_at_high_frequency() {
        let model = AmbientWenz::new(0.0, 0.0, RainRate::Dry).unwrap();
        let freq = Axis::from_data(vec![30_000.0, 100_000.0, 300_000.0]).unwrap();
        let levels = model.ambient(&origin(), &freq);
        // above ~100 kHz thermal noise grows with frequency
        assert!(levels[2] > levels[1]);
    }
}
