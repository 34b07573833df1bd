//! Geodetic query positions.
//!
//! All spatially varying ocean models are sampled at a geodetic position:
//! latitude and longitude in decimal degrees, altitude in meters relative
//! to mean sea level with up positive. Water-column points therefore have
//! negative altitude; `depth()` gives the same quantity with down positive
//! for the empirical formulas that want it that way.

/// A geodetic position: latitude/longitude in degrees, altitude in meters.
///
/// Altitude is positive up, so the sea surface sits at `altitude = 0.0`
/// and a point 100 m down in the water column at `altitude = -100.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geodetic {
    /// Latitude in decimal degrees, positive north.
    pub latitude: f64,
    /// Longitude in decimal degrees, positive east.
    pub longitude: f64,
    /// Altitude in meters relative to mean sea level, positive up.
    pub altitude: f64,
}

impl Geodetic {
    /// Create a position from latitude, longitude, and altitude.
    #[inline]
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }

    /// Create a position on the sea surface (altitude zero).
    #[inline]
    pub fn surface(latitude: f64, longitude: f64) -> Self {
        Self::new(latitude, longitude, 0.0)
    }

    /// Depth below the sea surface in meters, positive down.
    #[inline]
    pub fn depth(&self) -> f64 {
        -self.altitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_sign_convention() {
        let p = Geodetic::new(36.0, -15.5, -1300.0);
        assert_eq!(p.depth(), 1300.0);

        let s = Geodetic::surface(36.0, -15.5);
        assert_eq!(s.altitude, 0.0);
        assert_eq!(s.depth(), 0.0);
    }
}
