//! Low-precision apparent solar position (geocentric, ecliptic).
//!
//! Mean longitude plus a three-term equation of centre; good to about 0.01°
//! over a few centuries around J2000, which is ample for phase angles.

use crate::angles::normalize_degrees;
use crate::time::J2000;

/// Geocentric ecliptic position of the Sun.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    /// Apparent ecliptic longitude in degrees, `[0, 360)`
    pub longitude: f64,
    /// Earth–Sun distance in astronomical units
    pub radius_vector: f64,
}

/// Solar mean anomaly in degrees for `d` days since J2000.
pub(crate) fn solar_mean_anomaly(d: f64) -> f64 {
    normalize_degrees(357.529_109_2 + 0.985_600_283 * d)
}

/// Solar mean longitude in degrees for `d` days since J2000.
pub(crate) fn solar_mean_longitude(d: f64) -> f64 {
    normalize_degrees(280.466_46 + 0.985_647_36 * d)
}

pub fn solar_position(jd: f64) -> SolarPosition {
    let d = jd - J2000;

    let m = solar_mean_anomaly(d).to_radians();
    let center = 1.9148 * m.sin() + 0.0200 * (2.0 * m).sin() + 0.0003 * (3.0 * m).sin();
    let longitude = normalize_degrees(solar_mean_longitude(d) + center);
    let radius_vector = 1.000_14 - 0.016_71 * m.cos() - 0.000_14 * (2.0 * m).cos();

    SolarPosition {
        longitude,
        radius_vector,
    }
}
