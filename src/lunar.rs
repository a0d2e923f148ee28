//! Low-precision lunar ephemeris (truncated periodic series)
//!
//! Geocentric ecliptic longitude, latitude and distance of the Moon from the
//! largest terms of the classical lunar theory, evaluated on mean elements
//! linear in days since J2000.
//! Accuracy: a few tenths of a degree in λ and β; a few hundred km in Δ.
//!
//! The three tables below are fixed: their order and amplitudes define the
//! numerical output, so they are kept exactly as listed rather than sorted
//! or merged.

use crate::angles::normalize_degrees;
use crate::solar::{solar_mean_anomaly, solar_mean_longitude};
use crate::time::J2000;

/// Geocentric ecliptic position of the Moon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunarPosition {
    /// Ecliptic longitude (deg, `[0, 360)`).
    pub longitude: f64,
    /// Ecliptic latitude (deg, signed, within about ±5.3°).
    pub latitude: f64,
    /// Earth–Moon distance in km.
    pub distance_km: f64,
}

/// One periodic term: `amplitude · trig(m'·M' + d·D + f·F + m·M)`.
#[derive(Debug, Clone, Copy)]
struct Term {
    amplitude: f64,
    mp: i8,
    d: i8,
    f: i8,
    m: i8,
}

const fn t(amplitude: f64, mp: i8, d: i8, f: i8, m: i8) -> Term {
    Term {
        amplitude,
        mp,
        d,
        f,
        m,
    }
}

/// Longitude perturbations in degrees (sine terms).
const LONGITUDE_TERMS: [Term; 22] = [
    t(6.28875, 1, 0, 0, 0),
    t(1.27401, 0, 2, 0, 0),
    t(0.65831, 0, 0, 2, 0),
    t(-0.18581, 0, 0, 0, 1),
    t(-0.11433, 1, 0, 2, 0),
    t(0.05877, -1, 2, 0, 0),
    t(0.05730, 1, 2, 0, 0),
    t(0.05322, 0, 0, 2, 1),
    t(0.04620, -1, 0, 2, 0),
    t(0.04092, 0, 2, 0, -1),
    t(0.03044, 1, 0, 0, 1),
    t(0.01526, 0, 2, -2, 0),
    t(0.01130, 1, 0, 0, -1),
    t(0.01024, 0, 0, 2, -1),
    t(-0.00914, 0, 2, 0, 1),
    t(0.00422, 0, 2, 2, 0),
    t(0.00386, 0, 2, -3, 0),
    t(0.00366, 3, 0, 0, 0),
    t(0.00293, 0, 0, 0, 2),
    t(0.00276, 2, -2, 0, 0),
    t(0.00252, 2, 2, 0, 0),
    t(0.00224, 1, 2, 0, -1),
];

/// Latitude terms in degrees (sine terms).
const LATITUDE_TERMS: [Term; 17] = [
    t(5.12819, 0, 0, 1, 0),
    t(0.28060, 1, 0, 1, 0),
    t(0.27769, -1, 0, 1, 0),
    t(0.17320, 0, 0, 1, 1),
    t(0.05538, 0, 2, 1, 0),
    t(0.04627, 0, 2, -1, 0),
    t(0.03257, -1, 2, 1, 0),
    t(0.01633, 0, 2, -1, 1),
    t(0.00809, 1, 2, 1, 0),
    t(0.00769, 2, 0, 1, 0),
    t(0.00755, -1, 2, 2, 0),
    t(0.00705, 0, 2, 1, 1),
    t(0.00583, 0, 2, 1, -1),
    t(0.00517, 0, 2, 2, 0),
    t(0.00412, 0, 2, -2, 1),
    t(0.00388, 1, 2, 2, 0),
    t(0.00277, 1, 2, 2, 0),
];

/// Mean Earth–Moon distance in km that the distance terms perturb.
const MEAN_DISTANCE_KM: f64 = 385_000.0;

/// Distance perturbations in km (cosine terms).
const DISTANCE_TERMS: [Term; 36] = [
    t(-20905.0, 1, 0, 0, 0),
    t(-3699.0, -1, 2, 0, 0),
    t(-2956.0, 0, 2, 0, 0),
    t(-569.0, 0, 0, 2, 0),
    t(246.0, 0, 2, -2, 0),
    t(209.0, 1, 0, 0, 1),
    t(105.0, 0, 0, 0, 1),
    t(-103.0, 1, 0, 0, -1),
    t(-57.0, 1, 2, 0, 0),
    t(-48.0, 1, 0, 2, 0),
    t(46.0, -1, 2, 0, -1),
    t(38.0, 1, 2, 0, 0),
    t(-30.0, 1, 2, 1, 0),
    t(-24.0, 1, -2, 0, 0),
    t(-22.0, 0, 2, -1, 0),
    t(15.0, 1, 0, -2, 0),
    t(-13.0, 1, 2, 1, 0),
    t(-12.0, 0, 2, 0, 1),
    t(10.0, 0, 0, -2, 1),
    t(8.0, 0, 2, 1, 1),
    t(7.0, 1, 0, 1, 0),
    t(-6.0, 0, 2, -1, 1),
    t(-5.0, 1, -2, 2, 0),
    t(-4.0, 1, 2, -1, 0),
    t(4.0, 1, 2, 0, 1),
    t(-4.0, 0, 2, 0, -2),
    t(-3.0, 1, -2, 0, -1),
    t(-3.0, 0, 0, -1, 1),
    t(-3.0, 0, 2, 2, 0),
    t(3.0, 1, 0, -1, 1),
    t(-3.0, 0, 0, 2, 1),
    t(-3.0, -1, 2, 0, -1),
    t(3.0, 1, 2, 0, -1),
    t(3.0, 1, 0, 1, 1),
    t(-3.0, 1, -2, 1, 0),
    t(-2.0, -1, 2, -1, 0),
];

/// Fundamental arguments in radians.
struct Arguments {
    mp: f64,
    d: f64,
    f: f64,
    m: f64,
}

impl Arguments {
    fn angle(&self, term: &Term) -> f64 {
        term.mp as f64 * self.mp
            + term.d as f64 * self.d
            + term.f as f64 * self.f
            + term.m as f64 * self.m
    }

    fn sine_series(&self, terms: &[Term]) -> f64 {
        terms
            .iter()
            .map(|term| term.amplitude * self.angle(term).sin())
            .sum()
    }

    fn cosine_series(&self, terms: &[Term]) -> f64 {
        terms
            .iter()
            .map(|term| term.amplitude * self.angle(term).cos())
            .sum()
    }
}

/// Geocentric ecliptic position of the Moon at a UTC Julian Day.
pub fn lunar_position(jd: f64) -> LunarPosition {
    let days = jd - J2000;

    // ---------- 1. Mean elements (deg) --------------------------------------
    let mean_longitude = normalize_degrees(218.316_447_7 + 13.176_396_47 * days);
    let moon_anomaly = normalize_degrees(134.963_411_4 + 13.064_992_95 * days);
    let sun_anomaly = solar_mean_anomaly(days);
    let latitude_argument = normalize_degrees(93.272_095_0 + 13.229_350_35 * days);
    let elongation = normalize_degrees(mean_longitude - solar_mean_longitude(days));

    let args = Arguments {
        mp: moon_anomaly.to_radians(),
        d: elongation.to_radians(),
        f: latitude_argument.to_radians(),
        m: sun_anomaly.to_radians(),
    };

    // ---------- 2. Periodic series -------------------------------------------
    let longitude = normalize_degrees(mean_longitude + args.sine_series(&LONGITUDE_TERMS));
    let latitude = args.sine_series(&LATITUDE_TERMS);
    let distance_km = MEAN_DISTANCE_KM + args.cosine_series(&DISTANCE_TERMS);

    LunarPosition {
        longitude,
        latitude,
        distance_km,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latitude_and_distance_stay_physical() {
        // Sweep a bit more than one draconic and one anomalistic month
        let mut jd = 2_460_400.0;
        while jd < 2_460_440.0 {
            let moon = lunar_position(jd);
            assert!(moon.latitude.abs() < 5.4, "latitude {} at {jd}", moon.latitude);
            assert!(
                (355_000.0..=407_500.0).contains(&moon.distance_km),
                "distance {} at {jd}",
                moon.distance_km
            );
            assert!((0.0..360.0).contains(&moon.longitude));
            jd += 0.25;
        }
    }

    #[test]
    fn test_moon_meets_sun_at_eclipse_new_moon() {
        // Total solar eclipse, 2024-04-08 18:21 UTC
        let jd = 2_460_409.264_58;
        let moon = lunar_position(jd);
        let sun = crate::solar::solar_position(jd);
        let separation = (moon.longitude - sun.longitude + 540.0) % 360.0 - 180.0;
        assert!(separation.abs() < 1.0, "elongation {separation}");
        assert!(moon.latitude.abs() < 0.5, "latitude {}", moon.latitude);
    }

    #[test]
    fn test_moon_moves_about_13_degrees_per_day() {
        let a = lunar_position(2_460_000.0).longitude;
        let b = lunar_position(2_460_001.0).longitude;
        let step = (b - a + 360.0) % 360.0;
        assert!((11.0..16.0).contains(&step), "daily motion {step}");
    }
}
