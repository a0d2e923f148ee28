//! # Topocentric Lunar Altitude
//!
//! Turns the geocentric lunar ephemeris into the altitude an observer on the
//! Earth's surface actually sees:
//!
//! 1. ecliptic → equatorial with nutation applied to longitude and obliquity
//! 2. Greenwich and local sidereal time
//! 3. differential parallax (the Moon is close enough that the observer's
//!    offset from the Earth's centre shifts it by up to about 1°)
//! 4. altitude from topocentric declination and hour angle
//!
//! [`moon_altitude`] is the inner loop of the rise/set search and runs a
//! few hundred times per report, so it stays a straight line of trig with no
//! branching.

use crate::angles::{normalize_degrees, normalize_radians};
use crate::lunar::lunar_position;
use crate::nutation::{julian_centuries, obliquity_and_nutation};
use crate::time::J2000;
use crate::Observer;

/// Equatorial radius of the Earth in km (WGS-84).
pub const EARTH_RADIUS_KM: f64 = 6378.137;

/// Right ascension and declination, both in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquatorialCoordinates {
    /// `[0, 2π)`
    pub right_ascension: f64,
    /// `[-π/2, π/2]`
    pub declination: f64,
}

/// Ecliptic (λ, β) to equatorial for obliquity ε, all inputs in radians.
pub fn ecliptic_to_equatorial(longitude: f64, latitude: f64, obliquity: f64) -> EquatorialCoordinates {
    let right_ascension = normalize_radians(
        (longitude.sin() * obliquity.cos() - latitude.tan() * obliquity.sin()).atan2(longitude.cos()),
    );
    let declination = (latitude.sin() * obliquity.cos()
        + latitude.cos() * obliquity.sin() * longitude.sin())
    .asin();

    EquatorialCoordinates {
        right_ascension,
        declination,
    }
}

/// Greenwich mean sidereal time in degrees, `[0, 360)`.
pub fn gmst(jd: f64) -> f64 {
    let t = julian_centuries(jd);
    normalize_degrees(
        280.460_618_37 + 360.985_647_366_29 * (jd - J2000) + 0.000_387_933 * t * t
            - t * t * t / 38_710_000.0,
    )
}

/// Geocentric apparent equatorial position of the Moon and its distance in km.
pub fn moon_geocentric(jd: f64) -> (EquatorialCoordinates, f64) {
    let moon = lunar_position(jd);
    let nutation = obliquity_and_nutation(jd);

    let equatorial = ecliptic_to_equatorial(
        (moon.longitude + nutation.longitude).to_radians(),
        moon.latitude.to_radians(),
        nutation.true_obliquity().to_radians(),
    );
    (equatorial, moon.distance_km)
}

/// Shift a geocentric position to the observer's location.
///
/// `hour_angle` is the local geocentric hour angle and `parallax` the
/// horizontal parallax, both in radians. Latitude is used directly as the
/// geocentric latitude and the observer sits on the equatorial radius.
pub fn apply_parallax(
    geocentric: EquatorialCoordinates,
    hour_angle: f64,
    parallax: f64,
    latitude: f64,
) -> EquatorialCoordinates {
    let sin_pi = parallax.sin();
    let (sin_phi, cos_phi) = latitude.sin_cos();
    let cos_dec = geocentric.declination.cos();

    let denominator = cos_dec - cos_phi * sin_pi * hour_angle.cos();
    let delta_ra = (-cos_phi * sin_pi * hour_angle.sin()).atan2(denominator);
    let declination =
        (geocentric.declination.sin() - sin_phi * sin_pi).atan2(denominator * delta_ra.cos());

    EquatorialCoordinates {
        right_ascension: geocentric.right_ascension + delta_ra,
        declination,
    }
}

/// Topocentric altitude of the Moon's centre in degrees.
pub fn moon_altitude(jd: f64, observer: &Observer) -> f64 {
    let (geocentric, distance_km) = moon_geocentric(jd);

    let latitude = observer.latitude.to_radians();
    let lst = normalize_radians(gmst(jd).to_radians() + observer.longitude.to_radians());
    let hour_angle = normalize_radians(lst - geocentric.right_ascension);

    let parallax = (EARTH_RADIUS_KM / distance_km).asin();
    let topocentric = apply_parallax(geocentric, hour_angle, parallax, latitude);

    let topo_hour_angle = normalize_radians(lst - topocentric.right_ascension);
    let sin_alt = topocentric.declination.sin() * latitude.sin()
        + topocentric.declination.cos() * latitude.cos() * topo_hour_angle.cos();

    sin_alt.asin().to_degrees()
}
