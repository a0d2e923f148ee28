//! Mean obliquity of the ecliptic and the four dominant nutation terms.

use crate::angles::normalize_degrees;
use crate::time::J2000;

/// Obliquity and nutation at one instant, all in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nutation {
    pub mean_obliquity: f64,
    /// Nutation in longitude (Δψ)
    pub longitude: f64,
    /// Nutation in obliquity (Δε)
    pub obliquity: f64,
}

impl Nutation {
    /// ε = ε0 + Δε
    pub fn true_obliquity(&self) -> f64 {
        self.mean_obliquity + self.obliquity
    }
}

/// Julian centuries since J2000.
pub fn julian_centuries(jd: f64) -> f64 {
    (jd - J2000) / 36_525.0
}

pub fn obliquity_and_nutation(jd: f64) -> Nutation {
    let t = julian_centuries(jd);

    let epsilon0_arcsec = 84_381.448 - 46.8150 * t - 0.000_59 * t * t + 0.001_813 * t * t * t;

    let l_prime = normalize_degrees(218.316_447_7 + 481_267.881_234_21 * t).to_radians();
    let f = normalize_degrees(93.272_095_0 + 483_202.0175 * t).to_radians();
    let omega = normalize_degrees(125.044_52 - 1_934.136_26 * t).to_radians();

    let delta_psi = -17.200 * omega.sin() - 1.319 * (2.0 * l_prime).sin() - 0.227 * (2.0 * f).sin()
        + 0.206 * (2.0 * omega).sin();
    let delta_epsilon = 9.202 * omega.cos() + 0.573 * (2.0 * l_prime).cos() + 0.098 * (2.0 * f).cos()
        - 0.090 * (2.0 * omega).cos();

    Nutation {
        mean_obliquity: epsilon0_arcsec / 3600.0,
        longitude: delta_psi / 3600.0,
        obliquity: delta_epsilon / 3600.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_mean_obliquity_at_j2000() {
        let n = obliquity_and_nutation(J2000);
        assert_abs_diff_eq!(n.mean_obliquity, 84_381.448 / 3600.0, epsilon = 1e-12);
    }

    #[test]
    fn test_nutation_amplitudes_bounded() {
        let mut jd = 2_451_545.0;
        while jd < 2_451_545.0 + 6_800.0 {
            let n = obliquity_and_nutation(jd);
            // |Δψ| ≤ 18.95″, |Δε| ≤ 9.96″ from the term amplitudes
            assert!(n.longitude.abs() <= 18.952 / 3600.0);
            assert!(n.obliquity.abs() <= 9.963 / 3600.0);
            assert!((23.4..23.5).contains(&n.true_obliquity()));
            jd += 17.0;
        }
    }
}
