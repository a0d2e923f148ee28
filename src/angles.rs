//! Angle helpers shared by every ephemeris routine.
//!
//! All series in this crate work in degrees and only drop to radians right
//! before a trigonometric call, so the two normalizers below are the only
//! place where angles are wrapped.

use core::f64::consts::TAU;

/// Reduce an angle in degrees to `[0, 360)`.
///
/// `f64::rem` keeps the sign of the dividend, so negative remainders get one
/// full turn added back. The result is idempotent under repeated calls.
pub fn normalize_degrees(angle: f64) -> f64 {
    wrap(angle, 360.0)
}

/// Reduce an angle in radians to `[0, 2π)`.
pub fn normalize_radians(angle: f64) -> f64 {
    wrap(angle, TAU)
}

fn wrap(angle: f64, period: f64) -> f64 {
    let r = angle % period;
    let r = if r < 0.0 { r + period } else { r };
    // A remainder of -1e-17 plus the period rounds back up to the period itself.
    if r >= period {
        0.0
    } else {
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees_range() {
        for x in [-1e6, -720.5, -360.0, -0.25, 0.0, 12.5, 359.999, 360.0, 1e6 + 0.3] {
            let n = normalize_degrees(x);
            assert!((0.0..360.0).contains(&n), "{x} normalized to {n}");
        }
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(725.0), 5.0);
    }

    #[test]
    fn test_normalize_degrees_idempotent() {
        for x in [-1234.5678, -1e-17, 42.0, 719.99] {
            let once = normalize_degrees(x);
            assert_eq!(normalize_degrees(once), once);
        }
    }

    #[test]
    fn test_tiny_negative_does_not_return_full_turn() {
        assert_eq!(normalize_degrees(-1e-17), 0.0);
        assert_eq!(normalize_radians(-1e-18), 0.0);
    }

    #[test]
    fn test_normalize_radians_range() {
        let n = normalize_radians(-0.5);
        assert!((n - (TAU - 0.5)).abs() < 1e-12);
        assert!((0.0..TAU).contains(&normalize_radians(3.0 * TAU + 0.1)));
    }
}
