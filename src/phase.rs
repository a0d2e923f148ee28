//! # Lunar Phase Classification
//!
//! The illuminated fraction comes from the Sun–Moon–Earth phase angle using
//! the ecliptic positions of both bodies. Whether the Moon is waxing or
//! waning is decided by sampling the fraction again three minutes later: a
//! larger future value means waxing.
//!
//! ## Boundaries
//!
//! | fraction          | phase                         |
//! |-------------------|-------------------------------|
//! | `f < 0.01`        | New Moon                      |
//! | `0.01 ≤ f < 0.49` | Waxing / Waning Crescent      |
//! | `0.49 ≤ f ≤ 0.51` | First / Last Quarter          |
//! | `0.51 < f < 0.99` | Waxing / Waning Gibbous       |
//! | `f ≥ 0.99`        | Full Moon                     |
//!
//! The forward difference can pick the wrong direction in the few minutes
//! around an exact new or full moon; both ends are classified by fraction
//! alone there, so the label is unaffected.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::lunar::lunar_position;
use crate::solar::solar_position;

/// Offset used to probe whether illumination is growing (3 minutes).
pub const WAXING_PROBE_DAYS: f64 = 3.0 / (24.0 * 60.0);

const NEW_MOON_MAX: f64 = 0.01;
const QUARTER_MIN: f64 = 0.49;
const QUARTER_MAX: f64 = 0.51;
const FULL_MOON_MIN: f64 = 0.99;

/// The eight named phases of the synodic cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoonPhase {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    /// All phases in cycle order, starting at New Moon.
    pub const ALL: [MoonPhase; 8] = [
        MoonPhase::NewMoon,
        MoonPhase::WaxingCrescent,
        MoonPhase::FirstQuarter,
        MoonPhase::WaxingGibbous,
        MoonPhase::FullMoon,
        MoonPhase::WaningGibbous,
        MoonPhase::LastQuarter,
        MoonPhase::WaningCrescent,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MoonPhase::NewMoon => "New Moon",
            MoonPhase::WaxingCrescent => "Waxing Crescent",
            MoonPhase::FirstQuarter => "First Quarter",
            MoonPhase::WaxingGibbous => "Waxing Gibbous",
            MoonPhase::FullMoon => "Full Moon",
            MoonPhase::WaningGibbous => "Waning Gibbous",
            MoonPhase::LastQuarter => "Last Quarter",
            MoonPhase::WaningCrescent => "Waning Crescent",
        }
    }

    /// Bucket an illuminated fraction, using `waxing` to pick the side of
    /// the cycle for the crescent, quarter and gibbous ranges.
    pub fn classify(fraction: f64, waxing: bool) -> MoonPhase {
        let pick = |waxing_phase, waning_phase| if waxing { waxing_phase } else { waning_phase };

        if fraction < NEW_MOON_MAX {
            MoonPhase::NewMoon
        } else if fraction < QUARTER_MIN {
            pick(MoonPhase::WaxingCrescent, MoonPhase::WaningCrescent)
        } else if fraction <= QUARTER_MAX {
            pick(MoonPhase::FirstQuarter, MoonPhase::LastQuarter)
        } else if fraction < FULL_MOON_MIN {
            pick(MoonPhase::WaxingGibbous, MoonPhase::WaningGibbous)
        } else {
            MoonPhase::FullMoon
        }
    }
}

impl fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for MoonPhase {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Phase and illumination at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseReading {
    pub phase: MoonPhase,
    /// Illuminated fraction of the disk, `[0, 1]`
    pub fraction: f64,
    pub waxing: bool,
}

impl PhaseReading {
    /// Illumination as a bare percentage with one decimal, e.g. `"42.3"`.
    pub fn illumination_percent(&self) -> String {
        format!("{:.1}", self.fraction * 100.0)
    }
}

/// Sun–Moon–Earth phase angle in radians.
pub fn phase_angle(jd: f64) -> f64 {
    let sun = solar_position(jd);
    let moon = lunar_position(jd);

    let cos_g = -moon.latitude.to_radians().cos() * (moon.longitude - sun.longitude).to_radians().cos();
    // Exact syzygy can overshoot ±1 by an ulp
    cos_g.clamp(-1.0, 1.0).acos()
}

/// Illuminated fraction of the lunar disk, `[0, 1]`.
pub fn illuminated_fraction(jd: f64) -> f64 {
    (1.0 + phase_angle(jd).cos()) / 2.0
}

pub fn phase_reading(jd: f64) -> PhaseReading {
    let fraction = illuminated_fraction(jd);
    let waxing = illuminated_fraction(jd + WAXING_PROBE_DAYS) > fraction;

    PhaseReading {
        phase: MoonPhase::classify(fraction, waxing),
        fraction,
        waxing,
    }
}

/// Phase label and illumination string, the pair the report exposes.
pub fn phase_and_illumination(jd: f64) -> (MoonPhase, String) {
    let reading = phase_reading(jd);
    (reading.phase, reading.illumination_percent())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries_exact() {
        assert_eq!(MoonPhase::classify(0.0, true), MoonPhase::NewMoon);
        assert_eq!(MoonPhase::classify(0.009_999, true), MoonPhase::NewMoon);
        assert_eq!(MoonPhase::classify(0.01, true), MoonPhase::WaxingCrescent);
        assert_eq!(MoonPhase::classify(0.01, false), MoonPhase::WaningCrescent);
        assert_eq!(MoonPhase::classify(0.489_999, false), MoonPhase::WaningCrescent);
        assert_eq!(MoonPhase::classify(0.49, true), MoonPhase::FirstQuarter);
        assert_eq!(MoonPhase::classify(0.51, true), MoonPhase::FirstQuarter);
        assert_eq!(MoonPhase::classify(0.51, false), MoonPhase::LastQuarter);
        assert_eq!(MoonPhase::classify(0.510_001, true), MoonPhase::WaxingGibbous);
        assert_eq!(MoonPhase::classify(0.989_999, false), MoonPhase::WaningGibbous);
        assert_eq!(MoonPhase::classify(0.99, false), MoonPhase::FullMoon);
        assert_eq!(MoonPhase::classify(1.0, true), MoonPhase::FullMoon);
    }

    #[test]
    fn test_new_and_full_ignore_direction() {
        for waxing in [true, false] {
            assert_eq!(MoonPhase::classify(0.005, waxing), MoonPhase::NewMoon);
            assert_eq!(MoonPhase::classify(0.995, waxing), MoonPhase::FullMoon);
        }
    }

    #[test]
    fn test_fraction_in_unit_interval() {
        let mut jd = 2_460_000.0;
        while jd < 2_460_060.0 {
            let f = illuminated_fraction(jd);
            assert!((0.0..=1.0).contains(&f), "fraction {f} at {jd}");
            jd += 0.37;
        }
    }

    #[test]
    fn test_eclipse_new_moon() {
        // Total solar eclipse, 2024-04-08 18:21 UTC
        let (phase, illumination) = phase_and_illumination(2_460_409.264_58);
        assert_eq!(phase, MoonPhase::NewMoon);
        let pct: f64 = illumination.parse().unwrap();
        assert!(pct < 1.0, "illumination {illumination}");
    }

    #[test]
    fn test_eclipse_full_moon() {
        // Total lunar eclipse, 2022-11-08 11:00 UTC
        let reading = phase_reading(2_459_891.958_33);
        assert_eq!(reading.phase, MoonPhase::FullMoon);
        assert!(reading.fraction > 0.999);
    }

    #[test]
    fn test_direction_around_new_moon() {
        // Four and eleven days after the April 2024 new moon
        assert_eq!(phase_reading(2_460_413.3).phase, MoonPhase::WaxingCrescent);
        assert_eq!(phase_reading(2_460_420.3).phase, MoonPhase::WaxingGibbous);
        // Five days before it
        assert_eq!(phase_reading(2_460_404.3).phase, MoonPhase::WaningCrescent);
    }

    #[test]
    fn test_illumination_has_one_decimal() {
        let reading = PhaseReading {
            phase: MoonPhase::WaxingGibbous,
            fraction: 0.734_56,
            waxing: true,
        };
        assert_eq!(reading.illumination_percent(), "73.5");
    }

    #[test]
    fn test_phase_serializes_as_label() {
        let json = serde_json::to_string(&MoonPhase::LastQuarter).unwrap();
        assert_eq!(json, "\"Last Quarter\"");
    }
}
