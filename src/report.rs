//! # Moon Report
//!
//! Facade over the phase classifier and the horizon search: one call per
//! (observer, instant, time zone) produces the four values a display needs.
//! A report is built once and never changes; asking again means building a
//! new one.

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::Serialize;
use std::fmt;

use crate::horizon::{moon_rise_set, HorizonEvent};
use crate::phase::{phase_reading, MoonPhase};
use crate::time::julian_day_from_utc;
use crate::Observer;

/// Phase, illumination, moonrise and moonset for one observer and instant.
///
/// # Example
/// ```
/// use chrono::{FixedOffset, TimeZone, Utc};
/// use moon_clock_lib::{MoonPhase, MoonReport, Observer};
///
/// let portland = Observer::new(43.6591, -70.2568);
/// let instant = Utc.with_ymd_and_hms(2024, 4, 9, 18, 0, 0).unwrap();
/// let edt = FixedOffset::west_opt(4 * 3600).unwrap();
///
/// let report = MoonReport::compute(&portland, &instant, &edt);
/// assert_eq!(report.phase(), MoonPhase::WaxingCrescent);
/// assert_eq!(report.illumination(), "1.6");
/// println!("{report}");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoonReport {
    phase: MoonPhase,
    illumination: String,
    #[serde(rename = "rise_time")]
    rise: HorizonEvent,
    #[serde(rename = "set_time")]
    set: HorizonEvent,
    day_boundary_fallback: bool,
}

impl MoonReport {
    /// Build the report for `instant`, placing rise/set on the civil day of
    /// `tz` that contains it.
    pub fn compute<Tz: TimeZone>(observer: &Observer, instant: &DateTime<Utc>, tz: &Tz) -> Self {
        Self::at_julian_day(observer, julian_day_from_utc(instant), tz)
    }

    /// Same as [`MoonReport::compute`] for an instant already expressed as a
    /// UTC Julian Day.
    pub fn at_julian_day<Tz: TimeZone>(observer: &Observer, jd: f64, tz: &Tz) -> Self {
        let reading = phase_reading(jd);
        let rise_set = moon_rise_set(jd, observer, tz);

        MoonReport {
            phase: reading.phase,
            illumination: reading.illumination_percent(),
            rise: rise_set.rise,
            set: rise_set.set,
            day_boundary_fallback: rise_set.day.fallback,
        }
    }

    /// Report for the current system time in the host's local time zone.
    pub fn now(observer: &Observer) -> Self {
        Self::compute(observer, &Utc::now(), &Local)
    }

    pub fn phase(&self) -> MoonPhase {
        self.phase
    }

    /// Illuminated percentage with one decimal and no `%` sign.
    pub fn illumination(&self) -> &str {
        &self.illumination
    }

    pub fn rise(&self) -> &HorizonEvent {
        &self.rise
    }

    pub fn set(&self) -> &HorizonEvent {
        &self.set
    }

    /// `"H:MM AM/PM"`, `"N/A"`, `"Always Above Horizon"` or `"Always Below Horizon"`.
    pub fn rise_time(&self) -> String {
        self.rise.to_string()
    }

    pub fn set_time(&self) -> String {
        self.set.to_string()
    }

    /// True when the local day could not be resolved to real midnights and
    /// the search fell back to a day starting at the query instant.
    pub fn day_boundary_fallback(&self) -> bool {
        self.day_boundary_fallback
    }
}

impl fmt::Display for MoonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Phase: {}", self.phase)?;
        writeln!(f, "Illumination: {}%", self.illumination)?;
        writeln!(f, "Moonrise: {}", self.rise)?;
        write!(f, "Moonset: {}", self.set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn portland_report() -> MoonReport {
        let portland = Observer::new(43.6591, -70.2568);
        let instant = Utc.with_ymd_and_hms(2024, 4, 9, 18, 0, 0).unwrap();
        let edt = FixedOffset::west_opt(4 * 3600).unwrap();
        MoonReport::compute(&portland, &instant, &edt)
    }

    #[test]
    fn test_portland_day_after_eclipse() {
        let report = portland_report();
        // A day after the new moon the crescent is just past the 1% cutoff
        assert_eq!(report.phase(), MoonPhase::WaxingCrescent);
        assert_eq!(report.illumination(), "1.6");
        assert_eq!(report.rise_time(), "6:31 AM");
        assert_eq!(report.set_time(), "8:53 PM");
        assert!(!report.day_boundary_fallback());
    }

    #[test]
    fn test_eclipse_instant_reports_new_moon() {
        // 2024-04-08 18:21 UTC, mid-eclipse
        let portland = Observer::new(43.6591, -70.2568);
        let edt = FixedOffset::west_opt(4 * 3600).unwrap();
        let report = MoonReport::at_julian_day(&portland, 2_460_409.264_58, &edt);
        assert_eq!(report.phase(), MoonPhase::NewMoon);
        let pct: f64 = report.illumination().parse().unwrap();
        assert!(pct < 1.0);
    }

    #[test]
    fn test_display_block() {
        let text = portland_report().to_string();
        assert_eq!(
            text,
            "Phase: Waxing Crescent\nIllumination: 1.6%\nMoonrise: 6:31 AM\nMoonset: 8:53 PM"
        );
    }

    #[test]
    fn test_json_uses_display_strings() {
        let json = serde_json::to_value(portland_report()).unwrap();
        assert_eq!(json["phase"], "Waxing Crescent");
        assert_eq!(json["illumination"], "1.6");
        assert_eq!(json["rise_time"], "6:31 AM");
        assert_eq!(json["set_time"], "8:53 PM");
        assert_eq!(json["day_boundary_fallback"], false);
    }

    #[test]
    fn test_now_produces_valid_fields() {
        let report = MoonReport::now(&Observer::new(51.4779, -0.0015));
        assert!(MoonPhase::ALL.contains(&report.phase()));
        let pct: f64 = report.illumination().parse().unwrap();
        assert!((0.0..=100.0).contains(&pct));
        assert!(!report.rise_time().is_empty());
        assert!(!report.set_time().is_empty());
    }
}
