//! # Moonrise and Moonset Search
//!
//! The search is purely numerical:
//!
//! 1. **Scan**: sample altitude every 5 minutes over `[now − 1 d, now + 1 d]`
//!    and record every interval where it crosses the horizon threshold.
//! 2. **Refine**: bisect each interval down to under one second.
//! 3. **Select**: keep the earliest rise and the earliest set that fall on
//!    the local civil day containing `now`.
//! 4. **Resolve**: with no qualifying crossing, look at the altitude at both
//!    ends of the local day to tell a circumpolar Moon from one that never
//!    clears the horizon.
//!
//! The altitude source is any `Fn(f64) -> f64` of the Julian Day, so the scan
//! and selection logic can be exercised against synthetic curves.
//!
//! The search never fails: every path ends in a formatted local time or one
//! of the three sentinels.

use chrono::TimeZone;
use serde::{Serialize, Serializer};
use std::fmt;

use crate::time::{format_clock_time, jd_to_local, local_day, LocalDay};
use crate::topocentric::moon_altitude;
use crate::Observer;

/// Apparent altitude of the Moon's centre at rise/set: mean refraction plus
/// the Moon's semi-diameter, in degrees.
pub const HORIZON_ALT_DEG: f64 = -0.566;

/// Coarse scan resolution: 5 minutes (288 samples per day).
pub const SCAN_STEP_DAYS: f64 = 5.0 / (24.0 * 60.0);

/// The scan covers this many days either side of the query instant.
pub const SCAN_HALF_WINDOW_DAYS: f64 = 1.0;

/// Bisection stops once the bracket is narrower than one second.
pub const BISECTION_TOLERANCE_DAYS: f64 = 1.0 / (24.0 * 60.0 * 60.0);

/// Hard cap on bisection steps, independent of the tolerance.
const MAX_BISECTIONS: usize = 100;

/// Offset back from the next midnight when probing the end of the day.
const DAY_END_PROBE_DAYS: f64 = 0.0001;

pub const ALWAYS_ABOVE: &str = "Always Above Horizon";
pub const ALWAYS_BELOW: &str = "Always Below Horizon";
pub const NOT_AVAILABLE: &str = "N/A";

/// Refined crossing instants found by the coarse scan, in time order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Crossings {
    pub rises: Vec<f64>,
    pub sets: Vec<f64>,
}

/// Result of the search for one kind of event (rise or set).
#[derive(Debug, Clone, PartialEq)]
pub enum HorizonEvent {
    /// Crossing on the local day, with its 12-hour local clock time
    At { jd: f64, local_time: String },
    AlwaysAbove,
    AlwaysBelow,
    /// No crossing of this kind today, and the Moon is not circumpolar
    NotAvailable,
}

impl fmt::Display for HorizonEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HorizonEvent::At { local_time, .. } => f.write_str(local_time),
            HorizonEvent::AlwaysAbove => f.write_str(ALWAYS_ABOVE),
            HorizonEvent::AlwaysBelow => f.write_str(ALWAYS_BELOW),
            HorizonEvent::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

impl Serialize for HorizonEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Rise and set for one local civil day.
#[derive(Debug, Clone, PartialEq)]
pub struct RiseSet {
    pub rise: HorizonEvent,
    pub set: HorizonEvent,
    pub day: LocalDay,
}

/// Walk `[start, end]` in steps of `step` and bisect every threshold
/// crossing.
///
/// Samples are taken at `start + i·step` so rounding does not accumulate;
/// the last sample lands on `end` when the window is a whole number of steps.
pub fn scan_crossings<F>(altitude: &F, start: f64, end: f64, step: f64, threshold: f64) -> Crossings
where
    F: Fn(f64) -> f64,
{
    let steps = ((end - start) / step).round() as usize;
    let mut crossings = Crossings::default();

    let mut prev_jd = start;
    let mut prev_alt = altitude(start);
    for i in 1..=steps {
        let jd = start + i as f64 * step;
        let alt = altitude(jd);

        if prev_alt < threshold && alt >= threshold {
            crossings.rises.push(refine_crossing(altitude, prev_jd, jd, threshold));
        } else if prev_alt > threshold && alt <= threshold {
            crossings.sets.push(refine_crossing(altitude, prev_jd, jd, threshold));
        }

        prev_alt = alt;
        prev_jd = jd;
    }

    crossings
}

/// Bisect a bracketing interval down to the instant `altitude` meets
/// `threshold`.
///
/// Stops after [`MAX_BISECTIONS`] steps or once the bracket is narrower than
/// [`BISECTION_TOLERANCE_DAYS`], whichever comes first, and returns the
/// midpoint of the final bracket.
pub fn refine_crossing<F>(altitude: &F, mut start: f64, mut end: f64, threshold: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    // The start side keeps its sign throughout, so its offset is computed once
    let start_diff = altitude(start) - threshold;

    for _ in 0..MAX_BISECTIONS {
        if (end - start).abs() < BISECTION_TOLERANCE_DAYS {
            break;
        }

        let mid = (start + end) / 2.0;
        let mid_diff = altitude(mid) - threshold;

        if start_diff * mid_diff < 0.0 {
            end = mid;
        } else {
            start = mid;
        }
    }

    (start + end) / 2.0
}

/// Earliest candidate inside `[day.start, day.end)`.
pub fn earliest_in_day(candidates: &[f64], day: &LocalDay) -> Option<f64> {
    candidates
        .iter()
        .copied()
        .filter(|jd| *jd >= day.start && *jd < day.end)
        .min_by(f64::total_cmp)
}

/// Full rise/set search around `jd_now` for an arbitrary altitude curve.
pub fn find_rise_set<F, Tz>(altitude: F, jd_now: f64, tz: &Tz) -> RiseSet
where
    F: Fn(f64) -> f64,
    Tz: TimeZone,
{
    let crossings = scan_crossings(
        &altitude,
        jd_now - SCAN_HALF_WINDOW_DAYS,
        jd_now + SCAN_HALF_WINDOW_DAYS,
        SCAN_STEP_DAYS,
        HORIZON_ALT_DEG,
    );
    log::debug!(
        "horizon scan around JD {jd_now}: {} rise(s), {} set(s)",
        crossings.rises.len(),
        crossings.sets.len()
    );

    let day = local_day(jd_now, tz);
    let rise = resolve_event(earliest_in_day(&crossings.rises, &day), &altitude, &day, tz);
    let set = resolve_event(earliest_in_day(&crossings.sets, &day), &altitude, &day, tz);

    RiseSet { rise, set, day }
}

/// Moonrise and moonset on the local day of `jd_now` for `observer`.
pub fn moon_rise_set<Tz: TimeZone>(jd_now: f64, observer: &Observer, tz: &Tz) -> RiseSet {
    find_rise_set(|jd| moon_altitude(jd, observer), jd_now, tz)
}

fn resolve_event<F, Tz>(found: Option<f64>, altitude: &F, day: &LocalDay, tz: &Tz) -> HorizonEvent
where
    F: Fn(f64) -> f64,
    Tz: TimeZone,
{
    let Some(jd) = found else {
        return circumpolar_state(altitude, day);
    };

    match jd_to_local(jd, tz) {
        Ok(local) => HorizonEvent::At {
            jd,
            local_time: format_clock_time(&local),
        },
        Err(e) => {
            log::warn!("could not place crossing at JD {jd} in local time: {e}");
            HorizonEvent::NotAvailable
        }
    }
}

fn circumpolar_state<F>(altitude: &F, day: &LocalDay) -> HorizonEvent
where
    F: Fn(f64) -> f64,
{
    let at_start = altitude(day.start);
    let at_end = altitude(day.end - DAY_END_PROBE_DAYS);

    if at_start > HORIZON_ALT_DEG && at_end > HORIZON_ALT_DEG {
        HorizonEvent::AlwaysAbove
    } else if at_start < HORIZON_ALT_DEG && at_end < HORIZON_ALT_DEG {
        HorizonEvent::AlwaysBelow
    } else {
        HorizonEvent::NotAvailable
    }
}
