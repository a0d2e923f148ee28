//! # Julian Day and Civil Time Conversion
//!
//! Every astronomical routine in the crate runs on a UTC-based Julian Day
//! (no leap-second or TT distinction). This module is the only place that
//! crosses between that continuous day count and calendar fields.
//!
//! Local civil time goes through `chrono::TimeZone`, so the same code serves
//! `chrono::Local` in production and a pinned `Utc`/`FixedOffset` zone in
//! tests. Conversions that can fail return [`TimeError`]; the local-midnight
//! lookup never fails outright and instead reports a [`DayBoundary::Fallback`].

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use thiserror::Error;

/// Julian Day of the J2000.0 epoch (2000-01-01 12:00 UTC).
pub const J2000: f64 = 2_451_545.0;

/// Julian Day of the Unix epoch (1970-01-01 00:00 UTC).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Errors raised while mapping a Julian Day onto civil calendar fields.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimeError {
    /// The Julian Day maps to an instant chrono cannot represent
    #[error("julian day {0} is outside the representable calendar range")]
    OutOfRange(f64),

    /// Local midnight is skipped on this date (DST gap at 00:00)
    #[error("local midnight does not exist on {0}")]
    MissingMidnight(NaiveDate),
}

/// Outcome of a local-midnight lookup.
///
/// `Fallback` carries the untouched approximate Julian Day that was passed
/// in, so callers can keep going while still knowing the day boundary is
/// not a real midnight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DayBoundary {
    Converted(f64),
    Fallback(f64),
}

impl DayBoundary {
    pub fn jd(self) -> f64 {
        match self {
            DayBoundary::Converted(jd) | DayBoundary::Fallback(jd) => jd,
        }
    }

    pub fn is_fallback(self) -> bool {
        matches!(self, DayBoundary::Fallback(_))
    }
}

/// The local civil day `[start, end)` that contains an instant, in Julian Days.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalDay {
    pub start: f64,
    pub end: f64,
    /// True when either boundary came from the approximate-JD fallback
    pub fallback: bool,
}

/// Gregorian calendar fields (UTC) to Julian Day.
///
/// January and February count as months 13 and 14 of the previous year so
/// the leap day falls at the end of the computational year.
pub fn julian_day(utc: &NaiveDateTime) -> f64 {
    let mut year = utc.year();
    let mut month = utc.month() as i32;
    let day = utc.day() as f64
        + utc.hour() as f64 / 24.0
        + utc.minute() as f64 / 1440.0
        + utc.second() as f64 / SECONDS_PER_DAY;

    if month <= 2 {
        year -= 1;
        month += 12;
    }

    let a = (year as f64 / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    (365.25 * (year as f64 + 4716.0)).floor() + (30.6001 * (month as f64 + 1.0)).floor() + day + b
        - 1524.5
}

/// Julian Day for a UTC instant. Sub-second precision is dropped.
pub fn julian_day_from_utc(instant: &DateTime<Utc>) -> f64 {
    julian_day(&instant.naive_utc())
}

/// Snapshot of the system clock as a Julian Day.
pub fn current_julian_day() -> f64 {
    julian_day_from_utc(&Utc::now())
}

/// Julian Day to civil time in `tz`, truncated to whole seconds.
pub fn jd_to_local<Tz: TimeZone>(jd: f64, tz: &Tz) -> Result<DateTime<Tz>, TimeError> {
    let seconds = (jd - UNIX_EPOCH_JD) * SECONDS_PER_DAY;
    if !seconds.is_finite() {
        return Err(TimeError::OutOfRange(jd));
    }

    let utc = DateTime::<Utc>::from_timestamp(seconds as i64, 0).ok_or(TimeError::OutOfRange(jd))?;
    Ok(utc.with_timezone(tz))
}

/// Julian Day of the local midnight that starts the civil day containing
/// `jd_approx`.
///
/// A failed conversion is logged and degrades to returning `jd_approx`
/// itself as [`DayBoundary::Fallback`].
pub fn local_midnight_jd<Tz: TimeZone>(jd_approx: f64, tz: &Tz) -> DayBoundary {
    match try_local_midnight(jd_approx, tz) {
        Ok(jd) => DayBoundary::Converted(jd),
        Err(e) => {
            log::warn!("local midnight lookup failed ({e}); using JD {jd_approx} as day start");
            DayBoundary::Fallback(jd_approx)
        }
    }
}

fn try_local_midnight<Tz: TimeZone>(jd: f64, tz: &Tz) -> Result<f64, TimeError> {
    let date = jd_to_local(jd, tz)?.date_naive();
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or(TimeError::MissingMidnight(date))?;
    let resolved = tz
        .from_local_datetime(&midnight)
        .earliest()
        .ok_or(TimeError::MissingMidnight(date))?;

    Ok(julian_day(&resolved.naive_utc()))
}

/// Bounds of the local civil day containing `jd_now`.
///
/// The end is looked up as a real midnight too (36 h after the start always
/// lands on the next civil date), so 23 h and 25 h DST days keep their true
/// length. If a lookup falls back, the day is taken as exactly 1.0 JD long.
pub fn local_day<Tz: TimeZone>(jd_now: f64, tz: &Tz) -> LocalDay {
    match local_midnight_jd(jd_now, tz) {
        DayBoundary::Converted(start) => match local_midnight_jd(start + 1.5, tz) {
            DayBoundary::Converted(end) => LocalDay {
                start,
                end,
                fallback: false,
            },
            DayBoundary::Fallback(_) => LocalDay {
                start,
                end: start + 1.0,
                fallback: true,
            },
        },
        DayBoundary::Fallback(start) => LocalDay {
            start,
            end: start + 1.0,
            fallback: true,
        },
    }
}

/// 24-hour clock fields to `"H:MM AM"` / `"H:MM PM"`.
///
/// Hours 0 and 24 display as 12; minutes are always two digits.
pub fn military_to_standard(hour: u32, minute: u32) -> String {
    let suffix = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour {
        0 | 24 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    format!("{}:{:02} {}", display_hour, minute, suffix)
}

/// 12-hour rendering of a zoned instant.
pub fn format_clock_time<Tz: TimeZone>(time: &DateTime<Tz>) -> String {
    military_to_standard(time.hour(), time.minute())
}
