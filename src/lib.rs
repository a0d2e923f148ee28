//! # Moon Tracker Core Library
//!
//! Self-contained lunar almanac: given an observer's position and an instant,
//! compute the Moon's illuminated fraction, its named phase, and the local
//! moonrise and moonset times. No external ephemeris is used; everything is
//! derived from truncated analytical series.
//!
//! ## Design Philosophy
//!
//! ### Pure computation
//! - **No I/O in the core**: the caller supplies the observer and the clock
//!   reading; the only optional I/O lives in [`config`] and [`gazetteer`]
//! - **Value types only**: every coordinate record is a small `Copy` struct
//!   produced and consumed within one report
//! - **Total math**: the only domain hazard (an `acos` argument drifting past
//!   ±1 at exact syzygy) is clamped
//!
//! ### Time base
//! All internal time is a UTC-based Julian Day (`f64`). Local civil time only
//! appears at the edges: finding the local day's midnight bounds and
//! formatting the final rise/set clock times, both through `chrono::TimeZone`.
//!
//! ### Data Flow
//! 1. **Clock**: `DateTime<Utc>` → Julian Day ([`time`])
//! 2. **Ephemerides**: Sun ([`solar`]), Moon ([`lunar`]), nutation ([`nutation`])
//! 3. **Phase**: phase angle → illuminated fraction → label ([`phase`])
//! 4. **Horizon**: topocentric altitude ([`topocentric`]) → scan and bisect
//!    ([`horizon`])
//! 5. **Report**: four display strings ([`report::MoonReport`])
//!
//! ## Core Types
//! - [`Observer`]: latitude/longitude of the viewing site
//! - [`MoonReport`]: phase, illumination, moonrise and moonset for one query

use serde::{Deserialize, Serialize};

pub mod angles;
pub mod config;
pub mod gazetteer;
pub mod horizon;
pub mod lunar;
pub mod nutation;
pub mod phase;
pub mod report;
pub mod solar;
pub mod time;
pub mod topocentric;

pub use phase::MoonPhase;
pub use report::MoonReport;

/// Geographic position of the viewer.
///
/// Longitude is east-positive, as returned by most geolocation services;
/// both angles are in degrees. The observer is placed on the Earth's
/// equatorial radius, with no height above sea level.
///
/// # Example
/// ```
/// use moon_clock_lib::Observer;
///
/// // Portland, ME
/// let portland = Observer::new(43.6591, -70.2568);
/// assert!(portland.longitude < 0.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observer {
    /// Geodetic latitude in degrees, north positive
    pub latitude: f64,
    /// Longitude in degrees, east positive
    pub longitude: f64,
}

impl Observer {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Observer {
            latitude,
            longitude,
        }
    }
}
