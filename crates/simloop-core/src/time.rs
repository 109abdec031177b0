//! Simulation time model.
//!
//! # Design
//!
//! Time is a calendar instant without a time zone.  The engine never consults
//! the wall clock: `SimTime` only moves when the scheduler jumps to the next
//! sleeper's deadline.
//!
//! Deadlines reach the scheduler through [`IntoDeadline`], which accepts:
//!
//! | Input                     | Meaning                                  |
//! |---------------------------|------------------------------------------|
//! | `SimTime`, `NaiveDateTime`| absolute instant, passed through         |
//! | `NaiveDate`               | midnight at the start of that date       |
//! | `&str`, `String`          | ISO-8601 instant or date, parsed         |
//!
//! The default start instant is `2000-01-01 00:00:00`.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::{SimError, SimResult};

/// Span of simulated time.  Negative spans are allowed; the scheduler clamps
/// the clock so it never moves backward.
pub type SimDuration = TimeDelta;

/// Accepted ISO-8601 date-time layouts, tried in order.
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An instant on the virtual clock.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub NaiveDateTime);

impl SimTime {
    /// Midnight at the start of `date`.
    #[inline]
    pub fn midnight(date: NaiveDate) -> SimTime {
        SimTime(date.and_time(NaiveTime::MIN))
    }

    /// Parse an ISO-8601 instant (`2022-07-14T09:00:00`, `2022-07-14 09:00`)
    /// or a bare date (`2022-06-01`, meaning midnight).
    pub fn parse(input: &str) -> SimResult<SimTime> {
        let trimmed = input.trim();
        for format in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(SimTime(dt));
            }
        }
        NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
            .map(SimTime::midnight)
            .map_err(|_| SimError::InvalidDeadline(input.to_owned()))
    }

    /// The calendar date this instant falls on.
    #[inline]
    pub fn date(self) -> NaiveDate {
        self.0.date()
    }

    /// Span elapsed from `earlier` to `self`.
    #[inline]
    pub fn since(self, earlier: SimTime) -> SimDuration {
        self.0 - earlier.0
    }
}

impl Default for SimTime {
    /// `2000-01-01 00:00:00`, the conventional start of a run.
    fn default() -> Self {
        NaiveDate::from_ymd_opt(2000, 1, 1)
            .map(SimTime::midnight)
            .unwrap_or(SimTime(NaiveDateTime::MIN))
    }
}

impl std::ops::Add<SimDuration> for SimTime {
    type Output = SimTime;

    /// Saturates at the ends of the calendar range instead of overflowing.
    #[inline]
    fn add(self, rhs: SimDuration) -> SimTime {
        match self.0.checked_add_signed(rhs) {
            Some(dt) => SimTime(dt),
            None if rhs < TimeDelta::zero() => SimTime(NaiveDateTime::MIN),
            None => SimTime(NaiveDateTime::MAX),
        }
    }
}

impl std::ops::Sub for SimTime {
    type Output = SimDuration;
    #[inline]
    fn sub(self, rhs: SimTime) -> SimDuration {
        self.since(rhs)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S"))
    }
}

impl FromStr for SimTime {
    type Err = SimError;

    fn from_str(s: &str) -> SimResult<SimTime> {
        SimTime::parse(s)
    }
}

impl From<NaiveDateTime> for SimTime {
    fn from(dt: NaiveDateTime) -> SimTime {
        SimTime(dt)
    }
}

impl From<NaiveDate> for SimTime {
    fn from(date: NaiveDate) -> SimTime {
        SimTime::midnight(date)
    }
}

// ── IntoDeadline ──────────────────────────────────────────────────────────────

/// Anything that can name an absolute instant on the virtual clock.
///
/// Only string inputs can fail.
pub trait IntoDeadline {
    fn into_deadline(self) -> SimResult<SimTime>;
}

impl IntoDeadline for SimTime {
    #[inline]
    fn into_deadline(self) -> SimResult<SimTime> {
        Ok(self)
    }
}

impl IntoDeadline for NaiveDateTime {
    #[inline]
    fn into_deadline(self) -> SimResult<SimTime> {
        Ok(SimTime(self))
    }
}

impl IntoDeadline for NaiveDate {
    #[inline]
    fn into_deadline(self) -> SimResult<SimTime> {
        Ok(SimTime::midnight(self))
    }
}

impl IntoDeadline for &str {
    fn into_deadline(self) -> SimResult<SimTime> {
        SimTime::parse(self)
    }
}

impl IntoDeadline for &String {
    fn into_deadline(self) -> SimResult<SimTime> {
        SimTime::parse(self)
    }
}

impl IntoDeadline for String {
    fn into_deadline(self) -> SimResult<SimTime> {
        SimTime::parse(&self)
    }
}
