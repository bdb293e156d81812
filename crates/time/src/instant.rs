//! Absolute instants stored as integer nanoseconds since J2000.

use std::fmt;
use std::ops::Sub;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use simcore_core::constants::{NANOS_PER_SECOND, SECONDS_PER_NANO, nanos};
use simcore_core::time::{
    j2000_seconds_to_julian_date, julian_date_to_j2000_seconds, julian_to_modified_julian,
};

use crate::calendar::{UtcCalendar, civil_parts};
use crate::duration::{Duration, overflow, seconds_to_ns};
use crate::error::TimeError;

/// Instant on a continuous UTC-like scale, counted in nanoseconds from the
/// J2000 epoch (2000-01-01 12:00:00, JD 2451545.0).
///
/// Integer storage keeps repeated additions free of floating-point drift.
/// Ordering and equality follow the nanosecond count.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Time {
    ns_since_j2000: i64,
}

impl Time {
    pub const J2000: Time = Time::from_ns_since_j2000(0);

    /// Build from seconds since J2000, rounded to the nearest nanosecond.
    pub fn from_seconds_since_j2000(seconds: f64) -> Result<Self, TimeError> {
        seconds_to_ns(seconds).map(Self::from_ns_since_j2000)
    }

    #[inline]
    pub const fn from_ns_since_j2000(ns: i64) -> Self {
        Self { ns_since_j2000: ns }
    }

    pub fn from_julian_date(jd: f64) -> Result<Self, TimeError> {
        Self::from_seconds_since_j2000(julian_date_to_j2000_seconds(jd))
    }

    /// Build from a calendar record. The record is validated first, so an
    /// out-of-range field reports [`TimeError::InvalidCalendar`] before any
    /// overflow check happens.
    pub fn from_utc_calendar(utc: &UtcCalendar) -> Result<Self, TimeError> {
        Self::from_julian_date(utc.julian_date()?)
    }

    pub fn from_naive_datetime(dt: &NaiveDateTime) -> Result<Self, TimeError> {
        Self::from_utc_calendar(&UtcCalendar::from_naive_datetime(dt))
    }

    #[inline]
    pub const fn ns_since_j2000(&self) -> i64 {
        self.ns_since_j2000
    }

    #[inline]
    pub fn seconds_since_j2000(&self) -> f64 {
        self.ns_since_j2000 as f64 * SECONDS_PER_NANO
    }

    pub fn julian_date(&self) -> f64 {
        j2000_seconds_to_julian_date(self.seconds_since_j2000())
    }

    pub fn modified_julian_date(&self) -> f64 {
        julian_to_modified_julian(self.julian_date())
    }

    /// Gregorian calendar record for this instant.
    pub fn to_utc_calendar(&self) -> UtcCalendar {
        UtcCalendar::from_ns_since_j2000(self.ns_since_j2000)
    }

    /// Shift forward by `duration`, rounded to the nearest nanosecond.
    pub fn checked_add(self, duration: Duration) -> Result<Self, TimeError> {
        let delta = duration.to_nanos()?;
        self.ns_since_j2000
            .checked_add(delta)
            .map(Self::from_ns_since_j2000)
            .ok_or_else(|| overflow(duration.seconds))
    }

    /// Shift backward by `duration`, rounded to the nearest nanosecond.
    pub fn checked_sub(self, duration: Duration) -> Result<Self, TimeError> {
        let delta = duration.to_nanos()?;
        self.ns_since_j2000
            .checked_sub(delta)
            .map(Self::from_ns_since_j2000)
            .ok_or_else(|| overflow(-duration.seconds))
    }
}

/// Elapsed time between two instants, taken from the exact integer difference.
impl Sub for Time {
    type Output = Duration;

    fn sub(self, other: Time) -> Duration {
        let diff = i128::from(self.ns_since_j2000) - i128::from(other.ns_since_j2000);
        Duration::from_seconds(diff as f64 / NANOS_PER_SECOND)
    }
}

/// `YYYY-MM-DDTHH:MM:SS.nnnnnnnnn` on the UTC-like scale.
impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (year, month, day, ns_of_day) = civil_parts(self.ns_since_j2000);
        let seconds = ns_of_day / nanos::PER_SECOND;
        write!(
            f,
            "{year:04}-{month:02}-{day:02}T{:02}:{:02}:{:02}.{:09}",
            seconds / 3_600,
            (seconds % 3_600) / 60,
            seconds % 60,
            ns_of_day % nanos::PER_SECOND
        )
    }
}
