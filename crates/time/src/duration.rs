use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};
use simcore_core::constants::{
    NANOS_PER_SECOND, SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
};
use simcore_core::time::{days_to_seconds, hours_to_seconds, minutes_to_seconds};

use crate::error::TimeError;

/// 2^63, the first magnitude outside the `i64` range.
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Signed time span in seconds. Not anchored to any epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Duration {
    pub seconds: f64,
}

impl Duration {
    pub const ZERO: Duration = Duration { seconds: 0.0 };

    #[inline]
    pub const fn from_seconds(seconds: f64) -> Self {
        Self { seconds }
    }

    #[inline]
    pub fn from_minutes(minutes: f64) -> Self {
        Self::from_seconds(minutes_to_seconds(minutes))
    }

    #[inline]
    pub fn from_hours(hours: f64) -> Self {
        Self::from_seconds(hours_to_seconds(hours))
    }

    #[inline]
    pub fn from_days(days: f64) -> Self {
        Self::from_seconds(days_to_seconds(days))
    }

    #[inline]
    pub fn as_seconds(&self) -> f64 {
        self.seconds
    }

    #[inline]
    pub fn as_minutes(&self) -> f64 {
        self.seconds / SECONDS_PER_MINUTE
    }

    #[inline]
    pub fn as_hours(&self) -> f64 {
        self.seconds / SECONDS_PER_HOUR
    }

    #[inline]
    pub fn as_days(&self) -> f64 {
        self.seconds / SECONDS_PER_DAY
    }

    /// Whole nanoseconds, rounded to nearest. Fails when the count does not
    /// fit in an `i64`.
    pub fn to_nanos(&self) -> Result<i64, TimeError> {
        seconds_to_ns(self.seconds)
    }
}

pub(crate) fn seconds_to_ns(seconds: f64) -> Result<i64, TimeError> {
    let ns = (seconds * NANOS_PER_SECOND).round();
    // NaN fails both comparisons
    if ns >= -I64_LIMIT && ns < I64_LIMIT {
        Ok(ns as i64)
    } else {
        Err(overflow(seconds))
    }
}

pub(crate) fn overflow(seconds: f64) -> TimeError {
    log::debug!("time overflow: {seconds} s does not fit in i64 nanoseconds");
    TimeError::Overflow { seconds }
}

impl Add for Duration {
    type Output = Duration;

    fn add(self, other: Duration) -> Duration {
        Duration::from_seconds(self.seconds + other.seconds)
    }
}

impl Sub for Duration {
    type Output = Duration;

    fn sub(self, other: Duration) -> Duration {
        Duration::from_seconds(self.seconds - other.seconds)
    }
}

impl Mul<f64> for Duration {
    type Output = Duration;

    fn mul(self, factor: f64) -> Duration {
        Duration::from_seconds(self.seconds * factor)
    }
}

impl Neg for Duration {
    type Output = Duration;

    fn neg(self) -> Duration {
        Duration::from_seconds(-self.seconds)
    }
}
