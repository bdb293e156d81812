//! Gregorian calendar records and their Julian Date conversion.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use simcore_core::constants::nanos;

use crate::error::{CalendarField, TimeError};

/// UTC-like calendar date and time of day. Leap seconds are not modelled, so
/// `second` lies in `[0, 60)`.
///
/// The record itself is unchecked; [`UtcCalendar::validate`] runs when it is
/// converted into a [`crate::Time`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UtcCalendar {
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub hour: i32,
    pub minute: i32,
    pub second: f64,
}

impl UtcCalendar {
    pub fn new(year: i32, month: i32, day: i32, hour: i32, minute: i32, second: f64) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Range-check every field.
    ///
    /// The day is only checked against `[1, 31]`, not against the length of the
    /// given month, so e.g. April 31 passes.
    pub fn validate(&self) -> Result<(), TimeError> {
        let checks = [
            (CalendarField::Month, self.month, 1, 12),
            (CalendarField::Day, self.day, 1, 31),
            (CalendarField::Hour, self.hour, 0, 23),
            (CalendarField::Minute, self.minute, 0, 59),
        ];
        for (field, value, min, max) in checks {
            if !(min..=max).contains(&value) {
                return Err(self.reject(field, f64::from(value)));
            }
        }
        if !(0.0..60.0).contains(&self.second) {
            return Err(self.reject(CalendarField::Second, self.second));
        }
        Ok(())
    }

    fn reject(&self, field: CalendarField, value: f64) -> TimeError {
        log::debug!("rejecting calendar record {self:?}: {field} {value} out of range");
        TimeError::InvalidCalendar { field, value }
    }

    /// Julian Date of this record (Fliegel & Van Flandern form, Gregorian calendar).
    pub fn julian_date(&self) -> Result<f64, TimeError> {
        self.validate()?;

        // i64 so that the January/February shift cannot overflow at i32::MIN
        let (mut year, mut month) = (i64::from(self.year), self.month);
        if month <= 2 {
            year -= 1;
            month += 12;
        }

        let a = year.div_euclid(100);
        let b = 2 - a + a.div_euclid(4);

        let day_fraction =
            (f64::from(self.hour) + (f64::from(self.minute) + self.second / 60.0) / 60.0) / 24.0;

        Ok((365.25 * (year as f64 + 4716.0)).floor()
            + (30.6001 * f64::from(month + 1)).floor()
            + f64::from(self.day)
            + day_fraction
            + b as f64
            - 1524.5)
    }

    /// Calendar record for a nanosecond count since J2000 (inverse of the forward
    /// conversion, always on the Gregorian calendar).
    pub(crate) fn from_ns_since_j2000(ns: i64) -> Self {
        let (year, month, day, ns_of_day) = civil_parts(ns);

        let hour = ns_of_day / nanos::PER_HOUR;
        let minute = (ns_of_day % nanos::PER_HOUR) / nanos::PER_MINUTE;
        let second_ns = ns_of_day % nanos::PER_MINUTE;

        Self {
            year,
            month,
            day,
            hour: hour as i32,
            minute: minute as i32,
            second: second_ns as f64 / nanos::PER_SECOND as f64,
        }
    }

    pub fn from_naive_datetime(dt: &NaiveDateTime) -> Self {
        // chrono encodes a leap second as nanoseconds >= 1e9, which lands on 60.x here
        let second = f64::from(dt.second()) + f64::from(dt.nanosecond()) / 1e9;
        Self {
            year: dt.year(),
            month: dt.month() as i32,
            day: dt.day() as i32,
            hour: dt.hour() as i32,
            minute: dt.minute() as i32,
            second,
        }
    }

    /// Convert to a chrono datetime. Unlike [`UtcCalendar::validate`], this also
    /// rejects days that do not exist in the given month.
    pub fn to_naive_datetime(&self) -> Result<NaiveDateTime, TimeError> {
        self.validate()?;

        let whole = self.second.floor();
        let nanos = (((self.second - whole) * 1e9).round() as u32).min(999_999_999);

        NaiveDate::from_ymd_opt(self.year, self.month as u32, self.day as u32)
            .and_then(|date| {
                date.and_hms_nano_opt(self.hour as u32, self.minute as u32, whole as u32, nanos)
            })
            .ok_or_else(|| self.reject(CalendarField::Day, f64::from(self.day)))
    }
}

/// Civil date of a nanosecond count since J2000, plus nanoseconds since midnight.
pub(crate) fn civil_parts(ns: i64) -> (i32, i32, i32, i64) {
    let (z, ns_of_day) = split_days(ns);
    let (year, month, day) = civil_from_julian_day_number(z);
    (year, month, day, ns_of_day)
}

/// Split nanoseconds since J2000 into the Julian Day Number of the civil day
/// and the nanoseconds elapsed since that day's midnight.
fn split_days(ns: i64) -> (i64, i64) {
    // J2000 sits at noon; shift so that day boundaries fall on midnight
    let since_midnight = i128::from(ns) + i128::from(nanos::PER_DAY / 2);
    let day_len = i128::from(nanos::PER_DAY);
    let days = since_midnight.div_euclid(day_len) as i64;
    let ns_of_day = since_midnight.rem_euclid(day_len) as i64;
    (2_451_545 + days, ns_of_day)
}

/// Meeus' inverse algorithm, Gregorian branch only.
fn civil_from_julian_day_number(z: i64) -> (i32, i32, i32) {
    let z = z as f64;
    let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
    let a = z + 1.0 + alpha - (alpha / 4.0).floor();
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = b - d - (30.6001 * e).floor();
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };

    (year as i32, month as i32, day as i32)
}
