//! Shared constants and unit conversions for the simcore workspace.

/// Time constants. Seconds are SI seconds on a continuous scale (no leap seconds).
pub mod constants {
    /// Julian Date of the J2000 epoch (2000-01-01 12:00:00).
    pub const JD_J2000: f64 = 2_451_545.0;
    /// Offset between Julian Date and Modified Julian Date.
    pub const MJD_OFFSET: f64 = 2_400_000.5;
    /// Seconds per Julian day.
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
    /// Seconds per hour.
    pub const SECONDS_PER_HOUR: f64 = 3_600.0;
    /// Seconds per minute.
    pub const SECONDS_PER_MINUTE: f64 = 60.0;
    /// Nanoseconds per second.
    pub const NANOS_PER_SECOND: f64 = 1e9;
    /// Seconds per nanosecond.
    pub const SECONDS_PER_NANO: f64 = 1e-9;

    /// Integer nanosecond counts for exact calendar arithmetic.
    pub mod nanos {
        pub const PER_SECOND: i64 = 1_000_000_000;
        pub const PER_MINUTE: i64 = 60 * PER_SECOND;
        pub const PER_HOUR: i64 = 60 * PER_MINUTE;
        pub const PER_DAY: i64 = 24 * PER_HOUR;
    }
}

/// Lightweight time conversions shared across crates.
pub mod time {
    use super::constants::{
        JD_J2000, MJD_OFFSET, SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
    };

    /// Convert days to seconds.
    #[inline]
    pub fn days_to_seconds(days: f64) -> f64 {
        days * SECONDS_PER_DAY
    }

    /// Convert seconds to days.
    #[inline]
    pub fn seconds_to_days(seconds: f64) -> f64 {
        seconds / SECONDS_PER_DAY
    }

    #[inline]
    pub fn hours_to_seconds(hours: f64) -> f64 {
        hours * SECONDS_PER_HOUR
    }

    #[inline]
    pub fn minutes_to_seconds(minutes: f64) -> f64 {
        minutes * SECONDS_PER_MINUTE
    }

    /// Seconds elapsed since J2000 for a Julian Date.
    #[inline]
    pub fn julian_date_to_j2000_seconds(jd: f64) -> f64 {
        days_to_seconds(jd - JD_J2000)
    }

    /// Julian Date for a count of seconds since J2000.
    #[inline]
    pub fn j2000_seconds_to_julian_date(seconds: f64) -> f64 {
        JD_J2000 + seconds_to_days(seconds)
    }

    #[inline]
    pub fn julian_to_modified_julian(jd: f64) -> f64 {
        jd - MJD_OFFSET
    }
}
