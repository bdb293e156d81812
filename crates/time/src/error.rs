use std::fmt;

use thiserror::Error;

/// Calendar component rejected by validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarField {
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl fmt::Display for CalendarField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CalendarField::Month => "month",
            CalendarField::Day => "day",
            CalendarField::Hour => "hour",
            CalendarField::Minute => "minute",
            CalendarField::Second => "second",
        };
        f.write_str(name)
    }
}

/// Errors raised while constructing or shifting a [`crate::Time`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TimeError {
    #[error("time overflow converting {seconds} s to nanoseconds")]
    Overflow { seconds: f64 },
    #[error("invalid UTC calendar {field}: {value}")]
    InvalidCalendar { field: CalendarField, value: f64 },
}
