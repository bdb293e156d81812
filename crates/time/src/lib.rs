//! Time primitives: nanosecond-resolution instants anchored at J2000, second-based
//! durations, and Gregorian calendar conversion on a continuous UTC-like scale
//! (leap seconds are not modelled).

pub mod calendar;
pub mod duration;
pub mod error;
pub mod instant;

pub use calendar::UtcCalendar;
pub use duration::Duration;
pub use error::{CalendarField, TimeError};
pub use instant::Time;
