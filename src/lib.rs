//! Primitive math and time building blocks for simulation code.
//!
//! The workspace crates are re-exported here so front-ends depend on a single
//! crate: [`math`] for vectors, [`time`] for J2000 instants and calendar
//! conversion, and [`config`] for clock configuration files.

pub use simcore_config as config;
pub use simcore_core::constants;
pub use simcore_math as math;
pub use simcore_time as time;

pub use simcore_math::Vec3;
pub use simcore_time::{CalendarField, Duration, Time, TimeError, UtcCalendar};

/// Returns the version of the library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
