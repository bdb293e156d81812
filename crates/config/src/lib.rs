//! Clock configuration models and loaders.
//!
//! A clock configuration names a start epoch, a step, and optionally a span,
//! and resolves them into [`Time`] and [`Duration`] values.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use simcore_time::{Duration, Time, TimeError, UtcCalendar};
use thiserror::Error;

/// Upper bound on the number of instants [`ClockConfig::ticks`] will produce.
pub const MAX_TICKS: u64 = 10_000_000;

/// Start epoch. Exactly one of the fields must be set.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct EpochConfig {
    #[serde(default)]
    pub calendar: Option<UtcCalendar>,
    #[serde(default)]
    pub julian_date: Option<f64>,
    #[serde(default)]
    pub seconds_since_j2000: Option<f64>,
}

impl EpochConfig {
    /// Resolve to an instant through the matching [`Time`] constructor.
    pub fn resolve(&self) -> Result<Time, ConfigError> {
        let time = match (self.calendar, self.julian_date, self.seconds_since_j2000) {
            (Some(calendar), None, None) => Time::from_utc_calendar(&calendar)?,
            (None, Some(jd), None) => Time::from_julian_date(jd)?,
            (None, None, Some(seconds)) => Time::from_seconds_since_j2000(seconds)?,
            _ => {
                let count = [
                    self.calendar.is_some(),
                    self.julian_date.is_some(),
                    self.seconds_since_j2000.is_some(),
                ]
                .into_iter()
                .filter(|set| *set)
                .count();
                return Err(ConfigError::AmbiguousEpoch { count });
            }
        };
        Ok(time)
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
}

/// A duration written as a value and a unit, e.g. `{ value: 6, unit: hours }`.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct DurationConfig {
    pub value: f64,
    pub unit: DurationUnit,
}

impl DurationConfig {
    pub fn to_duration(&self) -> Duration {
        match self.unit {
            DurationUnit::Seconds => Duration::from_seconds(self.value),
            DurationUnit::Minutes => Duration::from_minutes(self.value),
            DurationUnit::Hours => Duration::from_hours(self.value),
            DurationUnit::Days => Duration::from_days(self.value),
        }
    }
}

fn default_step() -> DurationConfig {
    DurationConfig {
        value: 60.0,
        unit: DurationUnit::Seconds,
    }
}

/// Clock configuration parsed from YAML or TOML.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ClockConfig {
    pub epoch: EpochConfig,
    #[serde(default = "default_step")]
    pub step: DurationConfig,
    #[serde(default)]
    pub duration: Option<DurationConfig>,
}

impl ClockConfig {
    pub fn start_time(&self) -> Result<Time, ConfigError> {
        self.epoch.resolve()
    }

    pub fn step(&self) -> Duration {
        self.step.to_duration()
    }

    /// End of the configured span, or `None` when no span is configured.
    pub fn end_time(&self) -> Result<Option<Time>, ConfigError> {
        match self.duration {
            Some(span) => Ok(Some(self.start_time()?.checked_add(span.to_duration())?)),
            None => Ok(None),
        }
    }

    /// Instants from the start epoch to the end of the span, spaced by `step`.
    ///
    /// The start is always included; the last tick is the latest one not past
    /// the end. Without a configured span only the start is returned.
    ///
    /// The step is rounded to whole nanoseconds once; a step that rounds to
    /// zero is rejected, as is a span holding more than [`MAX_TICKS`] ticks.
    pub fn ticks(&self) -> Result<Vec<Time>, ConfigError> {
        let start = self.start_time()?;
        let Some(end) = self.end_time()? else {
            return Ok(vec![start]);
        };

        let step = self.step();
        let step_ns = if step.seconds.is_nan() { 0 } else { step.to_nanos()? };
        if step_ns <= 0 {
            return Err(ConfigError::NonPositiveStep {
                seconds: step.seconds,
            });
        }

        let span_ns = i128::from(end.ns_since_j2000()) - i128::from(start.ns_since_j2000());
        let count = if span_ns < 0 {
            1
        } else {
            span_ns / i128::from(step_ns) + 1
        };
        if count > i128::from(MAX_TICKS) {
            return Err(ConfigError::TooManyTicks {
                count: count as u128,
            });
        }

        // start + k * step stays within [start, end], so it cannot overflow
        let first = start.ns_since_j2000();
        Ok((0..count as i64)
            .map(|k| Time::from_ns_since_j2000(first + k * step_ns))
            .collect())
    }
}

/// Errors that can occur while loading or resolving configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("epoch must set exactly one of calendar, julian_date, seconds_since_j2000 (found {count})")]
    AmbiguousEpoch { count: usize },
    #[error("clock step must be at least one nanosecond, got {seconds} s")]
    NonPositiveStep { seconds: f64 },
    #[error("clock span holds {count} ticks, more than the limit of {max}", max = MAX_TICKS)]
    TooManyTicks { count: u128 },
    #[error(transparent)]
    Time(#[from] TimeError),
}

/// Load a clock configuration from a `.toml` file or, for any other
/// extension, a YAML file.
pub fn load_clock_config<P: AsRef<Path>>(path: P) -> Result<ClockConfig, ConfigError> {
    let path = path.as_ref();
    let config: ClockConfig = if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)?
    } else {
        let reader = File::open(path)?;
        serde_yaml::from_reader(reader)?
    };
    log::debug!("loaded clock config from {}: {:?}", path.display(), config);
    Ok(config)
}

/// Load every `.toml`, `.yaml` and `.yml` clock configuration in a directory,
/// ordered by file name.
pub fn load_clock_configs<P: AsRef<Path>>(dir: P) -> Result<Vec<ClockConfig>, ConfigError> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| matches!(ext, "toml" | "yaml" | "yml"))
                .unwrap_or(false)
        })
        .collect();
    entries.sort();
    entries.iter().map(load_clock_config).collect()
}

fn is_toml(path: &Path) -> bool {
    path.extension().map(|ext| ext == "toml").unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_yaml(text: &str) -> ClockConfig {
        serde_yaml::from_str(text).expect("valid clock yaml")
    }

    #[test]
    fn calendar_epoch_resolves_to_j2000() {
        let config = parse_yaml(
            "epoch:\n  calendar: { year: 2000, month: 1, day: 1, hour: 12, minute: 0, second: 0.0 }\n",
        );
        assert_eq!(config.start_time().unwrap(), Time::J2000);
        assert_eq!(config.step(), Duration::from_seconds(60.0));
        assert_eq!(config.end_time().unwrap(), None);
        assert_eq!(config.ticks().unwrap(), vec![Time::J2000]);
    }

    #[test]
    fn duration_units() {
        let config = parse_yaml(
            "epoch: { julian_date: 2451545.0 }\nstep: { value: 6, unit: hours }\nduration: { value: 1, unit: days }\n",
        );
        assert_eq!(config.step(), Duration::from_hours(6.0));
        let end = config.end_time().unwrap().unwrap();
        assert_eq!(end - Time::J2000, Duration::from_days(1.0));
        let ticks = config.ticks().unwrap();
        assert_eq!(ticks.len(), 5);
        assert_eq!(ticks.last().copied(), Some(end));
    }

    #[test]
    fn ticks_stop_before_passing_the_end() {
        let config = parse_yaml(
            "epoch: { seconds_since_j2000: 0.0 }\nstep: { value: 7, unit: seconds }\nduration: { value: 20, unit: seconds }\n",
        );
        let offsets: Vec<i64> = config
            .ticks()
            .unwrap()
            .iter()
            .map(|t| t.ns_since_j2000() / 1_000_000_000)
            .collect();
        assert_eq!(offsets, vec![0, 7, 14]);
    }

    #[test]
    fn epoch_must_name_exactly_one_source() {
        let none = parse_yaml("epoch: {}\n");
        assert!(matches!(
            none.start_time(),
            Err(ConfigError::AmbiguousEpoch { count: 0 })
        ));
        let both = parse_yaml("epoch: { julian_date: 2451545.0, seconds_since_j2000: 0.0 }\n");
        assert!(matches!(
            both.start_time(),
            Err(ConfigError::AmbiguousEpoch { count: 2 })
        ));
    }

    #[test]
    fn zero_step_is_rejected() {
        let config = parse_yaml(
            "epoch: { seconds_since_j2000: 0.0 }\nstep: { value: 0, unit: minutes }\nduration: { value: 1, unit: hours }\n",
        );
        assert!(matches!(
            config.ticks(),
            Err(ConfigError::NonPositiveStep { .. })
        ));
    }

    #[test]
    fn sub_nanosecond_step_is_rejected() {
        let config = parse_yaml(
            "epoch: { seconds_since_j2000: 0.0 }\nstep: { value: 1.0e-10, unit: seconds }\nduration: { value: 1, unit: seconds }\n",
        );
        assert!(matches!(
            config.ticks(),
            Err(ConfigError::NonPositiveStep { .. })
        ));
    }

    #[test]
    fn oversized_span_is_rejected() {
        let config = parse_yaml(
            "epoch: { seconds_since_j2000: 0.0 }\nstep: { value: 1.0e-9, unit: seconds }\nduration: { value: 1, unit: hours }\n",
        );
        match config.ticks() {
            Err(ConfigError::TooManyTicks { count }) => assert_eq!(count, 3_600_000_000_001),
            other => panic!("expected TooManyTicks, got {other:?}"),
        }
    }

    #[test]
    fn one_nanosecond_step_is_accepted() {
        let config = parse_yaml(
            "epoch: { seconds_since_j2000: 0.0 }\nstep: { value: 1.0e-9, unit: seconds }\nduration: { value: 1.0e-8, unit: seconds }\n",
        );
        let ns: Vec<i64> = config
            .ticks()
            .unwrap()
            .iter()
            .map(|t| t.ns_since_j2000())
            .collect();
        assert_eq!(ns, (0..=10).collect::<Vec<i64>>());
    }

    #[test]
    fn time_errors_propagate() {
        let config = parse_yaml(
            "epoch:\n  calendar: { year: 2024, month: 13, day: 1, hour: 0, minute: 0, second: 0.0 }\n",
        );
        assert!(matches!(
            config.start_time(),
            Err(ConfigError::Time(TimeError::InvalidCalendar { .. }))
        ));
        let config = parse_yaml("epoch: { seconds_since_j2000: 1.0e10 }\n");
        assert!(matches!(
            config.start_time(),
            Err(ConfigError::Time(TimeError::Overflow { .. }))
        ));
    }
}
