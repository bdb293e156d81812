use std::fs;

use simcore::config::{ClockConfig, ConfigError, load_clock_config, load_clock_configs};
use simcore::{Duration, Time, TimeError};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

const YAML: &str = "\
epoch:
  calendar:
    year: 2000
    month: 1
    day: 1
    hour: 12
    minute: 0
    second: 0.0
step:
  value: 30
  unit: minutes
duration:
  value: 2
  unit: hours
";

const TOML: &str = r#"
[epoch]
julian_date = 2451545.5

[step]
value = 1
unit = "days"
"#;

#[test]
fn loads_yaml_clock_config() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clock.yaml");
    fs::write(&path, YAML).unwrap();

    let config = load_clock_config(&path).expect("yaml clock config");
    assert_eq!(config.start_time().unwrap(), Time::J2000);
    assert_eq!(config.step(), Duration::from_minutes(30.0));
    let ticks = config.ticks().unwrap();
    assert_eq!(ticks.len(), 5);
    assert_eq!(ticks[4] - ticks[0], Duration::from_hours(2.0));
}

#[test]
fn loads_toml_clock_config() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clock.toml");
    fs::write(&path, TOML).unwrap();

    let config: ClockConfig = load_clock_config(&path).expect("toml clock config");
    let start = config.start_time().unwrap();
    assert_eq!(start - Time::J2000, Duration::from_hours(12.0));
    assert_eq!(config.step(), Duration::from_days(1.0));
    assert!(config.duration.is_none());
}

#[test]
fn loads_directory_in_name_order() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("b.toml"), TOML).unwrap();
    fs::write(dir.path().join("a.yaml"), YAML).unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let configs = load_clock_configs(dir.path()).unwrap();
    assert_eq!(configs.len(), 2);
    assert_eq!(configs[0].start_time().unwrap(), Time::J2000);
    assert_eq!(configs[1].epoch.julian_date, Some(2_451_545.5));
}

#[test]
fn missing_and_malformed_files_report_errors() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        load_clock_config(dir.path().join("absent.yaml")),
        Err(ConfigError::Io(_))
    ));

    let bad_yaml = dir.path().join("bad.yaml");
    fs::write(&bad_yaml, "epoch: [1, 2").unwrap();
    assert!(matches!(
        load_clock_config(&bad_yaml),
        Err(ConfigError::Parse(_))
    ));

    let bad_toml = dir.path().join("bad.toml");
    fs::write(&bad_toml, "[epoch\n").unwrap();
    assert!(matches!(
        load_clock_config(&bad_toml),
        Err(ConfigError::Toml(_))
    ));
}

#[test]
fn invalid_epoch_surfaces_time_error() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clock.yaml");
    fs::write(
        &path,
        "epoch:\n  calendar: { year: 2024, month: 2, day: 10, hour: 0, minute: 0, second: 60.0 }\n",
    )
    .unwrap();

    let config = load_clock_config(&path).unwrap();
    let err = config.start_time().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Time(TimeError::InvalidCalendar { .. })
    ));
    assert_eq!(err.to_string(), "invalid UTC calendar second: 60");
}
