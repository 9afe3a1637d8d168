//! Configuration validation functionality.
//!
//! Bad values never stop the board: each reader falls back to its default.
//! Validation exists so the operator learns which values were ignored, and why.

use std::fmt;

use super::{RuleConfig, month_from_name, parse_flag, parse_minutes};
use crate::common::constants::*;
use crate::core::instant::{ClockFormat, parse_time_of_day};

/// A configuration value that will be ignored or may behave unexpectedly.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigIssue {
    NotANumber { key: String, value: String },
    NegativeMinutes { key: String, value: i64 },
    OutOfRange { key: String, value: String },
    NotAFlag { key: String, value: String },
    InvalidTime { key: String, value: String },
    UnknownMonth { key: String },
    UnknownClockFormat { value: String },
    FakeTimeMissing,
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigIssue::NotANumber { key, value } => {
                write!(f, "{key} ('{value}') is not a number; using the default")
            }
            ConfigIssue::NegativeMinutes { key, value } => {
                write!(f, "{key} ({value}) is negative; windows may overlap")
            }
            ConfigIssue::OutOfRange { key, value } => write!(
                f,
                "{key} ('{value}') exceeds {MAX_SETTING_MINUTES} minutes; using the default"
            ),
            ConfigIssue::NotAFlag { key, value } => {
                write!(f, "{key} ('{value}') is not true/false; using the default")
            }
            ConfigIssue::InvalidTime { key, value } => {
                write!(f, "{key} ('{value}') is not an HH:MM time and will be ignored")
            }
            ConfigIssue::UnknownMonth { key } => {
                write!(f, "{key} does not name a month and will be ignored")
            }
            ConfigIssue::UnknownClockFormat { value } => {
                write!(f, "clockFormat ('{value}') must be \"24h\" or \"12h\"; using 24h")
            }
            ConfigIssue::FakeTimeMissing => {
                write!(f, "fakeTimeEnabled is set but fakeTime is missing or invalid")
            }
        }
    }
}

/// Collect every issue in `config`. An empty result means all values are used as written.
pub fn validate_config(config: &RuleConfig) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();

    for &key in MINUTE_SETTINGS {
        if let Some(raw) = config.get(key) {
            match parse_minutes(raw) {
                None => issues.push(ConfigIssue::NotANumber {
                    key: key.to_string(),
                    value: raw.to_string(),
                }),
                Some(value) if !(-MAX_SETTING_MINUTES..=MAX_SETTING_MINUTES).contains(&value) => {
                    issues.push(ConfigIssue::OutOfRange {
                        key: key.to_string(),
                        value: raw.to_string(),
                    })
                }
                Some(value) if value < 0 => issues.push(ConfigIssue::NegativeMinutes {
                    key: key.to_string(),
                    value,
                }),
                Some(_) => {}
            }
        }
    }

    for &key in FLAG_SETTINGS {
        if let Some(raw) = config.get(key)
            && parse_flag(raw).is_none()
        {
            issues.push(ConfigIssue::NotAFlag {
                key: key.to_string(),
                value: raw.to_string(),
            });
        }
    }

    for (month, raw) in config.section(JUMMAH_TIMES_PREFIX) {
        let key = format!("{JUMMAH_TIMES_PREFIX}.{month}");
        if month_from_name(month).is_none() {
            issues.push(ConfigIssue::UnknownMonth { key });
        } else if parse_time_of_day(raw).is_none() {
            issues.push(ConfigIssue::InvalidTime {
                key,
                value: raw.to_string(),
            });
        }
    }

    if let Some(raw) = config.get(KEY_CLOCK_FORMAT)
        && raw.parse::<ClockFormat>().is_err()
    {
        issues.push(ConfigIssue::UnknownClockFormat {
            value: raw.to_string(),
        });
    }

    if config.flag(KEY_FAKE_TIME_ENABLED, false)
        && config
            .get(KEY_FAKE_TIME)
            .and_then(parse_time_of_day)
            .is_none()
    {
        issues.push(ConfigIssue::FakeTimeMissing);
    }

    issues
}
