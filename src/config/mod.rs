//! Rule configuration for the prayer board.
//!
//! The venue's configuration store hands salatr a flat, string-keyed map. Values are
//! interpreted on demand as minutes, flags or raw strings, and anything missing or
//! non-numeric quietly falls back to its documented default. Nothing here ever fails
//! for bad data; [`validation`] reports such values as warnings instead.
//!
//! ## Configuration File
//!
//! Locally the map is read from `salatr.toml`. Nested tables flatten to dotted keys:
//!
//! ```toml
//! makroohBeforeSunrise = 1       # Makrooh minutes before sunrise
//! makroohAfterSunrise = 10       # Makrooh minutes after sunrise (also ishraq start offset)
//! showIshraq = 30                # Ishraq window length in minutes
//! makroohBeforeZuhr = 10         # Makrooh minutes before Zuhr
//! makroohBeforeAsr = 0
//! makroohBeforeMaghrib = 10
//! makroohBeforeIsha = 0
//! jamaahHighlightDuration = 5    # Minutes the jama'ah stays highlighted
//! midnightCutoff = false         # After midnight show nafl instead of Isha
//! upcomingLimit = 6
//! clockFormat = "24h"            # "24h" or "12h"
//! schedulePath = "schedule.json"
//!
//! [jummahTimes]
//! March = "13:30"                # Jummah congregation override for March
//!
//! [labels.arabic]
//! fajr = "الفجر"
//! ```

pub mod loading;
pub mod validation;

use chrono::Month;
use std::collections::BTreeMap;

use crate::common::constants::*;
use crate::core::instant::ClockFormat;

pub use loading::{flatten_toml, get_config_path, load, load_from_path};
pub use validation::{ConfigIssue, validate_config};

/// Flat `name -> value` view over the venue configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleConfig {
    values: BTreeMap<String, String>,
}

impl RuleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from any iterator of key/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Raw value for `name`, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Entries whose key starts with `prefix.`, yielded with the prefix removed.
    pub fn section<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.iter().filter_map(move |(k, v)| {
            k.strip_prefix(prefix)
                .and_then(|rest| rest.strip_prefix('.'))
                .map(|rest| (rest, v))
        })
    }

    /// Read a whole-minute setting.
    ///
    /// Integers and decimal values are accepted (decimals truncate). Anything
    /// else, including a missing key or a value beyond one day either way,
    /// yields `default`.
    pub fn minutes(&self, name: &str, default: i64) -> i64 {
        self.get(name)
            .and_then(parse_minutes)
            .filter(|minutes| (-MAX_SETTING_MINUTES..=MAX_SETTING_MINUTES).contains(minutes))
            .unwrap_or(default)
    }

    /// Read a boolean setting. Unrecognised values yield `default`.
    pub fn flag(&self, name: &str, default: bool) -> bool {
        self.get(name).and_then(parse_flag).unwrap_or(default)
    }

    /// Read a string setting, falling back to `default` when missing or blank.
    pub fn string(&self, name: &str, default: &str) -> String {
        match self.get(name).map(str::trim) {
            Some(value) if !value.is_empty() => value.to_string(),
            _ => default.to_string(),
        }
    }

    /// Raw Jummah congregation override for `month`, if configured.
    ///
    /// Month names match case-insensitively (`jummahTimes.march` works too).
    pub fn jummah_time(&self, month: Month) -> Option<&str> {
        self.section(JUMMAH_TIMES_PREFIX)
            .find(|(name, _)| month_from_name(name) == Some(month))
            .map(|(_, time)| time)
    }

    /// Resolve every timing rule the classifier and upcoming list need.
    pub fn rules(&self) -> Rules {
        Rules {
            makrooh_before_sunrise: self
                .minutes(KEY_MAKROOH_BEFORE_SUNRISE, DEFAULT_MAKROOH_BEFORE_SUNRISE),
            makrooh_after_sunrise: self
                .minutes(KEY_MAKROOH_AFTER_SUNRISE, DEFAULT_MAKROOH_AFTER_SUNRISE),
            show_ishraq: self.minutes(KEY_SHOW_ISHRAQ, DEFAULT_SHOW_ISHRAQ),
            makrooh_before_zuhr: self.minutes(KEY_MAKROOH_BEFORE_ZUHR, DEFAULT_MAKROOH_BEFORE_ZUHR),
            makrooh_before_asr: self.minutes(KEY_MAKROOH_BEFORE_ASR, DEFAULT_MAKROOH_BEFORE_ASR),
            makrooh_before_maghrib: self
                .minutes(KEY_MAKROOH_BEFORE_MAGHRIB, DEFAULT_MAKROOH_BEFORE_MAGHRIB),
            makrooh_before_isha: self.minutes(KEY_MAKROOH_BEFORE_ISHA, DEFAULT_MAKROOH_BEFORE_ISHA),
            jamaah_highlight_duration: self.minutes(
                KEY_JAMAAH_HIGHLIGHT_DURATION,
                DEFAULT_JAMAAH_HIGHLIGHT_DURATION,
            ),
            midnight_cutoff: self.flag(KEY_MIDNIGHT_CUTOFF, DEFAULT_MIDNIGHT_CUTOFF),
            jummah_times: Month::iter_all()
                .filter_map(|month| {
                    self.jummah_time(month)
                        .map(|time| (month.number_from_month(), time.trim().to_string()))
                })
                .collect(),
        }
    }

    /// Maximum number of entries in the upcoming list.
    pub fn upcoming_limit(&self) -> usize {
        let limit = self.minutes(KEY_UPCOMING_LIMIT, DEFAULT_UPCOMING_LIMIT as i64);
        usize::try_from(limit).unwrap_or(DEFAULT_UPCOMING_LIMIT)
    }

    pub fn clock_format(&self) -> ClockFormat {
        self.string(KEY_CLOCK_FORMAT, DEFAULT_CLOCK_FORMAT)
            .parse()
            .unwrap_or_default()
    }
}

/// Typed snapshot of the timing rules, resolved once per evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Rules {
    pub makrooh_before_sunrise: i64,
    /// Also the offset from sunrise at which ishraq begins.
    pub makrooh_after_sunrise: i64,
    /// Length of the ishraq window.
    pub show_ishraq: i64,
    pub makrooh_before_zuhr: i64,
    pub makrooh_before_asr: i64,
    pub makrooh_before_maghrib: i64,
    pub makrooh_before_isha: i64,
    pub jamaah_highlight_duration: i64,
    pub midnight_cutoff: bool,
    /// Month number (1-12) to raw `HH:MM` Jummah congregation override.
    pub jummah_times: BTreeMap<u32, String>,
}

impl Default for Rules {
    fn default() -> Self {
        RuleConfig::default().rules()
    }
}

impl Rules {
    pub fn jummah_time(&self, month: u32) -> Option<&str> {
        self.jummah_times.get(&month).map(String::as_str)
    }
}

/// Extension for iterating every month, which chrono does not provide.
trait MonthExt {
    fn iter_all() -> std::array::IntoIter<Month, 12>;
}

impl MonthExt for Month {
    fn iter_all() -> std::array::IntoIter<Month, 12> {
        [
            Month::January,
            Month::February,
            Month::March,
            Month::April,
            Month::May,
            Month::June,
            Month::July,
            Month::August,
            Month::September,
            Month::October,
            Month::November,
            Month::December,
        ]
        .into_iter()
    }
}

/// Month lookup by English name, case-insensitive.
pub(crate) fn month_from_name(name: &str) -> Option<Month> {
    Month::iter_all().find(|m| m.name().eq_ignore_ascii_case(name.trim()))
}

pub(crate) fn parse_minutes(value: &str) -> Option<i64> {
    let value = value.trim();
    value.parse::<i64>().ok().or_else(|| {
        value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(|v| v.trunc() as i64)
    })
}

pub(crate) fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
