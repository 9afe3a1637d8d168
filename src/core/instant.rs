//! Wall-clock time strings anchored to a calendar day.
//!
//! Schedule and configuration values arrive as `H:MM`/`HH:MM` strings. Parsing
//! never fails loudly: an empty or malformed value means "this instant does not
//! exist today", and callers drop whatever depended on it.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

static TIME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2}):(\d{2})$").expect("valid time pattern"));

/// Parse a 24-hour `H:MM` or `HH:MM` string into a time of day.
///
/// Surrounding whitespace is ignored. Returns `None` for empty input,
/// out-of-range fields, or anything that is not exactly hours and minutes.
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    let caps = TIME_PATTERN.captures(value.trim())?;
    let hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps[2].parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Parse a time string and anchor it to `day`.
pub fn parse_instant(value: &str, day: NaiveDate) -> Option<NaiveDateTime> {
    parse_time_of_day(value).map(|time| day.and_time(time))
}

/// How instants are rendered for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClockFormat {
    /// `13:30`
    #[default]
    #[serde(rename = "24h")]
    TwentyFourHour,
    /// `1:30 pm`
    #[serde(rename = "12h")]
    TwelveHour,
}

impl ClockFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClockFormat::TwentyFourHour => "24h",
            ClockFormat::TwelveHour => "12h",
        }
    }
}

impl FromStr for ClockFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "24h" | "24" => Ok(ClockFormat::TwentyFourHour),
            "12h" | "12" => Ok(ClockFormat::TwelveHour),
            other => anyhow::bail!("unknown clock format '{other}' (expected \"24h\" or \"12h\")"),
        }
    }
}

impl fmt::Display for ClockFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render an instant's wall-clock time.
pub fn format_time(instant: NaiveDateTime, format: ClockFormat) -> String {
    match format {
        ClockFormat::TwentyFourHour => instant.format("%H:%M").to_string(),
        ClockFormat::TwelveHour => instant.format("%-I:%M %P").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    #[test]
    fn test_parse_accepts_one_and_two_digit_hours() {
        assert_eq!(
            parse_time_of_day("4:50"),
            NaiveTime::from_hms_opt(4, 50, 0)
        );
        assert_eq!(
            parse_time_of_day("04:50"),
            NaiveTime::from_hms_opt(4, 50, 0)
        );
        assert_eq!(
            parse_time_of_day("  13:05 "),
            NaiveTime::from_hms_opt(13, 5, 0)
        );
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        for bad in ["", "   ", "24:00", "12:60", "1230", "12:3", "ab:cd", "12:30:00", "-1:30"] {
            assert_eq!(parse_time_of_day(bad), None, "expected '{bad}' to be rejected");
        }
    }

    #[test]
    fn test_parse_instant_anchors_to_day() {
        let instant = parse_instant("05:10", day()).unwrap();
        assert_eq!(instant.date(), day());
        assert_eq!(instant.time(), NaiveTime::from_hms_opt(5, 10, 0).unwrap());
        assert!(parse_instant("", day()).is_none());
    }

    #[test]
    fn test_round_trip_rendering() {
        let instant = parse_instant("13:30", day()).unwrap();
        assert_eq!(format_time(instant, ClockFormat::TwentyFourHour), "13:30");
        assert_eq!(format_time(instant, ClockFormat::TwelveHour), "1:30 pm");

        let morning = parse_instant("4:05", day()).unwrap();
        assert_eq!(format_time(morning, ClockFormat::TwentyFourHour), "04:05");
        assert_eq!(format_time(morning, ClockFormat::TwelveHour), "4:05 am");

        let midnight = parse_instant("00:15", day()).unwrap();
        assert_eq!(format_time(midnight, ClockFormat::TwelveHour), "12:15 am");
    }

    #[test]
    fn test_clock_format_from_str() {
        assert_eq!("12h".parse::<ClockFormat>().unwrap(), ClockFormat::TwelveHour);
        assert_eq!(" 24H ".parse::<ClockFormat>().unwrap(), ClockFormat::TwentyFourHour);
        assert!("ampm".parse::<ClockFormat>().is_err());
    }
}
