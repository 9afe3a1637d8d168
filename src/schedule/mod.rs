//! Daily schedule rows and lookup.
//!
//! A venue publishes one row per calendar day with the Adhan and Iqamah of each
//! prayer and the sunrise (Shouruq) time. Rows are keyed by day and month only,
//! so a single table recurs every year.

pub mod loading;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub use loading::{load_schedule, validate_rows};

/// The five daily prayers that have an Adhan and an Iqamah column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrayerKind {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl PrayerKind {
    pub const ALL: [PrayerKind; 5] = [
        PrayerKind::Fajr,
        PrayerKind::Dhuhr,
        PrayerKind::Asr,
        PrayerKind::Maghrib,
        PrayerKind::Isha,
    ];

    /// Column-name stem used by the schedule provider.
    pub fn column_name(&self) -> &'static str {
        match self {
            PrayerKind::Fajr => "Fajr",
            PrayerKind::Dhuhr => "Dhuhr",
            PrayerKind::Asr => "Asr",
            PrayerKind::Maghrib => "Maghrib",
            PrayerKind::Isha => "Isha",
        }
    }
}

impl fmt::Display for PrayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// One calendar day's raw schedule.
///
/// Time fields keep the provider's raw strings; an empty or missing value is
/// resolved to "absent" when the timeline is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    #[serde(rename = "Day", deserialize_with = "number_or_string")]
    pub day: u32,
    #[serde(rename = "Month", deserialize_with = "number_or_string")]
    pub month: u32,

    #[serde(rename = "Fajr Adhan", default)]
    pub fajr_adhan: String,
    #[serde(rename = "Fajr Iqamah", default)]
    pub fajr_iqamah: String,
    #[serde(rename = "Shouruq", default)]
    pub shouruq: String,
    #[serde(rename = "Dhuhr Adhan", default)]
    pub dhuhr_adhan: String,
    #[serde(rename = "Dhuhr Iqamah", default)]
    pub dhuhr_iqamah: String,
    #[serde(rename = "Asr Adhan", default)]
    pub asr_adhan: String,
    #[serde(rename = "Asr Iqamah", default)]
    pub asr_iqamah: String,
    #[serde(rename = "Maghrib Adhan", default)]
    pub maghrib_adhan: String,
    #[serde(rename = "Maghrib Iqamah", default)]
    pub maghrib_iqamah: String,
    #[serde(rename = "Isha Adhan", default)]
    pub isha_adhan: String,
    #[serde(rename = "Isha Iqamah", default)]
    pub isha_iqamah: String,
}

impl ScheduleRow {
    pub fn adhan(&self, prayer: PrayerKind) -> &str {
        match prayer {
            PrayerKind::Fajr => &self.fajr_adhan,
            PrayerKind::Dhuhr => &self.dhuhr_adhan,
            PrayerKind::Asr => &self.asr_adhan,
            PrayerKind::Maghrib => &self.maghrib_adhan,
            PrayerKind::Isha => &self.isha_adhan,
        }
    }

    pub fn iqamah(&self, prayer: PrayerKind) -> &str {
        match prayer {
            PrayerKind::Fajr => &self.fajr_iqamah,
            PrayerKind::Dhuhr => &self.dhuhr_iqamah,
            PrayerKind::Asr => &self.asr_iqamah,
            PrayerKind::Maghrib => &self.maghrib_iqamah,
            PrayerKind::Isha => &self.isha_iqamah,
        }
    }

    pub fn matches(&self, date: NaiveDate) -> bool {
        self.day == date.day() && self.month == date.month()
    }
}

/// Find the row for `date`, ignoring the year. The first match wins.
pub fn resolve_row(rows: &[ScheduleRow], date: NaiveDate) -> Option<&ScheduleRow> {
    rows.iter().find(|row| row.matches(date))
}

fn number_or_string<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u32),
        Text(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("expected a number, got '{s}'"))),
    }
}
