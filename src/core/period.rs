//! Period kinds and the instants that bound them.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::schedule::PrayerKind;

/// Every liturgical period the board can show.
///
/// `Makrooh` and `Nafl` never appear on the timeline; they only describe the
/// gaps between timeline entries when classifying the current moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKey {
    Fajr,
    Sunrise,
    Ishraq,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
    Jummah,
    Makrooh,
    Nafl,
}

impl PeriodKey {
    pub const ALL: [PeriodKey; 10] = [
        PeriodKey::Fajr,
        PeriodKey::Sunrise,
        PeriodKey::Ishraq,
        PeriodKey::Dhuhr,
        PeriodKey::Asr,
        PeriodKey::Maghrib,
        PeriodKey::Isha,
        PeriodKey::Jummah,
        PeriodKey::Makrooh,
        PeriodKey::Nafl,
    ];

    /// Lowercase key used by label providers and serialised output.
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodKey::Fajr => "fajr",
            PeriodKey::Sunrise => "sunrise",
            PeriodKey::Ishraq => "ishraq",
            PeriodKey::Dhuhr => "dhuhr",
            PeriodKey::Asr => "asr",
            PeriodKey::Maghrib => "maghrib",
            PeriodKey::Isha => "isha",
            PeriodKey::Jummah => "jummah",
            PeriodKey::Makrooh => "makrooh",
            PeriodKey::Nafl => "nafl",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(key.trim()))
    }

    /// Returns true for the obligatory prayers (Jummah included).
    pub fn is_prayer(&self) -> bool {
        self.prayer().is_some() || matches!(self, PeriodKey::Jummah)
    }

    /// The schedule columns backing this period, if any.
    pub fn prayer(&self) -> Option<PrayerKind> {
        match self {
            PeriodKey::Fajr => Some(PrayerKind::Fajr),
            PeriodKey::Dhuhr | PeriodKey::Jummah => Some(PrayerKind::Dhuhr),
            PeriodKey::Asr => Some(PrayerKind::Asr),
            PeriodKey::Maghrib => Some(PrayerKind::Maghrib),
            PeriodKey::Isha => Some(PrayerKind::Isha),
            _ => None,
        }
    }
}

impl From<PrayerKind> for PeriodKey {
    fn from(prayer: PrayerKind) -> Self {
        match prayer {
            PrayerKind::Fajr => PeriodKey::Fajr,
            PrayerKind::Dhuhr => PeriodKey::Dhuhr,
            PrayerKind::Asr => PeriodKey::Asr,
            PrayerKind::Maghrib => PeriodKey::Maghrib,
            PrayerKind::Isha => PeriodKey::Isha,
        }
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One period on the timeline: when it starts and, for prayers, when the
/// congregation stands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodInstant {
    pub key: PeriodKey,
    pub label: String,
    pub arabic_label: Option<String>,
    pub start: NaiveDateTime,
    pub jamaah: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl PeriodInstant {
    /// Calendar day this period starts on.
    pub fn day(&self) -> NaiveDate {
        self.start.date()
    }
}
