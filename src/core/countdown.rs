//! Human countdowns to the next boundary.

use chrono::{NaiveDateTime, TimeDelta};
use serde::Serialize;
use std::fmt;

use crate::common::constants::COUNTDOWN_SECONDS_THRESHOLD;

/// Which boundary a countdown points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CountdownKind {
    /// The period's start (Adhan).
    Begins,
    /// The congregation (Iqamah).
    Jamaah,
}

impl CountdownKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            CountdownKind::Begins => "Begins in",
            CountdownKind::Jamaah => "Jama'ah in",
        }
    }
}

/// Time remaining until a target instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Countdown {
    pub kind: CountdownKind,
    pub target: NaiveDateTime,
    pub remaining_seconds: i64,
}

impl Countdown {
    /// Countdown for a period: to its start if that is still ahead, otherwise
    /// to its jama'ah if that is still ahead, otherwise none.
    pub fn for_period(
        now: NaiveDateTime,
        start: Option<NaiveDateTime>,
        jamaah: Option<NaiveDateTime>,
    ) -> Option<Self> {
        if let Some(start) = start
            && now < start
        {
            return Some(Self::new(CountdownKind::Begins, now, start));
        }
        if let Some(jamaah) = jamaah
            && now < jamaah
        {
            return Some(Self::new(CountdownKind::Jamaah, now, jamaah));
        }
        None
    }

    fn new(kind: CountdownKind, now: NaiveDateTime, target: NaiveDateTime) -> Self {
        Self {
            kind,
            target,
            remaining_seconds: (target - now).num_seconds(),
        }
    }

    pub fn remaining(&self) -> TimeDelta {
        TimeDelta::seconds(self.remaining_seconds)
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.kind.prefix(),
            format_remaining(self.remaining_seconds)
        )
    }
}

/// Tiered rendering of a positive number of seconds.
///
/// Under two minutes: `1m 30s` or `45s`. Otherwise minutes are rounded up and
/// shown as `2h 5m`, `2h` or `17m`.
pub fn format_remaining(total_seconds: i64) -> String {
    let total_seconds = total_seconds.max(0);

    if total_seconds < COUNTDOWN_SECONDS_THRESHOLD {
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;
        return if minutes > 0 {
            format!("{minutes}m {seconds}s")
        } else {
            format!("{seconds}s")
        };
    }

    let total_minutes = (total_seconds + 59) / 60;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    match (hours, minutes) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 13)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_format_remaining_tiers() {
        assert_eq!(format_remaining(0), "0s");
        assert_eq!(format_remaining(45), "45s");
        assert_eq!(format_remaining(60), "1m 0s");
        assert_eq!(format_remaining(90), "1m 30s");
        assert_eq!(format_remaining(119), "1m 59s");
        assert_eq!(format_remaining(120), "2m");
        assert_eq!(format_remaining(121), "3m");
        assert_eq!(format_remaining(3600), "1h");
        assert_eq!(format_remaining(3601), "1h 1m");
        assert_eq!(format_remaining(2 * 3600 + 5 * 60), "2h 5m");
        assert_eq!(format_remaining(3599), "1h");
    }

    #[test]
    fn test_countdown_prefers_start() {
        let countdown = Countdown::for_period(at(12, 0, 0), Some(at(13, 0, 0)), Some(at(13, 20, 0)))
            .unwrap();
        assert_eq!(countdown.kind, CountdownKind::Begins);
        assert_eq!(countdown.to_string(), "Begins in 1h");
    }

    #[test]
    fn test_countdown_falls_back_to_jamaah() {
        let countdown =
            Countdown::for_period(at(13, 18, 30), Some(at(13, 0, 0)), Some(at(13, 20, 0))).unwrap();
        assert_eq!(countdown.kind, CountdownKind::Jamaah);
        assert_eq!(countdown.to_string(), "Jama'ah in 1m 30s");
    }

    #[test]
    fn test_countdown_none_when_both_passed() {
        assert!(Countdown::for_period(at(14, 0, 0), Some(at(13, 0, 0)), Some(at(13, 20, 0))).is_none());
        assert!(Countdown::for_period(at(14, 0, 0), Some(at(13, 0, 0)), None).is_none());
    }
}
