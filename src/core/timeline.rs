//! Three-day timeline of canonical periods.
//!
//! The timeline spans yesterday, today and tomorrow so that both the classifier
//! (which needs last night's Isha) and the upcoming list (which crosses midnight)
//! read their instants from the same place.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::config::Rules;
use crate::core::instant::parse_instant;
use crate::core::period::{PeriodInstant, PeriodKey};
use crate::labels::Labels;
use crate::schedule::{PrayerKind, ScheduleRow, resolve_row};

/// Ordered periods for yesterday, today and tomorrow.
///
/// Each adjacent day is kept whole, from its Fajr to its Isha, so yesterday's
/// Isha is there to carry the board past midnight. Entries are sorted
/// ascending by `start`. Days without a schedule row simply contribute nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeline {
    today: NaiveDate,
    entries: Vec<PeriodInstant>,
}

impl Timeline {
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn yesterday(&self) -> NaiveDate {
        self.today - Duration::days(1)
    }

    pub fn tomorrow(&self) -> NaiveDate {
        self.today + Duration::days(1)
    }

    pub fn entries(&self) -> &[PeriodInstant] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PeriodInstant> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The period of kind `key` starting on `day`, if present.
    pub fn find(&self, key: PeriodKey, day: NaiveDate) -> Option<&PeriodInstant> {
        self.entries
            .iter()
            .find(|p| p.key == key && p.day() == day)
    }

    /// All periods starting on `day`, in order.
    pub fn day(&self, day: NaiveDate) -> impl Iterator<Item = &PeriodInstant> {
        self.entries.iter().filter(move |p| p.day() == day)
    }

    /// Entries starting strictly after `now`.
    pub fn after(&self, now: NaiveDateTime) -> impl Iterator<Item = &PeriodInstant> {
        self.entries.iter().filter(move |p| p.start > now)
    }
}

/// Build the timeline around `today` from the schedule table.
pub fn build_timeline(
    rows: &[ScheduleRow],
    today: NaiveDate,
    rules: &Rules,
    labels: &Labels,
) -> Timeline {
    let mut entries = Vec::new();

    for offset in -1..=1 {
        let date = today + Duration::days(offset);
        if let Some(row) = resolve_row(rows, date) {
            entries.extend(day_periods(row, date, rules, labels));
        }
    }

    entries.sort_by_key(|p| p.start);

    Timeline { today, entries }
}

/// Periods for one schedule row in their fixed order: Fajr, Sunrise, Ishraq,
/// Dhuhr, Asr, Maghrib, Isha. Missing Adhan or Shouruq values drop the entry.
pub fn day_periods(
    row: &ScheduleRow,
    date: NaiveDate,
    rules: &Rules,
    labels: &Labels,
) -> Vec<PeriodInstant> {
    let mut periods = Vec::with_capacity(7);

    let prayer = |kind: PrayerKind| {
        parse_instant(row.adhan(kind), date).map(|start| {
            let key = PeriodKey::from(kind);
            PeriodInstant {
                key,
                label: labels.english(key).to_string(),
                arabic_label: labels.arabic(key).map(str::to_string),
                start,
                jamaah: parse_instant(row.iqamah(kind), date),
                end: None,
            }
        })
    };

    let synthetic = |key: PeriodKey, start: NaiveDateTime, end: Option<NaiveDateTime>| {
        PeriodInstant {
            key,
            label: labels.english(key).to_string(),
            arabic_label: labels.arabic(key).map(str::to_string),
            start,
            jamaah: None,
            end,
        }
    };

    periods.extend(prayer(PrayerKind::Fajr));

    if let Some(sunrise) = parse_instant(&row.shouruq, date) {
        periods.push(synthetic(PeriodKey::Sunrise, sunrise, None));

        // Ishraq opens when the post-sunrise makrooh window closes
        let ishraq_start = sunrise + Duration::minutes(rules.makrooh_after_sunrise);
        let ishraq_end = ishraq_start + Duration::minutes(rules.show_ishraq);
        periods.push(synthetic(PeriodKey::Ishraq, ishraq_start, Some(ishraq_end)));
    }

    for kind in [
        PrayerKind::Dhuhr,
        PrayerKind::Asr,
        PrayerKind::Maghrib,
        PrayerKind::Isha,
    ] {
        periods.extend(prayer(kind));
    }

    periods
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::constants::test_constants::*;

    fn standard_row(day: u32, month: u32) -> ScheduleRow {
        ScheduleRow {
            day,
            month,
            fajr_adhan: TEST_FAJR_ADHAN.into(),
            fajr_iqamah: TEST_FAJR_IQAMAH.into(),
            shouruq: TEST_SHOURUQ.into(),
            dhuhr_adhan: TEST_DHUHR_ADHAN.into(),
            dhuhr_iqamah: TEST_DHUHR_IQAMAH.into(),
            asr_adhan: TEST_ASR_ADHAN.into(),
            asr_iqamah: TEST_ASR_IQAMAH.into(),
            maghrib_adhan: TEST_MAGHRIB_ADHAN.into(),
            maghrib_iqamah: TEST_MAGHRIB_IQAMAH.into(),
            isha_adhan: TEST_ISHA_ADHAN.into(),
            isha_iqamah: TEST_ISHA_IQAMAH.into(),
        }
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn test_day_periods_fixed_order() {
        let periods = day_periods(
            &standard_row(14, 3),
            date(14),
            &Rules::default(),
            &Labels::default(),
        );
        let keys: Vec<_> = periods.iter().map(|p| p.key).collect();
        assert_eq!(
            keys,
            vec![
                PeriodKey::Fajr,
                PeriodKey::Sunrise,
                PeriodKey::Ishraq,
                PeriodKey::Dhuhr,
                PeriodKey::Asr,
                PeriodKey::Maghrib,
                PeriodKey::Isha,
            ]
        );
    }

    #[test]
    fn test_ishraq_uses_post_sunrise_offset() {
        let rules = Rules {
            makrooh_after_sunrise: 15,
            show_ishraq: 20,
            ..Rules::default()
        };
        let periods = day_periods(&standard_row(14, 3), date(14), &rules, &Labels::default());
        let ishraq = periods.iter().find(|p| p.key == PeriodKey::Ishraq).unwrap();

        assert_eq!(ishraq.start, parse_instant("06:35", date(14)).unwrap());
        assert_eq!(ishraq.end, parse_instant("06:55", date(14)));
        assert_eq!(ishraq.jamaah, None);
    }

    #[test]
    fn test_missing_values_drop_entries() {
        let mut row = standard_row(14, 3);
        row.asr_adhan = String::new();
        row.shouruq = "bogus".into();
        row.isha_iqamah = String::new();

        let periods = day_periods(&row, date(14), &Rules::default(), &Labels::default());
        assert!(periods.iter().all(|p| p.key != PeriodKey::Asr));
        assert!(periods.iter().all(|p| p.key != PeriodKey::Sunrise));
        assert!(periods.iter().all(|p| p.key != PeriodKey::Ishraq));

        let isha = periods.iter().find(|p| p.key == PeriodKey::Isha).unwrap();
        assert_eq!(isha.jamaah, None);
    }

    #[test]
    fn test_build_timeline_spans_three_days() {
        let rows = vec![standard_row(13, 3), standard_row(14, 3), standard_row(15, 3)];
        let timeline = build_timeline(&rows, date(14), &Rules::default(), &Labels::default());

        assert_eq!(timeline.len(), 21);
        assert_eq!(timeline.day(date(13)).count(), 7);
        assert_eq!(timeline.day(date(15)).count(), 7);
        assert!(timeline.find(PeriodKey::Fajr, date(13)).is_some());
        assert!(timeline.find(PeriodKey::Isha, date(13)).is_some());
        assert!(timeline.find(PeriodKey::Isha, date(15)).is_some());
        assert!(timeline.find(PeriodKey::Fajr, date(15)).is_some());
        assert!(
            timeline
                .entries()
                .windows(2)
                .all(|w| w[0].start <= w[1].start)
        );
    }

    #[test]
    fn test_build_timeline_skips_missing_days() {
        let rows = vec![standard_row(14, 3)];
        let timeline = build_timeline(&rows, date(14), &Rules::default(), &Labels::default());

        assert_eq!(timeline.len(), 7);
        assert_eq!(timeline.day(date(13)).count(), 0);
        assert_eq!(timeline.day(date(14)).count(), 7);
    }

    #[test]
    fn test_build_timeline_crosses_month_boundary() {
        let rows = vec![standard_row(31, 3), standard_row(1, 4)];
        let today = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        let timeline = build_timeline(&rows, today, &Rules::default(), &Labels::default());

        let tomorrow_fajr = timeline.find(PeriodKey::Fajr, timeline.tomorrow()).unwrap();
        assert_eq!(tomorrow_fajr.start.date(), NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());
    }
}
