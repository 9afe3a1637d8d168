use chrono::{NaiveDate, NaiveDateTime};
use salatr::common::constants::test_constants::*;
use salatr::core::{
    ClockFormat, PeriodKey, build_timeline, build_upcoming, classify, format_time, parse_instant,
};
use salatr::schedule::load_schedule;
use salatr::{Labels, RuleConfig, ScheduleRow, evaluate};
use std::io::Write;
use tempfile::NamedTempFile;

// Helper function to create a full schedule row from the shared fixtures
fn create_test_row(date: NaiveDate) -> ScheduleRow {
    use chrono::Datelike;
    ScheduleRow {
        day: date.day(),
        month: date.month(),
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

/// Rows for the day before, the day of and the day after `date`.
fn rows_around(date: NaiveDate) -> Vec<ScheduleRow> {
    date.pred_opt()
        .into_iter()
        .chain([date])
        .chain(date.succ_opt())
        .map(create_test_row)
        .collect()
}

// 2025-03-13 is a Thursday, 2025-03-14 a Friday
fn thursday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 13).unwrap()
}

fn friday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
}

fn at(date: NaiveDate, time: &str) -> NaiveDateTime {
    parse_instant(time, date).unwrap()
}

#[test]
fn test_fajr_jamaah_highlight_scenario() {
    let rows = rows_around(thursday());
    let config = RuleConfig::new().with("jamaahHighlightDuration", "5");
    let labels = Labels::default();

    let during = evaluate(at(thursday(), "05:12"), &rows, &config, &labels);
    let state = during.current.state().unwrap();
    assert_eq!(state.key, PeriodKey::Fajr);
    assert!(state.in_jamaah);

    let after = evaluate(at(thursday(), "05:16"), &rows, &config, &labels);
    let state = after.current.state().unwrap();
    assert_eq!(state.key, PeriodKey::Fajr);
    assert!(!state.in_jamaah);
    assert!(!state.is_makrooh);
}

#[test]
fn test_sunrise_makrooh_and_ishraq_scenario() {
    let rows = rows_around(thursday());
    let config = RuleConfig::new()
        .with("makroohAfterSunrise", "10")
        .with("showIshraq", "30");
    let labels = Labels::default();
    let state_at = |time: &str| {
        evaluate(at(thursday(), time), &rows, &config, &labels)
            .current
            .state()
            .cloned()
            .unwrap()
    };

    let makrooh = state_at("06:25");
    assert!(makrooh.is_makrooh);
    assert_eq!(makrooh.key, PeriodKey::Makrooh);

    let ishraq = state_at("06:35");
    assert_eq!(ishraq.key, PeriodKey::Ishraq);
    assert_eq!(ishraq.start, Some(at(thursday(), "06:30")));
    assert_eq!(ishraq.end, Some(at(thursday(), "07:00")));

    let later = state_at("07:10");
    assert_ne!(later.key, PeriodKey::Ishraq);
    assert_eq!(later.key, PeriodKey::Nafl);
}

#[test]
fn test_friday_jummah_override_scenario() {
    let rows = rows_around(friday());
    let config = RuleConfig::new().with("jummahTimes.March", "13:30");
    let labels = Labels::default();

    let before_jamaah = evaluate(at(friday(), "13:25"), &rows, &config, &labels);
    let state = before_jamaah.current.state().unwrap();
    assert_eq!(state.key, PeriodKey::Jummah);
    assert_eq!(state.label, "Jummah");
    assert_eq!(state.jamaah, Some(at(friday(), "13:30")));
    assert!(!state.in_jamaah);
    assert_eq!(
        before_jamaah.countdown.map(|c| c.to_string()).as_deref(),
        Some("Jama'ah in 5m")
    );

    let during = evaluate(at(friday(), "13:32"), &rows, &config, &labels);
    assert!(during.current.state().unwrap().in_jamaah);
}

#[test]
fn test_friday_without_override_keeps_dhuhr_iqamah() {
    let rows = rows_around(friday());
    let evaluation = evaluate(at(friday(), "13:10"), &rows, &RuleConfig::new(), &Labels::default());
    let state = evaluation.current.state().unwrap();

    assert_eq!(state.key, PeriodKey::Jummah);
    assert_eq!(state.jamaah, Some(at(friday(), TEST_DHUHR_IQAMAH)));
}

#[test]
fn test_fajr_to_sunrise_continuity_scenario() {
    let today = thursday();
    let rows = rows_around(today);
    let labels = Labels::default();

    for cap in [2, 3, 6] {
        let config = RuleConfig::new().with("upcomingLimit", cap.to_string());
        let evaluation = evaluate(at(today, "05:00"), &rows, &config, &labels);
        let upcoming = &evaluation.upcoming;

        assert!(upcoming.len() <= cap);
        assert!(
            upcoming
                .iter()
                .all(|p| !(p.key == PeriodKey::Sunrise && p.day() == today)),
            "today's sunrise listed with cap {cap}"
        );
        assert!(
            upcoming
                .iter()
                .any(|p| p.key == PeriodKey::Fajr && p.day() == friday()),
            "tomorrow's fajr missing with cap {cap}"
        );
    }
}

#[test]
fn test_continuity_rule_only_before_sunrise() {
    let today = thursday();
    let rows = rows_around(today);
    let rules = RuleConfig::new().rules();
    let labels = Labels::default();
    let timeline = build_timeline(&rows, today, &rules, &labels);

    // Before Fajr the sunrise is still an ordinary upcoming entry
    let upcoming = build_upcoming(at(today, "04:00"), &timeline, &rules, &labels, 6);
    assert!(
        upcoming
            .iter()
            .any(|p| p.key == PeriodKey::Sunrise && p.day() == today)
    );
}

#[test]
fn test_extreme_minute_settings_keep_the_board_running() {
    use salatr::common::constants::MINUTE_SETTINGS;

    let rows = rows_around(thursday());
    let labels = Labels::default();
    let baseline = evaluate(at(thursday(), "10:00"), &rows, &RuleConfig::new(), &labels);

    for &key in MINUTE_SETTINGS {
        for value in ["1e18", "1000000000000", "99999999999999999999", "-1e30"] {
            let config = RuleConfig::new().with(key, value);
            let evaluation = evaluate(at(thursday(), "10:00"), &rows, &config, &labels);

            assert_eq!(evaluation.current, baseline.current, "{key} = {value}");
            assert_eq!(
                evaluation.upcoming.len(),
                baseline.upcoming.len(),
                "{key} = {value}"
            );
        }
    }
}

#[test]
fn test_time_round_trip() {
    let instant = at(thursday(), "13:30");
    assert_eq!(format_time(instant, ClockFormat::TwentyFourHour), "13:30");
    assert_eq!(format_time(instant, ClockFormat::TwelveHour), "1:30 pm");
}

#[test]
fn test_missing_today_is_no_data() {
    let rows = vec![create_test_row(friday())];
    let rules = RuleConfig::new().rules();
    let labels = Labels::default();
    let timeline = build_timeline(&rows, thursday(), &rules, &labels);

    let classification = classify(at(thursday(), "12:00"), &timeline, &rules, &labels);
    assert!(classification.is_no_data());
}

#[test]
fn test_schedule_file_end_to_end() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"Day": "13", "Month": "3", "Fajr Adhan": "04:50", "Fajr Iqamah": "05:10",
              "Shouruq": "06:20", "Dhuhr Adhan": "13:00", "Dhuhr Iqamah": "13:20",
              "Asr Adhan": "16:30", "Asr Iqamah": "16:45", "Maghrib Adhan": "19:10",
              "Maghrib Iqamah": "19:15", "Isha Adhan": "20:40", "Isha Iqamah": ""}},
            {{"Day": 14, "Month": 3, "Fajr Adhan": "04:48", "Shouruq": "06:18",
              "Dhuhr Adhan": "13:00", "Asr Adhan": "16:31", "Maghrib Adhan": "19:12",
              "Isha Adhan": "20:42"}}
        ]"#
    )
    .unwrap();

    let rows = load_schedule(file.path()).unwrap();
    assert_eq!(rows.len(), 2);

    let evaluation = evaluate(at(thursday(), "22:00"), &rows, &RuleConfig::new(), &Labels::default());
    let state = evaluation.current.state().unwrap();
    assert_eq!(state.key, PeriodKey::Isha);
    assert_eq!(state.jamaah, None);
    assert_eq!(state.end, Some(at(friday(), "04:48")));

    let next = evaluation.upcoming.first().unwrap();
    assert_eq!(next.key, PeriodKey::Fajr);
    assert!(evaluation.upcoming.is_next_day(next));
    assert_eq!(
        evaluation.countdown.map(|c| c.to_string()).as_deref(),
        Some("Begins in 6h 48m")
    );
}
