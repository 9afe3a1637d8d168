//! Defaults and setting names shared across the crate.

// # Rule setting names

pub const KEY_MAKROOH_BEFORE_SUNRISE: &str = "makroohBeforeSunrise";
pub const KEY_MAKROOH_AFTER_SUNRISE: &str = "makroohAfterSunrise";
pub const KEY_SHOW_ISHRAQ: &str = "showIshraq";
pub const KEY_MAKROOH_BEFORE_ZUHR: &str = "makroohBeforeZuhr";
pub const KEY_MAKROOH_BEFORE_ASR: &str = "makroohBeforeAsr";
pub const KEY_MAKROOH_BEFORE_MAGHRIB: &str = "makroohBeforeMaghrib";
pub const KEY_MAKROOH_BEFORE_ISHA: &str = "makroohBeforeIsha";
pub const KEY_JAMAAH_HIGHLIGHT_DURATION: &str = "jamaahHighlightDuration";
pub const KEY_MIDNIGHT_CUTOFF: &str = "midnightCutoff";
pub const KEY_FAKE_TIME_ENABLED: &str = "fakeTimeEnabled";
pub const KEY_FAKE_TIME: &str = "fakeTime";
pub const KEY_UPCOMING_LIMIT: &str = "upcomingLimit";
pub const KEY_CLOCK_FORMAT: &str = "clockFormat";
pub const KEY_SCHEDULE_PATH: &str = "schedulePath";

/// Prefix of the month-indexed Jummah congregation overrides (`jummahTimes.March`).
pub const JUMMAH_TIMES_PREFIX: &str = "jummahTimes";
pub const LABELS_ENGLISH_PREFIX: &str = "labels.english";
pub const LABELS_ARABIC_PREFIX: &str = "labels.arabic";

/// Every setting read as whole minutes.
pub const MINUTE_SETTINGS: &[&str] = &[
    KEY_MAKROOH_BEFORE_SUNRISE,
    KEY_MAKROOH_AFTER_SUNRISE,
    KEY_SHOW_ISHRAQ,
    KEY_MAKROOH_BEFORE_ZUHR,
    KEY_MAKROOH_BEFORE_ASR,
    KEY_MAKROOH_BEFORE_MAGHRIB,
    KEY_MAKROOH_BEFORE_ISHA,
    KEY_JAMAAH_HIGHLIGHT_DURATION,
    KEY_UPCOMING_LIMIT,
];

pub const FLAG_SETTINGS: &[&str] = &[KEY_MIDNIGHT_CUTOFF, KEY_FAKE_TIME_ENABLED];

// # Rule defaults (minutes)

pub const DEFAULT_MAKROOH_BEFORE_SUNRISE: i64 = 1;
pub const DEFAULT_MAKROOH_AFTER_SUNRISE: i64 = 10;
pub const DEFAULT_SHOW_ISHRAQ: i64 = 30;
pub const DEFAULT_MAKROOH_BEFORE_ZUHR: i64 = 10;
pub const DEFAULT_MAKROOH_BEFORE_ASR: i64 = 0;
pub const DEFAULT_MAKROOH_BEFORE_MAGHRIB: i64 = 10;
pub const DEFAULT_MAKROOH_BEFORE_ISHA: i64 = 0;
pub const DEFAULT_JAMAAH_HIGHLIGHT_DURATION: i64 = 5;
pub const DEFAULT_MIDNIGHT_CUTOFF: bool = false;

/// Largest magnitude accepted for a minute setting: one day.
pub const MAX_SETTING_MINUTES: i64 = 24 * 60;

// # Presentation defaults

pub const DEFAULT_UPCOMING_LIMIT: usize = 6;
pub const DEFAULT_CLOCK_FORMAT: &str = "24h";

/// Countdowns shorter than this show seconds.
pub const COUNTDOWN_SECONDS_THRESHOLD: i64 = 120;

// # Files

pub const CONFIG_FILE_NAME: &str = "salatr.toml";
pub const DEFAULT_SCHEDULE_FILE_NAME: &str = "schedule.json";
pub const CONFIG_DIR_NAME: &str = "salatr";

// # Exit codes

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

/// Shared fixtures for unit and integration tests.
pub mod test_constants {
    pub const TEST_FAJR_ADHAN: &str = "04:50";
    pub const TEST_FAJR_IQAMAH: &str = "05:10";
    pub const TEST_SHOURUQ: &str = "06:20";
    pub const TEST_DHUHR_ADHAN: &str = "13:00";
    pub const TEST_DHUHR_IQAMAH: &str = "13:20";
    pub const TEST_ASR_ADHAN: &str = "16:30";
    pub const TEST_ASR_IQAMAH: &str = "16:45";
    pub const TEST_MAGHRIB_ADHAN: &str = "19:10";
    pub const TEST_MAGHRIB_IQAMAH: &str = "19:15";
    pub const TEST_ISHA_ADHAN: &str = "20:40";
    pub const TEST_ISHA_IQAMAH: &str = "21:00";
}
