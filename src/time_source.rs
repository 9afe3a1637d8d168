//! Clock abstraction for real, pinned and configured "now".
//!
//! The core never reads a clock. Callers obtain "now" from a [`TimeSource`]
//! and pass it in explicitly, which keeps evaluation deterministic in tests and
//! lets the board be driven at any simulated instant.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime, TimeDelta};
use std::time::Instant;

use crate::common::constants::{KEY_FAKE_TIME, KEY_FAKE_TIME_ENABLED};
use crate::config::RuleConfig;
use crate::core::instant::parse_time_of_day;

/// Trait for abstracting the wall clock.
#[cfg_attr(test, mockall::automock)]
pub trait TimeSource: Send + Sync {
    /// Current local wall-clock time, timezone-naive.
    fn now(&self) -> NaiveDateTime;

    /// Check if this is a simulated time source
    fn is_simulated(&self) -> bool;
}

/// Real-time implementation reading the system's local clock.
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn is_simulated(&self) -> bool {
        false
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl TimeSource for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }

    fn is_simulated(&self) -> bool {
        true
    }
}

/// Simulated clock that starts at a chosen instant and then runs in real time.
///
/// Used for `--at` together with `--follow`, so a pinned board still ticks.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedClock {
    start: NaiveDateTime,
    origin: Instant,
}

impl SimulatedClock {
    pub fn new(start: NaiveDateTime) -> Self {
        Self::with_origin(start, Instant::now())
    }

    /// Start at `start` as of the real instant `origin`.
    pub fn with_origin(start: NaiveDateTime, origin: Instant) -> Self {
        Self { start, origin }
    }
}

impl TimeSource for SimulatedClock {
    fn now(&self) -> NaiveDateTime {
        // Whole seconds only, so displayed countdowns stay aligned
        let elapsed = i64::try_from(self.origin.elapsed().as_secs())
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or_default();
        self.start.checked_add_signed(elapsed).unwrap_or(self.start)
    }

    fn is_simulated(&self) -> bool {
        true
    }
}

/// The instant to evaluate, with the configured fake time applied.
///
/// When `fakeTimeEnabled` is set and `fakeTime` parses, the source's date is
/// kept and its wall time replaced. An unusable `fakeTime` is ignored.
pub fn effective_now(source: &dyn TimeSource, config: &RuleConfig) -> NaiveDateTime {
    let now = source.now();
    if !config.flag(KEY_FAKE_TIME_ENABLED, false) {
        return now;
    }
    match config.get(KEY_FAKE_TIME).and_then(parse_time_of_day) {
        Some(time) => now.date().and_time(time),
        None => now,
    }
}

/// Parse a datetime string in the format "YYYY-MM-DD HH:MM" (seconds optional).
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M"))
        .with_context(|| format!("Invalid datetime '{s}'. Use YYYY-MM-DD HH:MM"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn instant(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 13)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_effective_now_passes_through_by_default() {
        let mut source = MockTimeSource::new();
        source.expect_now().times(1).return_const(instant(9, 41));

        assert_eq!(effective_now(&source, &RuleConfig::new()), instant(9, 41));
    }

    #[test]
    fn test_effective_now_applies_fake_time() {
        let mut source = MockTimeSource::new();
        source.expect_now().return_const(instant(9, 41));
        let config = RuleConfig::new()
            .with("fakeTimeEnabled", "true")
            .with("fakeTime", "05:12");

        assert_eq!(effective_now(&source, &config), instant(5, 12));
    }

    #[test]
    fn test_effective_now_ignores_disabled_or_invalid_fake_time() {
        let mut source = MockTimeSource::new();
        source.expect_now().return_const(instant(9, 41));

        let disabled = RuleConfig::new()
            .with("fakeTimeEnabled", "false")
            .with("fakeTime", "05:12");
        assert_eq!(effective_now(&source, &disabled), instant(9, 41));

        let invalid = RuleConfig::new()
            .with("fakeTimeEnabled", "true")
            .with("fakeTime", "early");
        assert_eq!(effective_now(&source, &invalid), instant(9, 41));
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock(instant(13, 30));
        assert_eq!(clock.now(), instant(13, 30));
        assert!(clock.is_simulated());
        assert!(!SystemClock.is_simulated());
    }

    #[test]
    fn test_simulated_clock_advances_from_start() {
        let start = instant(13, 30);
        let clock = SimulatedClock::new(start);
        assert!(clock.now() >= start);
        assert!(clock.now() < instant(13, 31));
        assert!(clock.is_simulated());

        let Some(origin) = Instant::now().checked_sub(std::time::Duration::from_secs(90)) else {
            return;
        };
        let running = SimulatedClock::with_origin(start, origin);
        let now = running.now();
        assert!(now >= instant(13, 31) + TimeDelta::seconds(30));
        assert!(now < instant(13, 32));
    }

    #[test]
    fn test_parse_datetime() {
        assert_eq!(parse_datetime("2025-03-13 09:41").unwrap(), instant(9, 41));
        assert_eq!(parse_datetime("2025-03-13 09:41:00").unwrap(), instant(9, 41));
        assert!(parse_datetime("13/03/2025 09:41").is_err());
    }
}
