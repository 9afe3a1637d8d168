//! Command-line command handlers for salatr.
//!
//! Each command is implemented in its own submodule. They share the loading
//! sequence in [`BoardContext`]: configuration, schedule, labels and the
//! instant to evaluate.

pub mod notifications;
pub mod status;
pub mod timeline;

use anyhow::Result;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

use crate::args::CommonOptions;
use crate::common::constants::KEY_FAKE_TIME_ENABLED;
use crate::config::{self, RuleConfig, loading::schedule_path};
use crate::labels::Labels;
use crate::schedule::{ScheduleRow, load_schedule};
use crate::time_source::{
    FixedClock, SimulatedClock, SystemClock, TimeSource, effective_now, parse_datetime,
};

/// Everything loaded from disk that an evaluation needs.
pub struct BoardContext {
    pub config: RuleConfig,
    pub config_path: PathBuf,
    pub rows: Vec<ScheduleRow>,
    pub labels: Labels,
    pinned: Option<NaiveDateTime>,
    clock: Box<dyn TimeSource>,
}

impl BoardContext {
    /// Load configuration and schedule for the given command options.
    pub fn load(options: &CommonOptions) -> Result<Self> {
        let (config, config_path) = config::load(options.config_dir.as_deref().map(Path::new))?;
        log_debug!("Configuration: {}", config_path.display());

        let schedule = schedule_path(&config, &config_path);
        let rows = load_schedule(&schedule)?;
        let labels = Labels::from_config(&config);

        let pinned = options.at.as_deref().map(parse_datetime).transpose()?;
        let clock: Box<dyn TimeSource> = match pinned {
            Some(at) => Box::new(FixedClock(at)),
            None => Box::new(SystemClock),
        };

        Ok(Self {
            config,
            config_path,
            rows,
            labels,
            pinned,
            clock,
        })
    }

    /// Let a pinned instant run forward in real time from now on.
    ///
    /// Without `--at` the system clock already advances and nothing changes.
    pub fn start_clock(&mut self) {
        if let Some(at) = self.pinned {
            self.clock = Box::new(SimulatedClock::new(at));
        }
    }

    /// The instant to evaluate, with any configured fake time applied.
    pub fn now(&self) -> NaiveDateTime {
        effective_now(self.clock.as_ref(), &self.config)
    }

    /// Whether "now" is pinned or faked rather than read from the system clock.
    pub fn is_simulated(&self) -> bool {
        self.clock.is_simulated() || self.config.flag(KEY_FAKE_TIME_ENABLED, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn context(pinned: Option<NaiveDateTime>) -> BoardContext {
        BoardContext {
            config: RuleConfig::new(),
            config_path: PathBuf::new(),
            rows: Vec::new(),
            labels: Labels::default(),
            pinned,
            clock: match pinned {
                Some(at) => Box::new(FixedClock(at)),
                None => Box::new(SystemClock),
            },
        }
    }

    #[test]
    fn test_start_clock_runs_pinned_instant() {
        let at = NaiveDate::from_ymd_opt(2025, 3, 13)
            .unwrap()
            .and_hms_opt(13, 30, 0)
            .unwrap();
        let mut context = context(Some(at));
        assert_eq!(context.now(), at);

        context.start_clock();
        let now = context.now();
        assert!(now >= at);
        assert!(now < at + chrono::TimeDelta::minutes(1));
        assert!(context.is_simulated());
    }

    #[test]
    fn test_start_clock_without_pin_keeps_system_clock() {
        let mut context = context(None);
        context.start_clock();
        assert!(!context.is_simulated());
    }
}
