//! Rolling list of the next periods, crossing midnight when needed.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::config::Rules;
use crate::core::continuity::ContinuityRule;
use crate::core::jummah::apply_jummah_override;
use crate::core::period::{PeriodInstant, PeriodKey};
use crate::core::timeline::Timeline;
use crate::labels::Labels;

/// Capped, ordered periods strictly after "now".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpcomingList {
    today: NaiveDate,
    entries: Vec<PeriodInstant>,
}

impl UpcomingList {
    pub fn entries(&self) -> &[PeriodInstant] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PeriodInstant> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn first(&self) -> Option<&PeriodInstant> {
        self.entries.first()
    }

    /// Returns true if `entry` starts on a later calendar day than the evaluation.
    pub fn is_next_day(&self, entry: &PeriodInstant) -> bool {
        entry.day() > self.today
    }
}

/// Build the upcoming list.
///
/// Ishraq is never listed. Friday Dhuhr appears as Jummah. During the
/// Fajr-to-sunrise window the continuity rule drops today's sunrise and keeps
/// tomorrow's Fajr within the cap.
pub fn build_upcoming(
    now: NaiveDateTime,
    timeline: &Timeline,
    rules: &Rules,
    labels: &Labels,
    cap: usize,
) -> UpcomingList {
    let mut candidates: Vec<PeriodInstant> = timeline
        .after(now)
        .filter(|p| p.key != PeriodKey::Ishraq)
        .map(|p| apply_jummah_override(p, rules, labels))
        .collect();
    candidates.sort_by_key(|p| p.start);

    match ContinuityRule::detect(now, timeline) {
        Some(rule) => {
            rule.filter(&mut candidates);
            rule.cap(&mut candidates, cap);
        }
        None => candidates.truncate(cap),
    }

    UpcomingList {
        today: now.date(),
        entries: candidates,
    }
}
