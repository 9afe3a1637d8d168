//! Fajr/Sunrise continuity for the derived upcoming view.
//!
//! Between today's Fajr and today's sunrise the board already shows Fajr as the
//! current period, so "Sunrise today" is dropped from the upcoming list and
//! tomorrow's Fajr is kept as the next anchor even when the list is capped.

use chrono::NaiveDateTime;

use crate::core::period::{PeriodInstant, PeriodKey};
use crate::core::timeline::Timeline;

/// Active continuity window for one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuityRule {
    today_sunrise: NaiveDateTime,
    tomorrow_fajr: Option<PeriodInstant>,
}

impl ContinuityRule {
    /// Returns the rule if `now` lies in `[today Fajr start, today sunrise start)`.
    pub fn detect(now: NaiveDateTime, timeline: &Timeline) -> Option<Self> {
        let today = timeline.today();
        let fajr = timeline.find(PeriodKey::Fajr, today)?;
        let sunrise = timeline.find(PeriodKey::Sunrise, today)?;

        (fajr.start <= now && now < sunrise.start).then(|| Self {
            today_sunrise: sunrise.start,
            tomorrow_fajr: timeline
                .find(PeriodKey::Fajr, timeline.tomorrow())
                .cloned(),
        })
    }

    /// Drop today's sunrise from the candidates.
    pub fn filter(&self, candidates: &mut Vec<PeriodInstant>) {
        candidates.retain(|p| !(p.key == PeriodKey::Sunrise && p.start == self.today_sunrise));
    }

    /// Cap `candidates` to `cap` entries, keeping tomorrow's Fajr in the list.
    ///
    /// When the cap would cut tomorrow's Fajr, it replaces the last kept entry so
    /// the list stays sorted and within the cap.
    pub fn cap(&self, candidates: &mut Vec<PeriodInstant>, cap: usize) {
        let fajr_pos = self.tomorrow_fajr.as_ref().and_then(|fajr| {
            candidates
                .iter()
                .position(|p| p.key == PeriodKey::Fajr && p.start == fajr.start)
        });

        let must_insert = cap > 0
            && match fajr_pos {
                Some(pos) => pos >= cap,
                None => self.tomorrow_fajr.is_some(),
            };

        candidates.truncate(cap);

        if must_insert && let Some(fajr) = &self.tomorrow_fajr {
            if candidates.len() >= cap {
                candidates.pop();
            }
            let at = candidates.partition_point(|p| p.start <= fajr.start);
            candidates.insert(at, fajr.clone());
        }
    }
}
