//! Serialisable board snapshot and notification feed.
//!
//! [`DisplayState`] is what presentation layers consume: the current period,
//! the countdown and the upcoming list, with instants already rendered in the
//! venue's clock format. [`notification_feed`] exports the per-day prayer
//! instants an external alert scheduler needs.

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::Rules;
use crate::core::jummah::apply_jummah_override;
use crate::core::{
    Classification, ClockFormat, Evaluation, PeriodKey, Timeline, format_time,
};
use crate::labels::Labels;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayState {
    pub date: NaiveDate,
    pub now: String,
    pub clock_format: ClockFormat,
    /// `None` when today's schedule is unavailable.
    pub current: Option<CurrentDisplay>,
    pub countdown: Option<String>,
    pub upcoming: Vec<UpcomingDisplay>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentDisplay {
    pub key: PeriodKey,
    pub label: String,
    pub arabic_label: Option<String>,
    pub start: Option<String>,
    pub jamaah: Option<String>,
    pub end: Option<String>,
    pub is_makrooh: bool,
    pub in_jamaah: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingDisplay {
    pub key: PeriodKey,
    pub label: String,
    pub arabic_label: Option<String>,
    pub start: String,
    pub jamaah: Option<String>,
    pub next_day: bool,
}

impl DisplayState {
    pub fn new(evaluation: &Evaluation, format: ClockFormat) -> Self {
        let render = |t: NaiveDateTime| format_time(t, format);

        let current = match &evaluation.current {
            Classification::Active(state) => Some(CurrentDisplay {
                key: state.key,
                label: state.label.clone(),
                arabic_label: state.arabic_label.clone(),
                start: state.start.map(render),
                jamaah: state.jamaah.map(render),
                end: state.end.map(render),
                is_makrooh: state.is_makrooh,
                in_jamaah: state.in_jamaah,
            }),
            Classification::NoData { .. } => None,
        };

        let upcoming = evaluation
            .upcoming
            .iter()
            .map(|entry| UpcomingDisplay {
                key: entry.key,
                label: entry.label.clone(),
                arabic_label: entry.arabic_label.clone(),
                start: render(entry.start),
                jamaah: entry.jamaah.map(render),
                next_day: evaluation.upcoming.is_next_day(entry),
            })
            .collect();

        DisplayState {
            date: evaluation.now.date(),
            now: render(evaluation.now),
            clock_format: format,
            current,
            countdown: evaluation.countdown.as_ref().map(ToString::to_string),
            upcoming,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// One prayer as seen by the alert scheduler. Epochs are milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEntry {
    pub prayer: PeriodKey,
    pub start: i64,
    pub jamaah: Option<i64>,
}

/// Prayer instants on the timeline grouped by calendar day.
///
/// Sunrise and ishraq are omitted; Friday Dhuhr is exported as Jummah. Instants
/// that do not exist in the local timezone (inside a DST gap) are skipped.
pub fn notification_feed(
    timeline: &Timeline,
    rules: &Rules,
    labels: &Labels,
) -> BTreeMap<NaiveDate, Vec<NotificationEntry>> {
    let mut feed: BTreeMap<NaiveDate, Vec<NotificationEntry>> = BTreeMap::new();

    for period in timeline.iter().filter(|p| p.key.is_prayer()) {
        let period = apply_jummah_override(period, rules, labels);
        let Some(start) = local_epoch_millis(period.start) else {
            continue;
        };
        feed.entry(period.day()).or_default().push(NotificationEntry {
            prayer: period.key,
            start,
            jamaah: period.jamaah.and_then(local_epoch_millis),
        });
    }

    feed
}

fn local_epoch_millis(instant: NaiveDateTime) -> Option<i64> {
    instant
        .and_local_timezone(Local)
        .earliest()
        .map(|dt| dt.timestamp_millis())
}
