//! Current-period classification.
//!
//! The day is modelled as a ladder of half-open intervals, each paired with the
//! state it produces. Rungs are tested strictly in order and the first one that
//! contains `now` wins. Adjacent windows may touch or, with unusual settings,
//! overlap; rung order is the tie-break, so a misconfigured makrooh window can
//! never produce two answers.
//!
//! ```text
//!  yesterday's Isha ─┬─ Fajr ─ [jama'ah] ─ Fajr ─┬ makrooh ┬ Ishraq ┬ nafl ┬ makrooh ┬ Dhuhr/Jummah ...
//!                    │                           │ (sunrise)│        │      │ (Zuhr)  │
//!               fajr.start                  sunrise.start  ishraq  ishraq.end  dhuhr.start
//! ```

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::config::Rules;
use crate::core::jummah::apply_jummah_override;
use crate::core::period::{PeriodInstant, PeriodKey};
use crate::core::timeline::Timeline;
use crate::labels::Labels;

/// Snapshot of what the board shows as "now".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentState {
    pub key: PeriodKey,
    pub label: String,
    pub arabic_label: Option<String>,
    pub start: Option<NaiveDateTime>,
    pub jamaah: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub is_makrooh: bool,
    pub in_jamaah: bool,
}

/// Result of classifying one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Classification {
    Active(CurrentState),
    /// Today's schedule is missing or incomplete.
    NoData { date: NaiveDate },
}

impl Classification {
    pub fn state(&self) -> Option<&CurrentState> {
        match self {
            Classification::Active(state) => Some(state),
            Classification::NoData { .. } => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Classification::NoData { .. })
    }
}

/// Classify `now` against the day anchored at `timeline.today()`.
///
/// Yesterday's Isha is used before today's Fajr and tomorrow's Fajr closes
/// today's Isha; both are optional. Today's Fajr, sunrise and the four other
/// prayers must all be present or the result is [`Classification::NoData`].
pub fn classify(
    now: NaiveDateTime,
    timeline: &Timeline,
    rules: &Rules,
    labels: &Labels,
) -> Classification {
    match DayAnchors::resolve(timeline, rules, labels) {
        Some(anchors) => Classification::Active(
            build_ladder(&anchors, rules, labels)
                .into_iter()
                .find(|rung| rung.contains(now))
                .map(|rung| rung.state)
                .unwrap_or_else(|| fallback(&anchors)),
        ),
        None => Classification::NoData {
            date: timeline.today(),
        },
    }
}

/// Today's instants with the Friday override already applied.
struct DayAnchors<'a> {
    today: NaiveDate,
    yesterday_isha: Option<&'a PeriodInstant>,
    fajr: &'a PeriodInstant,
    sunrise: &'a PeriodInstant,
    ishraq_start: NaiveDateTime,
    ishraq_end: NaiveDateTime,
    dhuhr: PeriodInstant,
    asr: &'a PeriodInstant,
    maghrib: &'a PeriodInstant,
    isha: &'a PeriodInstant,
    tomorrow_fajr: Option<&'a PeriodInstant>,
}

impl<'a> DayAnchors<'a> {
    fn resolve(timeline: &'a Timeline, rules: &Rules, labels: &Labels) -> Option<Self> {
        let today = timeline.today();
        let find = move |key| timeline.find(key, today);

        let sunrise = find(PeriodKey::Sunrise)?;
        let (ishraq_start, ishraq_end) = match find(PeriodKey::Ishraq) {
            Some(ishraq) => (ishraq.start, ishraq.end.unwrap_or(ishraq.start)),
            None => {
                let start = sunrise.start + Duration::minutes(rules.makrooh_after_sunrise);
                (start, start + Duration::minutes(rules.show_ishraq))
            }
        };

        Some(Self {
            today,
            yesterday_isha: timeline.find(PeriodKey::Isha, timeline.yesterday()),
            fajr: find(PeriodKey::Fajr)?,
            sunrise,
            ishraq_start,
            ishraq_end,
            dhuhr: apply_jummah_override(find(PeriodKey::Dhuhr)?, rules, labels),
            asr: find(PeriodKey::Asr)?,
            maghrib: find(PeriodKey::Maghrib)?,
            isha: find(PeriodKey::Isha)?,
            tomorrow_fajr: timeline.find(PeriodKey::Fajr, timeline.tomorrow()),
        })
    }
}

/// One interval of the ladder: `from <= now < until`, either bound optional.
struct Rung {
    from: Option<NaiveDateTime>,
    until: Option<NaiveDateTime>,
    state: CurrentState,
}

impl Rung {
    fn contains(&self, now: NaiveDateTime) -> bool {
        self.from.is_none_or(|from| now >= from) && self.until.is_none_or(|until| now < until)
    }
}

struct Ladder<'l> {
    rules: &'l Rules,
    labels: &'l Labels,
    rungs: Vec<Rung>,
}

impl<'l> Ladder<'l> {
    fn push(&mut self, from: Option<NaiveDateTime>, until: NaiveDateTime, state: CurrentState) {
        self.rungs.push(Rung {
            from,
            until: Some(until),
            state,
        });
    }

    /// `now < jamaah` shows the prayer; the highlight window after it shows
    /// the prayer with `in_jamaah` set. Prayers without a jama'ah add nothing.
    fn prayer(&mut self, period: &PeriodInstant, end: Option<NaiveDateTime>) {
        if let Some(jamaah) = period.jamaah {
            let highlight_end = jamaah + Duration::minutes(self.rules.jamaah_highlight_duration);
            self.push(None, jamaah, period_state(period, end));
            self.push(
                Some(jamaah),
                highlight_end,
                CurrentState {
                    in_jamaah: true,
                    ..period_state(period, end)
                },
            );
        }
    }

    /// `(boundary - minutes) <= now < boundary` is makrooh. Empty for zero minutes.
    fn makrooh_before(&mut self, boundary: NaiveDateTime, minutes: i64) {
        let start = boundary - Duration::minutes(minutes);
        self.push(
            Some(start),
            boundary,
            marker_state(self.labels, PeriodKey::Makrooh, start, boundary),
        );
    }
}

fn build_ladder(day: &DayAnchors<'_>, rules: &Rules, labels: &Labels) -> Vec<Rung> {
    let mut ladder = Ladder {
        rules,
        labels,
        rungs: Vec::with_capacity(24),
    };
    let fajr = day.fajr;
    let sunrise = day.sunrise.start;

    // Before today's Fajr: last night's Isha carries over unless cut at midnight
    let overnight = if rules.midnight_cutoff {
        let midnight = day.today.and_hms_opt(0, 0, 0).unwrap_or(fajr.start);
        marker_state(labels, PeriodKey::Nafl, midnight, fajr.start)
    } else {
        match day.yesterday_isha {
            Some(isha) => period_state(isha, Some(fajr.start)),
            None => CurrentState {
                start: None,
                end: Some(fajr.start),
                ..labelled_state(labels, PeriodKey::Isha)
            },
        }
    };
    ladder.push(None, fajr.start, overnight);

    // Fajr until sunrise
    ladder.prayer(fajr, Some(sunrise));
    ladder.makrooh_before(sunrise, rules.makrooh_before_sunrise);
    ladder.push(None, sunrise, period_state(fajr, Some(sunrise)));

    // Sunrise makrooh, ishraq, then free nafl time until the Zuhr makrooh
    ladder.push(
        Some(sunrise),
        day.ishraq_start,
        marker_state(labels, PeriodKey::Makrooh, sunrise, day.ishraq_start),
    );
    ladder.push(
        Some(day.ishraq_start),
        day.ishraq_end,
        CurrentState {
            start: Some(day.ishraq_start),
            end: Some(day.ishraq_end),
            ..labelled_state(labels, PeriodKey::Ishraq)
        },
    );
    let zuhr_boundary = day.dhuhr.start - Duration::minutes(rules.makrooh_before_zuhr);
    ladder.push(
        None,
        zuhr_boundary,
        marker_state(labels, PeriodKey::Nafl, day.ishraq_end, zuhr_boundary),
    );
    ladder.makrooh_before(day.dhuhr.start, rules.makrooh_before_zuhr);

    // Dhuhr (or Jummah) until Asr
    let dhuhr_end = Some(day.asr.start);
    ladder.prayer(&day.dhuhr, dhuhr_end);
    ladder.makrooh_before(day.asr.start, rules.makrooh_before_asr);
    ladder.push(None, day.asr.start, period_state(&day.dhuhr, dhuhr_end));

    // Asr until Maghrib
    let asr_end = Some(day.maghrib.start);
    ladder.prayer(day.asr, asr_end);
    ladder.makrooh_before(day.maghrib.start, rules.makrooh_before_maghrib);
    ladder.push(None, day.maghrib.start, period_state(day.asr, asr_end));

    // Maghrib until Isha
    let maghrib_end = Some(day.isha.start);
    ladder.prayer(day.maghrib, maghrib_end);
    ladder.makrooh_before(day.isha.start, rules.makrooh_before_isha);
    ladder.push(None, day.isha.start, period_state(day.maghrib, maghrib_end));

    // Isha; anything later falls through to the terminal state
    ladder.prayer(day.isha, isha_end(day));

    ladder.rungs
}

fn isha_end(day: &DayAnchors<'_>) -> Option<NaiveDateTime> {
    day.tomorrow_fajr.map(|fajr| fajr.start)
}

/// Terminal state of the day.
fn fallback(day: &DayAnchors<'_>) -> CurrentState {
    period_state(day.isha, isha_end(day))
}

fn period_state(period: &PeriodInstant, end: Option<NaiveDateTime>) -> CurrentState {
    CurrentState {
        key: period.key,
        label: period.label.clone(),
        arabic_label: period.arabic_label.clone(),
        start: Some(period.start),
        jamaah: period.jamaah,
        end,
        is_makrooh: false,
        in_jamaah: false,
    }
}

fn labelled_state(labels: &Labels, key: PeriodKey) -> CurrentState {
    CurrentState {
        key,
        label: labels.english(key).to_string(),
        arabic_label: labels.arabic(key).map(str::to_string),
        start: None,
        jamaah: None,
        end: None,
        is_makrooh: key == PeriodKey::Makrooh,
        in_jamaah: false,
    }
}

/// Makrooh or nafl state spanning `[start, end)`.
fn marker_state(
    labels: &Labels,
    key: PeriodKey,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> CurrentState {
    CurrentState {
        start: Some(start),
        end: Some(end),
        ..labelled_state(labels, key)
    }
}
