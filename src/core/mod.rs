//! Temporal reasoning core.
//!
//! Everything under this module is a pure function of its inputs: the instant
//! to evaluate, the schedule rows, the rule configuration and the labels. There
//! is no clock, no cache and no shared state, so callers re-evaluate as often as
//! they like and simply drop the previous result.
//!
//! ## Pipeline
//! - **Instant Parser** ([`instant`]): `HH:MM` strings to instants, absent on bad input
//! - **Timeline Builder** ([`timeline`]): yesterday/today/tomorrow periods, sorted
//! - **Jummah Override** ([`jummah`]): Friday Dhuhr relabelled, copy only
//! - **Continuity Rule** ([`continuity`]): Fajr-to-sunrise adjustments to the upcoming view
//! - **Classifier** ([`classify`]): ordered ladder producing the current state
//! - **Upcoming & Countdown** ([`upcoming`], [`countdown`])

pub mod classify;
pub mod continuity;
pub mod countdown;
pub mod instant;
pub mod jummah;
pub mod period;
pub mod timeline;
pub mod upcoming;

pub use classify::{Classification, CurrentState, classify};
pub use countdown::{Countdown, CountdownKind, format_remaining};
pub use instant::{ClockFormat, format_time, parse_instant, parse_time_of_day};
pub use period::{PeriodInstant, PeriodKey};
pub use timeline::{Timeline, build_timeline};
pub use upcoming::{UpcomingList, build_upcoming};

use chrono::NaiveDateTime;

use crate::config::RuleConfig;
use crate::labels::Labels;
use crate::schedule::ScheduleRow;

/// Everything the board needs for one refresh.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub now: NaiveDateTime,
    pub timeline: Timeline,
    pub current: Classification,
    pub upcoming: UpcomingList,
    pub countdown: Option<Countdown>,
}

/// Evaluate the board at `now`.
///
/// The timeline is built around `now`'s calendar day and shared by the
/// classifier and the upcoming list so both read identical instants.
pub fn evaluate(
    now: NaiveDateTime,
    rows: &[ScheduleRow],
    config: &RuleConfig,
    labels: &Labels,
) -> Evaluation {
    let rules = config.rules();
    let timeline = build_timeline(rows, now.date(), &rules, labels);
    let current = classify(now, &timeline, &rules, labels);
    let upcoming = build_upcoming(now, &timeline, &rules, labels, config.upcoming_limit());
    let countdown = next_countdown(now, &current, &upcoming);

    Evaluation {
        now,
        timeline,
        current,
        upcoming,
        countdown,
    }
}

/// The nearest boundary worth counting down to.
///
/// A pending jama'ah of the current prayer comes first; otherwise the start of
/// the first upcoming period.
pub fn next_countdown(
    now: NaiveDateTime,
    current: &Classification,
    upcoming: &UpcomingList,
) -> Option<Countdown> {
    let current = current
        .state()
        .filter(|state| state.key.is_prayer())
        .and_then(|state| Countdown::for_period(now, state.start, state.jamaah));

    current.or_else(|| {
        upcoming
            .iter()
            .find_map(|entry| Countdown::for_period(now, Some(entry.start), entry.jamaah))
    })
}
