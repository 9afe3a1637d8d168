//! Friday relabelling of Dhuhr as Jummah.

use chrono::{Datelike, Weekday};

use crate::config::Rules;
use crate::core::instant::parse_instant;
use crate::core::period::{PeriodInstant, PeriodKey};
use crate::labels::Labels;

/// Returns true if `period` is a Dhuhr that falls on a Friday.
pub fn is_jummah(period: &PeriodInstant) -> bool {
    period.key == PeriodKey::Dhuhr && period.start.weekday() == Weekday::Fri
}

/// Return a copy of `period`, relabelled as Jummah when it is a Friday Dhuhr.
///
/// The congregation instant comes from the month's `jummahTimes` override when
/// it is configured and parses; otherwise the Dhuhr Iqamah is kept. Any other
/// period is returned unchanged.
pub fn apply_jummah_override(
    period: &PeriodInstant,
    rules: &Rules,
    labels: &Labels,
) -> PeriodInstant {
    let mut result = period.clone();
    if !is_jummah(period) {
        return result;
    }

    let day = period.day();
    result.key = PeriodKey::Jummah;
    result.label = labels.english(PeriodKey::Jummah).to_string();
    result.arabic_label = labels.arabic(PeriodKey::Jummah).map(str::to_string);
    if let Some(jamaah) = rules
        .jummah_time(day.month())
        .and_then(|time| parse_instant(time, day))
    {
        result.jamaah = Some(jamaah);
    }

    result
}
