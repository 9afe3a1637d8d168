//! Schedule file loading and sanity checks.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use super::{PrayerKind, ScheduleRow};
use crate::core::instant::parse_time_of_day;

/// Read a JSON array of schedule rows.
pub fn load_schedule(path: &Path) -> Result<Vec<ScheduleRow>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read schedule from {}", path.display()))?;

    let rows: Vec<ScheduleRow> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse schedule from {}", path.display()))?;

    let issues = validate_rows(&rows);
    if !issues.is_empty() {
        log_pipe!();
        for issue in &issues {
            log_warning!("{}", issue);
        }
    }
    log_debug!("Loaded {} schedule rows from {}", rows.len(), path.display());

    Ok(rows)
}

/// A schedule row problem. Rows are still used; the affected values are treated as absent.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleIssue {
    DateOutOfRange { day: u32, month: u32 },
    Duplicate { day: u32, month: u32 },
    InvalidTime { day: u32, month: u32, field: String, value: String },
}

impl fmt::Display for ScheduleIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleIssue::DateOutOfRange { day, month } => {
                write!(f, "Row {day}/{month} is not a valid day of the year")
            }
            ScheduleIssue::Duplicate { day, month } => {
                write!(f, "Row {day}/{month} appears more than once; the first is used")
            }
            ScheduleIssue::InvalidTime { day, month, field, value } => {
                write!(f, "Row {day}/{month}: '{field}' ('{value}') is not an HH:MM time")
            }
        }
    }
}

/// Check every row for impossible dates, duplicates and malformed time strings.
///
/// Empty time values are allowed and not reported.
pub fn validate_rows(rows: &[ScheduleRow]) -> Vec<ScheduleIssue> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for row in rows {
        let (day, month) = (row.day, row.month);

        // Feb 29 must stay valid, so check against a leap year
        if chrono::NaiveDate::from_ymd_opt(2024, month, day).is_none() {
            issues.push(ScheduleIssue::DateOutOfRange { day, month });
        }
        if !seen.insert((day, month)) {
            issues.push(ScheduleIssue::Duplicate { day, month });
        }

        let mut fields: Vec<(String, &str)> = vec![("Shouruq".to_string(), row.shouruq.as_str())];
        for prayer in PrayerKind::ALL {
            fields.push((format!("{prayer} Adhan"), row.adhan(prayer)));
            fields.push((format!("{prayer} Iqamah"), row.iqamah(prayer)));
        }

        for (field, value) in fields {
            if !value.trim().is_empty() && parse_time_of_day(value).is_none() {
                issues.push(ScheduleIssue::InvalidTime {
                    day,
                    month,
                    field,
                    value: value.to_string(),
                });
            }
        }
    }

    issues
}
