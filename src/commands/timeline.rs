//! Timeline command - list every period from yesterday to tomorrow.

use anyhow::Result;

use super::BoardContext;
use crate::args::CommonOptions;
use crate::common::logger::Log;
use crate::core::{PeriodInstant, build_timeline, format_time};

pub fn handle_timeline_command(options: &CommonOptions, json: bool) -> Result<()> {
    if json {
        Log::set_enabled(false);
    }

    let context = BoardContext::load(options)?;
    let now = context.now();
    let rules = context.config.rules();
    let timeline = build_timeline(&context.rows, now.date(), &rules, &context.labels);

    if json {
        println!("{}", serde_json::to_string_pretty(timeline.entries())?);
        return Ok(());
    }

    log_version!();
    if timeline.is_empty() {
        log_pipe!();
        log_warning!("No schedule rows around {}", now.date());
        log_end!();
        return Ok(());
    }

    let format = context.config.clock_format();
    for day in [timeline.yesterday(), timeline.today(), timeline.tomorrow()] {
        let periods: Vec<&PeriodInstant> = timeline.day(day).collect();
        if periods.is_empty() {
            log_debug!("No schedule row for {}", day);
            continue;
        }
        log_block_start!("{}", day.format("%A %d %B %Y"));
        for period in periods {
            let jamaah = period
                .jamaah
                .map(|j| format!(" / {}", format_time(j, format)))
                .unwrap_or_default();
            let end = period
                .end
                .map(|e| format!(" - {}", format_time(e, format)))
                .unwrap_or_default();
            log_indented!(
                "{:<10} {}{}{}",
                period.label,
                format_time(period.start, format),
                end,
                jamaah
            );
        }
    }
    log_end!();

    Ok(())
}
