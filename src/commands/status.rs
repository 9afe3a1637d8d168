//! Status command - display the board as it stands right now.
//!
//! Evaluates the schedule at the current (or pinned) instant and prints the
//! current period, the countdown and the upcoming list. Supports JSON and
//! human-readable output, with an optional follow mode that re-evaluates every
//! second.

use anyhow::Result;
use std::io::Write;
use std::thread;
use std::time::Duration;

use super::BoardContext;
use crate::args::CommonOptions;
use crate::common::constants::KEY_UPCOMING_LIMIT;
use crate::common::logger::Log;
use crate::core::evaluate;
use crate::display::DisplayState;

/// Handle the status command.
///
/// # Arguments
/// * `options` - Shared command options (config dir, pinned instant, debug)
/// * `json` - Output in JSON format
/// * `follow` - Re-evaluate once per second until interrupted
/// * `limit` - Override for the configured upcoming list length
pub fn handle_status_command(
    options: &CommonOptions,
    json: bool,
    follow: bool,
    limit: Option<usize>,
) -> Result<()> {
    if json {
        Log::set_enabled(false);
    }

    let mut context = BoardContext::load(options)?;
    if let Some(limit) = limit {
        context.config.set(KEY_UPCOMING_LIMIT, limit.to_string());
    }

    if follow {
        context.start_clock();
        handle_follow_mode(&context, json)
    } else {
        let state = snapshot(&context);
        if json {
            println!("{}", state.to_json_pretty()?);
        } else {
            log_version!();
            if context.is_simulated() {
                log_block_start!("Simulated time: {}", context.now().format("%Y-%m-%d %H:%M:%S"));
            }
            display_human_readable(&state);
            log_end!();
        }
        Ok(())
    }
}

fn snapshot(context: &BoardContext) -> DisplayState {
    let evaluation = evaluate(context.now(), &context.rows, &context.config, &context.labels);
    DisplayState::new(&evaluation, context.config.clock_format())
}

/// Display DisplayState in human-readable format.
fn display_human_readable(state: &DisplayState) {
    let Some(current) = &state.current else {
        log_pipe!();
        log_warning!("No schedule data for {}", state.date.format("%d %B"));
        return;
    };

    let arabic = current
        .arabic_label
        .as_deref()
        .map(|a| format!(" ({a})"))
        .unwrap_or_default();
    log_block_start!("{} · {}{}", state.now, current.label, arabic);

    let start = current.start.as_deref().unwrap_or("--:--");
    let end = current.end.as_deref().unwrap_or("--:--");
    log_indented!("{} - {}", start, end);
    if let Some(jamaah) = &current.jamaah {
        log_indented!("Jama'ah: {}", jamaah);
    }
    if current.in_jamaah {
        log_indented!("Jama'ah in progress");
    }
    if current.is_makrooh {
        log_indented!("Makrooh: voluntary prayer is disliked now");
    }
    if let Some(countdown) = &state.countdown {
        log_indented!("{}", countdown);
    }

    if state.upcoming.is_empty() {
        return;
    }
    log_block_start!("Upcoming:");
    for entry in &state.upcoming {
        let jamaah = entry
            .jamaah
            .as_deref()
            .map(|j| format!(" / {j}"))
            .unwrap_or_default();
        let marker = if entry.next_day { " (tomorrow)" } else { "" };
        log_indented!("{:<10} {}{}{}", entry.label, entry.start, jamaah, marker);
    }
}

/// Re-evaluate once per second, printing a line whenever the board changes.
fn handle_follow_mode(context: &BoardContext, json: bool) -> Result<()> {
    if !json {
        println!("Following the board (press Ctrl+C to stop)...\n");
    }

    let mut last_line: Option<String> = None;
    loop {
        let state = snapshot(context);
        let line = if json {
            state.to_json()?
        } else {
            summary_line(&state)
        };

        if last_line.as_deref() != Some(line.as_str()) {
            println!("{line}");
            std::io::stdout().flush()?;
            last_line = Some(line);
        }

        thread::sleep(Duration::from_secs(1));
    }
}

/// One-line rendering used in follow mode.
fn summary_line(state: &DisplayState) -> String {
    let Some(current) = &state.current else {
        return format!("[{}] no schedule data", state.now);
    };

    let mut line = format!("[{}] {}", state.now, current.label);
    if current.is_makrooh {
        line.push_str(" (makrooh)");
    }
    if current.in_jamaah {
        line.push_str(" (jama'ah)");
    }
    if let Some(countdown) = &state.countdown {
        line.push_str(&format!(" | {countdown}"));
    }
    line
}
