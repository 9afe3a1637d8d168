//! Notifications command - export prayer instants for an alert scheduler.
//!
//! Output is always JSON: an object keyed by ISO date whose values list each
//! prayer's start and jama'ah as epoch milliseconds.

use anyhow::Result;

use super::BoardContext;
use crate::args::CommonOptions;
use crate::common::logger::Log;
use crate::core::build_timeline;
use crate::display::notification_feed;

pub fn handle_notifications_command(options: &CommonOptions) -> Result<()> {
    Log::set_enabled(false);

    let context = BoardContext::load(options)?;
    let rules = context.config.rules();
    let timeline = build_timeline(&context.rows, context.now().date(), &rules, &context.labels);
    let feed = notification_feed(&timeline, &rules, &context.labels);

    println!("{}", serde_json::to_string_pretty(&feed)?);
    Ok(())
}
