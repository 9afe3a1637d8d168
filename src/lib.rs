//! # Salatr Library
//!
//! Temporal reasoning for a mosque prayer-times board.
//!
//! This library exists to enable testing of the evaluation internals and provide clean
//! separation between CLI dispatch (main.rs) and application logic.
//!
//! ## Architecture
//!
//! - **Core**: `core` turns a schedule, the rule configuration and an instant into a
//!   timeline, the current period, the upcoming list and a countdown
//! - **Schedule**: `schedule` reads the venue's day/month table
//! - **Configuration**: `config` for the flat rule map read from TOML
//! - **Labels**: `labels` for English and Arabic period names
//! - **Presentation**: `display` for serialisable board snapshots and notification feeds
//! - **Commands**: `commands` module for CLI subcommands (status, timeline, notifications)
//! - **Infrastructure**: clock abstraction, logging and constants

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod common;

pub mod args;
pub mod commands;
pub mod config;
pub mod core;
pub mod display;
pub mod labels;
pub mod schedule;
pub mod time_source;

pub use crate::config::{RuleConfig, Rules};
pub use crate::core::{Classification, Evaluation, evaluate};
pub use crate::display::DisplayState;
pub use crate::labels::Labels;
pub use crate::schedule::ScheduleRow;
