//! Main application entry point and high-level flow coordination.
//!
//! Argument parsing lives in `args`; everything after that is delegated to the
//! command handlers in `commands`, which load the configuration and schedule,
//! evaluate the board and print the result.
//!
//! Errors from a command (an unreadable config or schedule file, an invalid
//! `--at` value) are reported through the logger and end the process with a
//! non-zero exit code.

use salatr::args::{self, CliAction, ParsedArgs};
use salatr::commands;
use salatr::common::constants::{EXIT_FAILURE, EXIT_SUCCESS};
use salatr::common::logger::Log;
use salatr::{log_end, log_error_exit};

fn main() {
    let parsed_args = ParsedArgs::from_env();

    let result = match parsed_args.action {
        CliAction::ShowVersion => {
            args::display_version_info();
            Ok(())
        }
        CliAction::ShowHelp => {
            args::display_help();
            Ok(())
        }
        CliAction::ShowHelpDueToError => {
            args::display_help();
            std::process::exit(EXIT_FAILURE);
        }
        CliAction::Status {
            options,
            json,
            follow,
            limit,
        } => {
            Log::set_debug(options.debug_enabled);
            commands::status::handle_status_command(&options, json, follow, limit)
        }
        CliAction::Timeline { options, json } => {
            Log::set_debug(options.debug_enabled);
            commands::timeline::handle_timeline_command(&options, json)
        }
        CliAction::Notifications { options } => {
            Log::set_debug(options.debug_enabled);
            commands::notifications::handle_notifications_command(&options)
        }
    };

    if let Err(e) = result {
        // JSON modes silence the logger; errors must still be visible
        Log::set_enabled(true);
        log_error_exit!("{:#}", e);
        log_end!();
        std::process::exit(EXIT_FAILURE);
    }

    std::process::exit(EXIT_SUCCESS);
}
