//! Command-line argument parsing and processing.
//!
//! This module handles parsing of command-line arguments and provides a clean
//! interface for the main application logic. Running without a command shows
//! the board status; `timeline` and `notifications` expose the underlying data.

/// Options shared by every command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommonOptions {
    pub debug_enabled: bool,
    pub config_dir: Option<String>,
    /// Evaluate at this local datetime instead of the system clock.
    pub at: Option<String>,
}

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Show the current period, countdown and upcoming list
    Status {
        options: CommonOptions,
        json: bool,
        follow: bool,
        limit: Option<usize>,
    },
    /// Dump the three-day timeline
    Timeline { options: CommonOptions, json: bool },
    /// Print the per-day notification feed as JSON
    Notifications { options: CommonOptions },

    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to unknown arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// # Arguments
    /// * `args` - Iterator over command-line arguments (typically from std::env::args())
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        // Help and version take precedence over everything else
        if args_vec
            .iter()
            .any(|arg| arg == "--version" || arg == "-V" || arg == "-v")
        {
            return ParsedArgs {
                action: CliAction::ShowVersion,
            };
        }
        if args_vec.iter().any(|arg| arg == "--help" || arg == "-h") {
            return ParsedArgs {
                action: CliAction::ShowHelp,
            };
        }

        let mut options = CommonOptions::default();
        let mut command: Option<String> = None;
        let mut json = false;
        let mut follow = false;
        let mut limit: Option<usize> = None;
        let mut unknown_arg_found = false;

        let mut i = 0;
        while i < args_vec.len() {
            let arg = args_vec[i].as_str();
            match arg {
                "--debug" | "-d" => options.debug_enabled = true,
                "--json" | "-j" => json = true,
                "--follow" | "-f" => follow = true,
                "--config" | "-c" => match args_vec.get(i + 1) {
                    Some(dir) if !dir.starts_with('-') => {
                        options.config_dir = Some(dir.clone());
                        i += 1;
                    }
                    _ => {
                        log_warning!("Missing directory for --config. Usage: --config <directory>");
                        unknown_arg_found = true;
                    }
                },
                "--at" | "-a" => match args_vec.get(i + 1) {
                    Some(value) if !value.starts_with('-') => {
                        options.at = Some(value.clone());
                        i += 1;
                    }
                    _ => {
                        log_warning!("Missing datetime for --at. Usage: --at \"YYYY-MM-DD HH:MM\"");
                        unknown_arg_found = true;
                    }
                },
                "--limit" | "-n" => match args_vec.get(i + 1).map(|v| v.parse::<usize>()) {
                    Some(Ok(value)) => {
                        limit = Some(value);
                        i += 1;
                    }
                    _ => {
                        log_warning!("Invalid value for --limit. Usage: --limit <count>");
                        unknown_arg_found = true;
                    }
                },
                _ if arg.starts_with('-') => {
                    log_warning!("Unknown option: {}", arg);
                    unknown_arg_found = true;
                }
                _ => {
                    if let Some(existing) = &command {
                        log_error!(
                            "Cannot use multiple commands at once: '{}' and '{}'",
                            existing,
                            arg
                        );
                        unknown_arg_found = true;
                    } else {
                        command = Some(arg.to_string());
                    }
                }
            }
            i += 1;
        }

        if unknown_arg_found {
            return ParsedArgs {
                action: CliAction::ShowHelpDueToError,
            };
        }

        let action = match command.as_deref() {
            None | Some("status") | Some("s") => CliAction::Status {
                options,
                json,
                follow,
                limit,
            },
            Some("timeline") | Some("t") => CliAction::Timeline { options, json },
            Some("notifications") | Some("n") => CliAction::Notifications { options },
            Some(other) => {
                log_warning!("Unknown command: {}", other);
                CliAction::ShowHelpDueToError
            }
        };

        ParsedArgs { action }
    }

    /// Convenience method to parse from std::env::args()
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

/// Displays version information using custom logging style.
pub fn display_version_info() {
    log_version!();
    log_pipe!();
    println!("┗ {}", env!("CARGO_PKG_DESCRIPTION"));
}

/// Displays custom help message using logger methods.
pub fn display_help() {
    log_version!();
    log_block_start!(env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage:");
    log_indented!("salatr [OPTIONS] [COMMAND]");
    log_block_start!("Options:");
    log_indented!("-a, --at <datetime>    Evaluate at \"YYYY-MM-DD HH:MM\" instead of now");
    log_indented!("-c, --config <dir>     Use custom configuration directory");
    log_indented!("-d, --debug            Enable detailed debug output");
    log_indented!("-f, --follow           Re-evaluate every second (status only)");
    log_indented!("-h, --help             Print help information");
    log_indented!("-j, --json             Output JSON instead of text");
    log_indented!("-n, --limit <count>    Override the upcoming list length (status only)");
    log_indented!("-V, --version          Print version information");
    log_block_start!("Commands:");
    log_indented!("status, s              Current period, countdown and upcoming (default)");
    log_indented!("timeline, t            Every period from yesterday to tomorrow");
    log_indented!("notifications, n       Per-day prayer instants for alert scheduling");
    log_end!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(options: CommonOptions) -> CliAction {
        CliAction::Status {
            options,
            json: false,
            follow: false,
            limit: None,
        }
    }

    #[test]
    fn test_parse_no_args() {
        let parsed = ParsedArgs::parse(vec!["salatr"]);
        assert_eq!(parsed.action, status(CommonOptions::default()));
    }

    #[test]
    fn test_parse_debug_flag() {
        let parsed = ParsedArgs::parse(vec!["salatr", "-d"]);
        assert_eq!(
            parsed.action,
            status(CommonOptions {
                debug_enabled: true,
                ..Default::default()
            })
        );
    }

    #[test]
    fn test_parse_help_and_version() {
        assert_eq!(
            ParsedArgs::parse(vec!["salatr", "--help"]).action,
            CliAction::ShowHelp
        );
        assert_eq!(
            ParsedArgs::parse(vec!["salatr", "-V"]).action,
            CliAction::ShowVersion
        );
        // Version takes precedence
        assert_eq!(
            ParsedArgs::parse(vec!["salatr", "--help", "-v", "timeline"]).action,
            CliAction::ShowVersion
        );
    }

    #[test]
    fn test_parse_status_with_options() {
        let parsed = ParsedArgs::parse(vec![
            "salatr",
            "status",
            "--json",
            "--at",
            "2025-03-14 13:05",
            "--limit",
            "3",
            "-c",
            "/tmp/board",
        ]);
        assert_eq!(
            parsed.action,
            CliAction::Status {
                options: CommonOptions {
                    debug_enabled: false,
                    config_dir: Some("/tmp/board".to_string()),
                    at: Some("2025-03-14 13:05".to_string()),
                },
                json: true,
                follow: false,
                limit: Some(3),
            }
        );
    }

    #[test]
    fn test_parse_follow_without_command() {
        let parsed = ParsedArgs::parse(vec!["salatr", "--follow"]);
        assert!(matches!(parsed.action, CliAction::Status { follow: true, .. }));
    }

    #[test]
    fn test_parse_timeline_and_notifications() {
        assert_eq!(
            ParsedArgs::parse(vec!["salatr", "timeline", "-j"]).action,
            CliAction::Timeline {
                options: CommonOptions::default(),
                json: true
            }
        );
        assert_eq!(
            ParsedArgs::parse(vec!["salatr", "-d", "n"]).action,
            CliAction::Notifications {
                options: CommonOptions {
                    debug_enabled: true,
                    ..Default::default()
                }
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        for args in [
            vec!["salatr", "--unknown"],
            vec!["salatr", "bogus"],
            vec!["salatr", "status", "timeline"],
            vec!["salatr", "--limit", "many"],
            vec!["salatr", "--at"],
            vec!["salatr", "--config", "--debug"],
        ] {
            assert_eq!(
                ParsedArgs::parse(args).action,
                CliAction::ShowHelpDueToError
            );
        }
    }
}
