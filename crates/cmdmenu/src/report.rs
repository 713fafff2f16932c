//! Diagnostics raised by the menu loop.
//!
//! The loop never aborts on bad input or a failing action. It hands a
//! [`Diagnostic`] to the router's [`Reporter`] and keeps going. Replace the
//! reporter to change wording, silence diagnostics or collect them in tests.

use std::io::{self, Write};

use cmdmenu_io::InputError;
use tracing::{debug, warn};

use crate::config::MenuConfig;

/// Something the user should hear about.
#[derive(Debug)]
pub enum Diagnostic<'a> {
    /// The input line was not a listed option.
    InvalidSelection {
        input: &'a str,
        error: &'a InputError,
    },
    /// Reading the input stream failed.
    ReadFailed { error: &'a InputError },
    /// A dispatched action returned an error.
    ActionFailed {
        action: &'a str,
        error: &'a anyhow::Error,
    },
}

/// Writes diagnostics.
pub trait Reporter {
    /// Reports `diagnostic`, writing any user-facing text to `out`.
    fn report(&self, out: &mut dyn Write, diagnostic: &Diagnostic<'_>) -> io::Result<()>;
}

/// The default reporter.
///
/// Writes one line per diagnostic to the menu's output and mirrors it as a
/// `tracing` event.
#[derive(Debug, Clone)]
pub struct ConsoleReporter {
    invalid_selection: String,
    read_error: String,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::from_config(&MenuConfig::default())
    }

    /// Uses the diagnostic messages of `config`.
    pub fn from_config(config: &MenuConfig) -> Self {
        Self {
            invalid_selection: config.invalid_selection.clone(),
            read_error: config.read_error.clone(),
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, out: &mut dyn Write, diagnostic: &Diagnostic<'_>) -> io::Result<()> {
        match diagnostic {
            Diagnostic::InvalidSelection { input, error } => {
                debug!(input = %input, error = %error, "invalid selection");
                writeln!(out, "{}", self.invalid_selection)
            }
            Diagnostic::ReadFailed { error } => {
                warn!(error = %error, "failed to read selection");
                writeln!(out, "{}", self.read_error)
            }
            Diagnostic::ActionFailed { action, error } => {
                let message = format!("{error:#}");
                warn!(action = %action, error = %message, "action failed");
                writeln!(out, "error: {action}: {message}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdmenu_io::parse_selection;

    fn render(reporter: &dyn Reporter, diagnostic: &Diagnostic<'_>) -> String {
        let mut out = Vec::new();
        reporter.report(&mut out, diagnostic).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_invalid_selection_message() {
        let error = parse_selection("abc", 2).unwrap_err();
        let text = render(
            &ConsoleReporter::new(),
            &Diagnostic::InvalidSelection {
                input: "abc",
                error: &error,
            },
        );
        assert_eq!(text, "Invalid number. Try again.\n");
    }

    #[test]
    fn test_read_failure_message() {
        let error = InputError::Read(io::Error::new(io::ErrorKind::Other, "gone"));
        let text = render(&ConsoleReporter::new(), &Diagnostic::ReadFailed { error: &error });
        assert_eq!(text, "Input error. Try again.\n");
    }

    #[test]
    fn test_action_failure_includes_context() {
        let error = anyhow::anyhow!("disk full").context("saving");
        let text = render(
            &ConsoleReporter::new(),
            &Diagnostic::ActionFailed {
                action: "Save",
                error: &error,
            },
        );
        assert_eq!(text, "error: Save: saving: disk full\n");
    }

    #[test]
    fn test_messages_follow_config() {
        let config = MenuConfig {
            invalid_selection: "Nope.".into(),
            ..MenuConfig::default()
        };
        let error = parse_selection("9", 1).unwrap_err();
        let text = render(
            &ConsoleReporter::from_config(&config),
            &Diagnostic::InvalidSelection {
                input: "9",
                error: &error,
            },
        );
        assert_eq!(text, "Nope.\n");
    }
}
