//! ui::output
//!
//! Terminal output for command results.
//!
//! Results go to stdout, warnings and errors to stderr. `--quiet` silences
//! everything but errors. Diagnostics are not printed here; they go through
//! the `log` facade and `env_logger`.

use std::fmt::Display;

use log::LevelFilter;

/// How chatty the CLI is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Normal,
    Debug,
}

impl Verbosity {
    /// `--quiet` beats `--debug`.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        match (quiet, debug) {
            (true, _) => Verbosity::Quiet,
            (false, true) => Verbosity::Debug,
            (false, false) => Verbosity::Normal,
        }
    }

    /// Default log level for this verbosity; `RUST_LOG` still overrides.
    pub fn log_level(self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::Error,
            Verbosity::Normal => LevelFilter::Warn,
            Verbosity::Debug => LevelFilter::Debug,
        }
    }

    fn chatty(self) -> bool {
        self >= Verbosity::Normal
    }
}

/// Print a status line to stdout unless quiet.
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity.chatty() {
        println!("{message}");
    }
}

/// Print an error to stderr, whatever the verbosity.
pub fn error(message: impl Display) {
    eprintln!("error: {message}");
}

/// Print a warning to stderr unless quiet.
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity.chatty() {
        eprintln!("warning: {message}");
    }
}

/// One line per item, each with `prefix`.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(prefix);
        out.push_str(&item.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins_over_debug() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }

    #[test]
    fn log_levels() {
        assert_eq!(Verbosity::Quiet.log_level(), LevelFilter::Error);
        assert_eq!(Verbosity::Normal.log_level(), LevelFilter::Warn);
        assert_eq!(Verbosity::Debug.log_level(), LevelFilter::Debug);
    }

    #[test]
    fn only_quiet_is_silent() {
        assert!(!Verbosity::Quiet.chatty());
        assert!(Verbosity::Normal.chatty());
        assert!(Verbosity::Debug.chatty());
    }

    #[test]
    fn list_formatting() {
        assert_eq!(format_list(&["a", "b"], "  - "), "  - a\n  - b");
        assert_eq!(format_list::<&str>(&[], "- "), "");
    }
}
