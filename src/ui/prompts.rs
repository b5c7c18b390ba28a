//! ui::prompts
//!
//! Interactive confirmations.
//!
//! # Design
//!
//! Prompts are only shown in interactive mode. In non-interactive mode,
//! destructive operations must be pre-approved (`--yes`) or fail with
//! [`PromptError::NotInteractive`].

use std::io::{self, BufRead, Write};

use thiserror::Error;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt cancelled by user")]
    Cancelled,

    #[error("not in interactive mode (pass --yes to proceed)")]
    NotInteractive,

    #[error("IO error: {0}")]
    IoError(String),
}

impl From<io::Error> for PromptError {
    fn from(err: io::Error) -> Self {
        PromptError::IoError(err.to_string())
    }
}

/// Ask a yes/no question on the terminal.
///
/// Returns `Ok(true)` if the user confirms, `Ok(false)` if they decline.
/// An empty answer picks `default`.
pub fn confirm(message: &str, default: bool, interactive: bool) -> Result<bool, PromptError> {
    if !interactive {
        return Err(PromptError::NotInteractive);
    }
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    confirm_with(&mut stdin.lock(), &mut stdout, message, default)
}

/// [`confirm`] against arbitrary streams.
///
/// End of input counts as [`PromptError::Cancelled`].
///
/// # Example
///
/// ```
/// use tierlist::ui::prompts::confirm_with;
///
/// let mut out = Vec::new();
/// assert!(confirm_with(&mut "y\n".as_bytes(), &mut out, "Remove?", false).unwrap());
/// assert!(!confirm_with(&mut "\n".as_bytes(), &mut out, "Remove?", false).unwrap());
/// assert_eq!(String::from_utf8(out).unwrap(), "Remove? [y/N] Remove? [y/N] ");
/// ```
pub fn confirm_with<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    message: &str,
    default: bool,
) -> Result<bool, PromptError> {
    let hint = if default { "[Y/n]" } else { "[y/N]" };
    write!(writer, "{message} {hint} ")?;
    writer.flush()?;

    let mut input = String::new();
    if reader.read_line(&mut input)? == 0 {
        return Err(PromptError::Cancelled);
    }

    let answer = input.trim();
    Ok(if answer.is_empty() {
        default
    } else {
        answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ask(input: &str, default: bool) -> Result<bool, PromptError> {
        let mut out = Vec::new();
        confirm_with(&mut input.as_bytes(), &mut out, "Go?", default)
    }

    #[test]
    fn answers() {
        assert!(ask("YES\n", false).unwrap());
        assert!(!ask("n\n", true).unwrap());
        assert!(!ask("maybe\n", true).unwrap());
        assert!(ask("\n", true).unwrap());
    }

    #[test]
    fn eof_cancels() {
        assert!(matches!(ask("", true), Err(PromptError::Cancelled)));
    }

    #[test]
    fn non_interactive_refuses() {
        assert!(matches!(
            confirm("Go?", true, false),
            Err(PromptError::NotInteractive)
        ));
    }
}
