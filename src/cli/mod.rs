//! cli
//!
//! Command-line interface layer for tl.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load configuration and build the [`Context`]
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. Handlers load a document into an
//! [`engine::Session`](crate::engine::Session), apply one operation, and
//! save through [`core::store`](crate::core::store). Batch rewrites go
//! through [`tools::rewrite`](crate::tools::rewrite).

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::core::config::Config;
use crate::ui::output::Verbosity;

/// Per-invocation settings shared by all handlers.
#[derive(Debug, Clone)]
pub struct Context {
    /// Directory relative paths resolve against
    pub cwd: Option<PathBuf>,
    pub debug: bool,
    pub quiet: bool,
    /// Whether prompts may be shown
    pub interactive: bool,
    pub config: Config,
}

impl Context {
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }

    /// Resolve `path` against `--cwd`.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        match &self.cwd {
            Some(cwd) if path.is_relative() => cwd.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run(cli: Cli) -> Result<()> {
    let dir = match &cli.cwd {
        Some(cwd) => cwd.clone(),
        None => std::env::current_dir().context("Failed to determine working directory")?,
    };
    let config = Config::load(Some(&dir)).context("Failed to load config")?;

    let interactive = cli
        .interactive_override()
        .unwrap_or_else(|| config.interactive() && std::io::stdin().is_terminal());

    let ctx = Context {
        cwd: cli.cwd.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
        interactive,
        config,
    };

    commands::dispatch(cli.command, &ctx)
}
