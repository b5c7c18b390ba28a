//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Loads the document into a session and applies the operation
//! 3. Saves and formats output
//!
//! # Async Commands
//!
//! `import` and `append-image` involve network I/O. Their handlers create a
//! `tokio` runtime and `block_on` the fetch; everything else is synchronous.

mod completion;
mod config_cmd;
mod dedupe;
mod drag;
mod edit;
mod image;
mod import;
mod new;
mod row;
mod show;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use config_cmd::list as config_list;
pub use dedupe::dedupe;
pub use drag::drag;
pub use edit::title;
pub use image::{add_image, append_image};
pub use import::import;
pub use new::new;
pub use row::row;
pub use show::show;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::cli::args::{Command, ConfigAction};
use crate::cli::Context;
use crate::core::store;
use crate::engine::Session;
use crate::remote::HttpFetcher;

pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::New {
            file,
            title,
            rows,
            force,
        } => new::new(ctx, &file, title.as_deref(), rows, force),
        Command::Show {
            file,
            indices,
            json,
        } => show::show(ctx, &file, indices, json),
        Command::Drag {
            file,
            from,
            to,
            dry_run,
        } => drag::drag(ctx, &file, from, to, dry_run),
        Command::Title { file, title } => edit::title(ctx, &file, &title),
        Command::Row { action } => row::row(ctx, action),
        Command::AddImage { file, images, name } => {
            image::add_image(ctx, &file, &images, name.as_deref())
        }
        Command::AppendImage {
            file,
            urls,
            name,
            no_backup,
        } => image::append_image(ctx, &file, &urls, name.as_deref(), no_backup),
        Command::Import { url, out, force } => import::import(ctx, &url, out.as_deref(), force),
        Command::Dedupe {
            file,
            dry_run,
            yes,
            no_backup,
        } => dedupe::dedupe(ctx, &file, dry_run, yes, no_backup),
        Command::Config { action } => match action {
            ConfigAction::List => config_cmd::list(ctx),
        },
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// Load `file` into a fresh session.
pub(crate) fn open_session(ctx: &Context, file: &Path) -> Result<(PathBuf, Session)> {
    let path = ctx.resolve(file);
    let palette = ctx.config.palette();
    let document = store::load_with(&path, &palette)?;
    Ok((path, Session::new(document, palette)))
}

/// Write the session's document back if it changed.
///
/// Returns whether anything was written.
pub(crate) fn save_session(ctx: &Context, path: &Path, session: &mut Session) -> Result<bool> {
    if !session.has_unsaved_changes() {
        return Ok(false);
    }
    store::save(path, session.document(), ctx.config.pretty())
        .with_context(|| format!("Failed to save {}", path.display()))?;
    session.mark_saved();
    Ok(true)
}

/// HTTP client configured from the context.
pub(crate) fn fetcher(ctx: &Context) -> Result<HttpFetcher> {
    HttpFetcher::new(ctx.config.fetch_timeout(), ctx.config.user_agent())
        .context("Failed to create HTTP client")
}
