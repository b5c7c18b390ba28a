//! tools
//!
//! Batch edits on tierlist files.
//!
//! # Modules
//!
//! - [`append`] - Add downloaded or local images to the untiered pool
//! - [`dedupe`] - Find and remove items with near-duplicate names
//!
//! # Rewrites
//!
//! [`rewrite`] is the common path for editing a file in place: lock, load,
//! edit, back up, write atomically. The backup is only taken when the edit
//! actually changed the document.

pub mod append;
pub mod dedupe;

use std::path::{Path, PathBuf};

use log::info;

use crate::core::model::{Document, Palette};
use crate::core::store::{self, FileLock, StoreError};

/// How [`rewrite`] persists the result.
#[derive(Debug, Clone, Default)]
pub struct RewriteOptions {
    /// Copy the old file aside before writing.
    pub backup: bool,
    /// Where backups go; next to the file when `None`.
    pub backup_dir: Option<PathBuf>,
    /// Write indented JSON.
    pub pretty: bool,
    /// Colors for rows whose stored color is missing or invalid.
    pub palette: Palette,
}

/// What [`rewrite`] did.
#[derive(Debug)]
pub struct Rewrite<T> {
    /// Value returned by the edit closure.
    pub value: T,
    /// Whether the file was written.
    pub changed: bool,
    /// Backup location, if one was taken.
    pub backup: Option<PathBuf>,
}

/// Edit the document at `path` in place under an exclusive lock.
///
/// The file is left untouched when `edit` makes no change.
///
/// # Errors
///
/// [`StoreError::Locked`] if another process is rewriting the same file;
/// any read, parse or write error otherwise. On error the original file is
/// intact.
pub fn rewrite<T>(
    path: &Path,
    options: &RewriteOptions,
    edit: impl FnOnce(&mut Document) -> T,
) -> Result<Rewrite<T>, StoreError> {
    let _lock = FileLock::acquire(path)?;
    let original = store::load_with(path, &options.palette)?;

    let mut doc = original.clone();
    let value = edit(&mut doc);
    if doc == original {
        return Ok(Rewrite {
            value,
            changed: false,
            backup: None,
        });
    }

    let backup = if options.backup {
        Some(store::backup(path, options.backup_dir.as_deref())?)
    } else {
        None
    };
    store::save(path, &doc, options.pretty)?;
    info!("rewrote {}", path.display());

    Ok(Rewrite {
        value,
        changed: true,
        backup,
    })
}
