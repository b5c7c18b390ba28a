//! core::store
//!
//! Flat-file persistence for tierlist documents.
//!
//! # Guarantees
//!
//! - Writes are atomic: the JSON goes to a sibling temp file, is synced,
//!   then renamed over the target. A failed write leaves the old file.
//! - [`backup`] copies the current file to a timestamped sibling before a
//!   destructive rewrite.
//! - [`FileLock`] holds an OS-level exclusive lock on `<file>.lock` for the
//!   duration of a batch rewrite. Acquisition never blocks.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use tierlist::core::store::{self, FileLock};
//!
//! let path = Path::new("list.json");
//! let mut doc = store::load(path)?;
//! doc.title = "Renamed".into();
//!
//! let _lock = FileLock::acquire(path)?;
//! store::backup(path, None)?;
//! store::save(path, &doc, true)?;
//! # Ok::<(), tierlist::core::store::StoreError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use fs2::FileExt;
use log::debug;
use thiserror::Error;

use crate::core::model::{Document, Palette};
use crate::core::schema::{self, FormatError};

/// Errors from document storage.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("'{path}' is not a valid tierlist: {source}")]
    Format { path: PathBuf, source: FormatError },

    #[error("failed to encode document: {0}")]
    Encode(FormatError),

    #[error("'{0}' is locked by another process")]
    Locked(PathBuf),
}

/// Read and parse a document file.
pub fn load(path: &Path) -> Result<Document, StoreError> {
    load_with(path, &Palette::default())
}

/// Read and parse a document file, repairing row colors from `palette`.
pub fn load_with(path: &Path, palette: &Palette) -> Result<Document, StoreError> {
    let text = fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    schema::parse_with(&text, palette).map_err(|source| StoreError::Format {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize and atomically write a document.
pub fn save(path: &Path, doc: &Document, pretty: bool) -> Result<(), StoreError> {
    let json = if pretty {
        schema::serialize_pretty(doc)
    } else {
        schema::serialize(doc)
    }
    .map_err(StoreError::Encode)?;
    write_atomic(path, json.as_bytes())
}

/// Replace `path` with `contents` via temp file and rename.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let write_err = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let temp_path = temp_sibling(path);
    {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(write_err)?;
        file.write_all(contents).map_err(write_err)?;
        file.sync_all().map_err(write_err)?;
    }

    if let Err(source) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(write_err(source));
    }
    debug!("wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

/// Copy `path` to a timestamped backup and return the backup's path.
///
/// The backup lands next to the original unless `dir` is given. Names look
/// like `list.backup-20240131-235959.json`; a second backup within the same
/// second gets `-2`, then `-3`, and so on. Existing backups are never
/// overwritten.
pub fn backup(path: &Path, dir: Option<&Path>) -> Result<PathBuf, StoreError> {
    let mut source = File::open(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let stamp = Local::now().format("%Y%m%d-%H%M%S").to_string();

    let (target, mut file) = create_backup_file(path, dir, &stamp)?;
    let write_err = |source| StoreError::Write {
        path: target.clone(),
        source,
    };
    io::copy(&mut source, &mut file).map_err(write_err)?;
    file.sync_all().map_err(write_err)?;
    debug!("backed up {} to {}", path.display(), target.display());
    Ok(target)
}

fn create_backup_file(
    path: &Path,
    dir: Option<&Path>,
    stamp: &str,
) -> Result<(PathBuf, File), StoreError> {
    let mut attempt = 1u32;
    loop {
        let target = if attempt == 1 {
            backup_path(path, dir, stamp)
        } else {
            backup_path(path, dir, &format!("{stamp}-{attempt}"))
        };
        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        match OpenOptions::new().write(true).create_new(true).open(&target) {
            Ok(file) => return Ok((target, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => attempt += 1,
            Err(source) => return Err(StoreError::Write { path: target, source }),
        }
    }
}

fn backup_path(path: &Path, dir: Option<&Path>, stamp: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "tierlist".to_string());
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "json".to_string());
    let name = format!("{stem}.backup-{stamp}.{ext}");
    match dir {
        Some(dir) => dir.join(name),
        None => path.with_file_name(name),
    }
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn lock_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".lock");
    path.with_file_name(name)
}

/// Exclusive lock on a document file, released on drop.
#[derive(Debug)]
pub struct FileLock {
    path: PathBuf,
    file: Option<File>,
}

impl FileLock {
    /// Lock `<document>.lock` without blocking.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Locked`] if another process holds the lock
    /// - [`StoreError::Write`] if the lock file cannot be created
    pub fn acquire(document: &Path) -> Result<Self, StoreError> {
        let path = lock_sibling(document);
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|source| StoreError::Write {
                path: path.clone(),
                source,
            })?;

        file.try_lock_exclusive()
            .map_err(|_| StoreError::Locked(document.to_path_buf()))?;

        Ok(Self {
            path,
            file: Some(file),
        })
    }

    /// Whether this guard still holds the lock.
    pub fn is_held(&self) -> bool {
        self.file.is_some()
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        if let Some(file) = self.file.take() {
            let _ = FileExt::unlock(&file);
            drop(file);
            let _ = fs::remove_file(&self.path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Item;
    use crate::core::types::ImageSource;
    use tempfile::TempDir;

    fn sample() -> Document {
        let mut doc = Document::with_rows("Snacks", &["S", "A"], &Palette::default());
        doc.rows[0]
            .items
            .push(Item::new(ImageSource::new("data:image/png;base64,AA"), "chips"));
        doc
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("list.json");

        save(&path, &sample(), false).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded, sample());
        assert!(!temp_sibling(&path).exists());
    }

    #[test]
    fn load_reports_format_errors_with_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"title": "x"}"#).unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, StoreError::Format { .. }));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn load_with_uses_given_palette() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("list.json");
        fs::write(&path, r#"{"title": "x", "rows": [{"name": "S", "imgs": []}]}"#).unwrap();
        let palette = Palette::parse(&["#123456"]).unwrap();

        let doc = load_with(&path, &palette).unwrap();

        assert_eq!(doc.rows[0].color.as_str(), "#123456");
    }

    #[test]
    fn load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
    }

    #[test]
    fn backup_copies_original_bytes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("list.json");
        fs::write(&path, "original").unwrap();

        let backup_file = backup(&path, None).unwrap();

        assert_eq!(fs::read_to_string(&backup_file).unwrap(), "original");
        let name = backup_file.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("list.backup-"));
        assert!(name.ends_with(".json"));
    }

    #[test]
    fn backup_into_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("list.json");
        fs::write(&path, "x").unwrap();
        let backups = dir.path().join("backups");

        let backup_file = backup(&path, Some(&backups)).unwrap();

        assert_eq!(backup_file.parent().unwrap(), backups);
    }

    #[test]
    fn backups_in_the_same_second_do_not_collide() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("list.json");
        fs::write(&path, "first").unwrap();
        let first = backup(&path, None).unwrap();

        fs::write(&path, "second").unwrap();
        let second = backup(&path, None).unwrap();

        assert_ne!(first, second);
        assert_eq!(fs::read_to_string(&first).unwrap(), "first");
        assert_eq!(fs::read_to_string(&second).unwrap(), "second");
    }

    #[test]
    fn taken_backup_name_gets_a_counter() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("list.json");
        let taken = backup_path(&path, None, "20240101-120000");
        fs::write(&taken, "older").unwrap();

        let (target, _file) = create_backup_file(&path, None, "20240101-120000").unwrap();

        assert_eq!(target, dir.path().join("list.backup-20240101-120000-2.json"));
        assert_eq!(fs::read_to_string(&taken).unwrap(), "older");
    }

    #[test]
    fn backup_of_missing_file_leaves_nothing_behind() {
        let dir = TempDir::new().unwrap();
        let err = backup(&dir.path().join("gone.json"), None).unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn backup_path_format() {
        let path = backup_path(Path::new("/tmp/foods.json"), None, "20240101-120000");
        assert_eq!(path, PathBuf::from("/tmp/foods.backup-20240101-120000.json"));
    }

    #[test]
    fn second_lock_fails_until_first_dropped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("list.json");

        let first = FileLock::acquire(&path).unwrap();
        assert!(first.is_held());
        assert!(matches!(
            FileLock::acquire(&path),
            Err(StoreError::Locked(_))
        ));

        drop(first);
        assert!(FileLock::acquire(&path).is_ok());
    }
}
