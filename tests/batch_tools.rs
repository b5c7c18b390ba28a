//! Integration tests for batch tools that rewrite files in place.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use tierlist::core::model::{Document, Item, Palette};
use tierlist::core::store::{self, FileLock, StoreError};
use tierlist::core::types::ImageSource;
use tierlist::tools::append::{append_untiered, item_from_file};
use tierlist::tools::dedupe::DedupePlan;
use tierlist::tools::{rewrite, RewriteOptions};

fn item(name: &str) -> Item {
    Item::new(ImageSource::new("data:image/png;base64,AA"), name)
}

/// Write a food list with one duplicate pair spread over a row and untiered.
fn food_file(dir: &Path) -> PathBuf {
    let path = dir.join("food.json");
    let mut doc = Document::with_rows("food", &["S", "A"], &Palette::default());
    doc.rows[0].items.push(item("Pizza Hut Branch 2"));
    doc.rows[1].items.push(item("KFC"));
    doc.push_untiered(item("Pizza Hut"));
    store::save(&path, &doc, true).unwrap();
    path
}

fn backups(dir: &Path) -> Vec<PathBuf> {
    fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with("food.backup-"))
        })
        .collect()
}

#[test]
fn dedupe_keeps_shortest_name_across_containers() {
    let dir = TempDir::new().unwrap();
    let path = food_file(dir.path());

    let plan = DedupePlan::build(&store::load(&path).unwrap());
    assert_eq!(plan.groups.len(), 1);
    assert_eq!(plan.groups[0].keep.name, "Pizza Hut");
    assert_eq!(plan.removal_count(), 1);

    let options = RewriteOptions {
        backup: true,
        ..Default::default()
    };
    let result = rewrite(&path, &options, |doc| DedupePlan::build(doc).apply(doc)).unwrap();

    assert!(result.changed);
    assert_eq!(result.value, 1);
    let doc = store::load(&path).unwrap();
    assert!(doc.rows[0].items.is_empty());
    assert_eq!(doc.rows[1].items[0].name, "KFC");
    assert_eq!(doc.untiered.items[0].name, "Pizza Hut");
}

#[test]
fn rewrite_backs_up_original_contents() {
    let dir = TempDir::new().unwrap();
    let path = food_file(dir.path());
    let original = fs::read_to_string(&path).unwrap();

    let options = RewriteOptions {
        backup: true,
        ..Default::default()
    };
    let result = rewrite(&path, &options, |doc| doc.title = "renamed".into()).unwrap();

    let backup = result.backup.expect("backup path");
    assert_eq!(backups(dir.path()), [backup.clone()]);
    assert_eq!(fs::read_to_string(&backup).unwrap(), original);
    assert_eq!(store::load(&path).unwrap().title, "renamed");
}

#[test]
fn backups_go_to_configured_dir() {
    let dir = TempDir::new().unwrap();
    let path = food_file(dir.path());
    let backup_dir = dir.path().join("backups");

    let options = RewriteOptions {
        backup: true,
        backup_dir: Some(backup_dir.clone()),
        ..Default::default()
    };
    let result = rewrite(&path, &options, |doc| doc.title.push('!')).unwrap();

    let backup = result.backup.expect("backup path");
    assert_eq!(backup.parent(), Some(backup_dir.as_path()));
    assert!(backups(dir.path()).is_empty());
}

#[test]
fn locked_file_is_not_rewritten() {
    let dir = TempDir::new().unwrap();
    let path = food_file(dir.path());
    let original = fs::read_to_string(&path).unwrap();

    let _held = FileLock::acquire(&path).unwrap();
    let err = rewrite(&path, &RewriteOptions::default(), |doc| doc.title.clear()).unwrap_err();

    assert!(matches!(err, StoreError::Locked(_)));
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn lock_is_released_on_drop() {
    let dir = TempDir::new().unwrap();
    let path = food_file(dir.path());

    drop(FileLock::acquire(&path).unwrap());

    assert!(FileLock::acquire(&path).is_ok());
}

#[test]
fn local_images_append_to_untiered() {
    let dir = TempDir::new().unwrap();
    let path = food_file(dir.path());
    let image = dir.path().join("donut.gif");
    fs::write(&image, b"GIF89a\x01\x00\x01\x00").unwrap();

    let item = item_from_file(&image, None).unwrap();
    assert_eq!(item.name, "donut");
    assert!(item.source.as_str().starts_with("data:image/gif;base64,"));

    let result = rewrite(&path, &RewriteOptions::default(), |doc| {
        append_untiered(doc, vec![item])
    })
    .unwrap();

    assert_eq!(result.value, 1);
    let doc = store::load(&path).unwrap();
    assert_eq!(doc.untiered.items.last().map(|i| i.name.as_str()), Some("donut"));
}
