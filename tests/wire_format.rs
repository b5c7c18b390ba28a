//! Integration tests for the JSON wire format and file storage.

use serde_json::{json, Value};
use tempfile::TempDir;

use tierlist::core::model::{Document, Item, Palette};
use tierlist::core::schema::{self, FormatError};
use tierlist::core::store::{self, StoreError};
use tierlist::core::types::{ImageSource, MediaType};
use tierlist::engine::{ImportOutcome, Session};

const PNG: &str = "data:image/png;base64,iVBORw0KGgo=";
const GIF: &str = "data:image/gif;base64,R0lGODlh";

fn current_format() -> Value {
    json!({
        "title": "Snacks",
        "rows": [
            {"name": "S", "color": "#ff7f7f", "imgs": [
                {"src": PNG, "name": "chips"},
                {"src": GIF, "name": "fries"}
            ]},
            {"name": "A", "color": "#ffbf7f", "imgs": []}
        ],
        "untiered": [{"src": PNG, "name": "cake"}]
    })
}

#[test]
fn current_format_round_trips() {
    let original = current_format();
    let doc = schema::deserialize(&original).unwrap();
    let text = schema::serialize(&doc).unwrap();
    let reparsed: Value = serde_json::from_str(&text).unwrap();

    assert_eq!(reparsed, original);
}

#[test]
fn legacy_strings_are_upgraded_to_objects() {
    let legacy = json!({
        "title": "Old",
        "rows": [{"name": "S", "color": "#ff7f7f", "imgs": [PNG]}],
        "untiered": [GIF]
    });

    let doc = schema::deserialize(&legacy).unwrap();
    assert_eq!(doc.rows[0].items[0].name, "");

    let out: Value = serde_json::from_str(&schema::serialize(&doc).unwrap()).unwrap();
    assert_eq!(out["rows"][0]["imgs"][0], json!({"src": PNG, "name": ""}));
    assert_eq!(out["untiered"][0], json!({"src": GIF, "name": ""}));
}

#[test]
fn empty_untiered_is_omitted() {
    let doc = Document::with_rows("t", &["S"], &Palette::default());
    let out: Value = serde_json::from_str(&schema::serialize(&doc).unwrap()).unwrap();

    assert!(out.get("untiered").is_none());
}

#[test]
fn missing_rows_is_a_format_error() {
    let err = schema::parse(r#"{"title": "x"}"#).unwrap_err();
    assert!(matches!(err, FormatError::RowsNotArray));
}

#[test]
fn failed_import_leaves_session_document_unchanged() {
    let mut doc = Document::with_rows("keep me", &["S"], &Palette::default());
    doc.rows[0]
        .items
        .push(Item::new(ImageSource::from_bytes(MediaType::Gif, b"GIF89a"), "gif"));
    let mut session = Session::new(doc.clone(), Palette::default());

    let ticket = session.begin_import();
    let outcome = session.finish_import(ticket, schema::parse(r#"{"title": "x"}"#));

    assert!(matches!(
        outcome,
        ImportOutcome::Failed(FormatError::RowsNotArray)
    ));
    assert_eq!(session.document(), &doc);
}

#[test]
fn malformed_shapes_are_rejected() {
    let cases = [
        (json!([]), "array root"),
        (json!({"rows": {}}), "rows object"),
        (json!({"rows": [], "untiered": "x"}), "untiered string"),
        (json!({"rows": [1]}), "row number"),
        (json!({"rows": [{"name": "S"}]}), "row without imgs"),
        (json!({"rows": [{"imgs": [42]}]}), "item number"),
        (json!({"rows": [{"imgs": [{"name": "x"}]}]}), "item without src"),
    ];
    for (value, label) in cases {
        assert!(schema::deserialize(&value).is_err(), "{label} should fail");
    }
}

#[test]
fn lenient_fields_fall_back() {
    let doc = schema::deserialize(&json!({
        "rows": [{"color": "not a color", "imgs": []}],
        "untiered": null
    }))
    .unwrap();

    assert_eq!(doc.title, "");
    assert_eq!(doc.rows[0].name.as_str(), "");
    assert_eq!(doc.rows[0].color, Palette::default().color_for(0));
}

#[test]
fn store_save_then_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("list.json");
    let doc = schema::deserialize(&current_format()).unwrap();

    store::save(&path, &doc, true).unwrap();
    let loaded = store::load(&path).unwrap();

    assert_eq!(loaded, doc);
    assert!(!dir.path().join("list.json.tmp").exists());
}

#[test]
fn store_reports_invalid_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, r#"{"title": "x"}"#).unwrap();

    let err = store::load(&path).unwrap_err();
    assert!(matches!(err, StoreError::Format { .. }));
}
