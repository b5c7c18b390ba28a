//! core::schema
//!
//! JSON wire format for tierlist documents.
//!
//! # Format
//!
//! ```text
//! Document  = { title: string, rows: RowEntry[], untiered?: ItemEntry[] }
//! RowEntry  = { name: string, color: "#rrggbb", imgs: ItemEntry[] }
//! ItemEntry = { src: DataURI, name: string } | DataURI
//! ```
//!
//! The bare-string `ItemEntry` is the legacy form. It is accepted on read
//! (as an item with an empty name) and never written back; serialization
//! always emits the object form. `untiered` is omitted when empty.
//!
//! # Strictness
//!
//! Shape errors that leave no usable document are [`FormatError`]s: a
//! non-object root, a missing or non-array `rows`, a non-array `untiered`,
//! a row without an `imgs` array, or an item entry that is neither form.
//! Cosmetic problems are repaired with a warning: a missing title or row
//! name becomes empty, a bad color is replaced from the palette, an
//! over-long row name is truncated.
//!
//! # Example
//!
//! ```
//! use tierlist::core::schema::{parse, serialize};
//!
//! let json = r##"{
//!     "title": "Snacks",
//!     "rows": [{ "name": "S", "color": "#ff7f7f", "imgs": ["data:image/png;base64,AA"] }]
//! }"##;
//!
//! let doc = parse(json).unwrap();
//! assert_eq!(doc.rows[0].items[0].name, "");
//!
//! let out = serialize(&doc).unwrap();
//! assert!(out.contains(r#""imgs":[{"src":"data:image/png;base64,AA","name":""}]"#));
//! assert!(!out.contains("untiered"));
//! ```

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::core::model::{Document, Item, Palette, RowContainer, UntieredContainer};
use crate::core::types::{HexColor, ImageSource, RowName};

/// Errors from reading or writing the wire format.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("invalid JSON: {0}")]
    Syntax(String),

    #[error("document root must be a JSON object")]
    RootNotObject,

    #[error("document must have a \"rows\" array")]
    RowsNotArray,

    #[error("\"untiered\" must be an array when present")]
    UntieredNotArray,

    #[error("row {index} must be an object")]
    RowNotObject { index: usize },

    #[error("row {index} has no \"imgs\" array")]
    RowMissingItems { index: usize },

    #[error("item {index} in {location} must be a string or an object with a string \"src\"")]
    InvalidItem { location: String, index: usize },

    #[error("failed to encode document: {0}")]
    Encode(String),
}

/// One item entry as it appears on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ItemEntry {
    Object {
        src: String,
        #[serde(default)]
        name: Option<String>,
    },
    Legacy(String),
}

impl From<ItemEntry> for Item {
    fn from(entry: ItemEntry) -> Self {
        match entry {
            ItemEntry::Object { src, name } => {
                Item::new(ImageSource::new(src), name.unwrap_or_default())
            }
            ItemEntry::Legacy(src) => Item::new(ImageSource::new(src), ""),
        }
    }
}

#[derive(Serialize)]
struct ItemOut<'a> {
    src: &'a str,
    name: &'a str,
}

impl<'a> From<&'a Item> for ItemOut<'a> {
    fn from(item: &'a Item) -> Self {
        Self {
            src: item.source.as_str(),
            name: &item.name,
        }
    }
}

#[derive(Serialize)]
struct RowOut<'a> {
    name: &'a str,
    color: &'a str,
    imgs: Vec<ItemOut<'a>>,
}

#[derive(Serialize)]
struct DocumentOut<'a> {
    title: &'a str,
    rows: Vec<RowOut<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    untiered: Vec<ItemOut<'a>>,
}

impl<'a> From<&'a Document> for DocumentOut<'a> {
    fn from(doc: &'a Document) -> Self {
        Self {
            title: &doc.title,
            rows: doc
                .rows
                .iter()
                .map(|row| RowOut {
                    name: row.name.as_str(),
                    color: row.color.as_str(),
                    imgs: row.items.iter().map(ItemOut::from).collect(),
                })
                .collect(),
            untiered: doc.untiered.items.iter().map(ItemOut::from).collect(),
        }
    }
}

/// Serialize a document to compact JSON.
pub fn serialize(doc: &Document) -> Result<String, FormatError> {
    serde_json::to_string(&DocumentOut::from(doc)).map_err(|e| FormatError::Encode(e.to_string()))
}

/// Serialize a document to indented JSON.
pub fn serialize_pretty(doc: &Document) -> Result<String, FormatError> {
    serde_json::to_string_pretty(&DocumentOut::from(doc))
        .map_err(|e| FormatError::Encode(e.to_string()))
}

/// Parse JSON text into a document, repairing colors from the default palette.
pub fn parse(json: &str) -> Result<Document, FormatError> {
    parse_with(json, &Palette::default())
}

/// Parse JSON text into a document; missing or invalid row colors come from
/// `palette`.
pub fn parse_with(json: &str, palette: &Palette) -> Result<Document, FormatError> {
    let value: Value = serde_json::from_str(json).map_err(|e| FormatError::Syntax(e.to_string()))?;
    deserialize_with(&value, palette)
}

/// Build a document from an already-parsed JSON value.
///
/// Items get fresh [`ItemId`](crate::core::types::ItemId)s.
pub fn deserialize(value: &Value) -> Result<Document, FormatError> {
    deserialize_with(value, &Palette::default())
}

/// Like [`deserialize`], with row colors repaired from `palette`.
pub fn deserialize_with(value: &Value, palette: &Palette) -> Result<Document, FormatError> {
    let root = value.as_object().ok_or(FormatError::RootNotObject)?;

    let rows = root
        .get("rows")
        .and_then(Value::as_array)
        .ok_or(FormatError::RowsNotArray)?;

    let untiered = match root.get("untiered") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(entries)) => parse_items(entries, "untiered")?,
        Some(_) => return Err(FormatError::UntieredNotArray),
    };

    let title = match root.get("title") {
        Some(Value::String(title)) => title.clone(),
        Some(other) => {
            warn!("title is not a string ({other}), using empty title");
            String::new()
        }
        None => String::new(),
    };

    let rows = rows
        .iter()
        .enumerate()
        .map(|(index, row)| parse_row(index, row, palette))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Document {
        title,
        rows,
        untiered: UntieredContainer { items: untiered },
    })
}

fn parse_row(index: usize, value: &Value, palette: &Palette) -> Result<RowContainer, FormatError> {
    let row = value
        .as_object()
        .ok_or(FormatError::RowNotObject { index })?;

    let entries = row
        .get("imgs")
        .and_then(Value::as_array)
        .ok_or(FormatError::RowMissingItems { index })?;
    let items = parse_items(entries, &format!("row {index}"))?;

    let name = match row.get("name").and_then(Value::as_str) {
        Some(name) => {
            let clamped = RowName::clamped(name);
            if clamped.as_str().len() != name.len() {
                warn!("row {index} name truncated to {} characters", clamped.as_str().chars().count());
            }
            clamped
        }
        None => RowName::default(),
    };

    let color = match row.get("color").and_then(Value::as_str).map(HexColor::new) {
        Some(Ok(color)) => color,
        Some(Err(err)) => {
            warn!("row {index}: {err}, using palette color");
            palette.color_for(index)
        }
        None => palette.color_for(index),
    };

    Ok(RowContainer { name, color, items })
}

fn parse_items(entries: &[Value], location: &str) -> Result<Vec<Item>, FormatError> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            ItemEntry::deserialize(entry)
                .map(Item::from)
                .map_err(|_| FormatError::InvalidItem {
                    location: location.to_string(),
                    index,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_non_object_root() {
        assert!(matches!(
            deserialize(&json!([1, 2])),
            Err(FormatError::RootNotObject)
        ));
    }

    #[test]
    fn rejects_missing_rows() {
        assert!(matches!(
            deserialize(&json!({ "title": "x" })),
            Err(FormatError::RowsNotArray)
        ));
        assert!(matches!(
            deserialize(&json!({ "title": "x", "rows": {} })),
            Err(FormatError::RowsNotArray)
        ));
    }

    #[test]
    fn rejects_non_array_untiered() {
        let value = json!({ "title": "x", "rows": [], "untiered": "nope" });
        assert!(matches!(
            deserialize(&value),
            Err(FormatError::UntieredNotArray)
        ));
    }

    #[test]
    fn null_untiered_is_absent() {
        let doc = deserialize(&json!({ "title": "x", "rows": [], "untiered": null })).unwrap();
        assert!(doc.untiered.items.is_empty());
    }

    #[test]
    fn rejects_row_without_items() {
        let value = json!({ "rows": [{ "name": "S", "color": "#ffffff" }] });
        assert!(matches!(
            deserialize(&value),
            Err(FormatError::RowMissingItems { index: 0 })
        ));
    }

    #[test]
    fn rejects_non_object_row() {
        let value = json!({ "rows": [{ "name": "S", "imgs": [] }, 7] });
        assert!(matches!(
            deserialize(&value),
            Err(FormatError::RowNotObject { index: 1 })
        ));
    }

    #[test]
    fn rejects_unusable_item() {
        let value = json!({ "rows": [], "untiered": [{ "name": "no src" }] });
        let err = deserialize(&value).unwrap_err();
        assert!(matches!(err, FormatError::InvalidItem { index: 0, .. }));
        assert!(err.to_string().contains("untiered"));
    }

    #[test]
    fn syntax_error_is_format_error() {
        assert!(matches!(parse("{ not json"), Err(FormatError::Syntax(_))));
    }

    #[test]
    fn item_name_defaults_to_empty() {
        let value = json!({ "rows": [], "untiered": [{ "src": "data:image/gif;base64,AA" }] });
        let doc = deserialize(&value).unwrap();
        assert_eq!(doc.untiered.items[0].name, "");
    }

    #[test]
    fn repairs_bad_color_from_palette() {
        let value = json!({ "rows": [
            { "name": "S", "color": "#ffffff", "imgs": [] },
            { "name": "A", "color": "orange", "imgs": [] },
        ]});
        let doc = deserialize(&value).unwrap();
        assert_eq!(doc.rows[1].color, Palette::default().color_for(1));
    }

    #[test]
    fn null_item_name_reads_as_empty() {
        let value = json!({ "rows": [{ "name": "S", "imgs": [
            { "src": "data:image/gif;base64,AA", "name": null },
        ]}]});
        let doc = deserialize(&value).unwrap();
        assert_eq!(doc.rows[0].items[0].name, "");
        assert_eq!(doc.rows[0].items[0].source.as_str(), "data:image/gif;base64,AA");
    }

    #[test]
    fn repairs_colors_from_given_palette() {
        let palette = Palette::parse(&["#111111", "#222222"]).unwrap();
        let json = r##"{ "rows": [
            { "name": "S", "imgs": [] },
            { "name": "A", "color": "orange", "imgs": [] },
            { "name": "B", "color": "#abcdef", "imgs": [] }
        ]}"##;

        let doc = parse_with(json, &palette).unwrap();

        assert_eq!(doc.rows[0].color.as_str(), "#111111");
        assert_eq!(doc.rows[1].color.as_str(), "#222222");
        assert_eq!(doc.rows[2].color.as_str(), "#abcdef");
    }

    #[test]
    fn truncates_long_row_names() {
        let value = json!({ "rows": [{ "name": "n".repeat(500), "imgs": [] }] });
        let doc = deserialize(&value).unwrap();
        assert_eq!(doc.rows[0].name.as_str().len(), 200);
    }

    #[test]
    fn untiered_key_present_when_non_empty() {
        let mut doc = Document::new("t");
        doc.push_untiered(Item::new(ImageSource::new("data:image/png;base64,AA"), "a"));
        let value: Value = serde_json::from_str(&serialize(&doc).unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "title": "t",
                "rows": [],
                "untiered": [{ "src": "data:image/png;base64,AA", "name": "a" }]
            })
        );
    }
}
