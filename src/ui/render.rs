//! ui::render
//!
//! Plain-text view of a document.
//!
//! The view is always regenerated from the [`Document`]; nothing here holds
//! state. While a drag is hovering, the insertion marker is drawn as `^` in
//! the gap where the item would land and the grabbed item is prefixed with
//! `*`.
//!
//! ```text
//! Snacks
//! S        #ff7f7f | chips ^ fries
//! A        #ffbf7f |
//! untiered         | *cat
//! ```

use crate::core::model::{ContainerId, Document, Item};
use crate::core::types::ItemId;
use crate::engine::placement::InsertionMarker;

const UNTIERED_LABEL: &str = "untiered";
const MARKER: &str = "^";

/// Drag decorations for [`render_with`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub marker: Option<InsertionMarker>,
    pub grabbed: Option<ItemId>,
    /// Prefix each item with its index.
    pub indices: bool,
}

/// Render without drag decorations.
pub fn render_document(doc: &Document) -> String {
    render_with(doc, &RenderOptions::default())
}

/// Render with drag decorations.
pub fn render_with(doc: &Document, options: &RenderOptions) -> String {
    let width = doc
        .rows
        .iter()
        .map(|row| row.name.as_str().chars().count())
        .chain(std::iter::once(UNTIERED_LABEL.len()))
        .max()
        .unwrap_or(0);

    let mut lines = vec![doc.title.clone()];
    for (index, row) in doc.rows.iter().enumerate() {
        let head = format!("{:<width$} {}", row.name.as_str(), row.color.as_str());
        lines.push(container_line(
            head,
            ContainerId::Row(index),
            &row.items,
            options,
        ));
    }
    let head = format!("{:<width$} {:7}", UNTIERED_LABEL, "");
    lines.push(container_line(
        head,
        ContainerId::Untiered,
        &doc.untiered.items,
        options,
    ));

    lines.join("\n")
}

fn container_line(
    head: String,
    container: ContainerId,
    items: &[Item],
    options: &RenderOptions,
) -> String {
    let gap = options
        .marker
        .filter(|marker| marker.container == container)
        .map(|marker| marker.gap);

    let mut line = head;
    line.push_str(" |");
    for (index, item) in items.iter().enumerate() {
        if gap == Some(index) {
            line.push(' ');
            line.push_str(MARKER);
        }
        line.push(' ');
        line.push_str(&item_label(index, item, options));
    }
    if gap.is_some_and(|gap| gap >= items.len()) {
        line.push(' ');
        line.push_str(MARKER);
    }
    line
}

fn item_label(index: usize, item: &Item, options: &RenderOptions) -> String {
    let name = if item.name.is_empty() {
        "<unnamed>"
    } else {
        item.name.as_str()
    };
    let grabbed = if options.grabbed == Some(item.id) { "*" } else { "" };
    if options.indices {
        format!("{grabbed}{index}:{name}")
    } else {
        format!("{grabbed}{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Palette;
    use crate::core::types::ImageSource;

    fn item(name: &str) -> Item {
        Item::new(ImageSource::new("data:image/png;base64,AA"), name)
    }

    #[test]
    fn marker_at_end_of_row() {
        let mut doc = Document::with_rows("t", &["S"], &Palette::default());
        doc.rows[0].items.push(item("a"));
        let options = RenderOptions {
            marker: Some(InsertionMarker {
                container: ContainerId::Row(0),
                gap: 1,
            }),
            ..Default::default()
        };

        let out = render_with(&doc, &options);

        assert!(out.lines().nth(1).unwrap().ends_with("| a ^"));
    }

    #[test]
    fn unnamed_items_are_labelled() {
        let mut doc = Document::new("t");
        doc.push_untiered(item(""));
        assert!(render_document(&doc).ends_with("| <unnamed>"));
    }

    #[test]
    fn no_trailing_whitespace() {
        let doc = Document::with_rows("t", &["S", "A"], &Palette::default());
        for line in render_document(&doc).lines() {
            assert_eq!(line, line.trim_end());
        }
    }
}
