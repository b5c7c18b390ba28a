//! core::model
//!
//! In-memory tierlist document: items, rows, the untiered pool.
//!
//! # Ownership
//!
//! Every [`Item`] lives in exactly one container. Moves detach and insert
//! within a single `&mut self` call, after all validation has passed, so no
//! caller ever observes an item in two containers or in none.
//!
//! # Identity
//!
//! Rows are addressed by position ([`ContainerId::Row`]); there is no
//! stable row id. Items carry a session-scoped [`ItemId`] so a drop can
//! find the grabbed item again.
//!
//! # Example
//!
//! ```
//! use tierlist::core::model::{ContainerId, Document, Item, Palette};
//! use tierlist::core::types::ImageSource;
//!
//! let mut doc = Document::with_rows("My list", &["S", "A"], &Palette::default());
//! doc.push_untiered(Item::new(ImageSource::new("data:image/png;base64,AA"), "cat"));
//!
//! doc.move_item(ContainerId::Untiered, 0, ContainerId::Row(0), 0).unwrap();
//! assert_eq!(doc.rows[0].items[0].name, "cat");
//! assert!(doc.untiered.items.is_empty());
//! ```

use thiserror::Error;

use crate::core::types::{HexColor, ImageSource, ItemId, RowName, TypeError};

/// Default document title.
pub const DEFAULT_TITLE: &str = "Tierlist";

/// Rows a new document starts with.
pub const DEFAULT_ROWS: [&str; 5] = ["S", "A", "B", "C", "D"];

const DEFAULT_PALETTE: [&str; 8] = [
    "#ff7f7f", "#ffbf7f", "#ffdf7f", "#ffff7f", "#bfff7f", "#7fff7f", "#7fffff", "#7fbfff",
];

/// Errors from document mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("row {index} does not exist (document has {len} rows)")]
    RowOutOfRange { index: usize, len: usize },

    #[error("no item at index {index} in {container} ({len} items)")]
    ItemOutOfRange {
        container: ContainerId,
        index: usize,
        len: usize,
    },

    #[error("palette must contain at least one color")]
    EmptyPalette,

    #[error(transparent)]
    Type(#[from] TypeError),
}

/// A draggable entry: an image and its display name.
///
/// Equality is structural (`source` and `name`); `id` is session identity
/// only and never leaves the process.
#[derive(Debug, Clone)]
pub struct Item {
    pub id: ItemId,
    pub source: ImageSource,
    pub name: String,
}

impl Item {
    /// Create an item with a fresh id.
    pub fn new(source: ImageSource, name: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            source,
            name: name.into(),
        }
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.name == other.name
    }
}

impl Eq for Item {}

/// Addresses one container of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerId {
    /// The row at this position in [`Document::rows`].
    Row(usize),
    /// The untiered pool.
    Untiered,
}

impl std::fmt::Display for ContainerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContainerId::Row(index) => write!(f, "row {index}"),
            ContainerId::Untiered => write!(f, "untiered"),
        }
    }
}

/// A named, colored tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowContainer {
    pub name: RowName,
    pub color: HexColor,
    pub items: Vec<Item>,
}

impl RowContainer {
    /// Create an empty row.
    pub fn new(name: RowName, color: HexColor) -> Self {
        Self {
            name,
            color,
            items: Vec::new(),
        }
    }
}

/// Items not yet assigned to a row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UntieredContainer {
    pub items: Vec<Item>,
}

/// Repeating row colors, keyed by row position.
///
/// # Example
///
/// ```
/// use tierlist::core::model::Palette;
///
/// let palette = Palette::default();
/// assert_eq!(palette.color_for(0), palette.color_for(palette.len()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette(Vec<HexColor>);

impl Palette {
    /// Build a palette from explicit colors.
    pub fn new(colors: Vec<HexColor>) -> Result<Self, ModelError> {
        if colors.is_empty() {
            return Err(ModelError::EmptyPalette);
        }
        Ok(Self(colors))
    }

    /// Parse a palette from `#rrggbb` strings.
    pub fn parse<S: AsRef<str>>(colors: &[S]) -> Result<Self, ModelError> {
        let colors = colors
            .iter()
            .map(|c| HexColor::new(c.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    /// Color for the row at `position`, wrapping around.
    pub fn color_for(&self, position: usize) -> HexColor {
        self.0[position % self.0.len()].clone()
    }

    pub fn colors(&self) -> &[HexColor] {
        &self.0
    }

    /// Number of distinct colors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; a palette holds at least one color.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self(
            DEFAULT_PALETTE
                .iter()
                .filter_map(|c| HexColor::new(*c).ok())
                .collect(),
        )
    }
}

/// The serializable root: title, ordered rows, untiered pool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub rows: Vec<RowContainer>,
    pub untiered: UntieredContainer,
}

impl Document {
    /// Create an empty document with no rows.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rows: Vec::new(),
            untiered: UntieredContainer::default(),
        }
    }

    /// Create a document with named empty rows colored from `palette`.
    ///
    /// Names longer than the row-name limit are truncated.
    pub fn with_rows<S: AsRef<str>>(
        title: impl Into<String>,
        names: &[S],
        palette: &Palette,
    ) -> Self {
        let rows = names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                RowContainer::new(RowName::clamped(name.as_ref()), palette.color_for(i))
            })
            .collect();
        Self {
            title: title.into(),
            rows,
            untiered: UntieredContainer::default(),
        }
    }

    /// Items of a container, if it exists.
    pub fn items(&self, container: ContainerId) -> Option<&[Item]> {
        match container {
            ContainerId::Row(index) => self.rows.get(index).map(|row| row.items.as_slice()),
            ContainerId::Untiered => Some(&self.untiered.items),
        }
    }

    fn items_mut(&mut self, container: ContainerId) -> Result<&mut Vec<Item>, ModelError> {
        let len = self.rows.len();
        match container {
            ContainerId::Row(index) => self
                .rows
                .get_mut(index)
                .map(|row| &mut row.items)
                .ok_or(ModelError::RowOutOfRange { index, len }),
            ContainerId::Untiered => Ok(&mut self.untiered.items),
        }
    }

    /// Whether `container` exists in this document.
    pub fn contains_container(&self, container: ContainerId) -> bool {
        self.items(container).is_some()
    }

    /// All containers in display order: rows first, then untiered.
    pub fn containers(&self) -> impl Iterator<Item = (ContainerId, &[Item])> + '_ {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| (ContainerId::Row(i), row.items.as_slice()))
            .chain(std::iter::once((
                ContainerId::Untiered,
                self.untiered.items.as_slice(),
            )))
    }

    /// Find an item by id.
    pub fn locate(&self, id: ItemId) -> Option<(ContainerId, usize)> {
        self.containers().find_map(|(container, items)| {
            items
                .iter()
                .position(|item| item.id == id)
                .map(|index| (container, index))
        })
    }

    /// Total number of items across all containers.
    pub fn item_count(&self) -> usize {
        self.containers().map(|(_, items)| items.len()).sum()
    }

    /// Append an item to the untiered pool.
    pub fn push_untiered(&mut self, item: Item) {
        self.untiered.items.push(item);
    }

    /// Insert an item into a container, clamping `index` to `[0, len]`.
    ///
    /// Returns the index the item landed at.
    pub fn insert_item(
        &mut self,
        container: ContainerId,
        index: usize,
        item: Item,
    ) -> Result<usize, ModelError> {
        let items = self.items_mut(container)?;
        let index = index.min(items.len());
        items.insert(index, item);
        Ok(index)
    }

    /// Detach and return the item at `index`.
    pub fn remove_item(&mut self, container: ContainerId, index: usize) -> Result<Item, ModelError> {
        self.check_item(container, index)?;
        Ok(self.items_mut(container)?.remove(index))
    }

    /// Move an item between (or within) containers.
    ///
    /// Removes the item at `source_index` of `source`, then inserts it into
    /// `dest` at `dest_index` clamped to `[0, len]`, where `len` is measured
    /// after the removal. Both ends are validated before anything changes.
    ///
    /// Returns the final index of the moved item.
    pub fn move_item(
        &mut self,
        source: ContainerId,
        source_index: usize,
        dest: ContainerId,
        dest_index: usize,
    ) -> Result<usize, ModelError> {
        self.check_item(source, source_index)?;
        self.check_container(dest)?;

        let item = self.remove_item(source, source_index)?;
        self.insert_item(dest, dest_index, item)
    }

    /// Insert an empty row at `at` (clamped), colored by its position.
    pub fn add_row(&mut self, at: usize, name: RowName, palette: &Palette) -> usize {
        let at = at.min(self.rows.len());
        self.rows
            .insert(at, RowContainer::new(name, palette.color_for(at)));
        at
    }

    /// Remove a row, moving its items to the end of the untiered pool.
    ///
    /// Returns the number of items moved.
    pub fn remove_row(&mut self, at: usize) -> Result<usize, ModelError> {
        self.check_container(ContainerId::Row(at))?;
        let row = self.rows.remove(at);
        let moved = row.items.len();
        self.untiered.items.extend(row.items);
        Ok(moved)
    }

    /// Rename a row.
    pub fn rename_row(&mut self, at: usize, name: RowName) -> Result<(), ModelError> {
        let len = self.rows.len();
        let row = self
            .rows
            .get_mut(at)
            .ok_or(ModelError::RowOutOfRange { index: at, len })?;
        row.name = name;
        Ok(())
    }

    /// Change a row's color.
    pub fn recolor_row(&mut self, at: usize, color: HexColor) -> Result<(), ModelError> {
        let len = self.rows.len();
        let row = self
            .rows
            .get_mut(at)
            .ok_or(ModelError::RowOutOfRange { index: at, len })?;
        row.color = color;
        Ok(())
    }

    fn check_container(&self, container: ContainerId) -> Result<(), ModelError> {
        match container {
            ContainerId::Row(index) if index >= self.rows.len() => Err(ModelError::RowOutOfRange {
                index,
                len: self.rows.len(),
            }),
            _ => Ok(()),
        }
    }

    fn check_item(&self, container: ContainerId, index: usize) -> Result<(), ModelError> {
        self.check_container(container)?;
        let len = self.items(container).map_or(0, <[Item]>::len);
        if index >= len {
            return Err(ModelError::ItemOutOfRange {
                container,
                index,
                len,
            });
        }
        Ok(())
    }
}
