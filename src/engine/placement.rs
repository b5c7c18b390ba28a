//! engine::placement
//!
//! Where a dragged item lands if it is dropped now.
//!
//! # Coordinates
//!
//! Two index spaces are in play:
//!
//! - The **gap** is a position between items of the destination as it looks
//!   *before* the dragged item is detached (`0..=len`). This is what the
//!   insertion marker shows.
//! - The **placement index** is where the item ends up *after* it has been
//!   detached from its source. When source and destination are the same
//!   container and the source sits before the gap, the placement index is
//!   one less than the gap.
//!
//! # Hover rules
//!
//! | Surface                     | Gap                                        |
//! |-----------------------------|--------------------------------------------|
//! | row body / untiered pool    | after the last item (`0` when empty)       |
//! | row header                  | same as the row body                       |
//! | item `T` at index `i`       | `i`, or `i + 1` when `T` follows the source |
//! | trash                       | none; dropping deletes                     |
//!
//! Hovering an item means "take its slot": the dragged item ends at index
//! `i` in every case.
//!
//! # Example
//!
//! ```
//! use tierlist::core::model::{ContainerId, Document, Item, Palette};
//! use tierlist::core::types::ImageSource;
//! use tierlist::engine::placement::{resolve, DropSurface, DropTarget, ItemSlot};
//!
//! let mut doc = Document::with_rows("t", &["S"], &Palette::default());
//! for name in ["A", "B", "C", "D"] {
//!     doc.rows[0].items.push(Item::new(ImageSource::new("data:image/png;base64,AA"), name));
//! }
//!
//! let source = ItemSlot::new(ContainerId::Row(0), 0);
//! let over_d = DropSurface::Item(ItemSlot::new(ContainerId::Row(0), 3));
//!
//! match resolve(&doc, source, over_d) {
//!     Some(DropTarget::Place { marker, placement }) => {
//!         assert_eq!(marker.gap, 4);
//!         assert_eq!(placement.index, 3);
//!     }
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::core::model::{ContainerId, Document};

/// Errors from parsing surface and slot addresses.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("empty address")]
    Empty,

    #[error("invalid number '{0}' in address")]
    InvalidNumber(String),

    #[error("unrecognized address '{0}' (expected row:N, untiered, header:N, trash, or row:N:I / untiered:I)")]
    Unrecognized(String),
}

/// An item position: container plus index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemSlot {
    pub container: ContainerId,
    pub index: usize,
}

impl ItemSlot {
    pub fn new(container: ContainerId, index: usize) -> Self {
        Self { container, index }
    }
}

impl fmt::Display for ItemSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.container {
            ContainerId::Row(row) => write!(f, "row:{row}:{}", self.index),
            ContainerId::Untiered => write!(f, "untiered:{}", self.index),
        }
    }
}

/// Parse `row:N:I` or `untiered:I`.
///
/// ```
/// use tierlist::core::model::ContainerId;
/// use tierlist::engine::placement::ItemSlot;
///
/// let slot: ItemSlot = "row:2:0".parse().unwrap();
/// assert_eq!(slot, ItemSlot::new(ContainerId::Row(2), 0));
/// assert!("row:2".parse::<ItemSlot>().is_err());
/// ```
impl FromStr for ItemSlot {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<DropSurface>()? {
            DropSurface::Item(slot) => Ok(slot),
            _ => Err(AddressError::Unrecognized(s.to_string())),
        }
    }
}

/// Something the pointer can be over while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropSurface {
    /// A row body or the untiered pool.
    Container(ContainerId),
    /// The label cell at the start of a row.
    RowHeader(usize),
    /// A specific item.
    Item(ItemSlot),
    /// The delete area.
    Trash,
}

impl fmt::Display for DropSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropSurface::Container(ContainerId::Row(row)) => write!(f, "row:{row}"),
            DropSurface::Container(ContainerId::Untiered) => write!(f, "untiered"),
            DropSurface::RowHeader(row) => write!(f, "header:{row}"),
            DropSurface::Item(slot) => write!(f, "{slot}"),
            DropSurface::Trash => write!(f, "trash"),
        }
    }
}

/// Parse a surface address.
///
/// ```
/// use tierlist::core::model::ContainerId;
/// use tierlist::engine::placement::{DropSurface, ItemSlot};
///
/// assert_eq!("trash".parse(), Ok(DropSurface::Trash));
/// assert_eq!("header:1".parse(), Ok(DropSurface::RowHeader(1)));
/// assert_eq!("untiered".parse(), Ok(DropSurface::Container(ContainerId::Untiered)));
/// assert_eq!(
///     "untiered:4".parse(),
///     Ok(DropSurface::Item(ItemSlot::new(ContainerId::Untiered, 4)))
/// );
/// ```
impl FromStr for DropSurface {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AddressError::Empty);
        }

        let parts: Vec<&str> = trimmed.split(':').collect();
        match parts.as_slice() {
            ["trash"] => Ok(DropSurface::Trash),
            ["untiered"] => Ok(DropSurface::Container(ContainerId::Untiered)),
            ["untiered", index] => Ok(DropSurface::Item(ItemSlot::new(
                ContainerId::Untiered,
                number(index)?,
            ))),
            ["row", row] => Ok(DropSurface::Container(ContainerId::Row(number(row)?))),
            ["row", row, index] => Ok(DropSurface::Item(ItemSlot::new(
                ContainerId::Row(number(row)?),
                number(index)?,
            ))),
            ["header", row] => Ok(DropSurface::RowHeader(number(row)?)),
            _ => Err(AddressError::Unrecognized(trimmed.to_string())),
        }
    }
}

fn number(part: &str) -> Result<usize, AddressError> {
    part.parse::<usize>()
        .map_err(|_| AddressError::InvalidNumber(part.to_string()))
}

/// The visual insertion point: a gap in pre-removal coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertionMarker {
    pub container: ContainerId,
    pub gap: usize,
}

/// Final position of a moved item, in post-removal coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub container: ContainerId,
    pub index: usize,
}

/// What dropping over a surface would do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    Place {
        marker: InsertionMarker,
        placement: Placement,
    },
    Trash,
}

impl DropTarget {
    /// The marker to show, if any.
    pub fn marker(&self) -> Option<InsertionMarker> {
        match self {
            DropTarget::Place { marker, .. } => Some(*marker),
            DropTarget::Trash => None,
        }
    }
}

/// Decrement `gap` when the source sits before it in the same container.
pub fn adjust_for_source(source: ItemSlot, container: ContainerId, gap: usize) -> usize {
    if source.container == container && source.index < gap {
        gap - 1
    } else {
        gap
    }
}

/// Gap the marker is drawn at when hovering `surface`.
///
/// Returns `None` for trash and for surfaces that do not exist in `doc`.
pub fn marker_gap(doc: &Document, source: ItemSlot, surface: DropSurface) -> Option<InsertionMarker> {
    let (container, gap) = match surface {
        DropSurface::Container(container) => (container, doc.items(container)?.len()),
        DropSurface::RowHeader(row) => {
            let container = ContainerId::Row(row);
            (container, doc.items(container)?.len())
        }
        DropSurface::Item(target) => {
            let len = doc.items(target.container)?.len();
            if target.index >= len {
                return None;
            }
            let follows_source =
                target.container == source.container && target.index > source.index;
            let gap = if follows_source {
                target.index + 1
            } else {
                target.index
            };
            (target.container, gap)
        }
        DropSurface::Trash => return None,
    };
    Some(InsertionMarker { container, gap })
}

/// Resolve what a drop of the item at `source` over `surface` would do.
///
/// Never mutates `doc`. Returns `None` when the surface does not exist.
pub fn resolve(doc: &Document, source: ItemSlot, surface: DropSurface) -> Option<DropTarget> {
    if surface == DropSurface::Trash {
        return Some(DropTarget::Trash);
    }
    let marker = marker_gap(doc, source, surface)?;
    let placement = Placement {
        container: marker.container,
        index: adjust_for_source(source, marker.container, marker.gap),
    };
    Some(DropTarget::Place { marker, placement })
}
