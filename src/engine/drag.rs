//! engine::drag
//!
//! Drag state machine.
//!
//! # Phases
//!
//! ```text
//! Idle --begin--> Dragging --enter--> Hovering --leave--> Dragging
//!                    |                   |
//!                    +------drop/cancel--+--> Idle
//! ```
//!
//! `enter` never mutates the document; it only recomputes the insertion
//! marker. `drop` is the single mutation point and always leaves the
//! controller `Idle`, whatever the outcome.
//!
//! # Item identity
//!
//! The grab records the item's [`ItemId`]. At drop time the item is located
//! again, so a document edited mid-drag is handled: if the item is gone the
//! drop is a no-op.

use std::mem;

use log::debug;

use crate::core::model::{ContainerId, Document, Item, ModelError};
use crate::core::types::ItemId;

use super::placement::{self, DropSurface, DropTarget, InsertionMarker, ItemSlot, Placement};

/// The item being dragged and where it was picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grab {
    pub item: ItemId,
    pub origin: ItemSlot,
}

/// Current drag phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    /// An item is grabbed but not over any valid surface.
    Dragging(Grab),
    /// An item is grabbed and over `surface`.
    ///
    /// `marker` is `None` over trash.
    Hovering {
        grab: Grab,
        surface: DropSurface,
        marker: Option<InsertionMarker>,
    },
}

/// Why a drop changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOpReason {
    /// No drag in progress.
    NotDragging,
    /// Dropped while not over any surface.
    NoSurface,
    /// The hovered surface no longer exists.
    InvalidSurface,
    /// The grabbed item is not in the document any more.
    ItemMissing,
}

/// Result of [`DragController::drop`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// The item moved.
    Moved {
        item: ItemId,
        from: ItemSlot,
        to: Placement,
    },
    /// The item was dropped on trash and discarded.
    Deleted { item: Item, from: ItemSlot },
    /// Dropped where it already was.
    Unchanged,
    /// Nothing happened.
    NoOp(NoOpReason),
}

impl DropOutcome {
    /// Whether the document was changed.
    pub fn is_mutation(&self) -> bool {
        matches!(self, DropOutcome::Moved { .. } | DropOutcome::Deleted { .. })
    }
}

/// Tracks one drag gesture at a time.
///
/// # Example
///
/// ```
/// use tierlist::core::model::{ContainerId, Document, Item, Palette};
/// use tierlist::core::types::ImageSource;
/// use tierlist::engine::drag::{DragController, DropOutcome};
/// use tierlist::engine::placement::{DropSurface, ItemSlot};
///
/// let mut doc = Document::with_rows("t", &["S", "A"], &Palette::default());
/// doc.push_untiered(Item::new(ImageSource::new("data:image/png;base64,AA"), "cat"));
///
/// let mut drag = DragController::new();
/// drag.begin(&doc, ItemSlot::new(ContainerId::Untiered, 0)).unwrap();
/// drag.enter(&doc, DropSurface::Container(ContainerId::Row(1)));
/// assert!(drag.marker().is_some());
///
/// let outcome = drag.drop(&mut doc);
/// assert!(matches!(outcome, DropOutcome::Moved { .. }));
/// assert_eq!(doc.rows[1].items[0].name, "cat");
/// assert!(drag.marker().is_none());
/// ```
#[derive(Debug, Default)]
pub struct DragController {
    phase: DragPhase,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &DragPhase {
        &self.phase
    }

    pub fn is_dragging(&self) -> bool {
        !matches!(self.phase, DragPhase::Idle)
    }

    /// The grab in progress, if any.
    pub fn grab(&self) -> Option<Grab> {
        match self.phase {
            DragPhase::Idle => None,
            DragPhase::Dragging(grab) | DragPhase::Hovering { grab, .. } => Some(grab),
        }
    }

    /// The insertion marker, present only while hovering a placement surface.
    pub fn marker(&self) -> Option<InsertionMarker> {
        match self.phase {
            DragPhase::Hovering { marker, .. } => marker,
            _ => None,
        }
    }

    /// Pick up the item at `slot`.
    ///
    /// A drag already in progress is abandoned.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] if there is no item at `slot`.
    pub fn begin(&mut self, doc: &Document, slot: ItemSlot) -> Result<ItemId, ModelError> {
        let items = doc.items(slot.container).ok_or(ModelError::RowOutOfRange {
            index: row_index(slot.container),
            len: doc.rows.len(),
        })?;
        let item = items.get(slot.index).ok_or(ModelError::ItemOutOfRange {
            container: slot.container,
            index: slot.index,
            len: items.len(),
        })?;

        if self.is_dragging() {
            debug!("drag: abandoning previous drag");
        }
        let grab = Grab {
            item: item.id,
            origin: slot,
        };
        debug!("drag: begin {} at {}", grab.item, slot);
        self.phase = DragPhase::Dragging(grab);
        Ok(grab.item)
    }

    /// Pointer entered `surface`.
    ///
    /// Surfaces that do not exist keep the controller in `Dragging` with no
    /// marker. Ignored when idle.
    pub fn enter(&mut self, doc: &Document, surface: DropSurface) {
        let Some(grab) = self.grab() else {
            return;
        };
        let source = current_slot(doc, &grab);

        self.phase = match placement::resolve(doc, source, surface) {
            Some(target) => {
                let marker = target.marker();
                debug!("drag: hovering {surface}, marker {marker:?}");
                DragPhase::Hovering {
                    grab,
                    surface,
                    marker,
                }
            }
            None => {
                debug!("drag: {surface} is not a drop surface");
                DragPhase::Dragging(grab)
            }
        };
    }

    /// Pointer left `surface`.
    ///
    /// Only leaving the hovered surface has any effect.
    pub fn leave(&mut self, surface: DropSurface) {
        if let DragPhase::Hovering {
            grab,
            surface: hovered,
            ..
        } = self.phase
        {
            if hovered == surface {
                debug!("drag: left {surface}");
                self.phase = DragPhase::Dragging(grab);
            }
        }
    }

    /// Abandon the drag without touching the document.
    pub fn cancel(&mut self) {
        if self.is_dragging() {
            debug!("drag: cancelled");
        }
        self.phase = DragPhase::Idle;
    }

    /// Commit the drag against `doc`.
    ///
    /// The controller is `Idle` afterwards regardless of the outcome.
    pub fn drop(&mut self, doc: &mut Document) -> DropOutcome {
        let outcome = match mem::replace(&mut self.phase, DragPhase::Idle) {
            DragPhase::Idle => DropOutcome::NoOp(NoOpReason::NotDragging),
            DragPhase::Dragging(_) => DropOutcome::NoOp(NoOpReason::NoSurface),
            DragPhase::Hovering { grab, surface, .. } => commit(doc, grab, surface),
        };
        debug!("drag: drop -> {outcome:?}");
        outcome
    }

    /// Hover `surface` and drop in one step.
    pub fn drop_at(&mut self, doc: &mut Document, surface: DropSurface) -> DropOutcome {
        if !self.is_dragging() {
            return DropOutcome::NoOp(NoOpReason::NotDragging);
        }
        self.enter(doc, surface);
        if matches!(self.phase, DragPhase::Dragging(_)) {
            self.phase = DragPhase::Idle;
            return DropOutcome::NoOp(NoOpReason::InvalidSurface);
        }
        self.drop(doc)
    }
}

fn row_index(container: ContainerId) -> usize {
    match container {
        ContainerId::Row(index) => index,
        ContainerId::Untiered => 0,
    }
}

/// Where the grabbed item is now, falling back to where it was picked up.
fn current_slot(doc: &Document, grab: &Grab) -> ItemSlot {
    doc.locate(grab.item)
        .map(|(container, index)| ItemSlot::new(container, index))
        .unwrap_or(grab.origin)
}

fn commit(doc: &mut Document, grab: Grab, surface: DropSurface) -> DropOutcome {
    let Some((container, index)) = doc.locate(grab.item) else {
        return DropOutcome::NoOp(NoOpReason::ItemMissing);
    };
    let source = ItemSlot::new(container, index);

    match placement::resolve(doc, source, surface) {
        None => DropOutcome::NoOp(NoOpReason::InvalidSurface),
        Some(DropTarget::Trash) => match doc.remove_item(source.container, source.index) {
            Ok(item) => DropOutcome::Deleted { item, from: source },
            Err(_) => DropOutcome::NoOp(NoOpReason::ItemMissing),
        },
        Some(DropTarget::Place { placement, .. }) => {
            if placement.container == source.container && placement.index == source.index {
                return DropOutcome::Unchanged;
            }
            match doc.move_item(
                source.container,
                source.index,
                placement.container,
                placement.index,
            ) {
                Ok(index) => DropOutcome::Moved {
                    item: grab.item,
                    from: source,
                    to: Placement {
                        container: placement.container,
                        index,
                    },
                },
                Err(_) => DropOutcome::NoOp(NoOpReason::InvalidSurface),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Palette;
    use crate::core::types::ImageSource;

    fn doc() -> Document {
        let mut doc = Document::with_rows("t", &["S", "A"], &Palette::default());
        for name in ["A", "B", "C"] {
            doc.rows[0]
                .items
                .push(Item::new(ImageSource::new("data:image/png;base64,AA"), name));
        }
        doc
    }

    fn names(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    const ROW0: ContainerId = ContainerId::Row(0);
    const ROW1: ContainerId = ContainerId::Row(1);

    #[test]
    fn begin_on_missing_item_fails() {
        let doc = doc();
        let mut drag = DragController::new();
        assert!(drag.begin(&doc, ItemSlot::new(ROW1, 0)).is_err());
        assert!(drag.begin(&doc, ItemSlot::new(ContainerId::Row(9), 0)).is_err());
        assert_eq!(drag.phase(), &DragPhase::Idle);
    }

    #[test]
    fn enter_invalid_surface_stays_dragging() {
        let doc = doc();
        let mut drag = DragController::new();
        drag.begin(&doc, ItemSlot::new(ROW0, 0)).unwrap();
        drag.enter(&doc, DropSurface::Container(ContainerId::Row(7)));
        assert!(matches!(drag.phase(), DragPhase::Dragging(_)));
        assert!(drag.marker().is_none());
    }

    #[test]
    fn leave_other_surface_is_ignored() {
        let doc = doc();
        let mut drag = DragController::new();
        drag.begin(&doc, ItemSlot::new(ROW0, 0)).unwrap();
        drag.enter(&doc, DropSurface::Container(ROW1));

        drag.leave(DropSurface::Trash);
        assert!(drag.marker().is_some());

        drag.leave(DropSurface::Container(ROW1));
        assert!(matches!(drag.phase(), DragPhase::Dragging(_)));
        assert!(drag.marker().is_none());
    }

    #[test]
    fn drop_without_surface_is_noop() {
        let mut doc = doc();
        let before = doc.clone();
        let mut drag = DragController::new();
        drag.begin(&doc, ItemSlot::new(ROW0, 0)).unwrap();

        assert_eq!(drag.drop(&mut doc), DropOutcome::NoOp(NoOpReason::NoSurface));
        assert_eq!(doc, before);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn drop_when_idle_is_noop() {
        let mut doc = doc();
        let mut drag = DragController::new();
        assert_eq!(drag.drop(&mut doc), DropOutcome::NoOp(NoOpReason::NotDragging));
    }

    #[test]
    fn trash_deletes() {
        let mut doc = doc();
        let mut drag = DragController::new();
        drag.begin(&doc, ItemSlot::new(ROW0, 1)).unwrap();
        drag.enter(&doc, DropSurface::Trash);
        assert!(drag.marker().is_none());

        let outcome = drag.drop(&mut doc);
        assert!(matches!(outcome, DropOutcome::Deleted { ref item, .. } if item.name == "B"));
        assert_eq!(names(&doc.rows[0].items), ["A", "C"]);
    }

    #[test]
    fn vanished_item_is_noop() {
        let mut doc = doc();
        let mut drag = DragController::new();
        drag.begin(&doc, ItemSlot::new(ROW0, 0)).unwrap();
        drag.enter(&doc, DropSurface::Container(ROW1));

        doc.rows[0].items.remove(0);
        let before = doc.clone();

        assert_eq!(drag.drop(&mut doc), DropOutcome::NoOp(NoOpReason::ItemMissing));
        assert_eq!(doc, before);
    }

    #[test]
    fn drop_in_place_is_unchanged() {
        let mut doc = doc();
        let mut drag = DragController::new();
        drag.begin(&doc, ItemSlot::new(ROW0, 2)).unwrap();
        assert_eq!(
            drag.drop_at(&mut doc, DropSurface::Container(ROW0)),
            DropOutcome::Unchanged
        );
        assert_eq!(names(&doc.rows[0].items), ["A", "B", "C"]);
    }

    #[test]
    fn drop_at_invalid_surface() {
        let mut doc = doc();
        let mut drag = DragController::new();
        drag.begin(&doc, ItemSlot::new(ROW0, 0)).unwrap();
        assert_eq!(
            drag.drop_at(&mut doc, DropSurface::RowHeader(4)),
            DropOutcome::NoOp(NoOpReason::InvalidSurface)
        );
        assert!(!drag.is_dragging());
    }

    #[test]
    fn item_moved_mid_drag_is_found_again() {
        let mut doc = doc();
        let mut drag = DragController::new();
        drag.begin(&doc, ItemSlot::new(ROW0, 2)).unwrap();

        // Someone else reorders the row while the pointer is held.
        doc.move_item(ROW0, 2, ROW0, 0).unwrap();

        drag.enter(&doc, DropSurface::Container(ROW1));
        let outcome = drag.drop(&mut doc);

        assert!(matches!(
            outcome,
            DropOutcome::Moved { from, .. } if from == ItemSlot::new(ROW0, 0)
        ));
        assert_eq!(names(&doc.rows[1].items), ["C"]);
    }
}
