//! engine::session
//!
//! One editing session: the document plus everything transient around it.
//!
//! # State
//!
//! - the [`Document`], the single source of truth
//! - the unsaved-changes flag
//! - the [`DragController`]
//! - the row [`Palette`]
//! - the remote-import generation counter
//!
//! Every mutation goes through a `Session` method so the unsaved-changes
//! flag cannot drift from the document.
//!
//! # Overlapping imports
//!
//! [`Session::begin_import`] hands out an [`ImportTicket`]. Only the most
//! recently issued ticket may replace the document in
//! [`Session::finish_import`]; results for older tickets are dropped. The
//! import started last wins, whatever order the fetches complete in.

use std::fmt;

use log::{debug, warn};

use crate::core::model::{ContainerId, Document, Item, ModelError, Palette};
use crate::core::types::{HexColor, ItemId, RowName};

use super::drag::{DragController, DragPhase, DropOutcome};
use super::placement::{DropSurface, InsertionMarker, ItemSlot};

/// Proof that an import was started; see [`Session::finish_import`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct ImportTicket(u64);

/// What [`Session::finish_import`] did with a result.
#[derive(Debug)]
pub enum ImportOutcome<E> {
    /// The document was replaced.
    Applied,
    /// A newer import was started; the result was discarded.
    Stale,
    /// The import failed; the document is untouched.
    Failed(E),
}

/// An editing session.
///
/// # Example
///
/// ```
/// use tierlist::core::model::{Document, Palette};
/// use tierlist::engine::session::Session;
///
/// let mut session = Session::new(Document::new("t"), Palette::default());
/// session.add_row(0, "S").unwrap();
/// assert!(session.has_unsaved_changes());
///
/// session.mark_saved();
/// assert!(!session.has_unsaved_changes());
/// ```
#[derive(Debug)]
pub struct Session {
    document: Document,
    palette: Palette,
    drag: DragController,
    unsaved_changes: bool,
    import_generation: u64,
}

impl Session {
    pub fn new(document: Document, palette: Palette) -> Self {
        Self {
            document,
            palette,
            drag: DragController::new(),
            unsaved_changes: false,
            import_generation: 0,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved_changes
    }

    /// Clear the unsaved-changes flag after an export.
    pub fn mark_saved(&mut self) {
        self.unsaved_changes = false;
    }

    /// Swap in a freshly loaded document.
    ///
    /// Cancels any drag and clears the unsaved-changes flag.
    pub fn replace_document(&mut self, document: Document) {
        self.drag.cancel();
        self.document = document;
        self.unsaved_changes = false;
    }

    fn touch(&mut self) {
        self.unsaved_changes = true;
    }

    // =========================================================================
    // Document edits
    // =========================================================================

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.document.title = title.into();
        self.touch();
    }

    /// Insert an empty row; returns where it landed.
    ///
    /// Cancels any drag, since row positions shift.
    pub fn add_row(&mut self, at: usize, name: &str) -> Result<usize, ModelError> {
        let name = RowName::new(name)?;
        self.drag.cancel();
        let at = self.document.add_row(at, name, &self.palette);
        self.touch();
        Ok(at)
    }

    /// Remove a row, moving its items to untiered; returns how many moved.
    pub fn remove_row(&mut self, at: usize) -> Result<usize, ModelError> {
        let moved = self.document.remove_row(at)?;
        self.drag.cancel();
        self.touch();
        Ok(moved)
    }

    pub fn rename_row(&mut self, at: usize, name: &str) -> Result<(), ModelError> {
        self.document.rename_row(at, RowName::new(name)?)?;
        self.touch();
        Ok(())
    }

    pub fn recolor_row(&mut self, at: usize, color: &str) -> Result<(), ModelError> {
        self.document.recolor_row(at, HexColor::new(color)?)?;
        self.touch();
        Ok(())
    }

    /// Move an item directly, bypassing the drag controller.
    pub fn move_item(
        &mut self,
        source: ContainerId,
        source_index: usize,
        dest: ContainerId,
        dest_index: usize,
    ) -> Result<usize, ModelError> {
        let index = self
            .document
            .move_item(source, source_index, dest, dest_index)?;
        self.touch();
        Ok(index)
    }

    /// Append items to the untiered pool; returns how many were added.
    pub fn add_items(&mut self, items: impl IntoIterator<Item = Item>) -> usize {
        let before = self.document.untiered.items.len();
        self.document.untiered.items.extend(items);
        let added = self.document.untiered.items.len() - before;
        if added > 0 {
            self.touch();
        }
        added
    }

    // =========================================================================
    // Drag and drop
    // =========================================================================

    pub fn begin_drag(&mut self, slot: ItemSlot) -> Result<ItemId, ModelError> {
        self.drag.begin(&self.document, slot)
    }

    pub fn hover(&mut self, surface: DropSurface) {
        self.drag.enter(&self.document, surface);
    }

    pub fn leave(&mut self, surface: DropSurface) {
        self.drag.leave(surface);
    }

    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    pub fn drop(&mut self) -> DropOutcome {
        let outcome = self.drag.drop(&mut self.document);
        if outcome.is_mutation() {
            self.touch();
        }
        outcome
    }

    pub fn drop_at(&mut self, surface: DropSurface) -> DropOutcome {
        let outcome = self.drag.drop_at(&mut self.document, surface);
        if outcome.is_mutation() {
            self.touch();
        }
        outcome
    }

    pub fn drag_phase(&self) -> &DragPhase {
        self.drag.phase()
    }

    pub fn drag_marker(&self) -> Option<InsertionMarker> {
        self.drag.marker()
    }

    // =========================================================================
    // Remote import
    // =========================================================================

    /// Start an import; any import started earlier becomes stale.
    pub fn begin_import(&mut self) -> ImportTicket {
        self.import_generation += 1;
        debug!("import: generation {}", self.import_generation);
        ImportTicket(self.import_generation)
    }

    /// Apply the result of the import identified by `ticket`.
    ///
    /// Failures leave the document untouched. Results for a ticket that is
    /// no longer the latest are discarded.
    pub fn finish_import<E: fmt::Display>(
        &mut self,
        ticket: ImportTicket,
        result: Result<Document, E>,
    ) -> ImportOutcome<E> {
        if ticket.0 != self.import_generation {
            warn!(
                "discarding stale import (generation {}, latest {})",
                ticket.0, self.import_generation
            );
            return ImportOutcome::Stale;
        }
        match result {
            Ok(document) => {
                self.replace_document(document);
                ImportOutcome::Applied
            }
            Err(err) => {
                warn!("import failed: {err}");
                ImportOutcome::Failed(err)
            }
        }
    }
}
