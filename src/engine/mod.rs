//! engine
//!
//! Drag-and-drop placement and the editing session around it.
//!
//! # Architecture
//!
//! The engine is the only layer that mutates a document in response to
//! pointer input:
//!
//! 1. **Placement** ([`placement`]): pure functions from (document, source,
//!    hovered surface) to an insertion marker and a final index
//! 2. **Drag** ([`drag`]): the Idle / Dragging / Hovering state machine;
//!    `drop` is its single mutation point
//! 3. **Session** ([`session`]): owns the document, the drag controller, the
//!    unsaved-changes flag and the import generation counter
//!
//! ```text
//! pointer event -> Session -> DragController -> placement::resolve
//!                                   |
//!                                 drop -> Document::move_item / remove_item
//! ```
//!
//! # Invariants
//!
//! - Hovering never mutates the document
//! - At most one insertion marker exists, and only while hovering a
//!   placement surface
//! - Every drop leaves the controller idle
//! - A drop that cannot be honored changes nothing

pub mod drag;
pub mod placement;
pub mod session;

pub use drag::{DragController, DragPhase, DropOutcome, Grab, NoOpReason};
pub use placement::{DropSurface, DropTarget, InsertionMarker, ItemSlot, Placement};
pub use session::{ImportOutcome, ImportTicket, Session};
