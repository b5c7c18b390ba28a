//! core
//!
//! Core domain types, the document model, and its persistence.
//!
//! # Modules
//!
//! - [`types`] - Strong types: ItemId, HexColor, RowName, ImageSource
//! - [`model`] - Documents, rows, the untiered pool, and item moves
//! - [`schema`] - JSON wire format, including the legacy item form
//! - [`store`] - Atomic file writes, backups, and file locking
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid colors and names at construction
//! - The document is the only state that is ever persisted
//! - Every mutation validates before it changes anything

pub mod config;
pub mod model;
pub mod schema;
pub mod store;
pub mod types;
